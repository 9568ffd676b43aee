use crate::{
    client::{ClientError, NoteClient},
    dto::NoteDto,
    ui::{delete_dialog::NoteDeleteDialog, dialog::NoteDialog, route::Route},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupRequest {
    Create,
    Edit(i64),
    Delete(i64),
}

impl PopupRequest {
    pub const fn from_route(route: Route) -> Option<Self> {
        match route {
            Route::NoteNew => Some(Self::Create),
            Route::NoteEdit(id) => Some(Self::Edit(id)),
            Route::NoteDelete(id) => Some(Self::Delete(id)),
            Route::NoteList { .. } | Route::NoteDetail(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Creating(NoteDialog),
    Editing(NoteDialog),
    ConfirmingDelete(NoteDeleteDialog),
}

impl ModalState {
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Closed => None,
            Self::Creating(dialog) | Self::Editing(dialog) => Some(dialog.render()),
            Self::ConfirmingDelete(dialog) => Some(dialog.render()),
        }
    }
}

/// Holds at most one modal. Opening another one replaces the active modal once the new one has loaded.
#[derive(Debug, Default)]
pub struct PopupService {
    state: ModalState,
    return_to: Option<Route>,
}

impl PopupService {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut ModalState {
        &mut self.state
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    pub const fn dialog_mut(&mut self) -> Option<&mut NoteDialog> {
        match &mut self.state {
            ModalState::Creating(dialog) | ModalState::Editing(dialog) => Some(dialog),
            ModalState::Closed | ModalState::ConfirmingDelete(_) => None,
        }
    }

    /// Loads whatever the modal needs, then swaps it in for the active one.
    /// On failure the active modal, if any, is left untouched.
    pub async fn open(
        &mut self,
        client: &NoteClient,
        request: PopupRequest,
        return_to: Route,
    ) -> Result<(), ClientError> {
        let state = match request {
            PopupRequest::Create => ModalState::Creating(NoteDialog::new(NoteDto::default())),
            PopupRequest::Edit(id) => ModalState::Editing(NoteDialog::new(client.find(id).await?)),
            PopupRequest::Delete(id) => {
                ModalState::ConfirmingDelete(NoteDeleteDialog::new(client.find(id).await?))
            }
        };

        self.show(state, return_to);
        Ok(())
    }

    /// Replaces any active modal with `state`.
    pub fn show(&mut self, state: ModalState, return_to: Route) {
        if self.is_open() {
            tracing::debug!("Closing active modal before opening the next one");
            self.close();
        }
        if matches!(state, ModalState::Closed) {
            return;
        }
        self.state = state;
        self.return_to = Some(return_to);
    }

    /// Closes the modal and returns the route that was active when it opened.
    pub fn close(&mut self) -> Route {
        self.state = ModalState::Closed;
        self.return_to.take().unwrap_or_default()
    }
}
