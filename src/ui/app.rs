use crate::{
    client::NoteClient,
    config::Config,
    ui::{
        alert::{Alert, AlertService},
        detail::NoteDetailView,
        dialog::DialogError,
        list::NoteListView,
        popup::{ModalState, PopupRequest, PopupService},
        route::Route,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail,
}

/// Composition root of the client: owns every view and drives navigation.
///
/// Failures never change the visible screen; they are pushed to the alert banner.
#[derive(Debug)]
pub struct App {
    client: NoteClient,
    alerts: AlertService,
    popup: PopupService,
    list: NoteListView,
    detail: NoteDetailView,
    route: Route,
    screen: Screen,
}

impl App {
    pub fn new(client: NoteClient, config: &Config) -> Self {
        Self {
            client,
            alerts: AlertService::new(config.alert_capacity),
            popup: PopupService::new(),
            list: NoteListView::new(config.page_size),
            detail: NoteDetailView::default(),
            route: Route::default(),
            screen: Screen::List,
        }
    }

    pub const fn route(&self) -> Route {
        self.route
    }

    pub const fn screen(&self) -> Screen {
        self.screen
    }

    pub const fn alerts(&self) -> &AlertService {
        &self.alerts
    }

    pub const fn popup(&self) -> &PopupService {
        &self.popup
    }

    pub const fn list(&self) -> &NoteListView {
        &self.list
    }

    pub const fn detail(&self) -> &NoteDetailView {
        &self.detail
    }

    pub async fn navigate(&mut self, fragment: &str) {
        match Route::parse(fragment) {
            Ok(route) => self.go(route).await,
            Err(e) => self.alerts.error(e.to_string()),
        }
    }

    pub async fn go(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route);
        match route {
            Route::NoteList { page } => {
                match self.list.load(&self.client, page).await {
                    Ok(()) => {
                        if self.popup.is_open() {
                            self.popup.close();
                        }
                        self.route = route;
                        self.screen = Screen::List;
                    }
                    Err(e) => self.alerts.add(Alert::from_error(&e)),
                }
            }
            Route::NoteDetail(id) => match self.detail.load(&self.client, id).await {
                Ok(()) => {
                    if self.popup.is_open() {
                        self.popup.close();
                    }
                    self.route = route;
                    self.screen = Screen::Detail;
                }
                Err(e) => self.alerts.add(Alert::from_error(&e)),
            },
            Route::NoteNew | Route::NoteEdit(_) | Route::NoteDelete(_) => {
                self.open_popup(route).await;
            }
        }
    }

    async fn open_popup(&mut self, route: Route) {
        let Some(request) = PopupRequest::from_route(route) else {
            return;
        };

        if !self.list.is_loaded()
            && let Err(e) = self.list.load(&self.client, 0).await
        {
            self.alerts.add(Alert::from_error(&e));
        }

        let return_to = Route::NoteList {
            page: self.list.page(),
        };
        match self.popup.open(&self.client, request, return_to).await {
            Ok(()) => {
                self.route = route;
                self.screen = Screen::List;
            }
            Err(e) => self.alerts.add(Alert::from_error(&e)),
        }
    }

    /// Edits the draft of the open create/edit modal. Returns `false` when no form is open.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match self.popup.dialog_mut() {
            Some(dialog) => {
                dialog.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Saves the open form or confirms the open delete modal, then returns to the list.
    pub async fn submit(&mut self) {
        let outcome = match self.popup.state_mut() {
            ModalState::Creating(dialog) | ModalState::Editing(dialog) => dialog
                .save(&self.client)
                .await
                .map(|reply| reply.alert)
                .map_err(|e| match e {
                    DialogError::TextRequired => Alert::error("Text is required"),
                    DialogError::Client(e) => Alert::from_error(&e),
                }),
            ModalState::ConfirmingDelete(dialog) => dialog
                .confirm(&self.client)
                .await
                .map(|reply| reply.alert)
                .map_err(|e| Alert::from_error(&e)),
            ModalState::Closed => {
                self.alerts.add(Alert::warning("Nothing to submit"));
                return;
            }
        };

        match outcome {
            Ok(alert) => {
                if let Some(alert) = alert {
                    self.alerts.add(alert);
                }
                let back = self.popup.close();
                self.route = back;
                self.screen = Screen::List;
                self.go(back).await;
            }
            Err(alert) => self.alerts.add(alert),
        }
    }

    /// Dismisses the modal without touching the server.
    pub fn cancel(&mut self) {
        if self.popup.is_open() {
            self.route = self.popup.close();
            self.screen = Screen::List;
        }
    }

    pub async fn refresh(&mut self) {
        let route = match self.route {
            route if route.is_popup() => Route::NoteList {
                page: self.list.page(),
            },
            route => route,
        };
        self.go(route).await;
    }

    pub fn render(&self) -> String {
        let mut out = self.alerts.render();
        out.push_str(&match self.screen {
            Screen::List => self.list.render(),
            Screen::Detail => self.detail.render(),
        });
        if let Some(modal) = self.popup.state().render() {
            out.push_str("----------------------------------------\n");
            out.push_str(&modal);
        }
        out
    }
}
