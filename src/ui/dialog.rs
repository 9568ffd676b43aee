use crate::{
    client::{ClientError, NoteClient, Reply},
    dto::NoteDto,
};

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("text is required")]
    TextRequired,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Modal form creating a note (no id) or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDialog {
    note: NoteDto,
}

impl NoteDialog {
    pub const fn new(note: NoteDto) -> Self {
        Self { note }
    }

    pub const fn note(&self) -> &NoteDto {
        &self.note
    }

    pub const fn is_new(&self) -> bool {
        self.note.id.is_none()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.note.text = Some(text.into());
    }

    /// Creates or updates the draft. Blank text is rejected before any request is made.
    pub async fn save(&self, client: &NoteClient) -> Result<Reply<NoteDto>, DialogError> {
        let has_text = self
            .note
            .text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        if !has_text {
            return Err(DialogError::TextRequired);
        }

        let reply = if self.is_new() {
            client.create(&self.note).await?
        } else {
            client.update(&self.note).await?
        };
        Ok(reply)
    }

    pub fn render(&self) -> String {
        let title = if self.is_new() {
            "Create a Note"
        } else {
            "Edit Note"
        };
        let id = self
            .note
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let text = self.note.text.as_deref().unwrap_or_default();

        format!("== {title} ==\nID:   {id}\nText: [{text}]\n[cancel] [save]\n")
    }
}
