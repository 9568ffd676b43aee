use crate::{
    client::{ClientError, NoteClient, Reply},
    dto::NoteDto,
};

/// Confirmation modal for deleting one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDeleteDialog {
    note: NoteDto,
}

impl NoteDeleteDialog {
    pub const fn new(note: NoteDto) -> Self {
        Self { note }
    }

    pub const fn note(&self) -> &NoteDto {
        &self.note
    }

    pub async fn confirm(&self, client: &NoteClient) -> Result<Reply<()>, ClientError> {
        let id = self.note.id.ok_or(ClientError::MissingId)?;
        client.delete(id).await
    }

    pub fn render(&self) -> String {
        let id = self
            .note
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        format!(
            "== Confirm delete operation ==\nAre you sure you want to delete Note {id}?\n[cancel] [confirm]\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[tokio::test]
    async fn confirm_requires_id() {
        let client = NoteClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let dialog = NoteDeleteDialog::new(NoteDto::new("orphan"));
        assert!(matches!(
            dialog.confirm(&client).await,
            Err(ClientError::MissingId)
        ));
    }

    #[test]
    fn render_names_the_note() {
        let dialog = NoteDeleteDialog::new(NoteDto::with_id(4, "x"));
        assert!(dialog.render().contains("delete Note 4?"));
    }
}
