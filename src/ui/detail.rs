use crate::{
    client::{ClientError, NoteClient},
    dto::NoteDto,
};

#[derive(Debug, Clone, Default)]
pub struct NoteDetailView {
    note: Option<NoteDto>,
}

impl NoteDetailView {
    pub const fn note(&self) -> Option<&NoteDto> {
        self.note.as_ref()
    }

    pub async fn load(&mut self, client: &NoteClient, id: i64) -> Result<(), ClientError> {
        self.note = Some(client.find(id).await?);
        Ok(())
    }

    pub fn render(&self) -> String {
        match &self.note {
            None => "== Note ==\nNothing loaded\n[back]\n".to_string(),
            Some(note) => format!(
                "== Note {} ==\nText: {}\n[back] [edit]\n",
                note.id.unwrap_or_default(),
                note.text.as_deref().unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_before_and_after_load() {
        let mut view = NoteDetailView::default();
        assert!(view.render().contains("Nothing loaded"));

        view.note = Some(NoteDto::with_id(2, "hello"));
        assert_eq!(view.render(), "== Note 2 ==\nText: hello\n[back] [edit]\n");
    }
}
