use std::fmt::Write;

use crate::{
    client::{ClientError, NoteClient},
    dto::NoteDto,
    models::{DEFAULT_PAGE_SIZE, PageRequest, Sort},
};

/// The note table. Each load replaces the whole local copy.
#[derive(Debug, Clone)]
pub struct NoteListView {
    notes: Vec<NoteDto>,
    page: u32,
    page_size: u32,
    sort: Sort,
    total_count: u64,
    loaded: bool,
}

impl Default for NoteListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl NoteListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            notes: Vec::new(),
            page: 0,
            page_size,
            sort: Sort::default(),
            total_count: 0,
            loaded: false,
        }
    }

    pub fn notes(&self) -> &[NoteDto] {
        &self.notes
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn has_next(&self) -> bool {
        (u64::from(self.page) + 1) * u64::from(self.page_size.max(1)) < self.total_count
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Fetches `page`. On failure the previously loaded rows stay in place.
    pub async fn load(&mut self, client: &NoteClient, page: u32) -> Result<(), ClientError> {
        let request = PageRequest::new(page, self.page_size, self.sort);
        let result = client.query(&request).await?;

        self.notes = result.notes;
        self.total_count = result.total_count;
        self.page = page;
        self.loaded = true;
        Ok(())
    }

    pub async fn reload(&mut self, client: &NoteClient) -> Result<(), ClientError> {
        self.load(client, self.page).await
    }

    pub fn render(&self) -> String {
        let mut out = String::from("== Notes ==  [create a new Note]\n");

        if self.notes.is_empty() {
            out.push_str("No notes found\n");
            return out;
        }

        let _ = writeln!(out, "{:>6} | Text", "ID");
        for note in &self.notes {
            let id = note.id.map_or_else(|| "-".to_string(), |id| id.to_string());
            let _ = writeln!(
                out,
                "{id:>6} | {}  [view] [edit] [delete]",
                note.text.as_deref().unwrap_or_default()
            );
        }

        let _ = write!(
            out,
            "Page {} - {} notes",
            self.page + 1,
            self.total_count
        );
        if self.has_previous() {
            out.push_str("  [prev]");
        }
        if self.has_next() {
            out.push_str("  [next]");
        }
        out.push('\n');
        out
    }
}
