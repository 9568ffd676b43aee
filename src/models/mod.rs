mod page;

pub use page::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, Sort, SortDirection, SortError,
    SortProperty,
};

/// Persisted note row. The id is always assigned once a note reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub text: Option<String>,
}
