use async_trait::async_trait;
use tokio::sync::RwLock;

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::atomic::{AtomicI64, Ordering as AtomicOrdering},
};

use super::{NoteRepository, RepositoryError, SearchQuery};
use crate::models::{Note, Page, PageRequest, SortDirection, SortProperty};

/// Process-local note storage. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryRepository {
    notes: RwLock<BTreeMap<i64, Option<String>>>,
    next_id: AtomicI64,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    async fn page_of(
        &self,
        request: &PageRequest,
        filter: impl Fn(i64, Option<&str>) -> bool,
    ) -> Page<Note> {
        let mut matching: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|(id, text)| filter(**id, text.as_deref()))
            .map(|(id, text)| Note {
                id: *id,
                text: text.clone(),
            })
            .collect();

        matching.sort_by(|a, b| compare(a, b, request.sort.property));
        if request.sort.direction == SortDirection::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();

        Page::new(content, request, total)
    }
}

// Missing text sorts after present text, matching postgres NULLS LAST on ascending order.
fn compare(a: &Note, b: &Note, property: SortProperty) -> Ordering {
    match property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Text => (a.text.is_none(), &a.text, a.id).cmp(&(b.text.is_none(), &b.text, b.id)),
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn insert(&self, text: Option<String>) -> Result<Note, RepositoryError> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        self.notes.write().await.insert(id, text.clone());
        Ok(Note { id, text })
    }

    async fn update(&self, id: i64, text: Option<String>) -> Result<Option<Note>, RepositoryError> {
        let mut notes = self.notes.write().await;
        Ok(notes.get_mut(&id).map(|slot| {
            slot.clone_from(&text);
            Note { id, text }
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.notes.write().await.remove(&id).is_some())
    }

    async fn find(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        Ok(self
            .notes
            .read()
            .await
            .get(&id)
            .map(|text| Note {
                id,
                text: text.clone(),
            }))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Note>, RepositoryError> {
        Ok(self.page_of(request, |_, _| true).await)
    }

    async fn search(
        &self,
        query: &SearchQuery,
        request: &PageRequest,
    ) -> Result<Page<Note>, RepositoryError> {
        let page = match query {
            SearchQuery::Id(wanted) => self.page_of(request, |id, _| id == *wanted).await,
            SearchQuery::Text(needle) => {
                let needle = needle.to_lowercase();
                self.page_of(request, |_, text| {
                    text.is_some_and(|text| text.to_lowercase().contains(&needle))
                })
                .await
            }
        };
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sort;

    async fn seeded(texts: &[&str]) -> MemoryRepository {
        let repo = MemoryRepository::new();
        for text in texts {
            repo.insert(Some((*text).to_string())).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let repo = MemoryRepository::new();
        let first = repo.insert(Some("a".to_string())).await.unwrap();
        let second = repo.insert(None).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.text, None);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = seeded(&["a", "b"]).await;
        assert!(repo.delete(2).await.unwrap());
        let next = repo.insert(Some("c".to_string())).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_notes() {
        let repo = seeded(&["a"]).await;
        assert_eq!(repo.update(9, Some("x".to_string())).await.unwrap(), None);
        assert!(!repo.delete(9).await.unwrap());

        let updated = repo.update(1, Some("b".to_string())).await.unwrap().unwrap();
        assert_eq!(updated.text.as_deref(), Some("b"));
        assert_eq!(repo.find(1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn find_page_orders_and_windows() {
        let repo = seeded(&["c", "a", "b", "d", "e"]).await;

        let desc = PageRequest::new(0, 2, "id,desc".parse::<Sort>().unwrap());
        let page = repo.find_page(&desc).await.unwrap();
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.content.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5, 4]);

        let by_text = PageRequest::new(1, 2, "text".parse::<Sort>().unwrap());
        let page = repo.find_page(&by_text).await.unwrap();
        let texts: Vec<_> = page.content.iter().filter_map(|n| n.text.as_deref()).collect();
        assert_eq!(texts, vec!["c", "d"]);

        let beyond = PageRequest::new(10, 2, Sort::default());
        assert!(repo.find_page(&beyond).await.unwrap().content.is_empty());
    }

    #[tokio::test]
    async fn missing_text_sorts_last() {
        let repo = MemoryRepository::new();
        repo.insert(None).await.unwrap();
        repo.insert(Some("z".to_string())).await.unwrap();

        let page = repo
            .find_page(&PageRequest::new(0, 10, "text,asc".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(page.content[0].text.as_deref(), Some("z"));
        assert_eq!(page.content[1].text, None);
    }

    #[tokio::test]
    async fn search_matches_text_case_insensitively() {
        let repo = seeded(&["Buy milk", "walk the dog", "MILKSHAKE"]).await;
        let page = repo
            .search(&SearchQuery::parse("milk"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn search_by_id() {
        let repo = seeded(&["a", "b"]).await;
        let page = repo
            .search(&SearchQuery::parse("id:2"), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.content, vec![Note { id: 2, text: Some("b".to_string()) }]);
    }
}
