use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteRepository, RepositoryError, SearchQuery};
use crate::models::{Note, Page, PageRequest};

refinery::embed_migrations!("migrations");

pub struct PgRepository {
    client: Client,
}

impl PgRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        text: row.get("text"),
    }
}

fn order_clause(request: &PageRequest) -> String {
    let direction = request.sort.direction.keyword();
    format!(
        "ORDER BY {} {direction}, id {direction}",
        request.sort.property.column()
    )
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[allow(clippy::cast_possible_wrap)]
const fn limits(request: &PageRequest) -> (i64, i64) {
    (request.size as i64, request.offset() as i64)
}

#[allow(clippy::cast_sign_loss)]
fn total(row: &Row) -> u64 {
    row.get::<_, i64>(0) as u64
}

#[async_trait]
impl NoteRepository for PgRepository {
    async fn insert(&self, text: Option<String>) -> Result<Note, RepositoryError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO note (text) VALUES ($1) RETURNING id, text",
                &[&text],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update(&self, id: i64, text: Option<String>) -> Result<Option<Note>, RepositoryError> {
        let row = self
            .client
            .query_opt(
                "UPDATE note SET text = $1 WHERE id = $2 RETURNING id, text",
                &[&text, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let rows = self
            .client
            .execute("DELETE FROM note WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    async fn find(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let row = self
            .client
            .query_opt("SELECT id, text FROM note WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Note>, RepositoryError> {
        let (limit, offset) = limits(request);
        let sql = format!(
            "SELECT id, text FROM note {} LIMIT $1 OFFSET $2",
            order_clause(request)
        );

        let rows = self.client.query(&sql, &[&limit, &offset]).await?;
        let count = self
            .client
            .query_one("SELECT COUNT(*) FROM note", &[])
            .await?;

        Ok(Page::new(
            rows.iter().map(note_from_row).collect(),
            request,
            total(&count),
        ))
    }

    async fn search(
        &self,
        query: &SearchQuery,
        request: &PageRequest,
    ) -> Result<Page<Note>, RepositoryError> {
        let (limit, offset) = limits(request);

        let (rows, count) = match query {
            SearchQuery::Id(id) => {
                let rows = self
                    .client
                    .query(
                        "SELECT id, text FROM note WHERE id = $1 LIMIT $2 OFFSET $3",
                        &[id, &limit, &offset],
                    )
                    .await?;
                let count = self
                    .client
                    .query_one("SELECT COUNT(*) FROM note WHERE id = $1", &[id])
                    .await?;
                (rows, count)
            }
            SearchQuery::Text(text) => {
                let pattern = format!("%{}%", escape_like(text));
                let sql = format!(
                    "SELECT id, text FROM note WHERE text ILIKE $1 {} LIMIT $2 OFFSET $3",
                    order_clause(request)
                );
                let rows = self
                    .client
                    .query(&sql, &[&pattern, &limit, &offset])
                    .await?;
                let count = self
                    .client
                    .query_one("SELECT COUNT(*) FROM note WHERE text ILIKE $1", &[&pattern])
                    .await?;
                (rows, count)
            }
        };

        Ok(Page::new(
            rows.iter().map(note_from_row).collect(),
            request,
            total(&count),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sort, SortDirection, SortProperty};

    #[test]
    fn order_clause_uses_whitelisted_column() {
        let request = PageRequest::new(0, 10, Sort::new(SortProperty::Text, SortDirection::Desc));
        assert_eq!(order_clause(&request), "ORDER BY text DESC, id DESC");
    }

    #[test]
    fn like_patterns_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
