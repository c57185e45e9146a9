//! Page-fetch strategies.
//!
//! The table depends only on the [`DataSource`] trait. [`LocalSource`]
//! filters and slices an in-memory set (client-side mode); remote
//! sources delegate paging and filtering to a backend (server-side
//! mode). Both answer the same `fetch_page` contract, so the table has
//! no mode branching of its own.

use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde::Serialize;

use crate::error::SourceError;
use crate::row::Row;

/// Parameters of a single page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-indexed page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: usize,
    /// Search query, already debounced by the table. Empty means no filter.
    pub query: String,
}

/// One page of rows plus the full matching count.
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The rows of the requested page.
    pub rows: Vec<Row>,
    /// Total matching rows across all pages, not `rows.len()`.
    pub total: usize,
}

impl PageResult {
    /// Creates a new page result.
    pub fn new(rows: Vec<Row>, total: usize) -> Self {
        Self { rows, total }
    }
}

/// Strategy trait answering page fetches for a table.
///
/// Implementations should treat `fetch_page` as read-only and
/// idempotent: the table re-issues requests freely (refresh, page
/// reset, stale-response replacement).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches one page of rows matching the request.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, SourceError>;
}

// =============================================================================
// LocalSource
// =============================================================================

/// In-memory data source: filters and slices a `Vec<Row>`.
///
/// The handle is cheap to clone and shares the row set, so a screen can
/// mutate rows (`set_rows`) and then ask the table to refresh.
///
/// Filtering is a case-insensitive substring match, OR-combined across
/// fields: a row matches if ANY searched field's display text contains
/// the query. By default every row field is searched; restrict to the
/// table's visible accessors with [`with_search_fields`](Self::with_search_fields).
///
/// # Example
///
/// ```
/// use pagegrid::{LocalSource, Row};
///
/// let source = LocalSource::new(vec![
///     Row::new("1").set("name", "Alice"),
///     Row::new("2").set("name", "Bob"),
/// ])
/// .with_search_fields(["name"]);
/// ```
#[derive(Clone)]
pub struct LocalSource {
    rows: Arc<RwLock<Vec<Row>>>,
    search_fields: Option<Vec<String>>,
}

impl LocalSource {
    /// Creates a new local source over the given rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            search_fields: None,
        }
    }

    /// Restricts the search filter to the given fields.
    pub fn with_search_fields(
        mut self,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the row set.
    ///
    /// The table does not observe this until the next fetch; callers
    /// follow up with `Table::refresh`.
    pub fn set_rows(&self, rows: Vec<Row>) {
        if let Ok(mut guard) = self.rows.write() {
            *guard = rows;
        }
    }

    /// Returns the number of rows currently held.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Returns `true` if the source holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matches(&self, row: &Row, needle: &str) -> bool {
        match &self.search_fields {
            Some(fields) => fields
                .iter()
                .any(|field| row.display(field).to_lowercase().contains(needle)),
            None => row
                .fields()
                .keys()
                .any(|field| row.display(field).to_lowercase().contains(needle)),
        }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, SourceError> {
        let Ok(rows) = self.rows.read() else {
            return Ok(PageResult::new(Vec::new(), 0));
        };

        let needle = request.query.trim().to_lowercase();
        let filtered: Vec<&Row> = if needle.is_empty() {
            rows.iter().collect()
        } else {
            rows.iter().filter(|row| self.matches(row, &needle)).collect()
        };

        let total = filtered.len();
        let page = request.page.max(1) as usize;
        let start = (page - 1).saturating_mul(request.page_size);
        let page_rows = filtered
            .into_iter()
            .skip(start)
            .take(request.page_size)
            .cloned()
            .collect();

        Ok(PageResult::new(page_rows, total))
    }
}

// =============================================================================
// FnSource
// =============================================================================

/// Adapts an async closure into a [`DataSource`].
///
/// # Example
///
/// ```ignore
/// use futures::FutureExt;
/// use pagegrid::source::from_fn;
///
/// let source = from_fn(move |request| {
///     let client = client.clone();
///     async move { client.fetch(request).await }.boxed()
/// });
/// ```
pub fn from_fn<F>(fetch: F) -> FnSource
where
    F: Fn(PageRequest) -> BoxFuture<'static, Result<PageResult, SourceError>>
        + Send
        + Sync
        + 'static,
{
    FnSource {
        fetch: Box::new(fetch),
    }
}

/// A [`DataSource`] backed by a closure. Built with [`from_fn`].
pub struct FnSource {
    #[allow(clippy::type_complexity)]
    fetch: Box<
        dyn Fn(PageRequest) -> BoxFuture<'static, Result<PageResult, SourceError>> + Send + Sync,
    >,
}

#[async_trait]
impl DataSource for FnSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, SourceError> {
        (self.fetch)(request.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Row> {
        vec![
            Row::new("1").set("name", "Alice").set("country", "Austria"),
            Row::new("2").set("name", "Bob").set("country", "Brazil"),
            Row::new("3").set("name", "Carol").set("country", "Canada"),
            Row::new("4").set("name", "Dan").set("country", "Denmark"),
        ]
    }

    fn request(page: u32, page_size: usize, query: &str) -> PageRequest {
        PageRequest {
            page,
            page_size,
            query: query.to_owned(),
        }
    }

    #[tokio::test]
    async fn empty_query_returns_all_rows_paged() {
        let source = LocalSource::new(people());
        let page = source.fetch_page(&request(1, 3, "")).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.rows.len(), 3);

        let page = source.fetch_page(&request(2, 3, "")).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].key().as_str(), "4");
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_substring_or_across_fields() {
        let source = LocalSource::new(people()).with_search_fields(["name", "country"]);

        // Matches "Alice" by name.
        let page = source.fetch_page(&request(1, 10, "ALI")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].get_str("name"), Some("Alice"));

        // "an" matches Dan by name and Canada by country.
        let page = source.fetch_page(&request(1, 10, "an")).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn filter_skips_unlisted_fields() {
        let source = LocalSource::new(people()).with_search_fields(["name"]);
        let page = source.fetch_page(&request(1, 10, "brazil")).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_real_total() {
        let source = LocalSource::new(people());
        let page = source.fetch_page(&request(9, 10, "")).await.unwrap();
        assert_eq!(page.total, 4);
        assert!(page.rows.is_empty());
    }

    #[tokio::test]
    async fn set_rows_replaces_the_shared_set() {
        let source = LocalSource::new(people());
        let handle = source.clone();
        handle.set_rows(vec![Row::new("9").set("name", "Zoe")]);

        let page = source.fetch_page(&request(1, 10, "")).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].key().as_str(), "9");
    }
}
