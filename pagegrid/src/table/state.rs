//! Table state and the fetch pipeline.

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::sync::DropGuard;

use crate::column::Column;
use crate::row::Row;
use crate::row::RowKey;
use crate::snapshot::SnapshotRow;
use crate::snapshot::TableBody;
use crate::snapshot::TableSnapshot;
use crate::source::DataSource;
use crate::source::PageRequest;

use super::builder::Missing;
use super::builder::TableBuilder;
use super::builder::TableConfig;

/// Default debounce window for query edits.
pub const QUERY_DEBOUNCE: Duration = Duration::from_millis(350);

pub(super) type DetailRender = Arc<dyn Fn(&Row) -> String + Send + Sync>;
pub(super) type ActivateHandler = Arc<dyn Fn(&Row) + Send + Sync>;

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table-{}", self.0)
    }
}

/// Internal state for the table.
struct TableInner {
    /// Column schema, fixed for the table's lifetime.
    columns: Vec<Column>,
    /// Rows of the current page.
    rows: Vec<Row>,
    /// Total matching rows across all pages.
    total: usize,
    /// Current 1-indexed page.
    page: u32,
    /// Rows per page.
    page_size: usize,
    /// Page sizes offered to the user.
    page_size_options: Vec<usize>,
    /// Current search query.
    query: String,
    /// Whether a fetch is in flight.
    loading: bool,
    /// The single currently-expanded row, if any.
    expanded: Option<RowKey>,
    /// Sequence number of the most recently issued fetch. A response
    /// is applied only while its number is still the latest, so a
    /// slow older fetch can never overwrite a newer one.
    issue: u64,
    /// Sequence number of the last fetch that ran to completion while
    /// still current. `settled == issue` means nothing is pending.
    settled: u64,
}

impl TableInner {
    fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.page_size.max(1)).max(1) as u32
    }

    /// Allocates the next fetch sequence number, superseding any
    /// pending fetch.
    fn next_issue(&mut self) -> u64 {
        self.issue += 1;
        self.issue
    }
}

/// A paginated, searchable, expandable table.
///
/// The handle is cheap to clone and safe to share; all clones observe
/// the same state. Dropping the last handle cancels pending debounce
/// timers; an in-flight request is not aborted, its result is simply
/// discarded by the sequence check.
#[derive(Clone)]
pub struct Table {
    id: TableId,
    inner: Arc<RwLock<TableInner>>,
    source: Arc<dyn DataSource>,
    debounce: Duration,
    row_detail: Option<DetailRender>,
    on_activate: Option<ActivateHandler>,
    cancel: CancellationToken,
    _cancel_guard: Arc<DropGuard>,
    revision: watch::Sender<u64>,
}

impl Table {
    /// Creates a new builder for constructing a table.
    pub fn builder() -> TableBuilder<Missing, Missing> {
        TableBuilder::new()
    }

    pub(super) fn new(config: TableConfig) -> Self {
        let (revision, _) = watch::channel(0);
        let cancel = CancellationToken::new();
        let guard = cancel.clone().drop_guard();

        let table = Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner {
                columns: config.columns,
                rows: Vec::new(),
                total: 0,
                page: 1,
                page_size: config.initial_page_size.max(1),
                page_size_options: config.page_size_options,
                query: String::new(),
                loading: false,
                expanded: None,
                issue: 0,
                settled: 0,
            })),
            source: config.source,
            debounce: config.debounce,
            row_detail: config.row_detail,
            on_activate: config.on_activate,
            cancel,
            _cancel_guard: Arc::new(guard),
            revision,
        };

        // Initial page load.
        table.refresh();
        table
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the table's unique id.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Returns the current 1-indexed page.
    pub fn page(&self) -> u32 {
        self.read().page
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> usize {
        self.read().page_size
    }

    /// Returns the current search query.
    pub fn query(&self) -> String {
        self.read().query.clone()
    }

    /// Returns the total matching row count from the last applied fetch.
    pub fn total(&self) -> usize {
        self.read().total
    }

    /// Returns the total page count, never less than 1.
    pub fn total_pages(&self) -> u32 {
        self.read().total_pages()
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Returns the key of the expanded row, if any.
    pub fn expanded_key(&self) -> Option<RowKey> {
        self.read().expanded.clone()
    }

    /// Subscribes to revision bumps; every state change notifies.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Waits until no fetch is pending or in flight.
    ///
    /// Covers the debounce window too: after `set_query` this resolves
    /// once the debounced fetch has settled.
    pub async fn idle(&self) {
        let mut revisions = self.subscribe();
        loop {
            {
                let inner = self.read();
                if inner.settled == inner.issue && !inner.loading {
                    return;
                }
            }
            if revisions.changed().await.is_err() {
                return;
            }
        }
    }

    /// Builds an immutable render view of the current state.
    pub fn snapshot(&self) -> TableSnapshot {
        let inner = self.read();

        let body = if inner.loading {
            TableBody::Loading
        } else if inner.rows.is_empty() {
            TableBody::Empty
        } else {
            let rows = inner
                .rows
                .iter()
                .map(|row| {
                    let expanded = inner.expanded.as_ref() == Some(row.key());
                    SnapshotRow {
                        key: row.key().clone(),
                        cells: inner
                            .columns
                            .iter()
                            .map(|column| column.render_cell(row))
                            .collect(),
                        expanded,
                        detail: if expanded {
                            self.row_detail.as_ref().map(|render| render(row))
                        } else {
                            None
                        },
                    }
                })
                .collect();
            TableBody::Rows(rows)
        };

        let total_pages = inner.total_pages();
        TableSnapshot {
            headers: inner
                .columns
                .iter()
                .map(|column| column.header().to_owned())
                .collect(),
            body,
            page: inner.page,
            page_size: inner.page_size,
            page_size_options: inner.page_size_options.clone(),
            total: inner.total,
            total_pages,
            query: inner.query.clone(),
            can_prev: inner.page > 1,
            can_next: inner.page < total_pages,
        }
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    /// Sets the search query and resets to page 1.
    ///
    /// The fetch fires after the debounce window; rapid edits collapse
    /// into a single fetch carrying the final query. Setting the
    /// current query again is a no-op.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let issue = {
            let mut inner = self.write();
            if inner.query == query {
                return;
            }
            inner.query = query;
            inner.page = 1;
            inner.next_issue()
        };
        self.bump();
        self.spawn_fetch(issue, Some(self.debounce));
    }

    /// Navigates to the given page, clamped to `[1, total_pages]`.
    ///
    /// Like every other state change, the fetch fires after the
    /// debounce window, so rapid paging collapses into one request.
    pub fn set_page(&self, page: u32) {
        let issue = {
            let mut inner = self.write();
            let clamped = page.clamp(1, inner.total_pages());
            if clamped == inner.page {
                return;
            }
            inner.page = clamped;
            inner.next_issue()
        };
        self.bump();
        self.spawn_fetch(issue, Some(self.debounce));
    }

    /// Navigates to the next page, if there is one.
    pub fn next_page(&self) {
        let page = self.page();
        self.set_page(page.saturating_add(1));
    }

    /// Navigates to the previous page, if there is one.
    pub fn prev_page(&self) {
        let page = self.page();
        self.set_page(page.saturating_sub(1).max(1));
    }

    /// Changes the page size and resets to page 1.
    ///
    /// A zero size is ignored.
    pub fn set_page_size(&self, size: usize) {
        if size == 0 {
            log::warn!("{}: ignoring page size 0", self.id);
            return;
        }
        let issue = {
            let mut inner = self.write();
            if inner.page_size == size {
                return;
            }
            inner.page_size = size;
            inner.page = 1;
            inner.next_issue()
        };
        self.bump();
        self.spawn_fetch(issue, Some(self.debounce));
    }

    /// Re-fetches the current page immediately, bypassing the debounce.
    pub fn refresh(&self) {
        let issue = {
            let mut inner = self.write();
            inner.next_issue()
        };
        self.spawn_fetch(issue, None);
    }

    /// Handles a click on the row with the given key.
    ///
    /// Fires the activation callback, then toggles expansion when a
    /// detail renderer is configured: clicking the expanded row
    /// collapses it, clicking another row moves the expansion there.
    /// Clicks on keys not present on the current page are ignored.
    pub fn click_row(&self, key: &RowKey) {
        let row = {
            let inner = self.read();
            let Some(row) = inner.rows.iter().find(|row| row.key() == key) else {
                return;
            };
            row.clone()
        };

        if let Some(handler) = &self.on_activate {
            handler(&row);
        }

        if self.row_detail.is_some() {
            {
                let mut inner = self.write();
                inner.expanded = if inner.expanded.as_ref() == Some(key) {
                    None
                } else {
                    Some(key.clone())
                };
            }
            self.bump();
        }
    }

    // =========================================================================
    // Fetch pipeline
    // =========================================================================

    /// Spawns the fetch task for an already-issued sequence number.
    fn spawn_fetch(&self, issue: u64, delay: Option<Duration>) {
        let table = self.clone();
        tokio::spawn(async move {
            table.run_fetch(issue, delay).await;
        });
    }

    async fn run_fetch(self, issue: u64, delay: Option<Duration>) {
        if let Some(delay) = delay {
            tokio::select! {
                () = self.cancel.cancelled() => return,
                () = tokio::time::sleep(delay) => {}
            }
        }

        let request = {
            let mut inner = self.write();
            // Superseded while waiting out the debounce.
            if inner.issue != issue {
                return;
            }
            inner.loading = true;
            PageRequest {
                page: inner.page,
                page_size: inner.page_size,
                query: inner.query.clone(),
            }
        };
        self.bump();

        let outcome = self.source.fetch_page(&request).await;

        let refetch = {
            let mut inner = self.write();
            // A newer fetch owns the state now; drop this response.
            if inner.issue != issue {
                return;
            }
            inner.loading = false;
            inner.settled = issue;
            match outcome {
                Ok(result) => {
                    inner.rows = result.rows;
                    inner.total = result.total;
                    // Current page fell off the end (e.g. last row of the
                    // last page deleted): back to page 1 and re-fetch.
                    if inner.page > inner.total_pages() {
                        inner.page = 1;
                        Some(inner.next_issue())
                    } else {
                        None
                    }
                }
                Err(err) => {
                    log::warn!("{}: page fetch failed: {err}", self.id);
                    None
                }
            }
        };
        self.bump();

        if let Some(next) = refetch {
            self.spawn_fetch(next, None);
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("page", &inner.page)
            .field("page_size", &inner.page_size)
            .field("query", &inner.query)
            .field("total", &inner.total)
            .field("loading", &inner.loading)
            .finish_non_exhaustive()
    }
}
