//! Typestate builder for [`Table`].

use std::sync::Arc;
use std::time::Duration;

use crate::column::Column;
use crate::row::Row;
use crate::source::DataSource;

use super::state::ActivateHandler;
use super::state::DetailRender;
use super::state::QUERY_DEBOUNCE;
use super::state::Table;

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(pub(super) T);

/// Builder for constructing a [`Table`].
///
/// Uses the typestate pattern to ensure required fields are set at
/// compile time: a table cannot exist without `columns` and a `source`,
/// so there is no silent fallback path to guard at runtime.
///
/// # Example
///
/// ```ignore
/// let table = Table::builder()
///     .columns(columns)
///     .source(source)
///     .initial_page_size(20)
///     .row_detail(|row| format!("opened: {}", row.display("created_at")))
///     .build();
/// ```
pub struct TableBuilder<Cols, Source> {
    columns: Cols,
    source: Source,
    initial_page_size: usize,
    page_size_options: Vec<usize>,
    debounce: Duration,
    row_detail: Option<DetailRender>,
    on_activate: Option<ActivateHandler>,
}

impl TableBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            columns: Missing,
            source: Missing,
            initial_page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
            debounce: QUERY_DEBOUNCE,
            row_detail: None,
            on_activate: None,
        }
    }
}

impl Default for TableBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TableBuilder<Missing, S> {
    /// Sets the column schema.
    pub fn columns(self, columns: Vec<Column>) -> TableBuilder<Set<Vec<Column>>, S> {
        TableBuilder {
            columns: Set(columns),
            source: self.source,
            initial_page_size: self.initial_page_size,
            page_size_options: self.page_size_options,
            debounce: self.debounce,
            row_detail: self.row_detail,
            on_activate: self.on_activate,
        }
    }
}

impl<C> TableBuilder<C, Missing> {
    /// Sets the page-fetch strategy.
    pub fn source<D: DataSource + 'static>(
        self,
        source: D,
    ) -> TableBuilder<C, Set<Arc<dyn DataSource>>> {
        TableBuilder {
            columns: self.columns,
            source: Set(Arc::new(source) as Arc<dyn DataSource>),
            initial_page_size: self.initial_page_size,
            page_size_options: self.page_size_options,
            debounce: self.debounce,
            row_detail: self.row_detail,
            on_activate: self.on_activate,
        }
    }
}

impl<C, S> TableBuilder<C, S> {
    /// Sets the initial page size.
    ///
    /// Defaults to 10.
    pub fn initial_page_size(mut self, size: usize) -> Self {
        self.initial_page_size = size;
        self
    }

    /// Sets the page sizes offered to the user.
    ///
    /// Defaults to `[5, 10, 20, 50]`. Advisory: `set_page_size` accepts
    /// any non-zero size.
    pub fn page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().collect();
        self
    }

    /// Overrides the query debounce window.
    ///
    /// Defaults to [`QUERY_DEBOUNCE`] (350 ms).
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Enables row expansion with the given detail renderer.
    ///
    /// Without a detail renderer, row clicks never change expansion
    /// state.
    pub fn row_detail(mut self, render: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.row_detail = Some(Arc::new(render));
        self
    }

    /// Sets a callback fired when a row is clicked.
    pub fn on_row_activate(mut self, handler: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.on_activate = Some(Arc::new(handler));
        self
    }
}

impl TableBuilder<Set<Vec<Column>>, Set<Arc<dyn DataSource>>> {
    /// Builds the [`Table`] and issues the initial page fetch.
    ///
    /// Must be called from within a Tokio runtime: the table spawns its
    /// fetch tasks on the current runtime.
    pub fn build(self) -> Table {
        Table::new(TableConfig {
            columns: self.columns.0,
            source: self.source.0,
            initial_page_size: self.initial_page_size,
            page_size_options: self.page_size_options,
            debounce: self.debounce,
            row_detail: self.row_detail,
            on_activate: self.on_activate,
        })
    }
}

/// Resolved configuration handed to [`Table::new`].
pub(super) struct TableConfig {
    pub(super) columns: Vec<Column>,
    pub(super) source: Arc<dyn DataSource>,
    pub(super) initial_page_size: usize,
    pub(super) page_size_options: Vec<usize>,
    pub(super) debounce: Duration,
    pub(super) row_detail: Option<DetailRender>,
    pub(super) on_activate: Option<ActivateHandler>,
}
