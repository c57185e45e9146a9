//! Headless paged-table engine
//!
//! Pagination, debounced search, and row expansion for admin-panel
//! list views, with pluggable local or remote page fetching.

pub mod column;
pub mod error;
pub mod row;
pub mod snapshot;
pub mod source;
pub mod table;

pub use column::CellRender;
pub use column::Column;
pub use error::RowError;
pub use error::SourceError;
pub use row::Row;
pub use row::RowKey;
pub use snapshot::SnapshotRow;
pub use snapshot::TableBody;
pub use snapshot::TableSnapshot;
pub use source::DataSource;
pub use source::LocalSource;
pub use source::PageRequest;
pub use source::PageResult;
pub use table::QUERY_DEBOUNCE;
pub use table::Table;
pub use table::TableBuilder;
pub use table::TableId;
