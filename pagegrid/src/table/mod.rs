//! The paged table engine.
//!
//! A [`Table`] owns pagination, debounced search, and row-expansion
//! state, and fetches pages through a [`DataSource`](crate::DataSource).
//! It is headless: renderers consume [`TableSnapshot`](crate::TableSnapshot)s
//! and feed user interactions back through the handle.
//!
//! # Example
//!
//! ```ignore
//! use pagegrid::{Column, LocalSource, Row, Table};
//!
//! let source = LocalSource::new(rows).with_search_fields(["name", "email"]);
//! let table = Table::builder()
//!     .columns(vec![
//!         Column::new("Name", "name"),
//!         Column::new("Email", "email"),
//!     ])
//!     .source(source)
//!     .build();
//!
//! let mut revisions = table.subscribe();
//! table.set_query("ali");
//! revisions.changed().await?;
//! render(table.snapshot());
//! ```

mod builder;
mod state;

pub use builder::Missing;
pub use builder::Set;
pub use builder::TableBuilder;
pub use state::QUERY_DEBOUNCE;
pub use state::Table;
pub use state::TableId;
