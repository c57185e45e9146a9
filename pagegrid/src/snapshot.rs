//! Immutable render views.
//!
//! The table publishes a [`TableSnapshot`] per revision; renderers read
//! it and never touch table state directly.

use crate::row::RowKey;

/// Placeholder text rendered while a fetch is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Placeholder text rendered when the current page has no rows.
pub const EMPTY_TEXT: &str = "No data available.";

/// The body of the table for one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A fetch is in flight; render a single placeholder row spanning
    /// all columns.
    Loading,
    /// The fetch settled with no rows; render a single placeholder row
    /// spanning all columns.
    Empty,
    /// The rows of the current page.
    Rows(Vec<SnapshotRow>),
}

impl TableBody {
    /// Returns the placeholder text for non-row bodies.
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_TEXT),
            Self::Empty => Some(EMPTY_TEXT),
            Self::Rows(_) => None,
        }
    }
}

/// One rendered row of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRow {
    /// Stable row identity.
    pub key: RowKey,
    /// Rendered cell text, one entry per column.
    pub cells: Vec<String>,
    /// Whether this row is the expanded one.
    pub expanded: bool,
    /// Rendered detail content, present only on the expanded row.
    pub detail: Option<String>,
}

/// Immutable view of the table for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Column header labels, in display order.
    pub headers: Vec<String>,
    /// The table body.
    pub body: TableBody,
    /// Current 1-indexed page.
    pub page: u32,
    /// Rows per page.
    pub page_size: usize,
    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
    /// Total matching rows across all pages.
    pub total: usize,
    /// Total page count, never less than 1.
    pub total_pages: u32,
    /// Current search query.
    pub query: String,
    /// Whether a previous page exists.
    pub can_prev: bool,
    /// Whether a next page exists.
    pub can_next: bool,
}

impl TableSnapshot {
    /// Footer summary, e.g. `Showing 1 to 10 of 47`.
    ///
    /// An empty result set reads `Showing 0 to 0 of 0`.
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return "Showing 0 to 0 of 0".to_owned();
        }
        let first = (self.page as usize - 1) * self.page_size + 1;
        let last = (first + self.page_size - 1).min(self.total);
        format!("Showing {} to {} of {}", first, last, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(page: u32, page_size: usize, total: usize) -> TableSnapshot {
        let total_pages = (total.div_ceil(page_size).max(1)) as u32;
        TableSnapshot {
            headers: vec!["Name".to_owned()],
            body: TableBody::Rows(Vec::new()),
            page,
            page_size,
            page_size_options: vec![5, 10, 20, 50],
            total,
            total_pages,
            query: String::new(),
            can_prev: page > 1,
            can_next: page < total_pages,
        }
    }

    #[test]
    fn summary_reports_displayed_bounds() {
        assert_eq!(snapshot(1, 10, 2).summary(), "Showing 1 to 2 of 2");
        assert_eq!(snapshot(1, 10, 47).summary(), "Showing 1 to 10 of 47");
        assert_eq!(snapshot(5, 10, 47).summary(), "Showing 41 to 47 of 47");
        assert_eq!(snapshot(1, 10, 0).summary(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn placeholder_text_matches_body() {
        assert_eq!(TableBody::Loading.placeholder_text(), Some(LOADING_TEXT));
        assert_eq!(TableBody::Empty.placeholder_text(), Some(EMPTY_TEXT));
        assert_eq!(TableBody::Rows(Vec::new()).placeholder_text(), None);
    }
}
