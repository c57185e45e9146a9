//! Column descriptors and the cell-render contract.

use std::sync::Arc;

use serde_json::Value;

use crate::row::Row;

/// Custom cell renderer.
///
/// Receives the accessed value (if the row has the field) and the whole
/// row, and returns the display text for the cell. Renderers are pure:
/// the table may call them any number of times per snapshot.
pub type CellRender = Arc<dyn Fn(Option<&Value>, &Row) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the table: header text, the accessor
/// key into each row, and an optional renderer. Without a renderer the
/// raw value is display-stringified.
///
/// # Examples
///
/// ```
/// use pagegrid::Column;
///
/// let columns = vec![
///     Column::new("Name", "name"),
///     Column::new("Status", "status")
///         .with_render(|value, _row| match value.and_then(|v| v.as_str()) {
///             Some("active") => "● active".to_owned(),
///             other => other.unwrap_or("-").to_owned(),
///         }),
///     Column::actions("Actions", |row| format!("[edit {}]", row.key())),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    header: String,
    accessor: Option<String>,
    render: Option<CellRender>,
}

impl Column {
    /// Creates a new column reading `accessor` from each row.
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: Some(accessor.into()),
            render: None,
        }
    }

    /// Creates a trailing actions column.
    ///
    /// Actions columns have no accessor: the renderer receives the whole
    /// row and the search filter skips them.
    pub fn actions(
        header: impl Into<String>,
        render: impl Fn(&Row) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: None,
            render: Some(Arc::new(move |_value, row| render(row))),
        }
    }

    /// Sets a custom cell renderer.
    pub fn with_render(
        mut self,
        render: impl Fn(Option<&Value>, &Row) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns the column header text.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the accessor key, if the column has one.
    pub fn accessor(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    /// Renders the cell for a row: the custom renderer when present,
    /// the display-stringified raw value otherwise.
    pub(crate) fn render_cell(&self, row: &Row) -> String {
        let value = self.accessor.as_deref().and_then(|key| row.get(key));
        match &self.render {
            Some(render) => render(value, row),
            None => value.map(crate::row::display_value).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_render_stringifies_raw_value() {
        let row = Row::new("1").set("name", "Alice").set("age", 30);
        assert_eq!(Column::new("Name", "name").render_cell(&row), "Alice");
        assert_eq!(Column::new("Age", "age").render_cell(&row), "30");
        assert_eq!(Column::new("Oops", "missing").render_cell(&row), "");
    }

    #[test]
    fn custom_render_receives_value_and_row() {
        let row = Row::new("1").set("amount", 250).set("currency", "USD");
        let col = Column::new("Amount", "amount").with_render(|value, row| {
            format!(
                "{} {}",
                value.and_then(|v| v.as_i64()).unwrap_or(0),
                row.get_str("currency").unwrap_or("?")
            )
        });
        assert_eq!(col.render_cell(&row), "250 USD");
    }

    #[test]
    fn actions_column_renders_from_row_only() {
        let row = Row::new("9").set("name", "Bob");
        let col = Column::actions("Actions", |row| format!("[delete {}]", row.key()));
        assert_eq!(col.accessor(), None);
        assert_eq!(col.render_cell(&row), "[delete 9]");
    }
}
