//! Remote paged lists as a table data source.

use async_trait::async_trait;
use pagegrid::DataSource;
use pagegrid::PageRequest;
use pagegrid::PageResult;
use pagegrid::Row;
use pagegrid::SourceError;
use serde_json::Value;

use crate::client::AdminClient;
use crate::response::ListPayload;

/// Server-side paging against a list endpoint.
///
/// Implements [`pagegrid::DataSource`] by issuing
/// `GET {endpoint}?page=N&page_size=M&q=...`, normalizing whichever
/// list shape the endpoint answers with, and decoding each element
/// into a keyed [`Row`]. Elements without the id field are rejected:
/// expansion and activation need a stable identity.
///
/// # Example
///
/// ```ignore
/// let tickets = RemoteSource::new(client.clone(), "support/tickets/");
/// let table = Table::builder()
///     .columns(columns)
///     .source(tickets)
///     .build();
/// ```
pub struct RemoteSource {
    client: AdminClient,
    endpoint: String,
    id_field: String,
    page_param: String,
    page_size_param: String,
    query_param: String,
}

impl RemoteSource {
    /// Creates a new source for the given list endpoint.
    pub fn new(client: AdminClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            id_field: "id".to_owned(),
            page_param: "page".to_owned(),
            page_size_param: "page_size".to_owned(),
            query_param: "q".to_owned(),
        }
    }

    /// Overrides the field rows are keyed by. Defaults to `id`.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Overrides the paging parameter names.
    ///
    /// Defaults to `page` and `page_size`.
    pub fn page_params(
        mut self,
        page: impl Into<String>,
        page_size: impl Into<String>,
    ) -> Self {
        self.page_param = page.into();
        self.page_size_param = page_size.into();
        self
    }

    /// Overrides the search parameter name. Defaults to `q`.
    pub fn query_param(mut self, param: impl Into<String>) -> Self {
        self.query_param = param.into();
        self
    }

    fn page_path(&self, request: &PageRequest) -> String {
        let mut pairs = url::form_urlencoded::Serializer::new(String::new());
        pairs.append_pair(&self.page_param, &request.page.to_string());
        pairs.append_pair(&self.page_size_param, &request.page_size.to_string());
        if !request.query.is_empty() {
            pairs.append_pair(&self.query_param, &request.query);
        }

        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.endpoint, separator, pairs.finish())
    }

    fn decode_rows(&self, items: Vec<Value>) -> Result<Vec<Row>, SourceError> {
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => {
                    Row::from_object(&self.id_field, fields).map_err(SourceError::from)
                }
                other => Err(SourceError::decode(format!(
                    "expected an object row, got {other}"
                ))),
            })
            .collect()
    }
}

#[async_trait]
impl DataSource for RemoteSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, SourceError> {
        let path = self.page_path(request);
        let body = self.client.get(&path).await.map_err(SourceError::fetch)?;
        let value = body.into_json().map_err(SourceError::fetch)?;
        let payload = ListPayload::from_value(value).map_err(SourceError::fetch)?;

        let (items, total) = payload.into_items_and_total();
        let rows = self.decode_rows(items)?;
        Ok(PageResult::new(rows, total))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn source() -> RemoteSource {
        let client = AdminClient::builder()
            .base_url("https://api.example.com/admin")
            .build();
        RemoteSource::new(client, "users/")
    }

    fn request(page: u32, page_size: usize, query: &str) -> PageRequest {
        PageRequest {
            page,
            page_size,
            query: query.to_owned(),
        }
    }

    #[test]
    fn page_path_carries_paging_and_query() {
        let source = source();
        assert_eq!(source.page_path(&request(2, 25, "")), "users/?page=2&page_size=25");
        assert_eq!(
            source.page_path(&request(1, 10, "john doe")),
            "users/?page=1&page_size=10&q=john+doe"
        );
    }

    #[test]
    fn page_path_respects_custom_parameter_names() {
        let source = source()
            .page_params("p", "limit")
            .query_param("search");
        assert_eq!(
            source.page_path(&request(3, 50, "mam")),
            "users/?p=3&limit=50&search=mam"
        );
    }

    #[test]
    fn page_path_appends_to_existing_query_strings() {
        let client = AdminClient::builder()
            .base_url("https://api.example.com/admin")
            .build();
        let source = RemoteSource::new(client, "accounts/?kind=demo");
        assert_eq!(
            source.page_path(&request(1, 10, "")),
            "accounts/?kind=demo&page=1&page_size=10"
        );
    }

    #[test]
    fn rows_decode_with_the_configured_id_field() {
        let source = source().id_field("user_id");
        let rows = source
            .decode_rows(vec![
                json!({"user_id": 7, "name": "Alice"}),
                json!({"user_id": "u-8", "name": "Bob"}),
            ])
            .unwrap();
        assert_eq!(rows[0].key().as_str(), "7");
        assert_eq!(rows[1].key().as_str(), "u-8");
    }

    #[test]
    fn rows_without_the_id_field_are_rejected() {
        let err = source()
            .decode_rows(vec![json!({"name": "nobody"})])
            .unwrap_err();
        assert!(matches!(err, SourceError::Row(_)));
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = source().decode_rows(vec![json!(42)]).unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }
}
