//! Response decoding and list-payload normalization.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// A decoded response body.
///
/// The backend mostly speaks JSON, but proxies and error pages can
/// answer with HTML or plain text. Matching on the variant replaces the
/// scattered "is this unexpectedly a string?" checks call sites would
/// otherwise need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The response declared `application/json` and parsed.
    Json(Value),
    /// Anything else, returned verbatim.
    Text(String),
}

impl Body {
    pub(crate) async fn decode(response: reqwest::Response) -> Result<Self, ApiError> {
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("application/json"));

        let text = response.text().await.map_err(ApiError::from)?;

        if is_json {
            match serde_json::from_str(&text) {
                Ok(value) => Ok(Self::Json(value)),
                Err(err) => Err(ApiError::parse_with_body(err.to_string(), text)),
            }
        } else {
            Ok(Self::Text(text))
        }
    }

    /// Returns the JSON value, or a parse error for text bodies.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => Err(ApiError::parse_with_body(
                "expected a JSON response, got text",
                text,
            )),
        }
    }

    /// Returns a reference to the JSON value, if this is a JSON body.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// The list shapes the backend is known to answer with.
///
/// List endpoints return one of `{data, total}`, `{results, count}`, or
/// a bare array depending on their vintage. This union is decoded once
/// here instead of re-deriving the fallback chain at every call site.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload {
    /// `{ "data": [...], "total": N }`
    Paged {
        data: Vec<Value>,
        total: Option<usize>,
    },
    /// `{ "results": [...], "count": N }`
    Counted {
        results: Vec<Value>,
        count: Option<usize>,
    },
    /// A bare JSON array.
    Bare(Vec<Value>),
}

impl ListPayload {
    /// Decodes a JSON value into one of the accepted list shapes.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|err| ApiError::parse(format!("unrecognized list payload: {err}")))
    }

    /// Returns the items and the total matching count.
    ///
    /// Shapes without an explicit total fall back to the item count.
    pub fn into_items_and_total(self) -> (Vec<Value>, usize) {
        match self {
            Self::Paged { data, total } => {
                let total = total.unwrap_or(data.len());
                (data, total)
            }
            Self::Counted { results, count } => {
                let count = count.unwrap_or(results.len());
                (results, count)
            }
            Self::Bare(items) => {
                let total = items.len();
                (items, total)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_data_total_shape() {
        let payload = ListPayload::from_value(json!({
            "data": [{"id": 1}, {"id": 2}],
            "total": 40,
        }))
        .unwrap();
        let (items, total) = payload.into_items_and_total();
        assert_eq!(items.len(), 2);
        assert_eq!(total, 40);
    }

    #[test]
    fn decodes_results_count_shape() {
        let payload = ListPayload::from_value(json!({
            "results": [{"id": 1}],
            "count": 7,
        }))
        .unwrap();
        let (items, total) = payload.into_items_and_total();
        assert_eq!(items.len(), 1);
        assert_eq!(total, 7);
    }

    #[test]
    fn decodes_bare_array_with_length_as_total() {
        let payload =
            ListPayload::from_value(json!([{"id": 1}, {"id": 2}, {"id": 3}])).unwrap();
        let (items, total) = payload.into_items_and_total();
        assert_eq!(items.len(), 3);
        assert_eq!(total, 3);
    }

    #[test]
    fn missing_total_falls_back_to_item_count() {
        let payload = ListPayload::from_value(json!({"data": [{"id": 1}]})).unwrap();
        let (_, total) = payload.into_items_and_total();
        assert_eq!(total, 1);
    }

    #[test]
    fn rejects_non_list_payloads() {
        let err = ListPayload::from_value(json!({"message": "ok"})).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn json_body_unwraps_and_text_body_errors() {
        let body = Body::Json(json!({"ok": true}));
        assert_eq!(body.into_json().unwrap(), json!({"ok": true}));

        let body = Body::Text("<html>proxy error</html>".to_owned());
        assert!(matches!(body.into_json(), Err(ApiError::Parse { .. })));
    }
}
