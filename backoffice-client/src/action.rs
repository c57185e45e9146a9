//! Mutation ("action") endpoints.
//!
//! Approve/reject, enable/disable, deposit/withdraw and the rest of the
//! back-office actions are POST or PATCH requests with a small JSON
//! body. The backend answers with either the updated entity or a
//! `{ "message": ... }` envelope; [`ActionOutcome`] makes that split
//! explicit for the calling screen.

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::client::AdminClient;
use crate::error::ApiError;
use crate::response::Body;

/// The classified response of an action endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend answered `{ "message": ... }`.
    Message(String),
    /// The backend answered with the updated entity.
    Entity(Value),
}

impl ActionOutcome {
    pub(crate) fn from_body(body: Body) -> Result<Self, ApiError> {
        let value = body.into_json()?;
        match value.get("message").and_then(Value::as_str) {
            Some(message) => Ok(Self::Message(message.to_owned())),
            None => Ok(Self::Entity(value)),
        }
    }

    /// Returns the message text, if the backend sent an envelope.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Entity(_) => None,
        }
    }

    /// Returns the updated entity, if the backend sent one.
    pub fn entity(&self) -> Option<&Value> {
        match self {
            Self::Entity(value) => Some(value),
            Self::Message(_) => None,
        }
    }
}

impl AdminClient {
    /// Sends a POST action and classifies the response.
    pub async fn post_action(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, ApiError> {
        let body = self
            .request(Method::POST, path, HeaderMap::new(), Some(payload))
            .await?;
        ActionOutcome::from_body(body)
    }

    /// Sends a PATCH action and classifies the response.
    pub async fn patch_action(
        &self,
        path: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, ApiError> {
        let body = self
            .request(Method::PATCH, path, HeaderMap::new(), Some(payload))
            .await?;
        ActionOutcome::from_body(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_envelopes_are_classified() {
        let outcome =
            ActionOutcome::from_body(Body::Json(json!({"message": "account approved"}))).unwrap();
        assert_eq!(outcome.message(), Some("account approved"));
        assert_eq!(outcome.entity(), None);
    }

    #[test]
    fn entity_responses_are_classified() {
        let entity = json!({"id": 7, "status": "approved"});
        let outcome = ActionOutcome::from_body(Body::Json(entity.clone())).unwrap();
        assert_eq!(outcome.entity(), Some(&entity));
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn text_responses_are_a_parse_error() {
        let err = ActionOutcome::from_body(Body::Text("<html>gateway</html>".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }
}
