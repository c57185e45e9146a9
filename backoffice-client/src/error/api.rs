//! API error types

/// Errors that can occur during API calls.
///
/// The 401 and 403 cases get their own variants because the client
/// handles them globally (auth hooks run before the error is returned)
/// while everything else is left to the call site.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the session is missing or expired.
    #[error("HTTP 401: session expired or not authenticated")]
    Unauthorized,

    /// HTTP 403: the authenticated account lacks permission.
    #[error("HTTP 403: permission denied")]
    Forbidden,

    /// Any other non-2xx HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The status text of the response.
        message: String,
        /// Raw response body, when one was readable.
        detail: Option<String>,
    },

    /// Network error during the API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode the API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The endpoint path did not form a valid URL against the base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is an authentication/authorization error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }

    /// Returns `true` if this error is potentially retryable.
    ///
    /// Nothing in the client retries; callers decide whether to
    /// re-trigger the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_exposed() {
        assert_eq!(ApiError::Unauthorized.status_code(), Some(401));
        assert_eq!(ApiError::Forbidden.status_code(), Some(403));
        assert_eq!(ApiError::http(502, "Bad Gateway").status_code(), Some(502));
        assert_eq!(ApiError::parse("bad json").status_code(), None);
    }

    #[test]
    fn auth_and_retry_classification() {
        assert!(ApiError::Unauthorized.is_auth());
        assert!(ApiError::Forbidden.is_auth());
        assert!(!ApiError::http(500, "Internal Server Error").is_auth());

        assert!(ApiError::http(503, "Service Unavailable").is_retryable());
        assert!(!ApiError::http(404, "Not Found").is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
    }

    #[test]
    fn http_errors_display_status_and_text() {
        let err = ApiError::http(418, "I'm a teapot");
        assert_eq!(err.to_string(), "HTTP 418: I'm a teapot");
    }
}
