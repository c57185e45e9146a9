//! Main AdminClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::Url;
use reqwest::cookie::CookieStore;
use reqwest::cookie::Jar;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::response::Body;

/// Name of the CSRF cookie the backend issues.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Callback invoked when the backend answers 401 or 403.
///
/// Hooks are injected at build time so the host application decides
/// what "re-authenticate" and "permission denied" mean for it (clear a
/// session store, swap a screen). The error is still returned to the
/// caller afterwards.
pub type AuthHook = Arc<dyn Fn() + Send + Sync>;

/// Authenticated HTTP client for the back-office admin API.
///
/// Every request carries the shared cookie jar (session transport),
/// a bearer header when the [`TokenProvider`] yields a valid token,
/// and an `X-CSRFToken` header on mutating verbs when the CSRF cookie
/// is present. Responses are classified into the [`ApiError`] taxonomy.
///
/// The client is cheap to clone (uses `Arc` internally) and holds no
/// mutable state besides the cookie jar, so it can be shared freely.
///
/// # Example
///
/// ```ignore
/// use backoffice_client::AdminClient;
///
/// let client = AdminClient::builder()
///     .base_url("https://api.example.com/admin")
///     .on_unauthorized(|| session::clear())
///     .build();
///
/// let users = client.get("users/?page=1").await?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    base_url: String,
    http_client: Client,
    cookies: Arc<Jar>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    timeout: Option<Duration>,
    on_unauthorized: Option<AuthHook>,
    on_forbidden: Option<AuthHook>,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the base URL of the admin API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the shared cookie jar.
    ///
    /// Useful for importing an externally obtained session cookie or
    /// exporting the session for persistence.
    pub fn cookie_jar(&self) -> Arc<Jar> {
        self.inner.cookies.clone()
    }

    /// Sends a GET request.
    pub async fn get(&self, path: &str) -> Result<Body, ApiError> {
        self.request(Method::GET, path, HeaderMap::new(), None).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Body, ApiError> {
        self.request(Method::POST, path, HeaderMap::new(), Some(body))
            .await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Body, ApiError> {
        self.request(Method::PUT, path, HeaderMap::new(), Some(body))
            .await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Body, ApiError> {
        self.request(Method::PATCH, path, HeaderMap::new(), Some(body))
            .await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Body, ApiError> {
        self.request(Method::DELETE, path, HeaderMap::new(), None)
            .await
    }

    /// Sends a request through the shared auth/classification funnel.
    ///
    /// All verb helpers end up here: session cookies, bearer header,
    /// and CSRF header are attached uniformly, and the response is
    /// decoded per its Content-Type.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<Body, ApiError> {
        let url = self.endpoint(path)?;

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), url.clone())
            .headers(headers);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(provider) = &self.inner.token_provider {
            if let Some(token) = provider.bearer_token().await {
                if !token.is_expired() {
                    request = request.bearer_auth(token.secret());
                }
            }
        }

        if is_mutating(&method) {
            if let Some(token) = self.csrf_token(&url) {
                request = request.header(CSRF_HEADER, token);
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        log::debug!("{} {}", method, url);
        let response = request.send().await.map_err(ApiError::from)?;
        self.classify(response).await
    }

    /// Classifies the response: auth failures run their hooks and map
    /// to dedicated variants, other non-2xx map to a generic HTTP
    /// error, success bodies are decoded per Content-Type.
    async fn classify(&self, response: reqwest::Response) -> Result<Body, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            log::warn!("admin api: 401, session expired");
            if let Some(hook) = &self.inner.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            log::warn!("admin api: 403, permission denied");
            if let Some(hook) = &self.inner.on_forbidden {
                hook();
            }
            return Err(ApiError::Forbidden);
        }

        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned();
            let detail = response.text().await.unwrap_or_default();
            log::warn!("admin api: HTTP {}: {message}", status.as_u16());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
                detail: (!detail.is_empty()).then_some(detail),
            });
        }

        Body::decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// Reads the CSRF token from the cookie jar, if the backend set one.
    fn csrf_token(&self, url: &Url) -> Option<String> {
        let header = self.inner.cookies.cookies(url)?;
        let raw = header.to_str().ok()?;
        csrf_from_cookie_header(raw, CSRF_COOKIE)
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(method.as_str(), "POST" | "PUT" | "PATCH" | "DELETE")
}

fn csrf_from_cookie_header(raw: &str, cookie_name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_owned())
    })
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile
/// time.
///
/// # Example
///
/// ```ignore
/// let client = AdminClient::builder()
///     .base_url("https://api.example.com/admin")
///     .token_provider(StaticTokenProvider::new("service-token"))
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct AdminClientBuilder<U> {
    base_url: U,
    token_provider: Option<Arc<dyn TokenProvider>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    session_cookies: Vec<String>,
    on_unauthorized: Option<AuthHook>,
    on_forbidden: Option<AuthHook>,
}

impl AdminClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            token_provider: None,
            timeout: None,
            connect_timeout: None,
            session_cookies: Vec::new(),
            on_unauthorized: None,
            on_forbidden: None,
        }
    }

    /// Sets the admin API base URL.
    pub fn base_url(self, base_url: impl Into<String>) -> AdminClientBuilder<Set<String>> {
        AdminClientBuilder {
            base_url: Set(base_url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            session_cookies: self.session_cookies,
            on_unauthorized: self.on_unauthorized,
            on_forbidden: self.on_forbidden,
        }
    }
}

impl Default for AdminClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> AdminClientBuilder<U> {
    /// Sets the bearer-token provider.
    ///
    /// Without one, requests rely on the session cookie alone.
    pub fn token_provider<T: TokenProvider + 'static>(mut self, provider: T) -> Self {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Seeds the cookie jar with a `name=value` cookie for the base URL.
    ///
    /// Used to import a session obtained out of band.
    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookies.push(cookie.into());
        self
    }

    /// Sets the hook invoked on HTTP 401 before the error is returned.
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// Sets the hook invoked on HTTP 403 before the error is returned.
    pub fn on_forbidden(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_forbidden = Some(Arc::new(hook));
        self
    }
}

impl AdminClientBuilder<Set<String>> {
    /// Builds the [`AdminClient`].
    ///
    /// This method is only available once `base_url` has been set.
    pub fn build(self) -> AdminClient {
        let cookies = Arc::new(Jar::default());

        if let Ok(url) = Url::parse(&self.base_url.0) {
            for cookie in &self.session_cookies {
                cookies.add_cookie_str(cookie, &url);
            }
        }

        let mut builder = Client::builder().cookie_provider(cookies.clone());
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder.build().expect("Failed to build HTTP client");

        AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url: self.base_url.0,
                http_client,
                cookies,
                token_provider: self.token_provider,
                timeout: self.timeout,
                on_unauthorized: self.on_unauthorized,
                on_forbidden: self.on_forbidden,
            }),
        }
    }
}
