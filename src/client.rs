//! ClickUp API client.
//!
//! Low-level HTTP client that handles authentication and raw JSON requests.
//! Models, builders and relations compute paths and hand them to this client.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde_json::Value;
use url::Url;

use crate::credentials::CredentialStore;
use crate::error::{ClickUpError, Result};

const DEFAULT_API_URL: &str = "https://api.clickup.com/api/v2";
const USER_AGENT: &str = concat!("clickapi/", env!("CARGO_PKG_VERSION"));

/// Low-level ClickUp API client.
///
/// Every request carries the caller's API token in the `Authorization`
/// header. A client without a token refuses to send anything.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use clickapi::ClickUpClient;
///
/// # fn example() -> clickapi::Result<()> {
/// // Create from environment variables
/// let client = ClickUpClient::from_env()?;
///
/// // Or configure manually
/// let client = ClickUpClient::new("https://api.clickup.com/api/v2")?.with_token("pk_123");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClickUpClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
}

impl std::fmt::Debug for ClickUpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickUpClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ClickUpClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CLICKUP_API_TOKEN` for authentication and optionally `CLICKUP_URL`
    /// for the base URL (defaults to `https://api.clickup.com/api/v2`).
    ///
    /// # Errors
    ///
    /// Returns an error if `CLICKUP_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CLICKUP_API_TOKEN").map_err(|_| {
            ClickUpError::ConfigMissing("CLICKUP_API_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("CLICKUP_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self::new(&base_url)?.with_token(token))
    }

    /// Create a new client for the given base URL, without a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(ClickUpError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: None,
        })
    }

    /// Return this client carrying the given token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace (or clear) the token.
    pub fn set_token(&mut self, token: Option<String>) -> &mut Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Return this client carrying the token held by `store`, or none if
    /// the store is empty.
    ///
    /// # Errors
    ///
    /// Whatever the store fails with, typically [`ClickUpError::Credentials`].
    pub fn with_credentials(mut self, store: &dyn CredentialStore) -> Result<Self> {
        self.set_token(store.token()?);
        Ok(self)
    }

    /// Whether a token is set.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a model path against the base URL.
    ///
    /// Leading slashes are dropped so the path stays below the API prefix.
    pub fn uri(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    /// Make a POST request with JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Make a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty response body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`ClickUpError::MissingCredentials`] before any I/O when no
    /// token is set, and a transport error when the call fails.
    #[tracing::instrument(skip(self, body))]
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let token = self.token.as_deref().ok_or(ClickUpError::MissingCredentials)?;
        let url = self.uri(path)?;

        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(body) = body.filter(|b| !is_empty_body(b)) {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(ClickUpError::HttpError)?;
        let response = Self::check_response(response).await?;

        let bytes = response.bytes().await.map_err(ClickUpError::HttpError)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(ClickUpError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(ClickUpError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // ClickUp reports failures as {"err": "...", "ECODE": "..."}
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            for field in ["err", "message", "error"] {
                if let Some(msg) = json.get(field).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ClickUpClient::new("https://api.clickup.com/api/v2")
            .unwrap()
            .with_token("pk_secret");
        let debug = format!("{:?}", client);
        assert!(debug.contains("ClickUpClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("pk_secret"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ClickUpClient::new("https://api.clickup.com/api/v2").unwrap();
        let client2 = ClickUpClient::new("https://api.clickup.com/api/v2/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    struct Fixed(Option<&'static str>);

    impl CredentialStore for Fixed {
        fn token(&self) -> Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct Broken;

    impl CredentialStore for Broken {
        fn token(&self) -> Result<Option<String>> {
            Err(ClickUpError::Credentials("locked".into()))
        }
    }

    #[test]
    fn test_with_credentials() {
        let client = ClickUpClient::new("https://api.clickup.com/api/v2")
            .unwrap()
            .with_credentials(&Fixed(Some("pk_store")))
            .unwrap();
        assert!(client.has_token());

        let client = client.with_credentials(&Fixed(None)).unwrap();
        assert!(!client.has_token());

        let err = ClickUpClient::new("https://api.clickup.com/api/v2")
            .unwrap()
            .with_credentials(&Broken)
            .unwrap_err();
        assert!(matches!(err, ClickUpError::Credentials(_)));
    }

    #[test]
    fn test_uri_keeps_api_prefix() {
        let client = ClickUpClient::new("https://api.clickup.com/api/v2").unwrap();
        assert_eq!(
            client.uri("/team/1/space?archived=0").unwrap().as_str(),
            "https://api.clickup.com/api/v2/team/1/space?archived=0"
        );
        assert_eq!(
            client.uri("task/abc").unwrap().as_str(),
            "https://api.clickup.com/api/v2/task/abc"
        );
    }

    #[test]
    fn test_set_token_ignores_empty() {
        let mut client = ClickUpClient::new("https://api.clickup.com/api/v2").unwrap();
        assert!(!client.has_token());
        client.set_token(Some(String::new()));
        assert!(!client.has_token());
        client.set_token(Some("pk_1".to_string()));
        assert!(client.has_token());
        client.set_token(None);
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_request_without_token_fails_before_io() {
        // Port 9 (discard) would fail at the transport level if ever contacted.
        let client = ClickUpClient::new("http://127.0.0.1:9").unwrap();
        let err = client.get("/team").await.unwrap_err();
        assert!(matches!(err, ClickUpError::MissingCredentials));
    }
}
