//! Vault client implementation
//!
//! This module contains the `Client` struct: the transport adapter every
//! engine module delegates to.
//!
//! # Architecture
//!
//! - **HTTP layer**: built on `reqwest` for async operations
//! - **Primitives**: `get`/`post`/`patch`/`list`/`delete`, each mapping to
//!   one wire request; LIST is modeled as GET with a `list=true` query flag
//! - **Retry logic**: exponential backoff with jitter for transient
//!   failures only; 4xx responses always surface on the first attempt
//! - **Authentication**: `X-Vault-Token` on every request, with a single
//!   refresh-and-replay on 403 when the token provider supports it
//!
//! # Examples
//!
//! ```no_run
//! use vault_sdk::{Auth, ClientBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new("https://vault.example.com:8200")
//!     .auth(Auth::token("s.kXxXXxxXXXxxx"))
//!     .build()?;
//!
//! let secret = client.kv2().read_secret("app/config").await?;
//! println!("current version: {}", secret.metadata.version);
//! # Ok(())
//! # }
//! ```

use crate::{
    config::ClientConfig,
    endpoints::Endpoints,
    errors::{Error, ErrorResponse, Result},
    util::{correlation_id, header_str},
};

use backoff::{future::retry_notify, ExponentialBackoff};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace, warn};

const USER_AGENT_PREFIX: &str = "vault-sdk-rust";

/// Content type selecting server-side JSON merge-patch semantics
const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

/// A parsed API response
///
/// The single result type shared by every operation: HTTP status, the
/// request id (from the response envelope, falling back to the
/// `X-Request-Id` header), and the parsed JSON body. Endpoints that answer
/// 204-style no-content leave the body empty; callers branch with
/// [`is_no_content`](ApiResponse::is_no_content) instead of probing the
/// return type.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    request_id: Option<String>,
    body: Option<Value>,
}

impl ApiResponse {
    /// HTTP status code of the response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Request ID reported by the server, if any
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// The parsed JSON body, `None` for no-content responses
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether the response carried no body (204-style success)
    pub fn is_no_content(&self) -> bool {
        self.body.is_none()
    }

    /// Deserialize the whole response envelope
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| Error::Deserialize("response has no body".to_string()))?;
        serde_json::from_value(body).map_err(Error::from)
    }

    /// Deserialize the envelope's `data` object
    pub fn data<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self
            .body
            .as_ref()
            .and_then(|b| b.get("data"))
            .cloned()
            .ok_or_else(|| Error::Deserialize("response has no data object".to_string()))?;
        serde_json::from_value(data).map_err(Error::from)
    }

    /// Extract the `data.keys` list of an enumeration response
    pub fn keys(&self) -> Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct Keys {
            keys: Vec<String>,
        }
        self.data::<Keys>().map(|k| k.keys)
    }

    #[cfg(test)]
    pub(crate) fn fake(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            request_id: None,
            body,
        }
    }
}

/// Vault API client
///
/// The transport adapter behind every engine module. Holds no mutable state
/// between calls: no secret cache, no session state, nothing shared beyond
/// the connection pool. Each operation issues exactly the requests its
/// contract names and returns the response unchanged.
///
/// Engine handles are borrowed from the client:
///
/// ```no_run
/// # use vault_sdk::{Auth, ClientBuilder};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = ClientBuilder::new("http://127.0.0.1:8200").auth(Auth::token("t")).build()?;
/// let kv = client.kv2();                      // default mount "secret"
/// let db = client.database().with_mount("postgres-prod");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) config: ClientConfig,
    http: HttpClient,
    endpoints: Endpoints,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("address", &self.config.address)
            .field("namespace", &self.config.namespace)
            .field("timeout", &self.config.timeout)
            .field("retries", &self.config.retries)
            .finish()
    }
}

impl Client {
    /// Create a new client with the given configuration
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let user_agent = if let Some(suffix) = &config.user_agent_suffix {
            format!("{}/{} {}", USER_AGENT_PREFIX, crate::VERSION, suffix)
        } else {
            format!("{}/{}", USER_AGENT_PREFIX, crate::VERSION)
        };

        let http = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoints: Endpoints::new(&config.address),
            http,
            config,
        })
    }

    // Engine accessors

    /// Versioned key-value store (default mount `secret`)
    pub fn kv2(&self) -> crate::kv2::Kv2<'_> {
        crate::kv2::Kv2::new(self)
    }

    /// Token auth method (`auth/token`)
    pub fn token(&self) -> crate::token::TokenAuth<'_> {
        crate::token::TokenAuth::new(self)
    }

    /// Database secrets engine (default mount `database`)
    pub fn database(&self) -> crate::database::Database<'_> {
        crate::database::Database::new(self)
    }

    /// LDAP secrets engine (default mount `ldap`)
    pub fn ldap(&self) -> crate::ldap::Ldap<'_> {
        crate::ldap::Ldap::new(self)
    }

    /// SSH secrets engine (default mount `ssh`)
    pub fn ssh(&self) -> crate::ssh::Ssh<'_> {
        crate::ssh::Ssh::new(self)
    }

    /// RabbitMQ secrets engine (default mount `rabbitmq`)
    pub fn rabbitmq(&self) -> crate::rabbitmq::RabbitMq<'_> {
        crate::rabbitmq::RabbitMq::new(self)
    }

    /// Consul secrets engine (default mount `consul`)
    pub fn consul(&self) -> crate::consul::Consul<'_> {
        crate::consul::Consul::new(self)
    }

    /// Active Directory secrets engine (default mount `ad`)
    pub fn ad(&self) -> crate::ad::ActiveDirectory<'_> {
        crate::ad::ActiveDirectory::new(self)
    }

    // Transport primitives

    /// Issue a GET request against an API path
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse> {
        self.execute(Method::GET, path, params, None, None).await
    }

    /// Issue a LIST request (GET with a `list=true` query flag)
    pub async fn list(&self, path: &str) -> Result<ApiResponse> {
        self.execute(
            Method::GET,
            path,
            &[("list", "true".to_string())],
            None,
            None,
        )
        .await
    }

    /// Issue a POST request with an optional JSON body
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        self.execute(Method::POST, path, &[], body, None).await
    }

    /// Issue a PATCH request with JSON merge-patch semantics
    pub async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.execute(
            Method::PATCH,
            path,
            &[],
            Some(body),
            Some(MERGE_PATCH_CONTENT_TYPE),
        )
        .await
    }

    /// Issue a DELETE request; success is normally a 204 with no body
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.execute(Method::DELETE, path, &[], None, None).await
    }

    // Helper methods

    /// Execute a request, refreshing the token once on 403 when supported
    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<Value>,
        content_type: Option<&'static str>,
    ) -> Result<ApiResponse> {
        let correlation = correlation_id();
        debug!(%method, path, %correlation, "issuing request");

        let mut refreshed = false;
        loop {
            let result = self
                .execute_with_retry(&method, path, params, body.as_ref(), content_type)
                .await;

            match result {
                Err(Error::PermissionDenied { .. })
                    if !refreshed && self.config.auth.supports_refresh() =>
                {
                    warn!(path, %correlation, "got 403, attempting token refresh");
                    self.config
                        .auth
                        .refresh()
                        .await
                        .map_err(|e| Error::Config(format!("Token refresh failed: {}", e)))?;
                    refreshed = true;
                }
                other => return other,
            }
        }
    }

    /// Execute a request with backoff retry for transient failures
    async fn execute_with_retry(
        &self,
        method: &Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
        content_type: Option<&'static str>,
    ) -> Result<ApiResponse> {
        let max_retries = self.config.retries as usize;

        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(100),
            randomization_factor: 0.3,
            multiplier: 2.0,
            max_interval: Duration::from_secs(10),
            ..Default::default()
        };
        backoff.max_elapsed_time = if max_retries > 0 {
            Some(Duration::from_secs(60))
        } else {
            Some(Duration::from_millis(0))
        };

        let attempt = std::sync::atomic::AtomicUsize::new(0);

        retry_notify(
            backoff,
            || async {
                let current = attempt.load(std::sync::atomic::Ordering::Relaxed);
                match self
                    .send_once(method.clone(), path, params, body, content_type)
                    .await
                {
                    Ok(response) => Ok(response),
                    Err(e) if e.is_retryable() && current < max_retries => {
                        Err(backoff::Error::transient(e))
                    }
                    Err(e) => Err(backoff::Error::Permanent(e)),
                }
            },
            |err, dur| {
                let count = attempt.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
                debug!(path, retry = count, after = ?dur, error = ?err, "retrying request");
            },
        )
        .await
    }

    /// Send a single request and map the response
    async fn send_once(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
        content_type: Option<&'static str>,
    ) -> Result<ApiResponse> {
        let token = self
            .config
            .auth
            .header_value()
            .await
            .map_err(|e| Error::Config(format!("Failed to get auth token: {}", e)))?;

        let url = self.endpoints.url(path);
        let mut request = self
            .http
            .request(method, url)
            .header("X-Vault-Token", token)
            .header("X-Vault-Request", "true");

        if let Some(namespace) = &self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        if !params.is_empty() {
            request = request.query(params);
        }
        match (body, content_type) {
            // A content-type override (merge-patch) needs the body set by
            // hand so reqwest does not stamp application/json over it.
            (Some(b), Some(ct)) => {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, ct)
                    .body(serde_json::to_vec(b)?);
            }
            (Some(b), None) => {
                request = request.json(b);
            }
            (None, _) => {}
        }

        let response = request.send().await.map_err(Error::from)?;
        self.parse_response(response, path).await
    }

    /// Map a raw HTTP response into `ApiResponse` or the error taxonomy
    async fn parse_response(&self, response: Response, path: &str) -> Result<ApiResponse> {
        let status = response.status();
        let header_request_id = header_str(response.headers(), "x-request-id");

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                trace!(path, status = status.as_u16(), "no-content response");
                return Ok(ApiResponse {
                    status: status.as_u16(),
                    request_id: header_request_id,
                    body: None,
                });
            }

            let bytes = response.bytes().await.map_err(Error::from)?;
            if bytes.is_empty() {
                return Ok(ApiResponse {
                    status: status.as_u16(),
                    request_id: header_request_id,
                    body: None,
                });
            }

            let body: Value = serde_json::from_slice(&bytes)?;
            let request_id = body
                .get("request_id")
                .and_then(Value::as_str)
                .map(String::from)
                .or(header_request_id);
            trace!(path, status = status.as_u16(), "parsed response body");

            Ok(ApiResponse {
                status: status.as_u16(),
                request_id,
                body: Some(body),
            })
        } else {
            let errors = match response.json::<ErrorResponse>().await {
                Ok(parsed) => parsed.errors,
                Err(_) => Vec::new(),
            };
            Err(Error::from_status(
                status.as_u16(),
                path,
                errors,
                header_request_id,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_response_accessors() {
        let resp = ApiResponse::fake(
            200,
            Some(json!({
                "request_id": "req-1",
                "data": {"keys": ["role1", "role2"]}
            })),
        );
        assert_eq!(resp.status(), 200);
        assert!(!resp.is_no_content());
        assert_eq!(resp.keys().unwrap(), vec!["role1", "role2"]);

        let resp = ApiResponse::fake(204, None);
        assert!(resp.is_no_content());
        assert!(resp.json::<Value>().is_err());
    }

    #[test]
    fn test_api_response_data_extraction() {
        #[derive(serde::Deserialize)]
        struct Creds {
            username: String,
        }

        let resp = ApiResponse::fake(
            200,
            Some(json!({"data": {"username": "v-token-abc", "password": "x"}})),
        );
        let creds: Creds = resp.data().unwrap();
        assert_eq!(creds.username, "v-token-abc");

        let empty = ApiResponse::fake(200, Some(json!({"auth": {}})));
        assert!(empty.data::<Creds>().is_err());
    }
}
