use crate::{auth::Auth, errors::Result, Error};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the Vault server, e.g. `https://vault.example.com:8200`
    pub address: String,
    /// Authentication configuration
    pub auth: Auth,
    /// Optional namespace sent as `X-Vault-Namespace`
    pub namespace: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retries for transient failures
    pub retries: u32,
    /// User agent suffix
    pub user_agent_suffix: Option<String>,
}

/// Builder for creating a configured [`Client`](crate::Client)
#[derive(Debug)]
pub struct ClientBuilder {
    address: String,
    auth: Option<Auth>,
    namespace: Option<String>,
    timeout_ms: u64,
    retries: u32,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with the given server address
    ///
    /// # Arguments
    ///
    /// * `address` - Address of the Vault server (e.g. `"http://127.0.0.1:8200"`).
    ///   Plain HTTP is accepted because dev-mode servers listen without TLS;
    ///   production deployments should use `https`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            auth: None,
            namespace: None,
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            retries: crate::DEFAULT_RETRIES,
            user_agent_suffix: None,
        }
    }

    /// Set the authentication method
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Scope all requests to a namespace (`X-Vault-Namespace` header)
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the request timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the number of retries for transient failures
    ///
    /// Only connection failures, timeouts, and 408/429/5xx responses are
    /// retried. Client errors — including not-found reads and check-and-set
    /// mismatches — always surface on the first response.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Add a custom user agent suffix
    pub fn user_agent_extra(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client with the configured options
    pub fn build(self) -> Result<crate::Client> {
        let config = self.into_config()?;
        crate::client::Client::new(config)
    }

    /// Build a blocking client with the configured options
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<crate::blocking::Client> {
        let config = self.into_config()?;
        crate::blocking::Client::new(config)
    }

    fn into_config(self) -> Result<ClientConfig> {
        let address = self.address.trim_end_matches('/');

        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(Error::Config(
                "Vault address must start with http:// or https://".to_string(),
            ));
        }

        let auth = self.auth.ok_or_else(|| {
            Error::Config(
                "Authentication is required. Use .auth() to set a token or provider".to_string(),
            )
        })?;

        Ok(ClientConfig {
            address: address.to_string(),
            auth,
            namespace: self.namespace,
            timeout: Duration::from_millis(self.timeout_ms),
            retries: self.retries,
            user_agent_suffix: self.user_agent_suffix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_auth() {
        let result = ClientBuilder::new("https://vault.example.com").build();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn test_builder_validates_address() {
        let result = ClientBuilder::new("vault.example.com")
            .auth(Auth::token("s.token"))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_accepts_dev_server_http() {
        let result = ClientBuilder::new("http://127.0.0.1:8200")
            .auth(Auth::token("s.token"))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = ClientBuilder::new("http://127.0.0.1:8200/")
            .auth(Auth::token("s.token"))
            .build()
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("http://127.0.0.1:8200"));
        assert!(!debug.contains("8200/\""));
    }
}
