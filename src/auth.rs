//! Authentication support for the Vault SDK
//!
//! Every request carries an `X-Vault-Token` header. The token either comes
//! from a static value handed to the client at build time, or from a
//! [`TokenProvider`] that can mint and refresh tokens dynamically (an agent
//! sidecar, a Kubernetes login flow, a renewal loop). When the server
//! rejects a token with 403 and the provider supports refresh, the client
//! refreshes once and replays the request.
//!
//! # Examples
//!
//! ## Static token
//!
//! ```
//! use vault_sdk::Auth;
//!
//! let auth = Auth::token("s.kXxXXxxXXXxxx");
//! ```
//!
//! ## Dynamic token provider
//!
//! ```
//! use vault_sdk::{Auth, TokenProvider, SecretString};
//! use async_trait::async_trait;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone)]
//! struct AgentTokenProvider {
//!     current_token: Arc<Mutex<String>>,
//! }
//!
//! #[async_trait]
//! impl TokenProvider for AgentTokenProvider {
//!     async fn get_token(&self) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>> {
//!         let token = self.current_token.lock().unwrap().clone();
//!         Ok(SecretString::new(token))
//!     }
//!
//!     async fn refresh_token(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!         // Re-login against the auth method and store the new token
//!         *self.current_token.lock().unwrap() = "s.newtoken".to_string();
//!         Ok(())
//!     }
//!
//!     fn clone_box(&self) -> Box<dyn TokenProvider> {
//!         Box::new(self.clone())
//!     }
//! }
//!
//! let provider = AgentTokenProvider {
//!     current_token: Arc::new(Mutex::new("s.initial".to_string())),
//! };
//! let auth = Auth::token_provider(provider);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Authentication method for the Vault API
///
/// Credentials are stored as [`SecretString`] so they never leak through
/// `Debug` output or logs.
#[derive(Clone)]
pub enum Auth {
    /// Static Vault token, sent as `X-Vault-Token: <token>`
    Token(SecretString),
    /// Dynamic token provider for refreshable tokens
    ///
    /// Supports a single refresh-and-replay when the server answers 403.
    TokenProvider(Box<dyn TokenProvider>),
}

impl Auth {
    /// Create a static token authentication
    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(SecretString::new(token.into()))
    }

    /// Create a dynamic token provider authentication
    pub fn token_provider(provider: impl TokenProvider + 'static) -> Self {
        Auth::TokenProvider(Box::new(provider))
    }

    /// Get the current `X-Vault-Token` header value
    pub(crate) async fn header_value(
        &self,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            Auth::Token(token) => Ok(token.expose_secret().clone()),
            Auth::TokenProvider(provider) => {
                let token = provider.get_token().await?;
                Ok(token.expose_secret().clone())
            }
        }
    }

    /// Check if this auth method supports token refresh
    pub(crate) fn supports_refresh(&self) -> bool {
        matches!(self, Auth::TokenProvider(_))
    }

    /// Refresh the token (only for TokenProvider)
    pub(crate) async fn refresh(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self {
            Auth::TokenProvider(provider) => provider.refresh_token().await,
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Token(_) => write!(f, "Auth::Token(****)"),
            Auth::TokenProvider(_) => write!(f, "Auth::TokenProvider(****)"),
        }
    }
}

/// Trait for providing dynamic Vault tokens
///
/// Implement this to integrate token renewal or re-login flows. The SDK
/// calls `refresh_token` once when it receives a 403 response, then replays
/// the failed request with the new token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get the current token
    ///
    /// Called before each request; should return quickly, typically from a
    /// cached value.
    async fn get_token(&self) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>>;

    /// Refresh the token (called once on a 403 response)
    async fn refresh_token(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Clone the provider
    ///
    /// Typically implemented as `Box::new(self.clone())`.
    fn clone_box(&self) -> Box<dyn TokenProvider>;
}

impl Clone for Box<dyn TokenProvider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Static token provider (for testing or simple cases)
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Create a new static token provider
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticTokenProvider(****)")
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.token.clone())
    }

    async fn refresh_token(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Static tokens cannot be refreshed
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn TokenProvider> {
        Box::new(self.clone())
    }
}
