//! Shared data models
//!
//! Engine-specific request/response types live next to their operations in
//! the engine modules; this module holds the pieces every engine shares:
//! the response envelope, lease metadata, and dynamically generated
//! credentials.

use crate::client::ApiResponse;
use crate::errors::Result;
use secrecy::SecretString;
use serde::Deserialize;

/// The standard response envelope wrapped around every JSON body
///
/// Reads and credential generation return
/// `{"request_id", "lease_id", "renewable", "lease_duration", "data": {..}}`;
/// only `data` varies per operation.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub lease_id: String,
    #[serde(default)]
    pub renewable: bool,
    #[serde(default)]
    pub lease_duration: u64,
    pub data: T,
}

/// Lease metadata attached to dynamically generated credentials
///
/// The server owns the lease lifecycle; the client only reports what it was
/// given so callers can schedule renewal or expiry handling themselves.
#[derive(Debug, Clone)]
pub struct Lease {
    /// Lease identifier, empty for leaseless responses
    pub lease_id: String,
    /// Lease duration in seconds
    pub lease_duration: u64,
    /// Whether the lease can be renewed
    pub renewable: bool,
}

/// Username/password credentials minted by a dynamic secrets engine
#[derive(Clone)]
pub struct LeasedCredentials {
    /// Generated username
    pub username: String,
    /// Generated password (protected)
    pub password: SecretString,
    /// Lease backing these credentials
    pub lease: Lease,
}

impl LeasedCredentials {
    pub(crate) fn from_response(resp: &ApiResponse) -> Result<Self> {
        #[derive(Deserialize)]
        struct UserPass {
            username: String,
            password: String,
        }

        let env: Envelope<UserPass> = resp.json()?;
        Ok(Self {
            username: env.data.username,
            password: SecretString::new(env.data.password),
            lease: Lease {
                lease_id: env.lease_id,
                lease_duration: env.lease_duration,
                renewable: env.renewable,
            },
        })
    }
}

impl std::fmt::Debug for LeasedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeasedCredentials")
            .field("username", &self.username)
            .field("password", &"****")
            .field("lease_id", &self.lease.lease_id)
            .field("lease_duration", &self.lease.lease_duration)
            .finish()
    }
}
