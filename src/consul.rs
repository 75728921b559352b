//! Consul secrets engine
//!
//! Mints Consul ACL tokens from role definitions.

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::models::{Envelope, Lease};
use crate::util::encode_path;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Default mount point for the Consul engine
pub const DEFAULT_MOUNT: &str = "consul";

/// Options for creating a role
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsulRoleOpts {
    /// Names of Consul ACL policies attached to minted tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consul_policies: Option<Vec<String>>,
    /// Whether minted tokens are local to the datacenter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<bool>,
    /// Lease TTL for minted tokens, e.g. `"1h"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Maximum lease TTL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
}

/// A Consul ACL token minted from a role
#[derive(Clone)]
pub struct ConsulCredentials {
    /// The ACL token (protected)
    pub token: SecretString,
    /// Lease backing the token
    pub lease: Lease,
}

impl std::fmt::Debug for ConsulCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsulCredentials")
            .field("token", &"****")
            .field("lease_id", &self.lease.lease_id)
            .finish()
    }
}

/// Handle for Consul engine operations against one mount
#[derive(Debug)]
pub struct Consul<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Consul<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            mount: DEFAULT_MOUNT.to_string(),
        }
    }

    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    /// Configure access to the Consul cluster
    pub async fn configure_access(
        &self,
        address: &str,
        token: &str,
        scheme: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut body = json!({ "address": address, "token": token });
        if let Some(scheme) = scheme {
            body["scheme"] = json!(scheme);
        }
        self.client
            .post(&format!("{}/config/access", self.mount), Some(body))
            .await
    }

    /// Create or update a role
    pub async fn create_or_update_role(
        &self,
        name: &str,
        opts: ConsulRoleOpts,
    ) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/roles/{}", self.mount, encode_path(name)),
                Some(serde_json::to_value(opts)?),
            )
            .await
    }

    /// Read a role's definition
    pub async fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .get(&format!("{}/roles/{}", self.mount, encode_path(name)), &[])
            .await
    }

    /// List roles
    pub async fn list_roles(&self) -> Result<ApiResponse> {
        self.client.list(&format!("{}/roles", self.mount)).await
    }

    /// Delete a role
    pub async fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .delete(&format!("{}/roles/{}", self.mount, encode_path(name)))
            .await
    }

    /// Mint an ACL token from a role
    pub async fn generate_credentials(&self, name: &str) -> Result<ConsulCredentials> {
        #[derive(Deserialize)]
        struct TokenData {
            token: String,
        }

        let resp = self
            .client
            .get(&format!("{}/creds/{}", self.mount, encode_path(name)), &[])
            .await?;
        let env: Envelope<TokenData> = resp.json()?;

        Ok(ConsulCredentials {
            token: SecretString::new(env.data.token),
            lease: Lease {
                lease_id: env.lease_id,
                lease_duration: env.lease_duration,
                renewable: env.renewable,
            },
        })
    }
}
