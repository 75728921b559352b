//! Active Directory secrets engine
//!
//! Password rotation for existing AD service accounts. Roles bind a name to
//! a service account; credential reads return the account's current (and,
//! through one rotation window, previous) password.

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::util::encode_path;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Default mount point for the Active Directory engine
pub const DEFAULT_MOUNT: &str = "ad";

/// Options for configuring the engine's bind account
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdConfigOpts {
    /// Distinguished name the engine binds as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binddn: Option<String>,
    /// Password for the bind account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindpass: Option<String>,
    /// LDAP URL of the domain controller, e.g. `ldaps://dc.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base DN under which managed accounts live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userdn: Option<String>,
    /// UPN domain appended to account names, e.g. `example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upndomain: Option<String>,
    /// Password TTL in seconds applied to managed accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Maximum password TTL in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<u64>,
}

/// Current credentials of a managed service account
#[derive(Clone, Deserialize)]
pub struct AdCredentials {
    /// Account username
    pub username: String,
    /// Current password (protected)
    pub current_password: SecretString,
    /// Previous password, kept through one rotation window
    #[serde(default)]
    pub last_password: Option<SecretString>,
}

impl std::fmt::Debug for AdCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdCredentials")
            .field("username", &self.username)
            .field("current_password", &"****")
            .finish()
    }
}

/// Handle for Active Directory engine operations against one mount
#[derive(Debug)]
pub struct ActiveDirectory<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> ActiveDirectory<'a> {
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

    /// Configure the engine's bind account and domain settings
    pub async fn configure(&self, opts: AdConfigOpts) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/config", self.mount),
                Some(serde_json::to_value(opts)?),
            )
            .await
    }

    /// Read the engine configuration
    ///
    /// The bind password is never returned by the server.
    pub async fn read_config(&self) -> Result<ApiResponse> {
        self.client.get(&format!("{}/config", self.mount), &[]).await
    }

    /// Create or update a role bound to a service account
    pub async fn create_or_update_role(
        &self,
        name: &str,
        service_account_name: &str,
        ttl: Option<u64>,
    ) -> Result<ApiResponse> {
        let mut body = json!({ "service_account_name": service_account_name });
        if let Some(ttl) = ttl {
            body["ttl"] = json!(ttl);
        }
        self.client
            .post(
                &format!("{}/roles/{}", self.mount, encode_path(name)),
                Some(body),
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

    /// Read the current credentials of a role's service account
    pub async fn get_credentials(&self, name: &str) -> Result<AdCredentials> {
        let resp = self
            .client
            .get(&format!("{}/creds/{}", self.mount, encode_path(name)), &[])
            .await?;
        resp.data()
    }

    /// Rotate the bind account's own password
    pub async fn rotate_root_credentials(&self) -> Result<ApiResponse> {
        self.client
            .post(&format!("{}/rotate-root", self.mount), None)
            .await
    }
}
