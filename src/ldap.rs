//! LDAP secrets engine
//!
//! Static-role password management for existing LDAP entries: the engine
//! binds with a privileged account, rotates the passwords of managed
//! entries on a schedule, and serves the current password on demand.

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::util::encode_path;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Default mount point for the LDAP engine
pub const DEFAULT_MOUNT: &str = "ldap";

/// Options for configuring the engine's bind account
#[derive(Debug, Clone, Default, Serialize)]
pub struct LdapConfigOpts {
    /// Distinguished name the engine binds as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binddn: Option<String>,
    /// Password for the bind account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindpass: Option<String>,
    /// LDAP server URL, e.g. `ldaps://ldap.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Password policy used when generating new passwords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_policy: Option<String>,
    /// Directory schema: `openldap`, `ad`, or `racf`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Base DN under which managed users live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userdn: Option<String>,
}

/// Options for creating a static role
#[derive(Debug, Clone, Default, Serialize)]
pub struct LdapStaticRoleOpts {
    /// Username of the managed entry
    pub username: String,
    /// Distinguished name of the managed entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    /// How often the password is rotated, e.g. `"24h"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_period: Option<String>,
}

/// Current credentials of a static role
#[derive(Clone, Deserialize)]
pub struct LdapStaticCredentials {
    /// Username of the managed entry
    pub username: String,
    /// Distinguished name of the managed entry, when known
    #[serde(default)]
    pub dn: Option<String>,
    /// Current password (protected)
    pub password: SecretString,
    /// Previous password, kept through one rotation window
    #[serde(default)]
    pub last_password: Option<SecretString>,
    /// Seconds until the next scheduled rotation
    #[serde(default)]
    pub ttl: u64,
    /// Configured rotation period in seconds
    #[serde(default)]
    pub rotation_period: u64,
}

impl std::fmt::Debug for LdapStaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LdapStaticCredentials")
            .field("username", &self.username)
            .field("dn", &self.dn)
            .field("password", &"****")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Handle for LDAP engine operations against one mount
#[derive(Debug)]
pub struct Ldap<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Ldap<'a> {
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

    /// Configure the engine's bind account and directory settings
    pub async fn configure(&self, opts: LdapConfigOpts) -> Result<ApiResponse> {
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

    /// Rotate the bind account's own password
    pub async fn rotate_root_credentials(&self) -> Result<ApiResponse> {
        self.client
            .post(&format!("{}/rotate-root", self.mount), None)
            .await
    }

    /// Create or update a static role
    pub async fn create_or_update_static_role(
        &self,
        name: &str,
        opts: LdapStaticRoleOpts,
    ) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/static-role/{}", self.mount, encode_path(name)),
                Some(serde_json::to_value(opts)?),
            )
            .await
    }

    /// Read a static role's definition
    pub async fn read_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .get(
                &format!("{}/static-role/{}", self.mount, encode_path(name)),
                &[],
            )
            .await
    }

    /// List static roles
    pub async fn list_static_roles(&self) -> Result<ApiResponse> {
        self.client
            .list(&format!("{}/static-role", self.mount))
            .await
    }

    /// Delete a static role
    ///
    /// The LDAP entry itself is left untouched; only the engine stops
    /// managing its password.
    pub async fn delete_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .delete(&format!("{}/static-role/{}", self.mount, encode_path(name)))
            .await
    }

    /// Read the current credentials of a static role
    pub async fn get_static_credentials(&self, name: &str) -> Result<LdapStaticCredentials> {
        let resp = self
            .client
            .get(
                &format!("{}/static-cred/{}", self.mount, encode_path(name)),
                &[],
            )
            .await?;
        resp.data()
    }

    /// Rotate a static role's password immediately
    pub async fn rotate_static_credentials(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/rotate-role/{}", self.mount, encode_path(name)),
                None,
            )
            .await
    }
}
