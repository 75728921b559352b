//! SSH secrets engine
//!
//! Two credential flows: one-time passwords brokered per connection, and
//! client-key signing against a CA the engine maintains.

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::util::encode_path;
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default mount point for the SSH engine
pub const DEFAULT_MOUNT: &str = "ssh";

/// Options for creating an SSH role
#[derive(Debug, Clone, Default, Serialize)]
pub struct SshRoleOpts {
    /// Credential flow: `"otp"` or `"ca"`
    pub key_type: String,
    /// Default username credentials are issued for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
    /// CIDR blocks the role may issue credentials for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_list: Option<String>,
    /// Usernames the role may issue credentials for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_users: Option<String>,
    /// SSH port on the target hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Certificate TTL for CA roles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Maximum certificate TTL for CA roles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
    /// Allow signing user certificates (CA roles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_user_certificates: Option<bool>,
    /// Allow signing host certificates (CA roles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_host_certificates: Option<bool>,
    /// Default extensions stamped onto signed certificates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Options for signing a client public key
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignKeyOpts {
    /// `"user"` or `"host"`; the role's default applies when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_type: Option<String>,
    /// Principals baked into the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_principals: Option<String>,
    /// Certificate TTL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Identifier recorded in the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    /// Critical options baked into the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_options: Option<serde_json::Map<String, serde_json::Value>>,
    /// Extensions baked into the certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A brokered one-time password
///
/// The OTP is valid for a single connection; the struct wipes its memory on
/// drop.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SshOtp {
    /// The one-time password
    pub key: String,
    /// Credential type, always `"otp"`
    #[serde(default)]
    pub key_type: String,
    /// Target host the OTP was issued for
    #[serde(default)]
    pub ip: String,
    /// Username the OTP was issued for
    #[serde(default)]
    pub username: String,
    /// SSH port on the target host
    #[serde(default)]
    pub port: u16,
}

impl std::fmt::Debug for SshOtp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshOtp")
            .field("key", &"****")
            .field("ip", &self.ip)
            .field("username", &self.username)
            .field("port", &self.port)
            .finish()
    }
}

/// A certificate produced by the signing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SignedKey {
    /// Serial number of the certificate
    pub serial_number: String,
    /// The signed certificate in authorized-keys format
    pub signed_key: String,
}

/// Handle for SSH engine operations against one mount
#[derive(Debug)]
pub struct Ssh<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Ssh<'a> {
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

    /// Create or update a role
    pub async fn create_role(&self, name: &str, opts: SshRoleOpts) -> Result<ApiResponse> {
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

    /// Generate a one-time password for a connection
    pub async fn generate_otp(
        &self,
        name: &str,
        ip: &str,
        username: Option<&str>,
    ) -> Result<SshOtp> {
        let mut body = json!({ "ip": ip });
        if let Some(username) = username {
            body["username"] = json!(username);
        }
        let resp = self
            .client
            .post(
                &format!("{}/creds/{}", self.mount, encode_path(name)),
                Some(body),
            )
            .await?;
        resp.data()
    }

    /// Verify an OTP presented to a host
    ///
    /// Used by the host-side helper; verification consumes the OTP.
    pub async fn verify_otp(&self, otp: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/verify", self.mount),
                Some(json!({ "otp": otp })),
            )
            .await
    }

    /// Sign a client public key with the engine's CA
    pub async fn sign_key(
        &self,
        name: &str,
        public_key: &str,
        opts: SignKeyOpts,
    ) -> Result<SignedKey> {
        let mut body = serde_json::to_value(opts)?;
        body["public_key"] = json!(public_key);
        let resp = self
            .client
            .post(
                &format!("{}/sign/{}", self.mount, encode_path(name)),
                Some(body),
            )
            .await?;
        resp.data()
    }

    /// Read the CA's public key
    pub async fn read_public_key(&self) -> Result<ApiResponse> {
        self.client
            .get(&format!("{}/public_key", self.mount), &[])
            .await
    }

    /// Configure the engine's CA key pair
    ///
    /// With `generate_signing_key` the server mints its own key pair and
    /// both key arguments stay unset.
    pub async fn configure_ca(
        &self,
        private_key: Option<&str>,
        public_key: Option<&str>,
        generate_signing_key: bool,
    ) -> Result<ApiResponse> {
        let mut body = json!({ "generate_signing_key": generate_signing_key });
        if let Some(private_key) = private_key {
            body["private_key"] = json!(private_key);
        }
        if let Some(public_key) = public_key {
            body["public_key"] = json!(public_key);
        }
        self.client
            .post(&format!("{}/config/ca", self.mount), Some(body))
            .await
    }

    /// Delete the engine's CA configuration
    pub async fn delete_ca(&self) -> Result<ApiResponse> {
        self.client
            .delete(&format!("{}/config/ca", self.mount))
            .await
    }
}
