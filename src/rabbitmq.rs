//! RabbitMQ secrets engine
//!
//! Brokers per-lease RabbitMQ users with tags and per-vhost permissions.

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::models::LeasedCredentials;
use crate::util::encode_path;
use serde::Serialize;
use serde_json::json;

/// Default mount point for the RabbitMQ engine
pub const DEFAULT_MOUNT: &str = "rabbitmq";

/// Options for creating a role
#[derive(Debug, Clone, Default, Serialize)]
pub struct RabbitMqRoleOpts {
    /// Comma-separated user tags, e.g. `"administrator"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Per-vhost permission map, JSON-encoded as the API expects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhosts: Option<String>,
    /// Per-vhost topic permission map, JSON-encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vhost_topics: Option<String>,
}

/// Handle for RabbitMQ engine operations against one mount
#[derive(Debug)]
pub struct RabbitMq<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> RabbitMq<'a> {
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

    /// Configure the management-API connection
    pub async fn configure_connection(
        &self,
        connection_uri: &str,
        username: &str,
        password: &str,
        verify_connection: Option<bool>,
    ) -> Result<ApiResponse> {
        let mut body = json!({
            "connection_uri": connection_uri,
            "username": username,
            "password": password,
        });
        if let Some(verify) = verify_connection {
            body["verify_connection"] = json!(verify);
        }
        self.client
            .post(&format!("{}/config/connection", self.mount), Some(body))
            .await
    }

    /// Configure lease TTLs for generated credentials
    pub async fn configure_lease(&self, ttl: u64, max_ttl: u64) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/config/lease", self.mount),
                Some(json!({ "ttl": ttl, "max_ttl": max_ttl })),
            )
            .await
    }

    /// Create or update a role
    pub async fn create_role(&self, name: &str, opts: RabbitMqRoleOpts) -> Result<ApiResponse> {
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

    /// Delete a role
    pub async fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .delete(&format!("{}/roles/{}", self.mount, encode_path(name)))
            .await
    }

    /// Generate credentials from a role
    pub async fn generate_credentials(&self, name: &str) -> Result<LeasedCredentials> {
        let resp = self
            .client
            .get(&format!("{}/creds/{}", self.mount, encode_path(name)), &[])
            .await?;
        LeasedCredentials::from_response(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_opts_omit_unset_fields() {
        let opts = RabbitMqRoleOpts {
            tags: Some("policymaker".to_string()),
            vhosts: Some(r#"{"/": {"configure": ".*", "write": ".*", "read": ".*"}}"#.to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(opts).unwrap();
        assert_eq!(
            body,
            json!({
                "tags": "policymaker",
                "vhosts": r#"{"/": {"configure": ".*", "write": ".*", "read": ".*"}}"#
            })
        );
    }
}
