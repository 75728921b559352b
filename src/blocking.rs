//! Blocking call surface
//!
//! A synchronous twin of the async API for callers without a runtime of
//! their own. The blocking [`Client`] owns the async client plus a
//! current-thread tokio runtime; every method drives the identical async
//! request-construction logic to completion, so the two surfaces cannot
//! drift apart — only the suspension point differs.
//!
//! # Panics
//!
//! Calling blocking methods from inside an async runtime panics. Use the
//! async [`Client`](crate::Client) there instead.
//!
//! # Example
//!
//! ```no_run
//! use vault_sdk::{Auth, ClientBuilder};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new("http://127.0.0.1:8200")
//!     .auth(Auth::token("s.kXxXXxxXXXxxx"))
//!     .build_blocking()?;
//!
//! let secret = client.kv2().read_secret("app/config")?;
//! println!("current version: {}", secret.metadata.version);
//! # Ok(())
//! # }
//! ```

use crate::client::ApiResponse;
use crate::config::ClientConfig;
use crate::errors::{Error, Result};
use crate::models::LeasedCredentials;
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;

/// Blocking Vault API client
pub struct Client {
    inner: crate::Client,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Client")
            .field("inner", &self.inner)
            .finish()
    }
}

impl Client {
    /// Create a new blocking client with the given configuration
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build runtime: {}", e)))?;

        Ok(Self {
            inner: crate::client::Client::new(config)?,
            runtime: Arc::new(runtime),
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    // Transport primitives

    /// Issue a GET request against an API path
    pub fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse> {
        self.block_on(self.inner.get(path, params))
    }

    /// Issue a LIST request (GET with a `list=true` query flag)
    pub fn list(&self, path: &str) -> Result<ApiResponse> {
        self.block_on(self.inner.list(path))
    }

    /// Issue a POST request with an optional JSON body
    pub fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        self.block_on(self.inner.post(path, body))
    }

    /// Issue a PATCH request with JSON merge-patch semantics
    pub fn patch(&self, path: &str, body: Value) -> Result<ApiResponse> {
        self.block_on(self.inner.patch(path, body))
    }

    /// Issue a DELETE request
    pub fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.block_on(self.inner.delete(path))
    }

    // Engine accessors

    /// Versioned key-value store (default mount `secret`)
    pub fn kv2(&self) -> Kv2<'_> {
        Kv2 {
            client: self,
            mount: crate::kv2::DEFAULT_MOUNT.to_string(),
        }
    }

    /// Token auth method (`auth/token`)
    pub fn token(&self) -> TokenAuth<'_> {
        TokenAuth { client: self }
    }

    /// Database secrets engine (default mount `database`)
    pub fn database(&self) -> Database<'_> {
        Database {
            client: self,
            mount: crate::database::DEFAULT_MOUNT.to_string(),
        }
    }

    /// LDAP secrets engine (default mount `ldap`)
    pub fn ldap(&self) -> Ldap<'_> {
        Ldap {
            client: self,
            mount: crate::ldap::DEFAULT_MOUNT.to_string(),
        }
    }

    /// SSH secrets engine (default mount `ssh`)
    pub fn ssh(&self) -> Ssh<'_> {
        Ssh {
            client: self,
            mount: crate::ssh::DEFAULT_MOUNT.to_string(),
        }
    }

    /// RabbitMQ secrets engine (default mount `rabbitmq`)
    pub fn rabbitmq(&self) -> RabbitMq<'_> {
        RabbitMq {
            client: self,
            mount: crate::rabbitmq::DEFAULT_MOUNT.to_string(),
        }
    }

    /// Consul secrets engine (default mount `consul`)
    pub fn consul(&self) -> Consul<'_> {
        Consul {
            client: self,
            mount: crate::consul::DEFAULT_MOUNT.to_string(),
        }
    }

    /// Active Directory secrets engine (default mount `ad`)
    pub fn ad(&self) -> ActiveDirectory<'_> {
        ActiveDirectory {
            client: self,
            mount: crate::ad::DEFAULT_MOUNT.to_string(),
        }
    }
}

/// Blocking handle for KV v2 operations
#[derive(Debug)]
pub struct Kv2<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Kv2<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::kv2::Kv2<'_> {
        self.client.inner.kv2().with_mount(self.mount.as_str())
    }

    /// Read the engine configuration
    pub fn read_config(&self) -> Result<crate::kv2::KvConfig> {
        self.client.block_on(self.handle().read_config())
    }

    /// Update the engine configuration
    pub fn configure(&self, opts: crate::kv2::KvConfigOpts) -> Result<ApiResponse> {
        self.client.block_on(self.handle().configure(opts))
    }

    /// Read the current version of a secret
    pub fn read_secret(&self, path: &str) -> Result<crate::kv2::KvSecret> {
        self.client.block_on(self.handle().read_secret(path))
    }

    /// Read a specific version of a secret
    pub fn read_secret_version(&self, path: &str, version: u64) -> Result<crate::kv2::KvSecret> {
        self.client
            .block_on(self.handle().read_secret_version(path, version))
    }

    /// Create a new version of a secret
    pub fn create_or_update_secret(
        &self,
        path: &str,
        data: Map<String, Value>,
        opts: crate::kv2::WriteOpts,
    ) -> Result<crate::kv2::VersionMetadata> {
        self.client
            .block_on(self.handle().create_or_update_secret(path, data, opts))
    }

    /// Apply a partial update to a secret (see [`crate::kv2::Kv2::patch`])
    pub fn patch(
        &self,
        path: &str,
        updates: Map<String, Value>,
        opts: crate::kv2::PatchOpts,
    ) -> Result<crate::kv2::VersionMetadata> {
        self.client.block_on(self.handle().patch(path, updates, opts))
    }

    /// Soft-delete the latest version of a secret
    pub fn delete_latest_version(&self, path: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_latest_version(path))
    }

    /// Soft-delete specific versions of a secret
    pub fn delete_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().delete_versions(path, versions))
    }

    /// Undo the soft-deletion of specific versions
    pub fn undelete_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().undelete_versions(path, versions))
    }

    /// Permanently destroy the payload of specific versions
    pub fn destroy_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().destroy_versions(path, versions))
    }

    /// Read the metadata record of a secret path
    pub fn read_metadata(&self, path: &str) -> Result<crate::kv2::SecretMetadata> {
        self.client.block_on(self.handle().read_metadata(path))
    }

    /// Update the metadata record of a secret path
    pub fn update_metadata(
        &self,
        path: &str,
        opts: crate::kv2::MetadataOpts,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().update_metadata(path, opts))
    }

    /// Delete the metadata record and every version of a secret
    pub fn delete_metadata_and_all_versions(&self, path: &str) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().delete_metadata_and_all_versions(path))
    }

    /// List the entries under a folder path
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        self.client.block_on(self.handle().list(path))
    }
}

/// Blocking handle for token backend operations
#[derive(Debug)]
pub struct TokenAuth<'a> {
    client: &'a Client,
}

impl<'a> TokenAuth<'a> {
    fn handle(&self) -> crate::token::TokenAuth<'_> {
        self.client.inner.token()
    }

    /// Create a new token as a child of the calling token
    pub fn create(&self, opts: crate::token::TokenCreateOpts) -> Result<crate::token::CreatedToken> {
        self.client.block_on(self.handle().create(opts))
    }

    /// Create a token with no parent
    pub fn create_orphan(
        &self,
        opts: crate::token::TokenCreateOpts,
    ) -> Result<crate::token::CreatedToken> {
        self.client.block_on(self.handle().create_orphan(opts))
    }

    /// Look up the properties of a token
    pub fn lookup(&self, token: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().lookup(token))
    }

    /// Look up the calling token
    pub fn lookup_self(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().lookup_self())
    }

    /// Look up a token by its accessor
    pub fn lookup_accessor(&self, accessor: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().lookup_accessor(accessor))
    }

    /// Renew a token's lease
    pub fn renew(
        &self,
        token: &str,
        increment: Option<String>,
    ) -> Result<crate::token::CreatedToken> {
        self.client.block_on(self.handle().renew(token, increment))
    }

    /// Renew the calling token's lease
    pub fn renew_self(&self, increment: Option<String>) -> Result<crate::token::CreatedToken> {
        self.client.block_on(self.handle().renew_self(increment))
    }

    /// Revoke a token and all of its children
    pub fn revoke(&self, token: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().revoke(token))
    }

    /// Revoke the calling token
    pub fn revoke_self(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().revoke_self())
    }

    /// Revoke a token by its accessor
    pub fn revoke_accessor(&self, accessor: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().revoke_accessor(accessor))
    }

    /// List the accessors of all active tokens
    pub fn list_accessors(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_accessors())
    }
}

/// Blocking handle for database engine operations
#[derive(Debug)]
pub struct Database<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Database<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::database::Database<'_> {
        self.client.inner.database().with_mount(self.mount.as_str())
    }

    /// Configure a named database connection
    pub fn configure(
        &self,
        name: &str,
        plugin_name: &str,
        opts: crate::database::DatabaseConnectionOpts,
    ) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().configure(name, plugin_name, opts))
    }

    /// Read a connection's configuration
    pub fn read_connection(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_connection(name))
    }

    /// List configured connections
    pub fn list_connections(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_connections())
    }

    /// Delete a connection's configuration
    pub fn delete_connection(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_connection(name))
    }

    /// Close and reopen a connection's plugin
    pub fn reset_connection(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().reset_connection(name))
    }

    /// Rotate the root credentials the engine connects with
    pub fn rotate_root_credentials(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().rotate_root_credentials(name))
    }

    /// Create or update a dynamic role
    pub fn create_role(
        &self,
        name: &str,
        opts: crate::database::DatabaseRoleOpts,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().create_role(name, opts))
    }

    /// Read a dynamic role's definition
    pub fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_role(name))
    }

    /// List dynamic roles
    pub fn list_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_roles())
    }

    /// Delete a dynamic role
    pub fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_role(name))
    }

    /// Generate credentials from a dynamic role
    pub fn generate_credentials(&self, name: &str) -> Result<LeasedCredentials> {
        self.client.block_on(self.handle().generate_credentials(name))
    }

    /// Create or update a static role
    pub fn create_static_role(
        &self,
        name: &str,
        opts: crate::database::DatabaseStaticRoleOpts,
    ) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().create_static_role(name, opts))
    }

    /// Read a static role's definition
    pub fn read_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_static_role(name))
    }

    /// List static roles
    pub fn list_static_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_static_roles())
    }

    /// Delete a static role
    pub fn delete_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_static_role(name))
    }

    /// Read the current credentials of a static role
    pub fn get_static_credentials(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().get_static_credentials(name))
    }

    /// Rotate a static role's password immediately
    pub fn rotate_static_credentials(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().rotate_static_credentials(name))
    }
}

/// Blocking handle for LDAP engine operations
#[derive(Debug)]
pub struct Ldap<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Ldap<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::ldap::Ldap<'_> {
        self.client.inner.ldap().with_mount(self.mount.as_str())
    }

    /// Configure the engine's bind account and directory settings
    pub fn configure(&self, opts: crate::ldap::LdapConfigOpts) -> Result<ApiResponse> {
        self.client.block_on(self.handle().configure(opts))
    }

    /// Read the engine configuration
    pub fn read_config(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_config())
    }

    /// Rotate the bind account's own password
    pub fn rotate_root_credentials(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().rotate_root_credentials())
    }

    /// Create or update a static role
    pub fn create_or_update_static_role(
        &self,
        name: &str,
        opts: crate::ldap::LdapStaticRoleOpts,
    ) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().create_or_update_static_role(name, opts))
    }

    /// Read a static role's definition
    pub fn read_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_static_role(name))
    }

    /// List static roles
    pub fn list_static_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_static_roles())
    }

    /// Delete a static role
    pub fn delete_static_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_static_role(name))
    }

    /// Read the current credentials of a static role
    pub fn get_static_credentials(&self, name: &str) -> Result<crate::ldap::LdapStaticCredentials> {
        self.client
            .block_on(self.handle().get_static_credentials(name))
    }

    /// Rotate a static role's password immediately
    pub fn rotate_static_credentials(&self, name: &str) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().rotate_static_credentials(name))
    }
}

/// Blocking handle for SSH engine operations
#[derive(Debug)]
pub struct Ssh<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Ssh<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::ssh::Ssh<'_> {
        self.client.inner.ssh().with_mount(self.mount.as_str())
    }

    /// Create or update a role
    pub fn create_role(&self, name: &str, opts: crate::ssh::SshRoleOpts) -> Result<ApiResponse> {
        self.client.block_on(self.handle().create_role(name, opts))
    }

    /// Read a role's definition
    pub fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_role(name))
    }

    /// List roles
    pub fn list_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_roles())
    }

    /// Delete a role
    pub fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_role(name))
    }

    /// Generate a one-time password for a connection
    pub fn generate_otp(
        &self,
        name: &str,
        ip: &str,
        username: Option<&str>,
    ) -> Result<crate::ssh::SshOtp> {
        self.client
            .block_on(self.handle().generate_otp(name, ip, username))
    }

    /// Verify an OTP presented to a host
    pub fn verify_otp(&self, otp: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().verify_otp(otp))
    }

    /// Sign a client public key with the engine's CA
    pub fn sign_key(
        &self,
        name: &str,
        public_key: &str,
        opts: crate::ssh::SignKeyOpts,
    ) -> Result<crate::ssh::SignedKey> {
        self.client
            .block_on(self.handle().sign_key(name, public_key, opts))
    }

    /// Read the CA's public key
    pub fn read_public_key(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_public_key())
    }

    /// Configure the engine's CA key pair
    pub fn configure_ca(
        &self,
        private_key: Option<&str>,
        public_key: Option<&str>,
        generate_signing_key: bool,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().configure_ca(
            private_key,
            public_key,
            generate_signing_key,
        ))
    }

    /// Delete the engine's CA configuration
    pub fn delete_ca(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_ca())
    }
}

/// Blocking handle for RabbitMQ engine operations
#[derive(Debug)]
pub struct RabbitMq<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> RabbitMq<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::rabbitmq::RabbitMq<'_> {
        self.client.inner.rabbitmq().with_mount(self.mount.as_str())
    }

    /// Configure the management-API connection
    pub fn configure_connection(
        &self,
        connection_uri: &str,
        username: &str,
        password: &str,
        verify_connection: Option<bool>,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().configure_connection(
            connection_uri,
            username,
            password,
            verify_connection,
        ))
    }

    /// Configure lease TTLs for generated credentials
    pub fn configure_lease(&self, ttl: u64, max_ttl: u64) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().configure_lease(ttl, max_ttl))
    }

    /// Create or update a role
    pub fn create_role(
        &self,
        name: &str,
        opts: crate::rabbitmq::RabbitMqRoleOpts,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().create_role(name, opts))
    }

    /// Read a role's definition
    pub fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_role(name))
    }

    /// Delete a role
    pub fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_role(name))
    }

    /// Generate credentials from a role
    pub fn generate_credentials(&self, name: &str) -> Result<LeasedCredentials> {
        self.client.block_on(self.handle().generate_credentials(name))
    }
}

/// Blocking handle for Consul engine operations
#[derive(Debug)]
pub struct Consul<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Consul<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::consul::Consul<'_> {
        self.client.inner.consul().with_mount(self.mount.as_str())
    }

    /// Configure access to the Consul cluster
    pub fn configure_access(
        &self,
        address: &str,
        token: &str,
        scheme: Option<&str>,
    ) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().configure_access(address, token, scheme))
    }

    /// Create or update a role
    pub fn create_or_update_role(
        &self,
        name: &str,
        opts: crate::consul::ConsulRoleOpts,
    ) -> Result<ApiResponse> {
        self.client
            .block_on(self.handle().create_or_update_role(name, opts))
    }

    /// Read a role's definition
    pub fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_role(name))
    }

    /// List roles
    pub fn list_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_roles())
    }

    /// Delete a role
    pub fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_role(name))
    }

    /// Mint an ACL token from a role
    pub fn generate_credentials(&self, name: &str) -> Result<crate::consul::ConsulCredentials> {
        self.client.block_on(self.handle().generate_credentials(name))
    }
}

/// Blocking handle for Active Directory engine operations
#[derive(Debug)]
pub struct ActiveDirectory<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> ActiveDirectory<'a> {
    /// Use a non-default mount point
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    fn handle(&self) -> crate::ad::ActiveDirectory<'_> {
        self.client.inner.ad().with_mount(self.mount.as_str())
    }

    /// Configure the engine's bind account and domain settings
    pub fn configure(&self, opts: crate::ad::AdConfigOpts) -> Result<ApiResponse> {
        self.client.block_on(self.handle().configure(opts))
    }

    /// Read the engine configuration
    pub fn read_config(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_config())
    }

    /// Create or update a role bound to a service account
    pub fn create_or_update_role(
        &self,
        name: &str,
        service_account_name: &str,
        ttl: Option<u64>,
    ) -> Result<ApiResponse> {
        self.client.block_on(self.handle().create_or_update_role(
            name,
            service_account_name,
            ttl,
        ))
    }

    /// Read a role's definition
    pub fn read_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().read_role(name))
    }

    /// List roles
    pub fn list_roles(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().list_roles())
    }

    /// Delete a role
    pub fn delete_role(&self, name: &str) -> Result<ApiResponse> {
        self.client.block_on(self.handle().delete_role(name))
    }

    /// Read the current credentials of a role's service account
    pub fn get_credentials(&self, name: &str) -> Result<crate::ad::AdCredentials> {
        self.client.block_on(self.handle().get_credentials(name))
    }

    /// Rotate the bind account's own password
    pub fn rotate_root_credentials(&self) -> Result<ApiResponse> {
        self.client.block_on(self.handle().rotate_root_credentials())
    }
}
