//! Versioned key-value store (KV v2)
//!
//! Secrets written under a KV v2 mount are retained as an ordered sequence
//! of versions rather than overwritten in place. Reads return the payload
//! plus version metadata; writes may carry a check-and-set (`cas`) option
//! that the store rejects when the current version differs.
//!
//! The interesting operation is [`Kv2::patch`]: apply a partial update
//! without clobbering fields the caller did not mention, guarded against
//! concurrent writers by the version observed at read time.
//!
//! # Example
//!
//! ```no_run
//! # use vault_sdk::{Auth, ClientBuilder};
//! # use serde_json::{json, Map};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = ClientBuilder::new("http://127.0.0.1:8200").auth(Auth::token("t")).build()?;
//! let kv = client.kv2();
//!
//! let mut updates = Map::new();
//! updates.insert("db_password".to_string(), json!("rotated"));
//! let written = kv.patch("app/config", updates, Default::default()).await?;
//! println!("new version: {}", written.version);
//! # Ok(())
//! # }
//! ```

use crate::client::{ApiResponse, Client};
use crate::errors::Result;
use crate::util::{encode_path, null_default, rfc3339, rfc3339_opt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use time::OffsetDateTime;
use tracing::debug;

/// Default mount point for the KV v2 engine
pub const DEFAULT_MOUNT: &str = "secret";

/// A secret read from the store: payload plus version metadata
///
/// `data` is empty when the latest version was deleted or destroyed (the
/// server reports those reads with a `null` payload).
#[derive(Debug, Clone, Deserialize)]
pub struct KvSecret {
    /// Key/value payload of the version
    #[serde(deserialize_with = "null_default", default)]
    pub data: Map<String, Value>,
    /// Version metadata for the returned payload
    pub metadata: VersionMetadata,
}

/// Metadata describing one version of a secret
///
/// Also the response shape of a successful versioned write.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionMetadata {
    /// When the version was created
    #[serde(deserialize_with = "rfc3339")]
    pub created_time: OffsetDateTime,
    /// When the version was deleted, if it was
    #[serde(deserialize_with = "rfc3339_opt", default)]
    pub deletion_time: Option<OffsetDateTime>,
    /// Whether the version's payload was permanently destroyed
    #[serde(default)]
    pub destroyed: bool,
    /// Version number
    pub version: u64,
    /// Caller-supplied metadata attached to the secret, if any
    #[serde(default)]
    pub custom_metadata: Option<Map<String, Value>>,
}

/// Status of one historical version in the metadata record
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    /// When the version was created
    #[serde(deserialize_with = "rfc3339")]
    pub created_time: OffsetDateTime,
    /// When the version was deleted, if it was
    #[serde(deserialize_with = "rfc3339_opt", default)]
    pub deletion_time: Option<OffsetDateTime>,
    /// Whether the version's payload was permanently destroyed
    #[serde(default)]
    pub destroyed: bool,
}

/// The full metadata record of a secret path
#[derive(Debug, Clone, Deserialize)]
pub struct SecretMetadata {
    /// When the path was first written
    #[serde(deserialize_with = "rfc3339")]
    pub created_time: OffsetDateTime,
    /// When the path was last written
    #[serde(deserialize_with = "rfc3339")]
    pub updated_time: OffsetDateTime,
    /// Version number of the newest version
    pub current_version: u64,
    /// Oldest retained version number
    #[serde(default)]
    pub oldest_version: u64,
    /// Maximum number of versions retained for this path
    #[serde(default)]
    pub max_versions: u32,
    /// Whether writes must carry a `cas` option
    #[serde(default)]
    pub cas_required: bool,
    /// Retention duration after which versions are deleted, `"0s"` for none
    #[serde(default)]
    pub delete_version_after: String,
    /// Caller-supplied metadata attached to the secret, if any
    #[serde(default)]
    pub custom_metadata: Option<Map<String, Value>>,
    /// Per-version status records keyed by version number
    #[serde(default)]
    pub versions: HashMap<String, VersionInfo>,
}

/// Engine configuration for a KV v2 mount
#[derive(Debug, Clone, Deserialize)]
pub struct KvConfig {
    /// Maximum number of versions retained per secret
    #[serde(default)]
    pub max_versions: u32,
    /// Whether all writes must carry a `cas` option
    #[serde(default)]
    pub cas_required: bool,
    /// Retention duration after which versions are deleted, `"0s"` for none
    #[serde(default)]
    pub delete_version_after: String,
}

/// Options for configuring a KV v2 mount
///
/// Omitted fields are left absent from the request body, so the server
/// keeps its current setting for them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KvConfigOpts {
    /// Maximum number of versions retained per secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<u32>,
    /// Whether all writes must carry a `cas` option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas_required: Option<bool>,
    /// Retention duration after which versions are deleted (e.g. `"768h"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_version_after: Option<String>,
}

/// Options for updating a secret's metadata record
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataOpts {
    /// Maximum number of versions retained for this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<u32>,
    /// Whether writes to this path must carry a `cas` option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas_required: Option<bool>,
    /// Retention duration after which versions are deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_version_after: Option<String>,
    /// Free-form metadata stored alongside the secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<Map<String, Value>>,
}

/// Options for a versioned write
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOpts {
    /// Check-and-set precondition: the write is rejected unless the
    /// secret's current version equals this value (0 means "must not
    /// exist yet")
    pub cas: Option<u64>,
}

/// How a patch reaches the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatchMethod {
    /// Read the current version, merge client-side, write back with a
    /// check-and-set guard. Works against any backend.
    #[default]
    ReadThenWrite,
    /// Single `PATCH` request with `application/merge-patch+json`, for
    /// servers with native merge-patch support.
    MergePatch,
}

/// Options for a patch operation
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOpts {
    /// Patch strategy, defaults to [`PatchMethod::ReadThenWrite`]
    pub method: PatchMethod,
    /// Explicit check-and-set version; defaults to the version observed
    /// by the read step (read-then-write), or to no guard (merge-patch)
    pub cas: Option<u64>,
}

/// Handle for KV v2 operations against one mount
#[derive(Debug)]
pub struct Kv2<'a> {
    client: &'a Client,
    mount: String,
}

impl<'a> Kv2<'a> {
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

    fn data_path(&self, path: &str) -> String {
        format!("{}/data/{}", self.mount, encode_path(path))
    }

    fn metadata_path(&self, path: &str) -> String {
        format!("{}/metadata/{}", self.mount, encode_path(path))
    }

    /// Read the engine configuration
    pub async fn read_config(&self) -> Result<KvConfig> {
        let resp = self.client.get(&format!("{}/config", self.mount), &[]).await?;
        resp.data()
    }

    /// Update the engine configuration
    pub async fn configure(&self, opts: KvConfigOpts) -> Result<ApiResponse> {
        self.client
            .post(&format!("{}/config", self.mount), Some(serde_json::to_value(opts)?))
            .await
    }

    /// Read the current version of a secret
    pub async fn read_secret(&self, path: &str) -> Result<KvSecret> {
        let resp = self.client.get(&self.data_path(path), &[]).await?;
        resp.data()
    }

    /// Read a specific version of a secret
    pub async fn read_secret_version(&self, path: &str, version: u64) -> Result<KvSecret> {
        let resp = self
            .client
            .get(&self.data_path(path), &[("version", version.to_string())])
            .await?;
        resp.data()
    }

    /// Create a new version of a secret
    ///
    /// With `opts.cas` set, the body carries
    /// `{"options": {"cas": N}}` and the store rejects the write unless the
    /// current version is exactly `N`; without it the options object is
    /// omitted entirely.
    pub async fn create_or_update_secret(
        &self,
        path: &str,
        data: Map<String, Value>,
        opts: WriteOpts,
    ) -> Result<VersionMetadata> {
        let mut body = json!({ "data": data });
        if let Some(cas) = opts.cas {
            body["options"] = json!({ "cas": cas });
        }
        let resp = self.client.post(&self.data_path(path), Some(body)).await?;
        resp.data()
    }

    /// Apply a partial update to a secret
    ///
    /// Keys present in `updates` are upserted into the current payload;
    /// everything else is preserved. The merge is shallow: a nested map in
    /// `updates` replaces the stored nested map wholesale.
    ///
    /// With the default [`PatchMethod::ReadThenWrite`] this is two round
    /// trips: a fresh read (never a cached value), a client-side merge, and
    /// a write guarded by `cas` equal to the version the read observed (or
    /// `opts.cas` when supplied). A concurrent writer between the two round
    /// trips makes the store reject the write with
    /// [`Error::Precondition`](crate::Error::Precondition); the SDK does
    /// not retry — resolving the race belongs to the caller.
    ///
    /// A path with no value behind it fails with
    /// [`Error::NotFound`](crate::Error::NotFound) before any write is
    /// attempted. If the path exists but its latest version was deleted,
    /// the merge proceeds against an empty payload and the patch
    /// re-creates content from `updates` alone.
    ///
    /// Patching is not idempotent: every successful call appends a new
    /// version, even when the merged payload is identical.
    pub async fn patch(
        &self,
        path: &str,
        updates: Map<String, Value>,
        opts: PatchOpts,
    ) -> Result<VersionMetadata> {
        match opts.method {
            PatchMethod::MergePatch => {
                let mut body = json!({ "data": updates });
                if let Some(cas) = opts.cas {
                    body["options"] = json!({ "cas": cas });
                }
                let resp = self.client.patch(&self.data_path(path), body).await?;
                resp.data()
            }
            PatchMethod::ReadThenWrite => {
                let current = self.read_secret(path).await?;
                let cas = opts.cas.unwrap_or(current.metadata.version);
                debug!(path, cas, "patching secret via read-then-write");

                let mut merged = current.data;
                merged.extend(updates);

                self.create_or_update_secret(path, merged, WriteOpts { cas: Some(cas) })
                    .await
            }
        }
    }

    /// Soft-delete the latest version of a secret
    pub async fn delete_latest_version(&self, path: &str) -> Result<ApiResponse> {
        self.client.delete(&self.data_path(path)).await
    }

    /// Soft-delete specific versions of a secret
    pub async fn delete_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/delete/{}", self.mount, encode_path(path)),
                Some(json!({ "versions": versions })),
            )
            .await
    }

    /// Undo the soft-deletion of specific versions
    pub async fn undelete_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/undelete/{}", self.mount, encode_path(path)),
                Some(json!({ "versions": versions })),
            )
            .await
    }

    /// Permanently destroy the payload of specific versions
    pub async fn destroy_versions(&self, path: &str, versions: &[u64]) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/destroy/{}", self.mount, encode_path(path)),
                Some(json!({ "versions": versions })),
            )
            .await
    }

    /// Read the metadata record of a secret path
    pub async fn read_metadata(&self, path: &str) -> Result<SecretMetadata> {
        let resp = self.client.get(&self.metadata_path(path), &[]).await?;
        resp.data()
    }

    /// Update the metadata record of a secret path
    pub async fn update_metadata(&self, path: &str, opts: MetadataOpts) -> Result<ApiResponse> {
        self.client
            .post(&self.metadata_path(path), Some(serde_json::to_value(opts)?))
            .await
    }

    /// Delete the metadata record and every version of a secret
    pub async fn delete_metadata_and_all_versions(&self, path: &str) -> Result<ApiResponse> {
        self.client.delete(&self.metadata_path(path)).await
    }

    /// List the entries under a folder path
    pub async fn list(&self, path: &str) -> Result<Vec<String>> {
        let resp = self.client.list(&self.metadata_path(path)).await?;
        resp.keys()
    }
}
