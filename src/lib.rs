//! Vault SDK for Rust
//!
//! A client library for HashiCorp-Vault-compatible secret services: token
//! issuance and revocation, dynamic-secret engines (database, LDAP, SSH,
//! RabbitMQ, Active Directory, Consul), and the versioned key-value store
//! with optimistic-concurrency patching.
//!
//! # Features
//!
//! - Async/await support with the tokio runtime, plus an optional blocking
//!   surface (`blocking` feature) sharing the same request logic
//! - Typed option structs instead of loose parameter bags; omitted options
//!   stay out of the request body
//! - A uniform [`ApiResponse`] carrying status, request id, and parsed body
//! - Distinguished not-found and check-and-set errors for branch-free
//!   caller code
//! - Read-merge-write patching of versioned secrets with a `cas` guard
//! - Secure credential handling with `secrecy` and zeroization
//!
//! # Example
//!
//! ```no_run
//! use vault_sdk::{Auth, ClientBuilder};
//! use serde_json::{json, Map};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientBuilder::new("https://vault.example.com:8200")
//!         .auth(Auth::token(std::env::var("VAULT_TOKEN")?))
//!         .build()?;
//!
//!     let secret = client.kv2().read_secret("app/config").await?;
//!     println!("version {}", secret.metadata.version);
//!
//!     let mut updates = Map::new();
//!     updates.insert("api_key".to_string(), json!("rotated"));
//!     client.kv2().patch("app/config", updates, Default::default()).await?;
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs, missing_debug_implementations, unsafe_code)]

mod auth;
mod client;
mod config;
mod endpoints;
mod errors;
mod models;
mod util;

pub mod ad;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod consul;
pub mod database;
pub mod kv2;
pub mod ldap;
pub mod rabbitmq;
pub mod ssh;
pub mod token;

pub use auth::{Auth, StaticTokenProvider, TokenProvider};
pub use client::{ApiResponse, Client};
pub use config::{ClientBuilder, ClientConfig};
pub use errors::{Error, ErrorKind, Result};
pub use models::{Lease, LeasedCredentials};

// Re-export commonly used types
pub use secrecy::SecretString;

/// SDK version, matches Cargo.toml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries for transient failures
pub const DEFAULT_RETRIES: u32 = 2;
