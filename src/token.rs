//! Token auth method (`auth/token`)
//!
//! Token issuance, introspection, renewal, and revocation. Unlike the
//! secrets engines, the token backend lives at a fixed path under `auth/`
//! and takes no mount override.

use crate::client::{ApiResponse, Client};
use crate::errors::{Error, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Fixed API prefix of the token backend
pub const TOKEN_AUTH_PATH: &str = "auth/token";

/// Options for creating a token
///
/// Omitted fields are absent from the request body; the server applies its
/// own defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenCreateOpts {
    /// Policies to attach to the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<String>>,
    /// Arbitrary string metadata visible in audit logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    /// Create the token without a parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_parent: Option<bool>,
    /// Do not attach the `default` policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_default_policy: Option<bool>,
    /// Whether the token may be renewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewable: Option<bool>,
    /// Initial TTL, e.g. `"1h"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Hard cap on the token's lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_max_ttl: Option<String>,
    /// Display name shown in audit logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Number of uses before the token self-revokes, 0 for unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_uses: Option<u64>,
    /// Fixed renewal period for periodic tokens, e.g. `"24h"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Entity alias to associate, for use with allowed entity aliases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_alias: Option<String>,
}

/// A token minted by create or renew operations
#[derive(Clone)]
pub struct CreatedToken {
    /// The token itself (protected)
    pub client_token: SecretString,
    /// Accessor usable for lookup/revocation without holding the token
    pub accessor: String,
    /// Policies attached to the token
    pub policies: Vec<String>,
    /// Lease duration in seconds
    pub lease_duration: u64,
    /// Whether the token may be renewed
    pub renewable: bool,
    /// Whether the token has no parent
    pub orphan: bool,
}

impl CreatedToken {
    fn from_response(resp: &ApiResponse) -> Result<Self> {
        #[derive(Deserialize)]
        struct AuthBlock {
            client_token: String,
            accessor: String,
            #[serde(default)]
            policies: Vec<String>,
            #[serde(default)]
            lease_duration: u64,
            #[serde(default)]
            renewable: bool,
            #[serde(default)]
            orphan: bool,
        }

        let auth = resp
            .body()
            .and_then(|b| b.get("auth"))
            .cloned()
            .ok_or_else(|| Error::Deserialize("response has no auth block".to_string()))?;
        let auth: AuthBlock = serde_json::from_value(auth)?;

        Ok(Self {
            client_token: SecretString::new(auth.client_token),
            accessor: auth.accessor,
            policies: auth.policies,
            lease_duration: auth.lease_duration,
            renewable: auth.renewable,
            orphan: auth.orphan,
        })
    }
}

impl std::fmt::Debug for CreatedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedToken")
            .field("client_token", &"****")
            .field("accessor", &self.accessor)
            .field("policies", &self.policies)
            .field("lease_duration", &self.lease_duration)
            .field("renewable", &self.renewable)
            .field("orphan", &self.orphan)
            .finish()
    }
}

/// Handle for token backend operations
#[derive(Debug)]
pub struct TokenAuth<'a> {
    client: &'a Client,
}

impl<'a> TokenAuth<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a new token as a child of the calling token
    pub async fn create(&self, opts: TokenCreateOpts) -> Result<CreatedToken> {
        let resp = self
            .client
            .post(
                &format!("{}/create", TOKEN_AUTH_PATH),
                Some(serde_json::to_value(opts)?),
            )
            .await?;
        CreatedToken::from_response(&resp)
    }

    /// Create a token with no parent
    pub async fn create_orphan(&self, opts: TokenCreateOpts) -> Result<CreatedToken> {
        let resp = self
            .client
            .post(
                &format!("{}/create-orphan", TOKEN_AUTH_PATH),
                Some(serde_json::to_value(opts)?),
            )
            .await?;
        CreatedToken::from_response(&resp)
    }

    /// Look up the properties of a token
    pub async fn lookup(&self, token: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/lookup", TOKEN_AUTH_PATH),
                Some(json!({ "token": token })),
            )
            .await
    }

    /// Look up the calling token
    pub async fn lookup_self(&self) -> Result<ApiResponse> {
        self.client
            .get(&format!("{}/lookup-self", TOKEN_AUTH_PATH), &[])
            .await
    }

    /// Look up a token by its accessor
    pub async fn lookup_accessor(&self, accessor: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/lookup-accessor", TOKEN_AUTH_PATH),
                Some(json!({ "accessor": accessor })),
            )
            .await
    }

    /// Renew a token's lease
    pub async fn renew(&self, token: &str, increment: Option<String>) -> Result<CreatedToken> {
        let mut body = json!({ "token": token });
        if let Some(increment) = increment {
            body["increment"] = json!(increment);
        }
        let resp = self
            .client
            .post(&format!("{}/renew", TOKEN_AUTH_PATH), Some(body))
            .await?;
        CreatedToken::from_response(&resp)
    }

    /// Renew the calling token's lease
    pub async fn renew_self(&self, increment: Option<String>) -> Result<CreatedToken> {
        let body = match increment {
            Some(increment) => json!({ "increment": increment }),
            None => json!({}),
        };
        let resp = self
            .client
            .post(&format!("{}/renew-self", TOKEN_AUTH_PATH), Some(body))
            .await?;
        CreatedToken::from_response(&resp)
    }

    /// Revoke a token and all of its children
    ///
    /// Success is a 204 with no body.
    pub async fn revoke(&self, token: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/revoke", TOKEN_AUTH_PATH),
                Some(json!({ "token": token })),
            )
            .await
    }

    /// Revoke the calling token
    pub async fn revoke_self(&self) -> Result<ApiResponse> {
        self.client
            .post(&format!("{}/revoke-self", TOKEN_AUTH_PATH), None)
            .await
    }

    /// Revoke a token by its accessor
    ///
    /// Success is a 204 with no body.
    pub async fn revoke_accessor(&self, accessor: &str) -> Result<ApiResponse> {
        self.client
            .post(
                &format!("{}/revoke-accessor", TOKEN_AUTH_PATH),
                Some(json!({ "accessor": accessor })),
            )
            .await
    }

    /// List the accessors of all active tokens
    pub async fn list_accessors(&self) -> Result<ApiResponse> {
        self.client
            .list(&format!("{}/accessors", TOKEN_AUTH_PATH))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_opts_omit_unset_fields() {
        let opts = TokenCreateOpts {
            policies: Some(vec!["default".to_string(), "app".to_string()]),
            ttl: Some("1h".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(opts).unwrap();
        assert_eq!(body, json!({"policies": ["default", "app"], "ttl": "1h"}));
    }

    #[test]
    fn test_created_token_from_response() {
        let resp = ApiResponse::fake(
            200,
            Some(json!({
                "auth": {
                    "client_token": "s.child",
                    "accessor": "acc-1",
                    "policies": ["default"],
                    "lease_duration": 2764800,
                    "renewable": true,
                    "orphan": false
                }
            })),
        );
        let token = CreatedToken::from_response(&resp).unwrap();
        assert_eq!(token.accessor, "acc-1");
        assert!(token.renewable);

        let out = format!("{:?}", token);
        assert!(!out.contains("s.child"));
    }
}
