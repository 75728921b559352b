//! API endpoint URL construction

/// API base path prefix shared by every operation
pub const API_V1_BASE: &str = "/v1";

/// Endpoint builder
///
/// Joins the configured server address with `/v1/{path}`. Engine modules
/// supply the `{mount}/{resource}[/{id}]` part; identifiers are
/// percent-encoded by the caller before they get here.
#[derive(Debug, Clone)]
pub struct Endpoints {
    address: String,
}

impl Endpoints {
    /// Create a new endpoints builder
    pub fn new(address: &str) -> Self {
        Self {
            address: address.trim_end_matches('/').to_string(),
        }
    }

    /// Get the full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.address,
            API_V1_BASE,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let endpoints = Endpoints::new("https://vault.example.com:8200");

        assert_eq!(
            endpoints.url("secret/data/app/config"),
            "https://vault.example.com:8200/v1/secret/data/app/config"
        );
        assert_eq!(
            endpoints.url("auth/token/create"),
            "https://vault.example.com:8200/v1/auth/token/create"
        );
    }

    #[test]
    fn test_trailing_and_leading_slashes() {
        let endpoints = Endpoints::new("https://vault.example.com/");
        assert_eq!(
            endpoints.url("/database/roles"),
            "https://vault.example.com/v1/database/roles"
        );
    }

    #[test]
    fn test_url_is_deterministic() {
        let endpoints = Endpoints::new("https://vault.example.com");
        assert_eq!(
            endpoints.url("consul/creds/ops"),
            endpoints.url("consul/creds/ops")
        );
    }

    proptest::proptest! {
        // Same inputs always construct the same request URL, and every URL
        // lands under the /v1 prefix of the configured address.
        #[test]
        fn prop_url_pure_and_prefixed(path in "[a-z0-9/_-]{1,40}") {
            let endpoints = Endpoints::new("https://vault.example.com");
            let first = endpoints.url(&path);
            let second = endpoints.url(&path);
            proptest::prop_assert_eq!(&first, &second);
            proptest::prop_assert!(first.starts_with("https://vault.example.com/v1/"));
        }
    }
}
