//! Integration tests for the dynamic-secret engine modules

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use serde_json::json;
use vault_sdk::{Auth, ClientBuilder};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, vault_sdk::Client) {
    let server = MockServer::start().await;
    let client = ClientBuilder::new(server.uri())
        .auth(Auth::token("test-token"))
        .timeout_ms(5000)
        .retries(0)
        .build()
        .expect("Failed to build client");
    (server, client)
}

#[tokio::test]
async fn test_database_list_roles() {
    let (server, client) = setup().await;

    let body = json!({
        "request_id": "req-list",
        "data": {"keys": ["role1", "role2"]}
    });

    Mock::given(method("GET"))
        .and(path("/v1/database/roles"))
        .and(query_param("list", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .database()
        .list_roles()
        .await
        .expect("Failed to list roles");

    // The envelope comes back unchanged
    assert_eq!(resp.body().unwrap(), &body);
    assert_eq!(resp.keys().unwrap(), vec!["role1", "role2"]);
    assert_eq!(resp.request_id(), Some("req-list"));
}

#[tokio::test]
async fn test_database_configure_connection() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/database/config/app-db"))
        .and(body_json(json!({
            "plugin_name": "postgresql-database-plugin",
            "connection_url": "postgresql://{{username}}:{{password}}@db:5432/app",
            "allowed_roles": ["readonly"]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let opts = vault_sdk::database::DatabaseConnectionOpts {
        connection_url: Some("postgresql://{{username}}:{{password}}@db:5432/app".to_string()),
        allowed_roles: Some(vec!["readonly".to_string()]),
        ..Default::default()
    };
    let resp = client
        .database()
        .configure("app-db", "postgresql-database-plugin", opts)
        .await
        .expect("Failed to configure connection");
    assert!(resp.is_no_content());
}

#[tokio::test]
async fn test_database_generate_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/database/creds/readonly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-creds",
            "lease_id": "database/creds/readonly/abc123",
            "renewable": true,
            "lease_duration": 3600,
            "data": {
                "username": "v-token-readonly-xyz",
                "password": "A1a-generated"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = client
        .database()
        .generate_credentials("readonly")
        .await
        .expect("Failed to generate credentials");

    assert_eq!(creds.username, "v-token-readonly-xyz");
    assert_eq!(creds.password.expose_secret(), "A1a-generated");
    assert_eq!(creds.lease.lease_id, "database/creds/readonly/abc123");
    assert_eq!(creds.lease.lease_duration, 3600);
    assert!(creds.lease.renewable);
}

#[tokio::test]
async fn test_database_custom_mount() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/db-eu/roles"))
        .and(query_param("list", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"keys": ["r1"]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .database()
        .with_mount("db-eu")
        .list_roles()
        .await
        .expect("Failed to list roles on custom mount");
    assert_eq!(resp.keys().unwrap(), vec!["r1"]);
}

#[tokio::test]
async fn test_database_rotate_root() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/database/rotate-root/app-db"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .database()
        .rotate_root_credentials("app-db")
        .await
        .expect("Failed to rotate root");
    assert_eq!(resp.status(), 204);
}

#[tokio::test]
async fn test_token_revoke_accessor_returns_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/revoke-accessor"))
        .and(body_json(json!({"accessor": "acc-12345"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .token()
        .revoke_accessor("acc-12345")
        .await
        .expect("Failed to revoke accessor");

    assert_eq!(resp.status(), 204);
    assert!(resp.is_no_content());
}

#[tokio::test]
async fn test_token_create_parses_auth_block() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/create"))
        .and(body_json(json!({"policies": ["app"], "ttl": "1h"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "req-token",
            "auth": {
                "client_token": "s.newtoken",
                "accessor": "acc-new",
                "policies": ["app", "default"],
                "lease_duration": 3600,
                "renewable": true,
                "orphan": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = vault_sdk::token::TokenCreateOpts {
        policies: Some(vec!["app".to_string()]),
        ttl: Some("1h".to_string()),
        ..Default::default()
    };
    let token = client.token().create(opts).await.expect("Failed to create token");

    assert_eq!(token.client_token.expose_secret(), "s.newtoken");
    assert_eq!(token.accessor, "acc-new");
    assert_eq!(token.lease_duration, 3600);
    assert!(token.renewable);
}

#[tokio::test]
async fn test_token_list_accessors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/auth/token/accessors"))
        .and(query_param("list", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"keys": ["acc-1", "acc-2"]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .token()
        .list_accessors()
        .await
        .expect("Failed to list accessors");
    assert_eq!(resp.keys().unwrap(), vec!["acc-1", "acc-2"]);
}

#[tokio::test]
async fn test_ssh_generate_otp() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/ssh/creds/otp-role"))
        .and(body_json(json!({"ip": "10.0.0.5", "username": "ubuntu"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "key": "6e8a2f54-otp",
                "key_type": "otp",
                "ip": "10.0.0.5",
                "username": "ubuntu",
                "port": 22
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let otp = client
        .ssh()
        .generate_otp("otp-role", "10.0.0.5", Some("ubuntu"))
        .await
        .expect("Failed to generate OTP");

    assert_eq!(otp.key, "6e8a2f54-otp");
    assert_eq!(otp.port, 22);
}

#[tokio::test]
async fn test_ssh_sign_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/ssh/sign/ca-role"))
        .and(body_json(json!({
            "public_key": "ssh-ed25519 AAAAC3Nza...",
            "valid_principals": "deploy",
            "ttl": "30m"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "serial_number": "1a2b3c",
                "signed_key": "ssh-ed25519-cert-v01@openssh.com AAAAB..."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = vault_sdk::ssh::SignKeyOpts {
        valid_principals: Some("deploy".to_string()),
        ttl: Some("30m".to_string()),
        ..Default::default()
    };
    let signed = client
        .ssh()
        .sign_key("ca-role", "ssh-ed25519 AAAAC3Nza...", opts)
        .await
        .expect("Failed to sign key");

    assert_eq!(signed.serial_number, "1a2b3c");
    assert!(signed.signed_key.starts_with("ssh-ed25519-cert"));
}

#[tokio::test]
async fn test_rabbitmq_configure_connection_omits_verify() {
    let (server, client) = setup().await;

    // verify_connection left unset stays out of the body entirely
    Mock::given(method("POST"))
        .and(path("/v1/rabbitmq/config/connection"))
        .and(body_json(json!({
            "connection_uri": "http://rabbit:15672",
            "username": "admin",
            "password": "adminpass"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .rabbitmq()
        .configure_connection("http://rabbit:15672", "admin", "adminpass", None)
        .await
        .expect("Failed to configure connection");
}

#[tokio::test]
async fn test_rabbitmq_generate_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/rabbitmq/creds/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lease_id": "rabbitmq/creds/app/xyz",
            "renewable": true,
            "lease_duration": 86400,
            "data": {"username": "app-user-xyz", "password": "generated"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = client
        .rabbitmq()
        .generate_credentials("app")
        .await
        .expect("Failed to generate credentials");
    assert_eq!(creds.username, "app-user-xyz");
}

#[tokio::test]
async fn test_consul_generate_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/consul/creds/ops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lease_id": "consul/creds/ops/abc",
            "renewable": true,
            "lease_duration": 3600,
            "data": {"token": "consul-acl-token"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = client
        .consul()
        .generate_credentials("ops")
        .await
        .expect("Failed to generate credentials");

    assert_eq!(creds.token.expose_secret(), "consul-acl-token");
    assert_eq!(creds.lease.lease_duration, 3600);
}

#[tokio::test]
async fn test_consul_role_roundtrip_paths() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/consul/roles/ops"))
        .and(body_json(json!({"consul_policies": ["service-read"], "ttl": "30m"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/consul/roles/ops"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let opts = vault_sdk::consul::ConsulRoleOpts {
        consul_policies: Some(vec!["service-read".to_string()]),
        ttl: Some("30m".to_string()),
        ..Default::default()
    };
    client
        .consul()
        .create_or_update_role("ops", opts)
        .await
        .expect("Failed to create role");
    let resp = client
        .consul()
        .delete_role("ops")
        .await
        .expect("Failed to delete role");
    assert_eq!(resp.status(), 204);
}

#[tokio::test]
async fn test_ad_get_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/ad/creds/web-svc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "username": "svc-web",
                "current_password": "now-pw",
                "last_password": "old-pw"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let creds = client
        .ad()
        .get_credentials("web-svc")
        .await
        .expect("Failed to get credentials");

    assert_eq!(creds.username, "svc-web");
    assert_eq!(creds.current_password.expose_secret(), "now-pw");
    assert_eq!(
        creds.last_password.as_ref().map(|p| p.expose_secret().as_str()),
        Some("old-pw")
    );
}

#[tokio::test]
async fn test_ad_role_binds_service_account() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/ad/roles/web-svc"))
        .and(body_json(json!({"service_account_name": "svc-web@example.com", "ttl": 3600})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .ad()
        .create_or_update_role("web-svc", "svc-web@example.com", Some(3600))
        .await
        .expect("Failed to create role");
}

#[tokio::test]
async fn test_ldap_static_credentials_flow() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/ldap/static-role/svc-app"))
        .and(body_json(json!({"username": "svc-app", "rotation_period": "24h"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/ldap/static-cred/svc-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "username": "svc-app",
                "password": "rotated-pw",
                "ttl": 3600,
                "rotation_period": 86400
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = vault_sdk::ldap::LdapStaticRoleOpts {
        username: "svc-app".to_string(),
        rotation_period: Some("24h".to_string()),
        ..Default::default()
    };
    client
        .ldap()
        .create_or_update_static_role("svc-app", opts)
        .await
        .expect("Failed to create static role");

    let creds = client
        .ldap()
        .get_static_credentials("svc-app")
        .await
        .expect("Failed to read static credentials");
    assert_eq!(creds.username, "svc-app");
    assert_eq!(creds.password.expose_secret(), "rotated-pw");
    assert_eq!(creds.rotation_period, 86400);
}
