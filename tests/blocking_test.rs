//! Integration tests for the blocking call surface
#![cfg(feature = "blocking")]

use serde_json::{json, Map};
use vault_sdk::{Auth, ClientBuilder};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stand up a mock server on a runtime the test keeps alive; the blocking
/// client drives its own separate runtime.
fn setup() -> (tokio::runtime::Runtime, MockServer, vault_sdk::blocking::Client) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("Failed to build test runtime");
    let server = rt.block_on(MockServer::start());

    let client = ClientBuilder::new(server.uri())
        .auth(Auth::token("test-token"))
        .timeout_ms(5000)
        .retries(0)
        .build_blocking()
        .expect("Failed to build blocking client");

    (rt, server, client)
}

#[test]
fn test_blocking_read_secret() {
    let (rt, server, client) = setup();

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/app/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "data": {"db_password": "hunter2"},
                    "metadata": {
                        "created_time": "2024-03-01T12:00:00.000000Z",
                        "deletion_time": "",
                        "destroyed": false,
                        "version": 3
                    }
                }
            })))
            .expect(1)
            .mount(&server),
    );

    let secret = client
        .kv2()
        .read_secret("app/config")
        .expect("Failed to read secret");
    assert_eq!(secret.metadata.version, 3);
    assert_eq!(secret.data.get("db_password").unwrap(), "hunter2");
}

#[test]
fn test_blocking_patch_mirrors_async_semantics() {
    let (rt, server, client) = setup();

    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/app/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "data": {"a": "1", "b": "2"},
                    "metadata": {
                        "created_time": "2024-03-01T12:00:00.000000Z",
                        "deletion_time": "",
                        "destroyed": false,
                        "version": 7
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/secret/data/app/config"))
            .and(body_json(json!({
                "data": {"a": "1", "b": "3", "c": "4"},
                "options": {"cas": 7}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "created_time": "2024-03-01T12:00:05.000000Z",
                    "deletion_time": "",
                    "destroyed": false,
                    "version": 8
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
    });

    let mut updates = Map::new();
    updates.insert("b".to_string(), json!("3"));
    updates.insert("c".to_string(), json!("4"));

    let written = client
        .kv2()
        .patch("app/config", updates, Default::default())
        .expect("Failed to patch secret");
    assert_eq!(written.version, 8);
}

#[test]
fn test_blocking_revoke_accessor_no_content() {
    let (rt, server, client) = setup();

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/v1/auth/token/revoke-accessor"))
            .and(body_json(json!({"accessor": "acc-1"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server),
    );

    let resp = client
        .token()
        .revoke_accessor("acc-1")
        .expect("Failed to revoke accessor");
    assert_eq!(resp.status(), 204);
    assert!(resp.is_no_content());
}
