#![allow(clippy::unwrap_used)]
// Integration tests for the controller clients using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netinv_api::{
    AssuranceClient, CloudAccessClient, Error, FabricClient, TransportConfig, WanOverlayClient,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn base(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_owned())
}

// ── Fabric controller ───────────────────────────────────────────────

#[tokio::test]
async fn test_fabric_login_and_list_nodes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .and(body_json(json!({
            "aaaUser": { "attributes": { "name": "admin", "pwd": "pw" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": "1",
            "imdata": [{ "aaaLogin": { "attributes": { "token": "tok-123" } } }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fabricNode.json"))
        .and(header("cookie", "APIC-cookie=tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": "2",
            "imdata": [
                { "fabricNode": { "attributes": {
                    "dn": "topology/pod-1/node-101", "id": "101", "name": "leaf-101",
                    "fabricSt": "active", "model": "N9K-C93180YC-FX",
                    "serial": "FDO7200ABC", "version": "n9000-15.2(7f)",
                    "address": "10.0.72.64", "role": "leaf"
                } } },
                { "fabricNode": { "attributes": {
                    "dn": "topology/pod-1/node-201", "id": "201", "name": "spine-201",
                    "fabricSt": "inactive"
                } } }
            ]
        })))
        .mount(&server)
        .await;

    let client = FabricClient::new(base(&server), &TransportConfig::default()).unwrap();
    client.login("admin", &secret("pw")).await.unwrap();
    let nodes = client.list_nodes().await.unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name.as_deref(), Some("leaf-101"));
    assert_eq!(nodes[0].fabric_st.as_deref(), Some("active"));
    assert_eq!(nodes[0].serial.as_deref(), Some("FDO7200ABC"));
    assert_eq!(nodes[1].model, None);
}

#[tokio::test]
async fn test_fabric_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let client = FabricClient::new(base(&server), &TransportConfig::default()).unwrap();
    let result = client.login("admin", &secret("wrong")).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fabric_query_without_login_fails() {
    let server = MockServer::start().await;
    let client = FabricClient::new(base(&server), &TransportConfig::default()).unwrap();

    let result = client.list_nodes().await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

#[tokio::test]
async fn test_fabric_reply_without_imdata_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imdata": [{ "aaaLogin": { "attributes": { "token": "tok-9" } } }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fabricNode.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalCount": "0" })))
        .mount(&server)
        .await;

    let client = FabricClient::new(base(&server), &TransportConfig::default()).unwrap();
    client.login("admin", &secret("pw")).await.unwrap();
    let nodes = client.list_nodes().await.unwrap();

    assert!(nodes.is_empty());
}

// ── Cloud-access controller ─────────────────────────────────────────

#[tokio::test]
async fn test_cloud_access_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/devices"))
        .and(header("X-Cisco-Meraki-API-Key", "key-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2XX-7200-AAAA", "name": "lobby-ap", "model": "MR46",
              "firmware": "wireless-29-7", "lanIp": "192.168.10.20" },
            { "serial": "Q2XX-0000-BBBB", "model": "MS120-8" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/42/devices/statuses"))
        .and(header("X-Cisco-Meraki-API-Key", "key-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serial": "Q2XX-7200-AAAA", "status": "online" }
        ])))
        .mount(&server)
        .await;

    let client =
        CloudAccessClient::from_api_key(base(&server), &secret("key-abc"), "42", &TransportConfig::default())
            .unwrap();

    let devices = client.list_devices().await.unwrap();
    let statuses = client.list_device_statuses().await.unwrap();

    assert_eq!(client.org_id(), "42");
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].lan_ip.as_deref(), Some("192.168.10.20"));
    assert_eq!(devices[1].name, None);
    assert_eq!(statuses[0].status.as_deref(), Some("online"));
}

#[tokio::test]
async fn test_cloud_access_rejected_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "errors": ["Invalid API key"] })))
        .mount(&server)
        .await;

    let client =
        CloudAccessClient::from_api_key(base(&server), &secret("nope"), "42", &TransportConfig::default())
            .unwrap();
    let result = client.list_devices().await;

    assert!(result.as_ref().is_err_and(Error::is_auth), "got: {result:?}");
}

#[test]
fn test_cloud_access_rejects_unprintable_key() {
    let result = CloudAccessClient::from_api_key(
        Url::parse("https://api.example.com").unwrap(),
        &secret("bad\nkey"),
        "42",
        &TransportConfig::default(),
    );
    assert!(matches!(result, Err(Error::InvalidApiKey)));
}

// ── Assurance controller ────────────────────────────────────────────

#[tokio::test]
async fn test_assurance_token_exchange_and_devices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .and(basic_auth("netops", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "jwt-xyz" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/network-device"))
        .and(header("X-Auth-Token", "jwt-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{
                "id": "6a49c827-9b28-490b-8df0-8b6c3b582d8c",
                "hostname": "cat9k-core-1",
                "reachabilityStatus": "Reachable",
                "platformId": "C9300-48U",
                "serialNumber": "FCW2214L0VK",
                "softwareVersion": "17.9.4",
                "managementIpAddress": "10.10.20.81"
            }],
            "version": "1.0"
        })))
        .mount(&server)
        .await;

    let client = AssuranceClient::new(base(&server), &TransportConfig::default()).unwrap();
    client.authenticate("netops", &secret("s3cret")).await.unwrap();
    let devices = client.list_network_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].hostname.as_deref(), Some("cat9k-core-1"));
    assert_eq!(devices[0].platform_id.as_deref(), Some("C9300-48U"));
}

#[tokio::test]
async fn test_assurance_token_reply_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "locked" })))
        .mount(&server)
        .await;

    let client = AssuranceClient::new(base(&server), &TransportConfig::default()).unwrap();
    let result = client.authenticate("netops", &secret("s3cret")).await;

    assert!(matches!(result, Err(Error::Authentication { .. })), "got: {result:?}");
}

// ── WAN-overlay manager ─────────────────────────────────────────────

#[tokio::test]
async fn test_wan_overlay_session_cookie_is_reused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=admin"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "JSESSIONID=abc123; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": {},
            "data": [{
                "uuid": "C8K-1f0e7a2c-7200", "host-name": "branch-edge-1",
                "status": "normal", "reachability": "reachable",
                "device-model": "vedge-C8000V", "version": "17.12.1",
                "system-ip": "1.1.1.10"
            }]
        })))
        .mount(&server)
        .await;

    let client = WanOverlayClient::new(base(&server), &TransportConfig::default()).unwrap();
    client.login("admin", &secret("admin")).await.unwrap();
    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].host_name.as_deref(), Some("branch-edge-1"));
    assert_eq!(devices[0].system_ip.as_deref(), Some("1.1.1.10"));
}

#[tokio::test]
async fn test_wan_overlay_login_page_means_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Login</body></html>"),
        )
        .mount(&server)
        .await;

    let client = WanOverlayClient::new(base(&server), &TransportConfig::default()).unwrap();
    let result = client.login("admin", &secret("wrong")).await;

    assert!(matches!(result, Err(Error::Authentication { .. })), "got: {result:?}");
}

// ── Transport errors ────────────────────────────────────────────────

#[tokio::test]
async fn test_slow_controller_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let transport = TransportConfig {
        timeout: Duration::from_millis(200),
        ..TransportConfig::default()
    };
    let client = WanOverlayClient::new(base(&server), &transport).unwrap();
    let result = client.list_devices().await;

    assert!(result.as_ref().is_err_and(Error::is_timeout), "got: {result:?}");
}

#[tokio::test]
async fn test_malformed_reply_is_deserialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&server)
        .await;

    let client = WanOverlayClient::new(base(&server), &TransportConfig::default()).unwrap();
    let result = client.list_devices().await;

    assert!(
        result.as_ref().is_err_and(Error::is_response_shape),
        "got: {result:?}"
    );
}
