#![allow(clippy::unwrap_used)]
// Integration tests for `SigfoxClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sigfox_api::{Credentials, Error, PageMode, ProvisionRequest, SigfoxClient};

// ── Helpers ─────────────────────────────────────────────────────────

/// `Basic base64("user:pwd")`
const AUTH: &str = "Basic dXNlcjpwd2Q=";

async fn setup() -> (MockServer, SigfoxClient) {
    let server = MockServer::start().await;
    let client = SigfoxClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        &Credentials::new("user", "pwd".to_owned()),
    )
    .unwrap();
    (server, client)
}

async fn mount_status(server: &MockServer, verb: &str, route: &str, status: u16) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(r#"{"message":"nope"}"#))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

/// Two-page device type listing: `[{null, A}, {dt2, null}]` then `[{dt3, C}]`.
async fn mount_device_types(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/device-types/"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": null, "name": "A" },
                { "id": "dt2", "name": null }
            ],
            "paging": { "next": format!("{}/device-types/?offset=2", server.uri()) }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device-types/"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": "dt3", "name": "C" } ],
            "paging": {}
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ── Contracts ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_contracts_stamps_basic_auth() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1", "name": "Contract 1", "maxTokens": 100 }],
            "paging": { "next": format!("{}/contract-infos/?offset=1", server.uri()) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.get_contracts(PageMode::FirstPage).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "1");
    assert_eq!(page.data[0].name, "Contract 1");
    assert_eq!(page.data[0].max_tokens, Some(100));
    assert!(!page.is_last());
}

#[tokio::test]
async fn test_get_contracts_all_pages_merges_in_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "a", "name": "A" }, { "id": "b", "name": "B" }],
            "paging": { "next": format!("{}/contract-infos/?offset=2", server.uri()) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "c", "name": "C" }],
            "paging": { "next": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.get_contracts(PageMode::All).await.unwrap();

    let ids: Vec<_> = page.data.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert!(page.is_last());
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_partial_result_on_later_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "a", "name": "A" }],
            "paging": { "next": format!("{}/contract-infos/?offset=1", server.uri()) }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream timeout"))
        .mount(&server)
        .await;

    let page = client.get_contracts(PageMode::All).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "a");
    assert!(!page.is_last());
}

#[tokio::test]
async fn test_forbidden_on_later_page_is_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "a", "name": "A" }],
            "paging": { "next": format!("{}/contract-infos/?offset=1", server.uri()) }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.get_contracts(PageMode::All).await;

    assert!(
        matches!(result, Err(Error::Auth { status: 403, .. })),
        "expected Auth error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_get_devices_by_contract() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/c-42/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1", "name": "Device 1", "deviceType": { "id": "dt1" } }]
        })))
        .mount(&server)
        .await;

    let page = client
        .get_devices_by_contract("c-42", PageMode::FirstPage)
        .await
        .unwrap();

    assert_eq!(page.data[0].id, "1");
    assert_eq!(page.data[0].name, "Device 1");
    assert_eq!(page.data[0].device_type.as_ref().unwrap().id, "dt1");
    assert!(page.is_last());
}

#[tokio::test]
async fn test_list_status_mapping() {
    let (server, client) = setup().await;
    mount_status(&server, "GET", "/contract-infos/missing/devices", 404).await;
    mount_status(&server, "GET", "/contract-infos/forbidden/devices", 403).await;
    mount_status(&server, "GET", "/contract-infos/broken/devices", 500).await;
    mount_status(&server, "GET", "/contract-infos/odd/devices", 409).await;

    let get = |id: &'static str| client.get_devices_by_contract(id, PageMode::All);

    assert!(matches!(get("missing").await, Err(Error::NotFound { status: 404, .. })));
    assert!(matches!(get("forbidden").await, Err(Error::Auth { status: 403, .. })));
    assert!(matches!(get("broken").await, Err(Error::Api { status: 500, .. })));
    assert!(matches!(get("odd").await, Err(Error::Api { status: 409, .. })));
}

#[tokio::test]
async fn test_malformed_list_is_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contract-infos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1" }]
        })))
        .mount(&server)
        .await;

    let result = client.get_contracts(PageMode::FirstPage).await;

    assert!(
        matches!(result, Err(Error::Decode { .. })),
        "expected Decode error, got: {result:?}"
    );
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_info() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/3EA68B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3EA68B",
            "name": "Water meter",
            "location": { "lat": 43.6, "lng": 1.44 },
            "state": 0,
            "comState": 0,
            "lastCom": 1_700_000_000_000_i64,
            "modemCertificate": { "id": "m1" }
        })))
        .mount(&server)
        .await;

    let dev = client.get_device_info("3EA68B").await.unwrap();

    assert_eq!(dev.id, "3EA68B");
    assert_eq!(dev.name, "Water meter");
    assert_eq!(dev.state, Some(0));
    assert!(dev.location.is_some());
    assert!(dev.extra.contains_key("modemCertificate"));
    assert_eq!(dev.last_communication().unwrap().timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn test_get_device_info_status_mapping() {
    let (server, client) = setup().await;
    mount_status(&server, "GET", "/devices/GONE", 404).await;
    mount_status(&server, "GET", "/devices/DENY", 403).await;
    mount_status(&server, "GET", "/devices/FAIL", 500).await;

    assert!(matches!(
        client.get_device_info("GONE").await,
        Err(Error::NotFound { status: 404, .. })
    ));
    assert!(matches!(
        client.get_device_info("DENY").await,
        Err(Error::Auth { status: 403, .. })
    ));

    let err = client.get_device_info("FAIL").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(r#"{"message":"nope"}"#));
}

#[tokio::test]
async fn test_create_device() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/devices/"))
        .and(header("authorization", AUTH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "id": "23DE415",
            "name": "ECM-PL Prototype 2",
            "pac": "18AFFC184633697B",
            "lat": 0.0,
            "lng": 0.0,
            "automatic_renewal": true,
            "activable": true,
            "prototype": true,
            "deviceTypeId": "5fdb8def25643206e801a7d7"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "23DE415" })))
        .expect(1)
        .mount(&server)
        .await;

    let device = ProvisionRequest::new("23DE415", "18AFFC184633697B", "unused")
        .name("ECM-PL Prototype 2")
        .prototype(true)
        .into_new_device("5fdb8def25643206e801a7d7".into());

    let created = client.create_device(&device).await.unwrap();
    assert_eq!(created.id, "23DE415");
}

#[tokio::test]
async fn test_create_device_status_mapping() {
    let device = ProvisionRequest::new("23DE415", "18AFFC184633697B", "unused")
        .into_new_device("dt1".into());

    for status in [200, 201, 403, 404, 409, 500] {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/devices/"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "id": "23DE415" })))
            .mount(&server)
            .await;

        let result = client.create_device(&device).await;
        let expected = match status {
            200 | 201 => result.is_ok(),
            403 => matches!(result, Err(Error::Auth { .. })),
            404 => matches!(result, Err(Error::NotFound { .. })),
            409 => matches!(result, Err(Error::Conflict { status: 409, .. })),
            _ => matches!(result, Err(Error::Api { status: 500, .. })),
        };
        assert!(expected, "HTTP {status} produced {result:?}");
    }
}

// ── Messages ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_messages_with_since() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/3EA68B/messages"))
        .and(query_param("since", "1700000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "time": 1_700_000_360_000_i64, "data": "0a1b2c", "seqNumber": 12, "lqi": 3 },
                { "time": 1_700_000_000_000_i64, "data": "0a1b2b", "seqNumber": 11 }
            ],
            "paging": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .get_device_messages("3EA68B", Some(1_700_000_000_000))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].data, "0a1b2c");
    assert_eq!(page.data[0].seq_number, Some(12));
    assert_eq!(page.data[1].received_at().unwrap().timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn test_get_device_messages_without_since() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/3EA68B/messages"))
        .and(query_param_is_missing("since"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.get_device_messages("3EA68B", None).await.unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_get_device_message_number() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/3EA68B/messages/metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lastDay": 24,
            "lastWeek": 168,
            "lastMonth": 720
        })))
        .mount(&server)
        .await;

    let stats = client.get_device_message_number("3EA68B").await.unwrap();

    assert_eq!(stats.last_day, 24);
    assert_eq!(stats.last_week, 168);
    assert_eq!(stats.last_month, 720);
}

// ── Device types & resolution ───────────────────────────────────────

#[tokio::test]
async fn test_resolve_device_type_by_id_and_name() {
    let (server, client) = setup().await;
    mount_device_types(&server).await;

    let by_id = client.resolve_device_type_id("dt3").await.unwrap();
    assert_eq!(by_id, "dt3");

    server.reset().await;
    mount_device_types(&server).await;

    let by_name = client.resolve_device_type_id("C").await.unwrap();
    assert_eq!(by_name, "dt3");
}

#[tokio::test]
async fn test_resolve_device_type_missing() {
    let (server, client) = setup().await;
    mount_device_types(&server).await;

    let result = client.resolve_device_type_id("missing").await;

    match result {
        Err(Error::DeviceTypeNotFound { reference }) => assert_eq!(reference, "missing"),
        other => panic!("expected DeviceTypeNotFound, got: {other:?}"),
    }
}

// ── Provisioning ────────────────────────────────────────────────────

#[tokio::test]
async fn test_provision_device_resolves_then_creates() {
    let (server, client) = setup().await;
    mount_device_types(&server).await;

    Mock::given(method("POST"))
        .and(path("/devices/"))
        .and(body_json(json!({
            "id": "3EA68B",
            "name": "3EA68B",
            "pac": "18affc184633697b",
            "lat": 0.0,
            "lng": 0.0,
            "automatic_renewal": true,
            "activable": true,
            "prototype": false,
            "deviceTypeId": "dt3",
            "productCertificate": { "key": "P_0006_BC4D_01" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "3EA68B" })))
        .expect(1)
        .mount(&server)
        .await;

    let cert = json!({ "key": "P_0006_BC4D_01" }).as_object().unwrap().clone();
    let request =
        ProvisionRequest::new("3EA68B", "18affc184633697b", "C").product_certificate(cert);

    let created = client.provision_device(&request).await.unwrap();
    assert_eq!(created.id, "3EA68B");
}

#[tokio::test]
async fn test_provision_device_rejects_bad_input_without_network() {
    let (server, client) = setup().await;

    let bad = [
        ProvisionRequest::new("3ea68b", "18AFFC184633697B", "C"),
        ProvisionRequest::new("AB", "18AFFC184633697B", "C"),
        ProvisionRequest::new("0123456789ABCDEF0", "18AFFC184633697B", "C"),
        ProvisionRequest::new("3EA68X", "18AFFC184633697B", "C"),
        ProvisionRequest::new("3EA68B", "18AFFC18463369", "C"),
        ProvisionRequest::new("3EA68B", "18AFFC184633697G", "C"),
    ];

    for request in &bad {
        let result = client.provision_device(request).await;
        assert!(
            matches!(result, Err(Error::InvalidFormat { .. })),
            "expected InvalidFormat for {request:?}, got: {result:?}"
        );
    }

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_provision_device_unknown_type_skips_creation() {
    let (server, client) = setup().await;
    mount_device_types(&server).await;

    Mock::given(method("POST"))
        .and(path("/devices/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let request = ProvisionRequest::new("3EA68B", "18AFFC184633697B", "missing");
    let result = client.provision_device(&request).await;

    assert!(
        matches!(result, Err(Error::DeviceTypeNotFound { .. })),
        "expected DeviceTypeNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_provision_device_propagates_conflict() {
    let (server, client) = setup().await;
    mount_device_types(&server).await;
    mount_status(&server, "POST", "/devices/", 409).await;

    let request = ProvisionRequest::new("3EA68B", "18AFFC184633697B", "dt2");
    let result = client.provision_device(&request).await;

    assert!(
        matches!(result, Err(Error::Conflict { status: 409, .. })),
        "expected Conflict, got: {result:?}"
    );
}
