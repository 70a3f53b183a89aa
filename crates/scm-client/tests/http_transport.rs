//! Integration tests for ScmClient using wiremock
//!
//! These tests verify the HTTP transport against mocked endpoints: auth
//! headers, query encoding, error-body mapping and empty bodies.

use std::sync::Arc;

use scm_client::models::AddressCreate;
use scm_client::{
    ApiErrorKind, HttpTransport, ListQuery, Scm, ScmClient, ScmError, ScopeParams,
};
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESSES: &str = "/config/objects/v1/addresses";
const ADDRESS_ID: &str = "123e4567-e89b-12d3-a456-426655440000";

fn client(server: &MockServer) -> ScmClient {
    ScmClient::new(server.uri(), "test-token".to_string()).expect("client should build")
}

fn error_body(code: &str, message: &str, error_type: &str) -> serde_json::Value {
    json!({
        "_errors": [{
            "code": code,
            "message": message,
            "details": {"errorType": error_type}
        }],
        "_request_id": "req-1"
    })
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_encoded_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES))
        .and(bearer_token("test-token"))
        .and(header("Accept", "application/json"))
        .and(query_param("folder", "Shared Folder"))
        .and(query_param("name", "web & db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .get(
            ADDRESSES,
            &[
                ("folder", "Shared Folder".to_string()),
                ("name", "web & db".to_string()),
            ],
        )
        .await
        .expect("request should succeed");

    assert_eq!(response, json!({"data": []}));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let body = json!({"name": "web", "fqdn": "web.example.com", "folder": "Texas"});

    Mock::given(method("POST"))
        .and(path(ADDRESSES))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": ADDRESS_ID,
            "name": "web",
            "fqdn": "web.example.com",
            "folder": "Texas"
        })))
        .mount(&server)
        .await;

    let response = client(&server).post(ADDRESSES, &body).await.unwrap();
    assert_eq!(response["id"], ADDRESS_ID);
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{ADDRESSES}/{ADDRESS_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete(&format!("{ADDRESSES}/{ADDRESS_ID}"))
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn test_structured_error_body_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ADDRESSES))
        .respond_with(ResponseTemplate::new(409).set_body_json(error_body(
            "E006",
            "Your configuration is not valid.",
            "Object Already Exists",
        )))
        .mount(&server)
        .await;

    let err = client(&server)
        .post(ADDRESSES, &json!({"name": "web"}))
        .await
        .unwrap_err();

    match err {
        ScmError::Api(api) => {
            assert_eq!(api.kind, ApiErrorKind::ObjectAlreadyExists);
            assert_eq!(api.status, 409);
            assert_eq!(api.code.as_deref(), Some("E006"));
            assert_eq!(api.request_id.as_deref(), Some("req-1"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reference_not_zero_on_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{ADDRESSES}/{ADDRESS_ID}")))
        .respond_with(ResponseTemplate::new(409).set_body_json(error_body(
            "E009",
            "Reference not zero",
            "Reference Not Zero",
        )))
        .mount(&server)
        .await;

    let err = client(&server)
        .delete(&format!("{ADDRESSES}/{ADDRESS_ID}"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScmError::Api(ref api) if api.kind == ApiErrorKind::ReferenceNotZero));
}

#[tokio::test]
async fn test_unstructured_error_propagates_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get(ADDRESSES, &[("folder", "Texas".to_string())])
        .await
        .unwrap_err();

    match err {
        ScmError::Http(http) => assert_eq!(http.status().map(|s| s.as_u16()), Some(502)),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_pages_through_real_transport() {
    let server = MockServer::start().await;

    let page = |offset: u32, names: &[&str]| {
        let data: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                json!({
                    "id": format!("00000000-0000-0000-0000-00000000000{}", offset as usize + i),
                    "name": n,
                    "ip_netmask": "10.0.0.1/32",
                    "folder": "Texas"
                })
            })
            .collect();
        json!({"data": data, "limit": 2, "offset": offset, "total": 3})
    };

    Mock::given(method("GET"))
        .and(path(ADDRESSES))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, &["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ADDRESSES))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, &["c"])))
        .expect(1)
        .mount(&server)
        .await;

    let scm = Scm::new(Arc::new(client(&server)));
    let mut addresses = scm.addresses();
    addresses.set_max_limit(2).unwrap();

    let result = addresses.list(&ListQuery::folder("Texas")).await.unwrap();
    let names: Vec<&str> = result.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_create_and_fetch_through_real_transport() {
    let server = MockServer::start().await;
    let stored = json!({
        "id": ADDRESS_ID,
        "name": "web",
        "fqdn": "web.example.com",
        "folder": "Texas"
    });

    Mock::given(method("POST"))
        .and(path(ADDRESSES))
        .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ADDRESSES))
        .and(query_param("name", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [stored]})))
        .mount(&server)
        .await;

    let scm = Scm::new(Arc::new(client(&server)));
    let created = scm
        .addresses()
        .create(&AddressCreate {
            name: "web".to_string(),
            fqdn: Some("web.example.com".to_string()),
            folder: Some("Texas".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let fetched = scm
        .addresses()
        .fetch("web", &ScopeParams::folder("Texas"))
        .await
        .unwrap();

    assert_eq!(created, fetched);
}
