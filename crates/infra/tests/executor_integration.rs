//! Integration tests for the request executor
//!
//! Drives the executor against a wiremock server and checks response
//! classification, error mapping and debug capture.

mod support;

use edgemgmt_domain::{AuthMode, EdgeConfig, EdgeError};
use edgemgmt_infra::{Payload, RequestExecutor, RequestOptions};
use serde_json::json;
use support::{basic_config, basic_executor, endpoint, RecordingObserver, BASIC_HEADER};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_success_decodes_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/apiproducts"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["weather", "maps"])))
        .mount(&server)
        .await;

    let executor = basic_executor(&server);
    let tx = executor.get("/o/acme/apiproducts", &RequestOptions::new()).await.unwrap();

    assert_eq!(tx.status_code, 200);
    assert_eq!(tx.code_class, 2);
    assert_eq!(tx.json, Some(json!(["weather", "maps"])));
    assert_eq!(tx.mime_type.as_deref(), Some("application/json"));
    assert_eq!(tx.content_length, Some(tx.raw_body.len() as u64));
    assert_eq!(tx.json::<Vec<String>>().unwrap(), vec!["weather", "maps"]);
}

#[tokio::test]
async fn test_non_json_content_is_not_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"looks": "like json"}"#, "text/html"))
        .mount(&server)
        .await;

    let tx = basic_executor(&server).get("/o/acme", &RequestOptions::new()).await.unwrap();

    assert!(tx.json.is_none());
    assert_eq!(tx.raw_body, r#"{"looks": "like json"}"#);
}

#[tokio::test]
async fn test_malformed_json_on_success_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{oops", "application/json"))
        .mount(&server)
        .await;

    let tx = basic_executor(&server).get("/o/acme", &RequestOptions::new()).await.unwrap();

    assert_eq!(tx.status_code, 200);
    assert!(tx.json.is_none());
    assert!(matches!(tx.json::<serde_json::Value>(), Err(EdgeError::Serialization(_))));
}

#[tokio::test]
async fn test_error_status_carries_message_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/developers/nobody%40example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "developer.service.DeveloperDoesNotExist",
            "message": "DeveloperId nobody@example.com does not exist in organization acme"
        })))
        .mount(&server)
        .await;

    let err = basic_executor(&server)
        .get("/o/acme/developers/nobody%40example.com", &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let response = err.response().unwrap();
    assert_eq!(response.status_phrase, "Not Found");
    assert_eq!(response.code_class(), 4);
    assert_eq!(
        response.message.as_deref(),
        Some("DeveloperId nobody@example.com does not exist in organization acme")
    );
    assert_eq!(response.error_code.as_deref(), Some("developer.service.DeveloperDoesNotExist"));
    assert!(response.uri.ends_with("/v1/o/acme/developers/nobody%40example.com"));
    assert_eq!(response.debug.status_code, 404);
    assert!(response.debug.exception.is_some());
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("<html>down</html>", "text/html"))
        .mount(&server)
        .await;

    let err = basic_executor(&server).get("/o/acme", &RequestOptions::new()).await.unwrap_err();

    let response = err.response().unwrap();
    assert_eq!(response.status_code, 503);
    assert!(response.body.is_none());
    assert!(response.message.is_none());
    assert_eq!(response.debug.raw_body, "<html>down</html>");
}

#[tokio::test]
async fn test_transport_failure_has_code_zero() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let observer = RecordingObserver::default();
    let config = EdgeConfig::new("acme", AuthMode::Bearer { token: "t".into() })
        .with_endpoint(format!("http://127.0.0.1:{port}/v1"));
    let executor = RequestExecutor::builder(config).observer(observer.clone()).build().unwrap();

    let err = executor.get("/o/acme", &RequestOptions::new()).await.unwrap_err();

    let response = err.response().unwrap();
    assert!(response.is_transport());
    assert_eq!(err.status_code(), Some(0));
    assert!(response.body.is_none());
    assert!(!response.status_phrase.is_empty());

    let snapshots = observer.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert!(snapshots[0].is_transport_failure());
    assert!(snapshots[0].data.is_none());
    assert!(snapshots[0].uri.ends_with("/v1/o/acme"));
    assert!(snapshots[0].exception.is_some());
    assert!(snapshots[0].request_headers.iter().any(|(name, _)| name == "authorization"));
}

#[tokio::test]
async fn test_json_payload_round_trips() {
    let server = MockServer::start().await;
    let product = json!({
        "name": "weather",
        "displayName": "Weather",
        "apiResources": ["/forecast/**"],
        "attributes": [{"name": "access", "value": "public"}]
    });

    Mock::given(method("POST"))
        .and(path("/v1/o/acme/apiproducts"))
        .and(header("content-type", "application/json"))
        .and(body_json(&product))
        .respond_with(ResponseTemplate::new(201).set_body_json(&product))
        .expect(1)
        .mount(&server)
        .await;

    let tx = basic_executor(&server)
        .post("/o/acme/apiproducts", Payload::Json(product.clone()), &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(tx.status_code, 201);
    assert_eq!(tx.json, Some(product));
}

#[tokio::test]
async fn test_options_set_accept_headers_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/developers"))
        .and(query_param("expand", "true"))
        .and(header("accept", "application/xml"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<Developers/>", "application/xml"))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new().accept("application/xml").header("X-Trace", "abc").query("expand", "true");
    let tx = basic_executor(&server).get("/o/acme/developers", &options).await.unwrap();

    assert_eq!(tx.raw_body, "<Developers/>");
    assert!(tx.json.is_none());
}

#[tokio::test]
async fn test_percent_encoded_organization_reaches_server_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/ac%20me/apiproducts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = EdgeConfig::new("ac me", AuthMode::Basic { username: "u".into(), password: "p".into() })
        .with_endpoint(endpoint(&server));
    let executor = RequestExecutor::new(config).unwrap();

    let path = edgemgmt_domain::utils::path::collection_path(executor.organization(), "apiproducts");
    assert_eq!(path, "/o/ac%20me/apiproducts");
    executor.get(&path, &RequestOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_observers_see_every_transaction_with_redacted_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "acme"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let observer = RecordingObserver::default();
    let executor =
        RequestExecutor::builder(basic_config(&server)).observer(observer.clone()).build().unwrap();

    executor.get("/o/acme", &RequestOptions::new()).await.unwrap();
    executor.delete("/o/acme/apiproducts/x", &RequestOptions::new()).await.unwrap_err();

    let snapshots = observer.snapshots();
    assert_eq!(snapshots.len(), 2);

    assert_eq!(snapshots[0].method, "GET");
    assert_eq!(snapshots[0].status_code, 200);
    assert_eq!(snapshots[0].data, Some(json!({"name": "acme"})));
    assert!(snapshots[0].exception.is_none());

    assert_eq!(snapshots[1].method, "DELETE");
    assert_eq!(snapshots[1].code_class, 5);
    assert!(snapshots[1].exception.as_deref().unwrap().contains("boom"));

    for snapshot in &snapshots {
        assert!(snapshot
            .request_headers
            .iter()
            .any(|(name, value)| name == "authorization" && value == "[REDACTED]"));
        assert!(!snapshot.request_headers.iter().any(|(_, value)| value == BASIC_HEADER));
    }
}

#[tokio::test]
async fn test_closure_observer_receives_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (sender, receiver) = std::sync::mpsc::channel();
    let executor = RequestExecutor::builder(basic_config(&server))
        .observer(move |data: &edgemgmt_domain::DebugData| {
            let _ = sender.send(data.status_code);
        })
        .build()
        .unwrap();

    let tx = executor.head("/o/acme", &RequestOptions::new()).await.unwrap();

    assert!(tx.is_empty());
    assert_eq!(receiver.try_recv().unwrap(), 200);
}
