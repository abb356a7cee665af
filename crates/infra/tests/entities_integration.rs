//! Integration tests for the entity clients
//!
//! Each test mounts the management endpoints an operation should touch and
//! lets wiremock verify the exact calls on drop.

mod support;

use std::sync::Arc;

use edgemgmt_core::CacheManager;
use edgemgmt_domain::{ApiProduct, ApprovalStatus, Developer, DeveloperApp, DeveloperStatus, EdgeError};
use edgemgmt_infra::{CacheConfig, EdgeClient, MokaCacheManager};
use serde_json::{json, Value};
use support::basic_executor;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPS: &str = "/v1/o/acme/developers/ada%40example.com/apps";

fn client(server: &MockServer) -> EdgeClient {
    EdgeClient::new(basic_executor(server))
}

fn developer_json() -> Value {
    json!({
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "userName": "ada",
        "developerId": "dev-1",
        "organizationName": "acme",
        "status": "active",
        "attributes": [],
        "apps": ["weather-app"],
        "createdAt": 1_700_000_000_000_i64
    })
}

fn app_json(products: &[(&str, &str)], credential_status: &str) -> Value {
    let products: Vec<Value> =
        products.iter().map(|(name, status)| json!({"apiproduct": name, "status": status})).collect();
    json!({
        "name": "weather-app",
        "appId": "app-1",
        "developerId": "dev-1",
        "status": "approved",
        "attributes": [],
        "credentials": [{
            "consumerKey": "key-1",
            "consumerSecret": "secret-1",
            "apiProducts": products,
            "expiresAt": -1,
            "issuedAt": 1_700_000_000_000_i64,
            "status": credential_status
        }]
    })
}

#[tokio::test]
async fn test_organization_load_and_environments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "acme",
            "displayName": "Acme",
            "type": "paid",
            "environments": ["test", "prod"],
            "properties": {"property": [{"name": "features.isMonetizationEnabled", "value": "true"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["test", "prod"])))
        .mount(&server)
        .await;

    let organization = client(&server).organization();
    let org = organization.load().await.unwrap();

    assert_eq!(org.kind.as_deref(), Some("paid"));
    assert_eq!(org.property("features.isMonetizationEnabled"), Some("true"));
    assert_eq!(organization.list_environments().await.unwrap(), vec!["test", "prod"]);
}

#[tokio::test]
async fn test_developer_list_and_emails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/developers"))
        .and(query_param("expand", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"developer": [developer_json()]})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/developers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ada@example.com"])))
        .mount(&server)
        .await;

    let developers = client(&server).developers();

    assert_eq!(developers.list_emails().await.unwrap(), vec!["ada@example.com"]);
    let listed = developers.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, Some(DeveloperStatus::Active));
}

#[tokio::test]
async fn test_developer_create_then_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/o/acme/developers"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "userName": "ada",
            "attributes": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(developer_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/o/acme/developers/ada%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(developer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let developers = client(&server).developers();
    let mut developer = Developer::new("ada@example.com", "Ada", "Lovelace", "ada");

    developers.save(&mut developer).await.unwrap();
    assert_eq!(developer.developer_id.as_deref(), Some("dev-1"));
    assert_eq!(developer.apps, vec!["weather-app"]);

    developers.save(&mut developer).await.unwrap();
}

#[tokio::test]
async fn test_developer_save_validates_before_any_request() {
    let server = MockServer::start().await;
    let mut developer = Developer::new("ada@example.com", "Ada", "", "ada");

    let err = client(&server).developers().save(&mut developer).await.unwrap_err();

    assert!(matches!(err, EdgeError::Parameter(msg) if msg.contains("lastName")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_delete_leaves_developer_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/o/acme/developers/ada%40example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "developer.service.DeveloperDoesNotExist",
            "message": "DeveloperId ada@example.com does not exist in organization acme"
        })))
        .mount(&server)
        .await;

    let mut developer: Developer = serde_json::from_value(developer_json()).unwrap();
    let before = developer.clone();

    let err = client(&server).developers().delete(&mut developer).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(developer, before);
}

#[tokio::test]
async fn test_successful_delete_blanks_developer() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/o/acme/developers/ada%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(developer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let mut developer: Developer = serde_json::from_value(developer_json()).unwrap();
    client(&server).developers().delete(&mut developer).await.unwrap();

    assert_eq!(developer, Developer::default());
}

#[tokio::test]
async fn test_developer_status_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/o/acme/developers/ada%40example.com"))
        .and(query_param("action", "inactive"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .developers()
        .set_status("ada@example.com", DeveloperStatus::Inactive)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_status_action_accepts_success_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/o/acme/developers/ada%40example.com"))
        .and(query_param("action", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(developer_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{APPS}/weather-app")))
        .and(query_param("action", "approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_json(&[], "approved")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.developers().set_status("ada@example.com", DeveloperStatus::Active).await.unwrap();
    client
        .developer_apps("ada@example.com")
        .set_status("weather-app", ApprovalStatus::Approved)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dot_segment_identifiers_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    let client = client(&server);

    let mut dot_app = DeveloperApp::new("..");
    let err = client.developer_apps("ada@example.com").delete(&mut dot_app).await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));
    assert_eq!(dot_app.name, "..");

    let err = client.developer_apps("ada@example.com").load(".").await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));

    let err = client
        .developer_apps("ada@example.com")
        .delete_credential("weather-app", "..")
        .await
        .unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));

    let err = client.developer_apps("..").list_names().await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));

    let err = client.developers().set_status("..", DeveloperStatus::Inactive).await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));

    let err = client.api_products().load("..").await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_product_list_is_memoized_until_save() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/o/acme/apiproducts"))
        .and(query_param("expand", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiProduct": [{"name": "weather", "displayName": "Weather", "approvalType": "auto"}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/o/acme/apiproducts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "maps", "displayName": "maps", "approvalType": "manual", "createdAt": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(MokaCacheManager::new(CacheConfig::default()));
    let products = client(&server).with_cache(cache.clone()).api_products();

    let first = products.list().await.unwrap();
    let second = products.list().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].display_name, "Weather");
    assert!(cache.get("apiproducts:acme").is_some());

    let mut product = ApiProduct::new("maps");
    products.save(&mut product).await.unwrap();
    assert!(!product.is_new());
    assert!(cache.get("apiproducts:acme").is_none());

    products.list().await.unwrap();
}

#[tokio::test]
async fn test_api_product_delete_404_keeps_product() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/o/acme/apiproducts/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "gone"})))
        .mount(&server)
        .await;

    let mut product = ApiProduct::new("weather");
    let err = client(&server).api_products().delete(&mut product).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(product.name, "weather");
}

#[tokio::test]
async fn test_app_load_fills_products_from_active_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{APPS}/weather-app")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(app_json(&[("weather", "approved"), ("maps", "approved")], "approved")),
        )
        .mount(&server)
        .await;

    let app = client(&server).developer_apps("ada@example.com").load("weather-app").await.unwrap();

    assert_eq!(app.api_products, vec!["weather", "maps"]);
    assert_eq!(app.credentials[0].consumer_key, "key-1");
}

#[tokio::test]
async fn test_app_create_sends_requested_products() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(APPS))
        .and(body_json(json!({"name": "weather-app", "attributes": [], "apiProducts": ["weather"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(app_json(&[("weather", "approved")], "approved")))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = DeveloperApp::new("weather-app");
    app.api_products = vec!["weather".into()];
    client(&server).developer_apps("ada@example.com").save(&mut app).await.unwrap();

    assert_eq!(app.app_id.as_deref(), Some("app-1"));
    assert_eq!(app.api_products, vec!["weather"]);
}

#[tokio::test]
async fn test_app_update_reconciles_credential_products() {
    let server = MockServer::start().await;
    let current = app_json(&[("weather", "approved"), ("maps", "approved")], "approved");
    let after = app_json(&[("maps", "approved"), ("traffic", "pending")], "approved");

    Mock::given(method("PUT"))
        .and(path(format!("{APPS}/weather-app")))
        .and(body_json(json!({"name": "weather-app", "attributes": [], "status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&current))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{APPS}/weather-app/keys/key-1")))
        .and(body_json(json!({"apiProducts": ["traffic"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{APPS}/weather-app/keys/key-1/apiproducts/weather")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{APPS}/weather-app")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&after))
        .expect(1)
        .mount(&server)
        .await;

    let mut app: DeveloperApp = serde_json::from_value(current).unwrap();
    app.api_products = vec!["maps".into(), "traffic".into()];

    client(&server).developer_apps("ada@example.com").save(&mut app).await.unwrap();

    assert_eq!(app.api_products, vec!["maps", "traffic"]);
    assert_eq!(app.credentials[0].product_names().collect::<Vec<_>>(), vec!["maps", "traffic"]);
}

#[tokio::test]
async fn test_app_update_without_product_changes_skips_key_calls() {
    let server = MockServer::start().await;
    let current = app_json(&[("weather", "approved")], "approved");
    Mock::given(method("PUT"))
        .and(path(format!("{APPS}/weather-app")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&current))
        .expect(1)
        .mount(&server)
        .await;

    let mut app: DeveloperApp = serde_json::from_value(current).unwrap();
    app.api_products = vec!["weather".into()];
    client(&server).developer_apps("ada@example.com").save(&mut app).await.unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_app_aggregate_status_takes_worst() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{APPS}/weather-app")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(app_json(&[("weather", "approved"), ("maps", "approved")], "pending")),
        )
        .mount(&server)
        .await;

    let status = client(&server)
        .developer_apps("ada@example.com")
        .aggregate_status("weather-app")
        .await
        .unwrap();

    assert_eq!(status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_app_status_and_credential_actions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{APPS}/weather-app")))
        .and(query_param("action", "revoke"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{APPS}/weather-app/keys/key-1/apiproducts/weather")))
        .and(query_param("action", "approve"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{APPS}/weather-app/keys/key-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"consumerKey": "key-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let apps = client(&server).developer_apps("ada@example.com");
    apps.set_status("weather-app", ApprovalStatus::Revoked).await.unwrap();
    apps.set_credential_product_status("weather-app", "key-1", "weather", ApprovalStatus::Approved)
        .await
        .unwrap();
    apps.delete_credential("weather-app", "key-1").await.unwrap();

    let err = apps.set_status("weather-app", ApprovalStatus::Pending).await.unwrap_err();
    assert!(matches!(err, EdgeError::Parameter(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_app_delete_blanks_only_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{APPS}/weather-app")))
        .respond_with(ResponseTemplate::new(200).set_body_json(app_json(&[], "approved")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such app"})))
        .mount(&server)
        .await;

    let apps = client(&server).developer_apps("ada@example.com");

    let mut app: DeveloperApp = serde_json::from_value(app_json(&[], "approved")).unwrap();
    apps.delete(&mut app).await.unwrap();
    assert_eq!(app, DeveloperApp::default());

    let mut missing = DeveloperApp::new("weather-app");
    let err = apps.delete(&mut missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(missing.name, "weather-app");
}
