//! Integration tests for entity types
//!
//! Wire-format scenarios taken from realistic management API payloads:
//! decoding server responses, encoding save bodies and refining vendor
//! errors.

use edgemgmt_domain::utils::path;
use edgemgmt_domain::{
    ApiFault, ApiProduct, ApprovalStatus, ApprovalType, DebugData, Developer, DeveloperApp,
    EdgeError, ResponseError,
};
use serde_json::json;

// ============================================================================
// Developer apps
// ============================================================================

/// An app as returned by `GET /developers/{email}/apps/{name}`.
#[test]
fn test_decode_app_with_credentials() {
    let app: DeveloperApp = serde_json::from_value(json!({
        "name": "weather-app",
        "appId": "3b1c9a6e",
        "developerId": "dev-1",
        "status": "approved",
        "callbackUrl": "https://weather.example.com/callback",
        "attributes": [{"name": "DisplayName", "value": "Weather"}],
        "credentials": [
            {
                "consumerKey": "old-key",
                "consumerSecret": "s1",
                "apiProducts": [{"apiproduct": "weather", "status": "approved"}],
                "expiresAt": 1_600_000_000_000_i64,
                "issuedAt": 1_500_000_000_000_i64,
                "status": "approved"
            },
            {
                "consumerKey": "new-key",
                "consumerSecret": "s2",
                "apiProducts": [
                    {"apiproduct": "weather", "status": "approved"},
                    {"apiproduct": "maps", "status": "pending"}
                ],
                "issuedAt": 1_700_000_000_000_i64,
                "status": "approved"
            }
        ],
        "createdAt": 1_500_000_000_000_i64,
        "lastModifiedBy": "ops@example.com"
    }))
    .unwrap();

    assert!(!app.is_new());
    assert_eq!(app.approval_status().unwrap(), ApprovalStatus::Approved);
    assert_eq!(app.attributes.get("DisplayName"), Some("Weather"));

    let old = &app.credentials[0];
    assert!(old.is_expired_at(1_700_000_000_000));

    let new = &app.credentials[1];
    assert!(!new.is_expired_at(i64::MAX));
    assert_eq!(new.product_names().collect::<Vec<_>>(), vec!["weather", "maps"]);
    assert_eq!(new.api_products[1].approval_status().unwrap(), ApprovalStatus::Pending);
}

/// Server-owned fields never travel back on save.
#[test]
fn test_app_save_body_omits_read_only_fields() {
    let mut app: DeveloperApp = serde_json::from_value(json!({
        "name": "weather-app",
        "appId": "3b1c9a6e",
        "status": "approved",
        "credentials": [{"consumerKey": "k", "status": "approved"}],
        "createdAt": 1
    }))
    .unwrap();
    app.api_products = vec!["weather".into()];

    let body = serde_json::to_value(&app).unwrap();

    assert_eq!(
        body,
        json!({"name": "weather-app", "attributes": [], "apiProducts": ["weather"], "status": "approved"})
    );
}

#[test]
fn test_unknown_status_is_parameter_error() {
    let app = DeveloperApp { status: Some("suspended".into()), ..DeveloperApp::new("x") };

    assert!(matches!(app.approval_status(), Err(EdgeError::Parameter(_))));
}

// ============================================================================
// Developers and products
// ============================================================================

#[test]
fn test_developer_round_trip_keeps_editable_fields() {
    let mut developer = Developer::new("dev+1@example.com", "Ada", "Lovelace", "ada");
    developer.attributes.set("tier", "gold");

    let body = serde_json::to_value(&developer).unwrap();
    let decoded: Developer = serde_json::from_value(body).unwrap();

    assert_eq!(decoded, developer);
    assert!(decoded.is_new());
    assert_eq!(
        path::entity_path("acme", "developers", &decoded.email),
        "/o/acme/developers/dev%2B1%40example.com"
    );
}

#[test]
fn test_new_product_defaults() {
    let product = ApiProduct::new("weather");

    assert_eq!(product.display_name, "weather");
    assert_eq!(product.approval_type, ApprovalType::Auto);
    assert!(product.validate().is_ok());
    assert!(ApiProduct::new(" ").validate().is_err());
}

// ============================================================================
// Error refinement
// ============================================================================

#[test]
fn test_developer_already_exists_is_refined() {
    let err: EdgeError = ResponseError::from_status(
        409,
        "Conflict",
        "https://mgmt.example.com/v1/o/acme/developers",
        Some(json!({
            "code": "developer.service.DeveloperAlreadyExists",
            "message": "Developer with email ada@example.com already exists"
        })),
        DebugData::default(),
    )
    .into();

    match err.refine() {
        EdgeError::Api(fault @ ApiFault::DeveloperAlreadyExists { .. }) => {
            assert_eq!(fault.code(), "developer.service.DeveloperAlreadyExists");
            assert!(fault.to_string().contains("ada@example.com"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_app_does_not_exist_stays_response_error() {
    let err: EdgeError = ResponseError::from_status(
        404,
        "Not Found",
        "https://mgmt.example.com/v1/o/acme/developers/ada%40example.com/apps/x",
        Some(json!({"code": "keymanagement.service.app_does_not_exist", "message": "App named x does not exist"})),
        DebugData::default(),
    )
    .into();

    let refined = err.refine();
    assert!(refined.is_not_found());
    assert_eq!(refined.response().and_then(|r| r.message.as_deref()), Some("App named x does not exist"));
}

#[test]
fn test_rate_plan_not_published_carries_plan() {
    let err: EdgeError = ResponseError::from_status(
        400,
        "Bad Request",
        "https://mgmt.example.com/v1/mint/organizations/acme/developers/ada/developer-rateplans",
        Some(json!({
            "code": "mint.ratePlanNotPublished",
            "message": "Rate plan is not published",
            "contexts": [{"name": "ratePlan", "value": "gold-plan"}]
        })),
        DebugData::default(),
    )
    .into();

    assert!(matches!(
        err.refine(),
        EdgeError::Api(ApiFault::RatePlanNotPublished { rate_plan: Some(plan), .. }) if plan == "gold-plan"
    ));
}
