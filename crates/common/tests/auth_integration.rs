//! Token persistence round trip through the stored JSON shape

use edgemgmt_common::{credential_cache_key, TokenSet};

#[test]
fn grant_response_deserializes_and_stamps_expiry() {
    let body = r#"{
        "access_token": "eyJhbGciOi",
        "token_type": "bearer",
        "refresh_token": "r-1",
        "expires_in": 1799,
        "scope": "scim.me openid",
        "jti": "ignored"
    }"#;

    let tokens: TokenSet = serde_json::from_str::<TokenSet>(body).unwrap().issued_at(10_000);

    assert_eq!(tokens.expires_at, Some(11_799));
    assert_eq!(tokens.refresh_token.as_deref(), Some("r-1"));
    assert!(!tokens.is_expired(11_700, 10));
    assert!(tokens.is_expired(11_790, 10));
}

#[test]
fn stored_blob_keeps_absolute_expiry() {
    let tokens = TokenSet::new("abc", 60, 1_000);
    let blob = serde_json::to_string(&tokens).unwrap();

    let restored: TokenSet = serde_json::from_str(&blob).unwrap();
    assert_eq!(restored.expires_at, Some(1_060));
    assert_eq!(restored, tokens);
}

#[test]
fn cache_key_is_stable() {
    let first = credential_cache_key("ops@example.com", "pw", "edgecli", "edgeclisecret");
    let second = credential_cache_key("ops@example.com", "pw", "edgecli", "edgeclisecret");
    assert_eq!(first, second);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
}
