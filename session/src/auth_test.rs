use super::*;

// =============================================================
// Credentials validation
// =============================================================

#[test]
fn credentials_reject_empty_email() {
    assert_eq!(Credentials::new("", "pw"), Err(SessionError::InvalidInput));
}

#[test]
fn credentials_reject_blank_email() {
    assert_eq!(Credentials::new("   ", "pw"), Err(SessionError::InvalidInput));
}

#[test]
fn credentials_reject_empty_password() {
    assert_eq!(Credentials::new("a@b.com", ""), Err(SessionError::InvalidInput));
}

#[test]
fn credentials_trim_email_but_not_password() {
    let credentials = Credentials::new("  a@b.com ", " pw ").unwrap();
    assert_eq!(credentials.email, "a@b.com");
    assert_eq!(credentials.password, " pw ");
}

#[test]
fn credentials_serialize_as_login_body() {
    let credentials = Credentials::new("a@b.com", "secret").unwrap();
    assert_eq!(
        serde_json::to_value(&credentials).unwrap(),
        serde_json::json!({ "email": "a@b.com", "password": "secret" })
    );
}

#[test]
fn credentials_debug_redacts_password() {
    let credentials = Credentials::new("a@b.com", "hunter2").unwrap();
    let debug = format!("{credentials:?}");
    assert!(debug.contains("a@b.com"));
    assert!(!debug.contains("hunter2"));
}

// =============================================================
// Grant / LoginResponse
// =============================================================

#[test]
fn login_response_converts_into_grant() {
    let raw = r#"{"token":"t-1","user":{"id":"9","email":"m@x.io","name":"Mo","role":"MANAGER"}}"#;
    let response: LoginResponse = serde_json::from_str(raw).unwrap();
    let grant = Grant::from(response);
    assert_eq!(grant.token, "t-1");
    assert_eq!(grant.identity.display_name, "Mo");
    assert_eq!(grant.identity.role, Role::Manager);
}

#[test]
fn grant_debug_redacts_token() {
    let grant = Grant {
        identity: Identity::new("1", "a@b.com", "A", Role::Admin),
        token: "very-secret-token".to_owned(),
    };
    assert!(!format!("{grant:?}").contains("very-secret-token"));
}

// =============================================================
// DemoAuthenticator
// =============================================================

#[test]
fn demo_authenticator_fabricates_admin_for_email() {
    let credentials = Credentials::new("admin@example.com", "password").unwrap();
    let grant = futures::executor::block_on(DemoAuthenticator.authenticate(&credentials)).unwrap();
    assert_eq!(grant.identity.email, "admin@example.com");
    assert_eq!(grant.identity.display_name, DemoAuthenticator::DISPLAY_NAME);
    assert_eq!(grant.identity.role, Role::Admin);
    assert!(grant.token.starts_with("demo-"));
}

#[test]
fn demo_authenticator_tokens_differ_per_login() {
    let credentials = Credentials::new("a@b.com", "pw").unwrap();
    let first = DemoAuthenticator::grant_for(&credentials);
    let second = DemoAuthenticator::grant_for(&credentials);
    assert_ne!(first.token, second.token);
}
