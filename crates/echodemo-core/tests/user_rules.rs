//! User body parsing + validation from raw JSON.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use echodemo_core::protocol::user::{CreateUser, UpdateUser, UserView};

fn create(json: &str) -> CreateUser {
    serde_json::from_str(json).unwrap()
}

#[test]
fn create_missing_email_is_rejected() {
    let err = create(r#"{"name":"Dana"}"#).validate().expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "VALIDATION");
    assert!(!err.to_string().is_empty());
    assert!(err.to_string().contains("email"));
}

#[test]
fn create_malformed_email_is_rejected() {
    let err = create(r#"{"name":"Dana","email":"not-an-email"}"#)
        .validate()
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "VALIDATION");
}

#[test]
fn create_empty_name_counts_as_missing() {
    let err = create(r#"{"name":"","email":"dana@x.com"}"#)
        .validate()
        .expect_err("must fail");
    assert!(err.to_string().contains("name"));
}

#[test]
fn create_valid_passes_fields_through() {
    let u = create(r#"{"name":"Dana","email":"dana@x.com","extra":true}"#)
        .validate()
        .expect("must pass");
    assert_eq!(u.name, "Dana");
    assert_eq!(u.email, "dana@x.com");
}

#[test]
fn update_defaults_missing_fields_to_empty() {
    let u: UpdateUser = serde_json::from_str(r#"{"name":"Eve"}"#).unwrap();
    let view = u.into_view("7");
    assert_eq!(
        view,
        UserView {
            id: "7".into(),
            name: "Eve".into(),
            email: String::new(),
        }
    );
}

#[test]
fn demo_view_only_varies_by_id() {
    let v = serde_json::to_value(UserView::demo("42")).unwrap();
    assert_eq!(v["id"], "42");
    assert_eq!(v["name"], "Demo User");
    assert_eq!(v["email"], "demo@example.com");
}
