//! User resource bodies.
//!
//! The demo keeps no users: request bodies are validated (create only) and
//! reflected back. Unknown JSON fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::{EchoError, Result};

/// Entry of the canned user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Single-user view. The id is echoed from the path, so it stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_EMAIL: &str = "demo@example.com";

impl UserView {
    /// View returned for any id: only the id varies.
    pub fn demo(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: DEMO_USER_NAME.to_string(),
            email: DEMO_USER_EMAIL.to_string(),
        }
    }
}

/// Fixed list served by `GET /api/v1/users`.
pub fn canned_users() -> Vec<User> {
    [
        (1, "Alice", "alice@example.com"),
        (2, "Bob", "bob@example.com"),
        (3, "Charlie", "charlie@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

/// `POST` body, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST` body after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl CreateUser {
    /// Both fields are required and non-empty; email must look like an address.
    pub fn validate(self) -> Result<NewUser> {
        let name = required("name", self.name)?;
        let email = required("email", self.email)?;
        if !looks_like_email(&email) {
            return Err(EchoError::Validation(
                "email must be a valid email address".into(),
            ));
        }
        Ok(NewUser { name, email })
    }
}

fn required(field: &str, v: Option<String>) -> Result<String> {
    match v {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(EchoError::Validation(format!("{field} is required"))),
    }
}

/// `PUT` body. No rules; omitted fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UpdateUser {
    pub fn into_view(self, id: impl Into<String>) -> UserView {
        UserView {
            id: id.into(),
            name: self.name,
            email: self.email,
        }
    }
}

/// Structural address check: `local@domain.tld`, no whitespace, one `@`,
/// dotted domain with non-empty alphanumeric/hyphen labels.
pub fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|l| {
        !l.is_empty()
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        for ok in ["dana@x.com", "a.b+tag@mail.example.org", "x_y@sub-d.io"] {
            assert!(looks_like_email(ok), "{ok}");
        }
        for bad in [
            "not-an-email",
            "@x.com",
            "dana@",
            "dana@x",
            "dana@x..com",
            "da na@x.com",
            "a@b@c.com",
            ".dana@x.com",
            "dana@-x.com",
        ] {
            assert!(!looks_like_email(bad), "{bad}");
        }
    }

    #[test]
    fn canned_list_has_three_records() {
        let users = canned_users();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].name, "Alice");
        assert_eq!(users[2].email, "charlie@example.com");
    }
}
