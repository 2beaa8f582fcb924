use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and email are required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: u64, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            created_at,
        }
    }
}

/// Creation input that has passed field-presence validation.
///
/// Values are kept verbatim: no trimming and no markup sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        if name.is_empty() || email.is_empty() {
            return Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        Ok(Self { name, email })
    }

    /// Validates a raw request body. Missing, null, empty and non-string
    /// values for either field are all rejected with the same message;
    /// a non-string value counts as absent even when truthy.
    pub fn from_json(body: &Value) -> Result<Self> {
        let name = required_str(body, "name");
        let email = required_str(body, "email");

        match (name, email) {
            (Some(name), Some(email)) => Self::new(name, email),
            _ => Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        }
    }
}

fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_name_and_email() {
        let user = NewUser::from_json(&json!({
            "name": "Test User",
            "email": "test@example.com"
        }))
        .unwrap();

        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn test_from_json_rejects_missing_or_falsy_fields() {
        let cases = vec![
            json!({ "name": "Test User" }),
            json!({ "email": "test@example.com" }),
            json!({ "name": "", "email": "test@example.com" }),
            json!({ "name": "Test User", "email": null }),
            json!({ "name": false, "email": "test@example.com" }),
            json!({ "name": 0, "email": "test@example.com" }),
            json!({ "name": 123, "email": "test@example.com" }),
            json!({ "name": "Test User", "email": ["test@example.com"] }),
            json!({}),
            json!([]),
            Value::Null,
        ];

        for body in cases {
            match NewUser::from_json(&body) {
                Err(CoreError::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS_MESSAGE),
                other => panic!("expected validation error for {}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_markup_is_kept_verbatim() {
        let user = NewUser::from_json(&json!({
            "name": "<script>alert('xss')</script>",
            "email": "x@example.com"
        }))
        .unwrap();

        assert_eq!(user.name, "<script>alert('xss')</script>");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new(
            7,
            NewUser::new("Jane", "jane@example.com").unwrap(),
            Utc::now(),
        );
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["id"], 7);
    }

    proptest! {
        #[test]
        fn prop_non_empty_strings_are_accepted(name in ".+", email in ".+") {
            let body = json!({ "name": name.clone(), "email": email.clone() });
            let user = NewUser::from_json(&body).unwrap();
            prop_assert_eq!(user.name, name);
            prop_assert_eq!(user.email, email);
        }

        #[test]
        fn prop_missing_email_is_rejected(name in ".*") {
            let body = json!({ "name": name });
            prop_assert!(NewUser::from_json(&body).is_err());
        }
    }
}
