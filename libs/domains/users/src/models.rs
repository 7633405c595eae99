use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

/// Store-assigned user identifier
pub type UserId = i64;

/// Inclusive bounds on the length of a user name, counted in characters
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

/// `local@domain.tld`: no whitespace or extra `@`, and a dot inside the domain part
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Syntactic email check. No DNS or mailbox lookup is performed.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Name length check in characters, not bytes.
pub fn is_name_valid(name: &str) -> bool {
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count())
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: UserId,
    /// Display name (2-50 characters)
    pub name: String,
    /// Email address (unique across users)
    pub email: String,
    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Unsaved record used to run the validation rules before anything is stored.
    ///
    /// The id is a placeholder (`0`); the store assigns the real one.
    pub fn candidate(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_email_valid(&self) -> bool {
        is_email_valid(&self.email)
    }

    pub fn is_name_valid(&self) -> bool {
        is_name_valid(&self.name)
    }

    pub fn is_valid(&self) -> bool {
        self.is_email_valid() && self.is_name_valid()
    }

    /// Human-readable reasons this record is invalid; empty when valid.
    pub fn validation_failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if !self.is_name_valid() {
            failures.push(format!(
                "name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ));
        }
        if !self.is_email_valid() {
            failures.push(format!("'{}' is not a valid email address", self.email));
        }
        failures
    }

    /// Copy of this record with `changes` applied. Timestamps are untouched.
    pub fn merged(&self, changes: &UserChanges) -> Self {
        let mut merged = self.clone();
        if let Some(name) = &changes.name {
            merged.name = name.clone();
        }
        if let Some(email) = &changes.email {
            merged.email = email.clone();
        }
        merged
    }

    /// Apply changes in place and refresh `updated_at`.
    ///
    /// `id` and `created_at` are never modified. `updated_at` never moves backwards,
    /// even if the wall clock does.
    pub fn apply_changes(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// Input for inserting a new user; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update. Absent fields are left unchanged.
///
/// Only `name` and `email` are mutable; any other keys in a request body
/// (including `id` or `createdAt`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `POST /users`
///
/// Both fields are optional at the JSON level so that a missing field
/// surfaces as a 400 validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,
}

/// `{ "users": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// `{ "user": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}

/// `{ "message": "...", "user": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserMutationResponse {
    pub message: String,
    pub user: User,
}

/// `{ "message": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_named(name: &str) -> User {
        User::candidate(name, "someone@example.com")
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(!user_named("A").is_name_valid());
        assert!(user_named("Al").is_name_valid());
        assert!(user_named(&"x".repeat(50)).is_name_valid());
        assert!(!user_named(&"x".repeat(51)).is_name_valid());
        assert!(!user_named("").is_name_valid());
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // 4 characters, 12 bytes
        assert!(user_named("田中太郎").is_name_valid());
        assert!(user_named(&"é".repeat(50)).is_name_valid());
        assert!(!user_named(&"é".repeat(51)).is_name_valid());
    }

    #[test]
    fn test_email_format() {
        let valid = ["a@b.co", "first.last@example.com", "x+tag@sub.domain.org"];
        for email in valid {
            assert!(is_email_valid(email), "{email} should be valid");
        }

        let invalid = [
            "",
            "plain",
            "a@b",
            "@b.co",
            "a@.co",
            "a@b.",
            "a b@c.de",
            "a@b c.de",
            "a@@b.co",
            "a@b@c.de",
        ];
        for email in invalid {
            assert!(!is_email_valid(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_is_valid_requires_both_rules() {
        assert!(User::candidate("Al", "a@b.co").is_valid());
        assert!(!User::candidate("A", "a@b.co").is_valid());
        assert!(!User::candidate("Al", "not-an-email").is_valid());
        assert!(!User::candidate("A", "not-an-email").is_valid());
    }

    #[test]
    fn test_validation_failures_name_each_rule() {
        assert!(User::candidate("Al", "a@b.co").validation_failures().is_empty());

        let failures = User::candidate("A", "nope").validation_failures();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].contains("name"));
        assert!(failures[1].contains("nope"));
    }

    #[test]
    fn test_candidate_has_matching_timestamps() {
        let user = User::candidate("Al", "a@b.co");
        assert_eq!(user.id, 0);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_merged_keeps_identity_and_timestamps() {
        let user = User::candidate("Alice", "alice@example.com");
        let merged = user.merged(&UserChanges {
            name: Some("Alicia".to_string()),
            email: None,
        });

        assert_eq!(merged.name, "Alicia");
        assert_eq!(merged.email, user.email);
        assert_eq!(merged.id, user.id);
        assert_eq!(merged.created_at, user.created_at);
        assert_eq!(merged.updated_at, user.updated_at);
    }

    #[test]
    fn test_apply_changes_refreshes_updated_at_only() {
        let mut user = User::candidate("Alice", "alice@example.com");
        let created_at = user.created_at;
        let before = user.updated_at;

        user.apply_changes(UserChanges {
            name: None,
            email: Some("alicia@example.com".to_string()),
        });

        assert_eq!(user.email, "alicia@example.com");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.created_at, created_at);
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_user_serializes_with_camel_case_timestamps() {
        let json = serde_json::to_value(User::candidate("Al", "a@b.co")).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_create_request_requires_both_fields() {
        let missing: CreateUserRequest = serde_json::from_str(r#"{"name":"Al"}"#).unwrap();
        assert!(missing.validate().is_err());

        let empty: CreateUserRequest =
            serde_json::from_str(r#"{"name":"","email":"a@b.co"}"#).unwrap();
        assert!(empty.validate().is_err());

        let complete: CreateUserRequest =
            serde_json::from_str(r#"{"name":"Al","email":"a@b.co"}"#).unwrap();
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn test_changes_ignore_immutable_fields() {
        let changes: UserChanges =
            serde_json::from_str(r#"{"id": 9, "createdAt": "2020-01-01T00:00:00Z", "name": "Bo"}"#)
                .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Bo"));
        assert!(changes.email.is_none());
    }
}
