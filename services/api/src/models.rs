//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of principal id characters kept in a placeholder username
const PLACEHOLDER_PREFIX_LEN: usize = 8;

/// Interest catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User entity
///
/// `id` is the identity provider's subject id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub onboarded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row inserted when a principal onboards before a local user exists
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl NewUser {
    /// Placeholder user for `principal_id`, reconciled with the identity
    /// provider's profile elsewhere
    pub fn placeholder(principal_id: &str) -> Self {
        let prefix: String = principal_id.chars().take(PLACEHOLDER_PREFIX_LEN).collect();
        Self {
            id: principal_id.to_string(),
            username: format!("user_{}", prefix),
            email: String::new(),
        }
    }
}

/// Request for onboarding
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    pub interest_ids: Vec<String>,
}

/// Response for onboarding
#[derive(Debug, Serialize)]
pub struct OnboardResponse {
    pub success: bool,
}

/// What an onboarding transaction did
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingOutcome {
    /// The user row after the onboarded flag was set
    pub user: User,
    /// Whether the user row was created by this call
    pub user_created: bool,
    /// Number of user/interest links that did not exist before
    pub interests_linked: u64,
}
