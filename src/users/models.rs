// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Profile Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct UserProfile {
    pub google_id: String,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
    #[serde(
        serialize_with = "crate::common::helpers::serialize_string_list",
        deserialize_with = "crate::common::helpers::deserialize_string_list"
    )]
    pub portfolio_url: Option<String>, // JSON string of URL array
    #[serde(
        serialize_with = "crate::common::helpers::serialize_string_list",
        deserialize_with = "crate::common::helpers::deserialize_string_list"
    )]
    pub tech_stack: Option<String>, // JSON string of tag array
    pub updated_at: Option<String>,
}

/// Partial profile update; only provided fields are changed
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<Vec<String>>,
    pub tech_stack: Option<Vec<String>>,
}

// ============================================================================
// User Directory Models
// ============================================================================

#[derive(FromRow, Serialize, Debug)]
pub struct UserSummary {
    pub name: String,
    pub google_id: String,
    pub generation: i64,
}
