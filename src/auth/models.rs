//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
///
/// Claim fields other than `sub` are opaque to the codec; only `sub` (the
/// Google subject id) is used for downstream lookup.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub generation: i64,
    pub exp: usize,
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub google_id: String,
    pub avatar_url: Option<String>,
    pub generation: i64,
    pub role_level: i64,
    pub last_login_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Google login request payload
///
/// The transport in front of this API has already verified the Google token;
/// this carries the verified account fields.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub email: String,
    pub name: String,
    pub google_id: String,
    pub avatar_url: Option<String>,
}
