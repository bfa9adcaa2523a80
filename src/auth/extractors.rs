//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::User;
use super::token::{parse_cookie, verify_access_token, ACCESS_TOKEN_COOKIE};
use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Reads the access-token cookie, validates it, and loads the current user
/// record from the database. Missing cookie, invalid token, and unknown
/// subject all produce the same rejection so callers can't probe for
/// account existence.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: i64,
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub role_level: i64,
}

/// Resolve an optional credential to the current user record
///
/// Returns the fresh database row, never the token's cached snapshot, so
/// role and profile changes take effect without re-login.
pub async fn resolve_access_token(
    db: &SqlitePool,
    secret: &str,
    token: Option<String>,
) -> Result<User, ApiError> {
    let token = match token {
        Some(t) => t,
        None => {
            warn!("Authentication failed: missing access token cookie");
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    let claims = verify_access_token(secret, &token)?;

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = ?")
        .bind(&claims.sub)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                google_id = %claims.sub,
                "Database error during user lookup in authentication"
            );
            ApiError::DatabaseError(e)
        })?;

    match user {
        Some(u) => {
            debug!(
                user_id = %u.id,
                email = %safe_email_log(&u.email),
                "User authentication successful"
            );
            Ok(u)
        }
        None => {
            // Same rejection as a bad token: never reveal whether the
            // subject once existed.
            warn!(google_id = %claims.sub, "Authentication failed: user not found in database");
            Err(ApiError::Unauthorized("invalid credentials".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let token = parse_cookie(&parts.headers, ACCESS_TOKEN_COOKIE);
        let user = resolve_access_token(&app_state.db, &app_state.jwt_secret, token).await?;

        Ok(AuthedUser {
            id: user.id,
            google_id: user.google_id,
            email: user.email,
            name: user.name,
            role_level: user.role_level,
        })
    }
}
