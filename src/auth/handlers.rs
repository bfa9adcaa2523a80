//! Authentication handlers

use axum::extract::{Extension, Json};
use axum::http::HeaderMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::extractors::AuthedUser;
use super::models::{GoogleLoginRequest, User};
use super::token::{access_cookie_value, clear_cookie_value, issue_access_token};
use crate::common::{safe_email_log, ApiError, AppState};

/// POST /users/login/google
/// Logs a user in (or signs them up) from verified Google account fields
///
/// First login creates the user row and its paired empty profile in one
/// transaction; partial creation is never observable. Every login updates
/// `last_login_at`. On success the access token is set as an HttpOnly,
/// SameSite=Lax cookie.
pub async fn google_login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    let mut tx = state.db.begin().await.map_err(ApiError::DatabaseError)?;

    let existing: Option<User> =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = ?")
            .bind(&payload.google_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    google_id = %payload.google_id,
                    "Database error checking existing user during login"
                );
                ApiError::DatabaseError(e)
            })?;

    let user_id = match existing {
        Some(u) => u.id,
        None => {
            info!(
                email = %safe_email_log(&payload.email),
                google_id = %payload.google_id,
                "Creating new user account via Google login"
            );

            let inserted = sqlx::query(
                r#"
                INSERT INTO users (email, name, google_id, avatar_url)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&payload.email)
            .bind(&payload.name)
            .bind(&payload.google_id)
            .bind(payload.avatar_url.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    email = %safe_email_log(&payload.email),
                    "Database error inserting new user during login"
                );
                ApiError::DatabaseError(e)
            })?;

            // The paired profile row is created in the same transaction; a
            // user without a profile must never be observable.
            sqlx::query("INSERT INTO user_profiles (google_id) VALUES (?)")
                .bind(&payload.google_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        google_id = %payload.google_id,
                        "Database error inserting user profile during signup"
                    );
                    ApiError::DatabaseError(e)
                })?;

            inserted.last_insert_rowid()
        }
    };

    sqlx::query(
        "UPDATE users SET last_login_at = datetime('now'), updated_at = datetime('now') WHERE id = ?",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        error!(error = %e, user_id = %user_id, "Database error updating last login timestamp");
        ApiError::DatabaseError(e)
    })?;

    let user: User = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "Database error fetching user during login");
            ApiError::DatabaseError(e)
        })?;

    tx.commit().await.map_err(ApiError::DatabaseError)?;

    let token = issue_access_token(&state.jwt_secret, &user)?;

    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", access_cookie_value(&token)?);

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User login successful via Google"
    );

    Ok((
        headers,
        Json(serde_json::json!({ "message": "login successful" })),
    ))
}

/// GET /users/me
/// Returns the current authenticated user's record
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(serde_json::json!({ "user": user })))
}

/// POST /users/logout
/// Expires the access-token cookie
pub async fn logout_handler(
    _authed: AuthedUser,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", clear_cookie_value());

    info!("User logout successful");

    Ok((
        headers,
        Json(serde_json::json!({ "message": "logout successful" })),
    ))
}
