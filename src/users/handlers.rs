//! User directory and profile handlers

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::models::{UpdateProfileRequest, UserProfile, UserSummary};
use super::validators::ProfileValidator;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, Validator};

/// GET /users - List all users (name, subject id, generation)
pub async fn list_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let state = state_lock.read().await.clone();

    let users = sqlx::query_as::<_, UserSummary>("SELECT name, google_id, generation FROM users")
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(users))
}

/// GET /users/:google_id/profile - Get a user's profile
pub async fn get_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(google_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let state = state_lock.read().await.clone();

    let profile =
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE google_id = ?")
            .bind(&google_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    match profile {
        Some(p) => Ok(Json(p)),
        None => Err(ApiError::NotFound("profile not found".to_string())),
    }
}

/// PATCH /users/:google_id/profile - Update the owning user's profile
///
/// Only provided fields are changed; omitted fields keep their stored value.
pub async fn update_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(google_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let state = state_lock.read().await.clone();

    if authed.google_id != google_id {
        warn!(
            user_id = %authed.id,
            target_google_id = %google_id,
            "Profile update rejected: not the profile owner"
        );
        return Err(ApiError::Forbidden(
            "cannot modify another user's profile".to_string(),
        ));
    }

    let validation = ProfileValidator.validate(&request);
    if !validation.is_valid {
        return Err(validation.into());
    }

    let portfolio_json = request
        .portfolio_url
        .as_ref()
        .map(|urls| serde_json::to_string(urls).unwrap_or_else(|_| "[]".to_string()));
    let tech_stack_json = request
        .tech_stack
        .as_ref()
        .map(|tags| serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string()));

    let updated = sqlx::query(
        r#"
        UPDATE user_profiles SET
            bio = COALESCE(?, bio),
            resume_url = COALESCE(?, resume_url),
            portfolio_url = COALESCE(?, portfolio_url),
            tech_stack = COALESCE(?, tech_stack),
            updated_at = datetime('now')
        WHERE google_id = ?
        "#,
    )
    .bind(request.bio.as_deref())
    .bind(request.resume_url.as_deref())
    .bind(portfolio_json.as_deref())
    .bind(tech_stack_json.as_deref())
    .bind(&google_id)
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(
            error = %e,
            google_id = %google_id,
            "Database error updating profile"
        );
        ApiError::DatabaseError(e)
    })?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::NotFound("profile not found".to_string()));
    }

    let profile =
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE google_id = ?")
            .bind(&google_id)
            .fetch_one(&state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    google_id = %google_id,
                    "Database error fetching updated profile"
                );
                ApiError::DatabaseError(e)
            })?;

    info!(user_id = %authed.id, "Profile updated successfully");

    Ok(Json(profile))
}
