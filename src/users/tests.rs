//! Tests for users module
//!
//! These tests verify profile functionality including:
//! - Partial update validation
//! - Ownership checks on profile updates
//! - Field-by-field merge semantics

#[cfg(test)]
mod tests {
    use crate::auth::handlers::google_login;
    use crate::auth::AuthedUser;
    use crate::common::{migrations, ApiError, AppState, Validator};
    use crate::meetings::store::{MemoryStore, PresenceStore};
    use crate::users::handlers::{get_profile, update_profile};
    use crate::users::models::UpdateProfileRequest;
    use crate::users::validators::ProfileValidator;
    use axum::extract::{Extension, Json, Path};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    async fn test_state() -> Arc<RwLock<AppState>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Arc::new(RwLock::new(AppState {
            db: pool,
            jwt_secret: "test_secret_key".to_string(),
            presence: PresenceStore::new(Arc::new(MemoryStore::new())),
        }))
    }

    /// Signs up a user through the login flow and returns their AuthedUser
    async fn signup(state: &Arc<RwLock<AppState>>, google_id: &str, email: &str) -> AuthedUser {
        google_login(
            Extension(state.clone()),
            Json(crate::auth::models::GoogleLoginRequest {
                email: email.to_string(),
                name: "Test User".to_string(),
                google_id: google_id.to_string(),
                avatar_url: None,
            }),
        )
        .await
        .expect("Signup failed");

        let app_state = state.read().await.clone();
        let user: crate::auth::User = sqlx::query_as("SELECT * FROM users WHERE google_id = ?")
            .bind(google_id)
            .fetch_one(&app_state.db)
            .await
            .unwrap();

        AuthedUser {
            id: user.id,
            google_id: user.google_id,
            email: user.email,
            name: user.name,
            role_level: user.role_level,
        }
    }

    fn empty_update() -> UpdateProfileRequest {
        UpdateProfileRequest {
            bio: None,
            resume_url: None,
            portfolio_url: None,
            tech_stack: None,
        }
    }

    // ========================================================================
    // Validator tests
    // ========================================================================

    #[test]
    fn test_validator_rejects_empty_update() {
        let result = ProfileValidator.validate(&empty_update());

        assert!(!result.is_valid, "Update with no fields should fail");
        assert!(result.errors.iter().any(|e| e.field == "general"));
    }

    #[test]
    fn test_validator_accepts_partial_update() {
        let request = UpdateProfileRequest {
            bio: Some("hello".to_string()),
            ..empty_update()
        };

        let result = ProfileValidator.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_validator_rejects_blank_tech_stack_tag() {
        let request = UpdateProfileRequest {
            tech_stack: Some(vec!["rust".to_string(), "  ".to_string()]),
            ..empty_update()
        };

        let result = ProfileValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "tech_stack"));
    }

    // ========================================================================
    // Handler tests
    // ========================================================================

    #[tokio::test]
    async fn test_profile_update_requires_ownership() {
        let state = test_state().await;
        let user_a = signup(&state, "google-a", "a@example.com").await;
        signup(&state, "google-b", "b@example.com").await;

        let result = update_profile(
            Extension(state.clone()),
            user_a,
            Path("google-b".to_string()),
            Json(UpdateProfileRequest {
                bio: Some("intrusion".to_string()),
                ..empty_update()
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_profile_update_merges_only_provided_fields() {
        let state = test_state().await;
        let user = signup(&state, "google-a", "a@example.com").await;

        // First update sets the tech stack
        update_profile(
            Extension(state.clone()),
            AuthedUser {
                id: user.id,
                google_id: user.google_id.clone(),
                email: user.email.clone(),
                name: user.name.clone(),
                role_level: user.role_level,
            },
            Path("google-a".to_string()),
            Json(UpdateProfileRequest {
                tech_stack: Some(vec!["rust".to_string()]),
                ..empty_update()
            }),
        )
        .await
        .expect("First update failed");

        // Second update touches only bio; tech stack must survive
        let Json(profile) = update_profile(
            Extension(state.clone()),
            user,
            Path("google-a".to_string()),
            Json(UpdateProfileRequest {
                bio: Some("x".to_string()),
                ..empty_update()
            }),
        )
        .await
        .expect("Second update failed");

        assert_eq!(profile.bio, Some("x".to_string()));
        assert_eq!(profile.tech_stack, Some("[\"rust\"]".to_string()));
        assert_eq!(profile.resume_url, None);
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let state = test_state().await;

        let result = get_profile(Extension(state.clone()), Path("nobody".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_signup_creates_profile_row() {
        let state = test_state().await;
        signup(&state, "google-a", "a@example.com").await;

        let Json(profile) = get_profile(Extension(state.clone()), Path("google-a".to_string()))
            .await
            .expect("Profile should exist after signup");

        assert_eq!(profile.google_id, "google-a");
        assert_eq!(profile.bio, None);
    }
}
