//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Access token issuance and validation
//! - Cookie lifecycle helpers
//! - Session resolution against the user directory
//! - The Google login/signup flow

#[cfg(test)]
mod tests {
    use crate::auth::extractors::resolve_access_token;
    use crate::auth::handlers::google_login;
    use crate::auth::models::{Claims, GoogleLoginRequest, User};
    use crate::auth::token::{
        access_cookie_value, issue_access_token, parse_cookie, verify_access_token,
        ACCESS_TOKEN_COOKIE,
    };
    use crate::common::{migrations, ApiError, AppState};
    use crate::meetings::store::{MemoryStore, PresenceStore};
    use axum::extract::{Extension, Json};
    use axum::http::{HeaderMap, HeaderValue};
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    const SECRET: &str = "test_secret_key";

    fn sample_user(google_id: &str) -> User {
        User {
            id: 1,
            email: "user@example.com".to_string(),
            name: "Test User".to_string(),
            google_id: google_id.to_string(),
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            generation: 7,
            role_level: 0,
            last_login_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    async fn test_state() -> Arc<RwLock<AppState>> {
        // Single connection so every handle sees the same in-memory database
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
            jwt_secret: SECRET.to_string(),
            presence: PresenceStore::new(Arc::new(MemoryStore::new())),
        }))
    }

    // ========================================================================
    // Token codec tests
    // ========================================================================

    #[test]
    fn test_token_round_trip() {
        let user = sample_user("google-123");
        let token = issue_access_token(SECRET, &user).expect("Failed to issue token");
        let claims = verify_access_token(SECRET, &token).expect("Failed to verify token");

        assert_eq!(claims.sub, "google-123");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.name, "Test User");
        assert_eq!(
            claims.avatar_url,
            Some("https://example.com/avatar.png".to_string())
        );
        assert_eq!(claims.generation, 7);
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_verify_fails_with_wrong_secret() {
        let user = sample_user("google-123");
        let token = issue_access_token(SECRET, &user).expect("Failed to issue token");

        let result = verify_access_token("wrong_secret_key", &token);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_verify_fails_when_expired() {
        // Expired well past the default validation leeway
        let claims = Claims {
            sub: "google-123".to_string(),
            email: "user@example.com".to_string(),
            name: "Test User".to_string(),
            avatar_url: None,
            generation: 7,
            exp: (Utc::now().timestamp() - 24 * 60 * 60) as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = verify_access_token(SECRET, &token);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_verify_fails_on_malformed_token() {
        let result = verify_access_token(SECRET, "not-a-jwt");
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    // ========================================================================
    // Cookie helper tests
    // ========================================================================

    #[test]
    fn test_parse_cookie_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; access_token=tok123; lang=en"),
        );

        assert_eq!(
            parse_cookie(&headers, ACCESS_TOKEN_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(parse_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_parse_cookie_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(parse_cookie(&headers, ACCESS_TOKEN_COOKIE), None);
    }

    #[test]
    fn test_access_cookie_attributes() {
        let value = access_cookie_value("tok123").expect("Failed to build cookie");
        let value = value.to_str().unwrap();

        assert!(value.starts_with("access_token=tok123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=2592000"));
    }

    // ========================================================================
    // Session resolution tests
    // ========================================================================

    #[tokio::test]
    async fn test_resolution_failures_are_uniform() {
        let state = test_state().await;
        let app_state = state.read().await.clone();

        // No credential
        let err = resolve_access_token(&app_state.db, SECRET, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        // Malformed token
        let err = resolve_access_token(&app_state.db, SECRET, Some("garbage".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        // Well-formed token for a subject with no user record
        let ghost = sample_user("ghost-google-id");
        let token = issue_access_token(SECRET, &ghost).unwrap();
        let err = resolve_access_token(&app_state.db, SECRET, Some(token))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_resolution_returns_fresh_record() {
        let state = test_state().await;
        let app_state = state.read().await.clone();

        sqlx::query("INSERT INTO users (email, name, google_id) VALUES (?, ?, ?)")
            .bind("user@example.com")
            .bind("Original Name")
            .bind("google-123")
            .execute(&app_state.db)
            .await
            .unwrap();
        let user: User = sqlx::query_as("SELECT * FROM users WHERE google_id = ?")
            .bind("google-123")
            .fetch_one(&app_state.db)
            .await
            .unwrap();

        let token = issue_access_token(SECRET, &user).unwrap();

        // Rename after the token was issued; resolution must observe it
        sqlx::query("UPDATE users SET name = 'Renamed' WHERE google_id = 'google-123'")
            .execute(&app_state.db)
            .await
            .unwrap();

        let resolved = resolve_access_token(&app_state.db, SECRET, Some(token))
            .await
            .unwrap();
        assert_eq!(resolved.name, "Renamed");
        assert_eq!(resolved.google_id, "google-123");
    }

    // ========================================================================
    // Login flow tests
    // ========================================================================

    fn login_payload() -> GoogleLoginRequest {
        GoogleLoginRequest {
            email: "user@example.com".to_string(),
            name: "Test User".to_string(),
            google_id: "google-123".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_login_sets_access_cookie() {
        let state = test_state().await;

        let (headers, _body) = google_login(Extension(state.clone()), Json(login_payload()))
            .await
            .expect("Login failed");

        let set_cookie = headers
            .get("Set-Cookie")
            .expect("Missing Set-Cookie header")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("access_token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn test_signup_is_idempotent() {
        let state = test_state().await;

        google_login(Extension(state.clone()), Json(login_payload()))
            .await
            .expect("First login failed");
        google_login(Extension(state.clone()), Json(login_payload()))
            .await
            .expect("Second login failed");

        let app_state = state.read().await.clone();
        let (user_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&app_state.db)
            .await
            .unwrap();
        let (profile_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(&app_state.db)
            .await
            .unwrap();

        assert_eq!(user_count, 1);
        assert_eq!(profile_count, 1);

        let user: User = sqlx::query_as("SELECT * FROM users WHERE google_id = ?")
            .bind("google-123")
            .fetch_one(&app_state.db)
            .await
            .unwrap();
        assert!(user.last_login_at.is_some());
        assert_eq!(user.generation, 7);
        assert_eq!(user.role_level, 0);
    }
}
