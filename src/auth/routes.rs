//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /users/login/google` - Google login/signup
/// - `POST /users/logout` - Logout (expires the access-token cookie)
/// - `GET /users/me` - Get current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/users/login/google", post(handlers::google_login))
        .route("/users/logout", post(handlers::logout_handler))
        .route("/users/me", get(handlers::me_handler))
}
