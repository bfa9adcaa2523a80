//! User directory and profile routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the users router
///
/// # Routes
/// - `GET /users` - List all users
/// - `GET /users/:google_id/profile` - Get a user's profile
/// - `PATCH /users/:google_id/profile` - Update own profile (partial)
pub fn users_routes() -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/:google_id/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
}
