//! Meeting room routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the meeting room router
///
/// # Routes
/// - `POST /meetingroom/create` - Create (or join) a titled meeting room
/// - `POST /meetingroom/join` - Join an existing meeting room
/// - `POST /meetingroom/leave` - Leave a meeting room
/// - `GET /meetingroom/list` - List all meeting rooms
pub fn meetings_routes() -> Router {
    Router::new()
        .route("/meetingroom/create", post(handlers::create_meeting_room))
        .route("/meetingroom/join", post(handlers::join_meeting_room))
        .route("/meetingroom/leave", post(handlers::leave_meeting_room))
        .route("/meetingroom/list", get(handlers::list_meeting_rooms))
}
