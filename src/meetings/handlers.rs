//! Meeting room handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::models::{CreateMeetingRoomRequest, JoinRoomRequest, LeaveRoomRequest, MeetingRoomInfo};
use crate::common::{ApiError, AppState};

/// POST /meetingroom/create
/// Creates a meeting room (or joins an existing one) with a title
pub async fn create_meeting_room(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<CreateMeetingRoomRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    state
        .presence
        .join_meeting_room(&request.room_id, request.title.as_deref(), &request.client_id)
        .await
        .map_err(|e| {
            error!(error = %e, room_id = %request.room_id, "Failed to create meeting room");
            ApiError::StoreError(e)
        })?;

    info!(
        room_id = %request.room_id,
        client_id = %request.client_id,
        "Meeting room created"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "meeting room created" })),
    ))
}

/// POST /meetingroom/join
/// Adds a client to a meeting room; idempotent for already-present members
pub async fn join_meeting_room(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    state
        .presence
        .join_meeting_room(&request.room_id, None, &request.client_id)
        .await
        .map_err(|e| {
            error!(error = %e, room_id = %request.room_id, "Failed to join meeting room");
            ApiError::StoreError(e)
        })?;

    info!(
        room_id = %request.room_id,
        client_id = %request.client_id,
        "Client joined meeting room"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "joined meeting room" })),
    ))
}

/// POST /meetingroom/leave
/// Removes a client from a meeting room and reaps the room when it empties
///
/// Leave, emptiness check, and delete are three separate store round-trips;
/// a join landing between the check and the delete is erased with the room.
pub async fn leave_meeting_room(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<LeaveRoomRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let state = state_lock.read().await.clone();

    state
        .presence
        .leave_meeting_room(&request.room_id, &request.client_id)
        .await
        .map_err(|e| {
            error!(error = %e, room_id = %request.room_id, "Failed to leave meeting room");
            ApiError::StoreError(e)
        })?;

    let members = state
        .presence
        .meeting_room_members(&request.room_id)
        .await
        .map_err(|e| {
            error!(error = %e, room_id = %request.room_id, "Failed to check meeting room members");
            ApiError::StoreError(e)
        })?;

    if members.is_empty() {
        state
            .presence
            .delete_meeting_room(&request.room_id)
            .await
            .map_err(|e| {
                error!(error = %e, room_id = %request.room_id, "Failed to delete empty meeting room");
                ApiError::StoreError(e)
            })?;

        info!(room_id = %request.room_id, "Deleted empty meeting room");
    }

    info!(
        room_id = %request.room_id,
        client_id = %request.client_id,
        "Client left meeting room"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "left meeting room" })),
    ))
}

/// GET /meetingroom/list
/// Lists all meeting rooms with their titles and members
pub async fn list_meeting_rooms(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Vec<MeetingRoomInfo>>, ApiError> {
    let state = state_lock.read().await.clone();

    let rooms = state.presence.list_meeting_rooms().await.map_err(|e| {
        error!(error = %e, "Failed to list meeting rooms");
        ApiError::StoreError(e)
    })?;

    Ok(Json(rooms))
}
