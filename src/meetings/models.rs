// src/meetings/models.rs

use serde::{Deserialize, Serialize};

/// POST /meetingroom/create request body
#[derive(Debug, Deserialize)]
pub struct CreateMeetingRoomRequest {
    pub room_id: String,
    pub title: Option<String>,
    pub client_id: String,
}

/// POST /meetingroom/join request body
#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: String,
    pub client_id: String,
}

/// POST /meetingroom/leave request body
#[derive(Debug, Deserialize)]
pub struct LeaveRoomRequest {
    pub room_id: String,
    pub client_id: String,
}

/// One entry of GET /meetingroom/list
#[derive(Debug, Serialize, PartialEq)]
pub struct MeetingRoomInfo {
    pub room_id: String,
    pub title: Option<String>,
    pub clients: Vec<String>,
}
