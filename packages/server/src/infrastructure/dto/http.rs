//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthDto {
    pub status: String,
}

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSummaryDto {
    pub id: String,
    pub members: usize,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberDto {
    pub name: String,
    /// RFC 3339, UTC
    pub joined_at: String,
}
