//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use heya_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{HealthDto, MemberDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get list of non-empty rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries = rooms
        .into_iter()
        .map(|summary| RoomSummaryDto {
            id: summary.room.into_string(),
            members: summary.members,
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let members = state
        .get_room_detail_usecase
        .execute(RoomId::new(room_id.clone()))
        .await
        .map_err(|e| {
            tracing::debug!("{}", e);
            StatusCode::NOT_FOUND
        })?;

    let room_detail = RoomDetailDto {
        id: room_id,
        members: members
            .into_iter()
            .map(|session| MemberDto {
                name: session.name.into_string(),
                joined_at: timestamp_to_rfc3339(session.joined_at.value()),
            })
            .collect(),
    };

    Ok(Json(room_detail))
}
