use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::ApiResponse;

use crate::models::{Group, GroupParticipant, NewGroupParticipant};
use crate::schema::{group_participants, groups};
use crate::services::invite;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupResponse {
    pub group_id: Uuid,
    pub participant_id: Uuid,
    pub display_name: String,
}

/// Final step of the join flow: register the participant under the chosen
/// display name.
pub async fn join_group(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinGroupRequest>,
) -> AppResult<Json<ApiResponse<JoinGroupResponse>>> {
    let code = invite::normalize_join_code(&req.code)?;
    let display_name = invite::validate_display_name(&req.display_name)?;

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let group = groups::table
        .filter(groups::invite_code.eq(&code))
        .first::<Group>(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::GroupNotFound, "no group with this code"))?;

    let current_players: i64 = group_participants::table
        .filter(group_participants::group_id.eq(group.id))
        .count()
        .get_result(&mut conn)?;

    if current_players >= group.max_players as i64 {
        return Err(AppError::new(ErrorCode::GroupFull, "group has reached its player limit"));
    }

    let participant: GroupParticipant = diesel::insert_into(group_participants::table)
        .values(&NewGroupParticipant {
            group_id: group.id,
            display_name: display_name.clone(),
        })
        .get_result(&mut conn)?;

    tracing::info!(
        group_id = %group.id,
        participant_id = %participant.id,
        "participant joined group"
    );

    Ok(Json(ApiResponse::ok(JoinGroupResponse {
        group_id: group.id,
        participant_id: participant.id,
        display_name,
    })))
}
