use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::{ApiResponse, GroupSummary};

use crate::models::Group;
use crate::schema::{group_participants, groups};
use crate::services::invite;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateCodeRequest {
    #[serde(default)]
    pub code: String,
}

/// Step one of the join flow: confirm the code refers to a real group and
/// hand back the summary the player confirms against. Malformed codes are
/// rejected before the store is consulted.
pub async fn validate_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateCodeRequest>,
) -> AppResult<Json<ApiResponse<GroupSummary>>> {
    let code = invite::normalize_join_code(&req.code)?;

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let group = groups::table
        .filter(groups::invite_code.eq(&code))
        .first::<Group>(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::GroupNotFound, "no group with this code"))?;

    let current_players: i64 = group_participants::table
        .filter(group_participants::group_id.eq(group.id))
        .count()
        .get_result(&mut conn)?;

    Ok(Json(ApiResponse::ok(GroupSummary {
        name: group.name,
        description: group.description,
        instructor_name: group.instructor_name,
        current_players,
        max_players: group.max_players,
        age_group: group.age_group,
        target_audience: group.target_audience,
    })))
}
