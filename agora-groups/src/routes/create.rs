use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use agora_shared::clients::auth::{AuthClient, AuthProviderError};
use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::middleware::extract_bearer_token;
use agora_shared::types::roles::UserRole;
use agora_shared::types::ApiResponse;

use crate::models::{Group, NewGroup, Profile};
use crate::schema::{groups, profiles};
use crate::services::invite;
use crate::AppState;

const DEFAULT_MAX_PLAYERS: i32 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub target_audience: String,
    pub instructor_info: Option<InstructorInfo>,
    pub max_players: Option<i32>,
    #[serde(default)]
    pub pause_points: Option<serde_json::Value>,
    pub show_results_to_players: Option<bool>,
}

pub async fn create_group(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGroupRequest>,
) -> AppResult<Json<ApiResponse<Group>>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "name is required"));
    }
    if req.age_group.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "ageGroup is required"));
    }
    if req.target_audience.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "targetAudience is required"));
    }
    let instructor_info = req
        .instructor_info
        .as_ref()
        .filter(|i| !i.name.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ValidationError, "instructorInfo is required"))?;

    let token = extract_bearer_token(&headers)?;
    let auth = AuthClient::new(state.config.auth_url()?, state.config.auth_api_key()?);
    let identity = match auth.get_user(&token).await {
        Ok(identity) => identity,
        Err(AuthProviderError::Provider { status, .. }) => {
            tracing::debug!(status, "group creation with unusable session token");
            return Err(AppError::unauthorized("invalid or expired session"));
        }
        Err(AuthProviderError::Transport(e)) => {
            return Err(AppError::dependency(format!("auth provider unreachable: {e}")));
        }
    };

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let profile = profiles::table
        .filter(profiles::auth_user_id.eq(identity.id))
        .first::<Profile>(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::ProfileNotFound, "profile not found for user"))?;

    let role = profile.role.parse::<UserRole>().unwrap_or(UserRole::Player);
    if role != UserRole::Instructor {
        return Err(AppError::new(ErrorCode::NotInstructor, "instructor role required"));
    }

    // No group row is written until a non-colliding code is found.
    let mut rng = rand::thread_rng();
    let invite_code = invite::generate_unique_code(&mut rng, |candidate| {
        groups::table
            .filter(groups::invite_code.eq(candidate))
            .count()
            .get_result::<i64>(&mut conn)
            .map(|c| c > 0)
    })?;

    let new_group = NewGroup {
        name: name.to_string(),
        description: req.description.as_deref().map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        instructor_id: profile.id,
        instructor_name: instructor_info.name.trim().to_string(),
        age_group: req.age_group.trim().to_string(),
        target_audience: req.target_audience.trim().to_string(),
        max_players: req.max_players.unwrap_or(DEFAULT_MAX_PLAYERS),
        invite_code,
        pause_points: req.pause_points.clone().unwrap_or_else(|| serde_json::json!([])),
        show_results_to_players: req.show_results_to_players.unwrap_or(true),
    };

    let group: Group = diesel::insert_into(groups::table)
        .values(&new_group)
        .get_result(&mut conn)?;

    tracing::info!(
        group_id = %group.id,
        instructor_id = %profile.id,
        invite_code = %group.invite_code,
        "group created"
    );

    Ok(Json(ApiResponse::ok(group)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_camel_case_fields_with_defaults() {
        let req: CreateGroupRequest = serde_json::from_str(
            r#"{
                "name": "Klasse 10b",
                "ageGroup": "14-16",
                "targetAudience": "school",
                "instructorInfo": {"name": "Erika Musterfrau"}
            }"#,
        )
        .unwrap();
        assert_eq!(req.age_group, "14-16");
        assert!(req.max_players.is_none());
        assert!(req.pause_points.is_none());
        assert_eq!(req.instructor_info.unwrap().name, "Erika Musterfrau");
    }
}
