use axum::extract::State;
use axum::Json;
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::ApiResponse;

use crate::models::EmailVerification;
use crate::schema::{email_verifications, profiles};
use crate::services::verification;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: String,
}

/// Consume a verification token. The verification record is marked first,
/// then the profile flag is flipped; there is no compensating rollback, so
/// a fault between the two leaves a consumed record and an unverified
/// profile. A retry then fails cleanly on the consumed token rather than
/// double-applying. Two truly concurrent attempts can both pass the
/// unverified check before either writes; that race is a known limitation
/// of this sequence.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    if req.token.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "token is required"));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;
    let now = Utc::now();

    let rows = email_verifications::table
        .filter(email_verifications::token.eq(req.token.trim()))
        .filter(email_verifications::verified_at.is_null())
        .load::<EmailVerification>(&mut conn)?;

    let record = verification::evaluate(&rows, now)?;

    diesel::update(email_verifications::table.filter(email_verifications::id.eq(record.id)))
        .set(email_verifications::verified_at.eq(Some(now)))
        .execute(&mut conn)?;

    diesel::update(profiles::table.filter(profiles::id.eq(record.user_id)))
        .set((
            profiles::is_verified.eq(true),
            profiles::verification_token.eq(None::<String>),
            profiles::verification_expires_at.eq(None::<chrono::DateTime<Utc>>),
            profiles::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

    tracing::info!(user_id = %record.user_id, "email verified");

    Ok(Json(ApiResponse::ok_with_message("ok", "email verified")))
}
