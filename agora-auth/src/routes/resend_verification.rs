use axum::extract::State;
use axum::Json;
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use agora_shared::clients::email::EmailClient;
use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::ApiResponse;

use crate::models::{NewEmailVerification, Profile};
use crate::schema::{email_verifications, profiles};
use crate::services::{account, verification};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[serde(default)]
    #[validate(email(message = "invalid email format"))]
    pub email: String,
}

/// Issue a fresh verification token for an unverified account. This is a
/// standalone operation: it never re-enters any registration path, and the
/// new token supersedes whatever was on the profile before.
pub async fn resend_verification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResendVerificationRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    if req.email.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "email is required"));
    }
    req.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let email_api_key = state.config.email_api_key()?.to_string();
    let app_base_url = state.config.app_base_url()?.to_string();

    let normalized = account::normalize_email(&req.email);
    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    let profile = profiles::table
        .filter(profiles::email.eq(&normalized))
        .filter(profiles::is_verified.eq(false))
        .first::<Profile>(&mut conn)
        .map_err(|_| {
            AppError::new(
                ErrorCode::VerificationNotFound,
                "account not found or already verified",
            )
        })?;

    let token = verification::new_token();
    let expires_at = verification::expiry(Utc::now());

    diesel::update(profiles::table.filter(profiles::id.eq(profile.id)))
        .set((
            profiles::verification_token.eq(Some(&token)),
            profiles::verification_expires_at.eq(Some(expires_at)),
            profiles::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

    // Supersede earlier unconsumed tokens: their records stay, but they
    // expire immediately so only the newest link verifies.
    diesel::update(
        email_verifications::table
            .filter(email_verifications::user_id.eq(profile.id))
            .filter(email_verifications::verified_at.is_null()),
    )
    .set(email_verifications::expires_at.eq(Utc::now()))
    .execute(&mut conn)?;

    // Best effort: the profile token is already the source of truth for the
    // resend link, so a failed audit-row insert is logged, not rolled back.
    let record = NewEmailVerification {
        user_id: profile.id,
        email: profile.email.clone(),
        token: token.clone(),
        expires_at,
    };
    if let Err(e) = diesel::insert_into(email_verifications::table)
        .values(&record)
        .execute(&mut conn)
    {
        tracing::error!(user_id = %profile.id, error = %e, "failed to insert verification record");
    }

    let email = EmailClient::new(&email_api_key, &state.config.from_email, "Agora");
    let link = format!("{app_base_url}/verify?token={token}");
    email
        .send_verification_link(&profile.email, &link)
        .await
        .map_err(|e| AppError::dependency(format!("failed to send verification email: {e}")))?;

    tracing::info!(user_id = %profile.id, "verification email resent");

    Ok(Json(ApiResponse::ok_with_message("ok", "verification email sent")))
}
