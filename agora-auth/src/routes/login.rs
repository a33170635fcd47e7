use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use agora_shared::clients::auth::{AuthClient, AuthProviderError};
use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::roles::UserRole;
use agora_shared::types::ApiResponse;

use crate::models::Profile;
use crate::schema::profiles;
use crate::services::account;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: LoginUser,
    pub session: serde_json::Value,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "email and password are required"));
    }

    let auth = AuthClient::new(state.config.auth_url()?, state.config.auth_api_key()?);

    // The provider gets the email exactly as submitted; only internal
    // lookups use the normalized form.
    let normalized = account::normalize_email(&req.email);
    let sign_in = match auth.sign_in_with_password(&req.email, &req.password).await {
        Ok(sign_in) => sign_in,
        Err(AuthProviderError::Provider { status, message }) => {
            tracing::debug!(email = %normalized, status, "sign-in rejected by provider");
            return Err(account::map_provider_error(status, &message));
        }
        Err(AuthProviderError::Transport(e)) => {
            return Err(AppError::dependency(format!("auth provider unreachable: {e}")));
        }
    };

    // Some provider configurations accept the password before the email is
    // confirmed; treat that the same as a provider-side rejection.
    if sign_in.user.email_confirmed_at.is_none() {
        return Err(AppError::with_details(
            ErrorCode::EmailNotVerified,
            "email address not verified",
            serde_json::json!({ "needsVerification": true }),
        ));
    }

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    // An authenticated identity without a profile row is a data-integrity
    // fault, never auto-provisioned.
    let profile = profiles::table
        .filter(profiles::auth_user_id.eq(sign_in.user.id))
        .first::<Profile>(&mut conn)
        .map_err(|_| AppError::new(ErrorCode::ProfileNotFound, "profile not found for user"))?;

    let (first_name, last_name) = account::split_display_name(&profile.display_name);
    let role = profile.role.parse::<UserRole>().unwrap_or(UserRole::Player);

    tracing::info!(user_id = %profile.id, "user logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        user: LoginUser {
            id: profile.id,
            email: profile.email,
            first_name,
            last_name,
            role,
            is_verified: profile.is_verified,
            created_at: profile.created_at,
        },
        session: sign_in.session,
    })))
}
