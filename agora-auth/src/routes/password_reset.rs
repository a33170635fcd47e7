use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use agora_shared::clients::auth::AuthClient;
use agora_shared::errors::AppResult;
use agora_shared::types::ApiResponse;

use crate::services::account;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

/// Always answers with the same success-shaped body. Whether an email was
/// submitted at all, whether the account exists, and whether the provider
/// managed to send anything must not be observable from the response.
pub async fn password_reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PasswordResetRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    if let Some(target) = recovery_target(&req.email) {
        let auth = AuthClient::new(state.config.auth_url()?, state.config.auth_api_key()?);

        let normalized = account::normalize_email(target);
        if let Err(e) = auth.send_recovery_email(target).await {
            tracing::error!(email = %normalized, error = %e, "password recovery request failed");
        }
    } else {
        tracing::debug!("password reset requested without an email, nothing to dispatch");
    }

    Ok(Json(success_body()))
}

/// A blank email gets no provider call, but the caller still sees the same
/// response as everyone else.
fn recovery_target(email: &str) -> Option<&str> {
    let trimmed = email.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn success_body() -> ApiResponse<&'static str> {
    ApiResponse::ok_with_message("ok", "if the email exists, a reset link has been sent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_emails_get_no_provider_call() {
        assert!(recovery_target("").is_none());
        assert!(recovery_target("   ").is_none());
        assert_eq!(recovery_target(" max@example.com "), Some("max@example.com"));
    }

    #[test]
    fn response_shape_is_fixed() {
        let body = serde_json::to_value(success_body()).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "if the email exists, a reset link has been sent");
    }
}
