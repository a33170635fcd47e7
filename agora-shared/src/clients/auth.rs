use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Client for the hosted authentication provider. Password checking and
/// session issuance live entirely on the provider side; this wrapper only
/// forwards requests and shapes errors.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthProviderError {
    #[error("auth provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("auth provider returned {status}: {message}")]
    Provider { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: Uuid,
    pub email: String,
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

/// Successful password sign-in: the identity the provider resolved plus its
/// session object, passed through verbatim.
#[derive(Debug)]
pub struct SignIn {
    pub user: ProviderUser,
    pub session: Value,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Password grant. The email is forwarded exactly as submitted; the
    /// provider owns its own casing rules.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignIn, AuthProviderError> {
        let response = self.client
            .post(format!("{}/token?grant_type=password", self.base_url))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(AuthProviderError::Provider {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        let user: ProviderUser = serde_json::from_value(body["user"].clone())
            .map_err(|e| AuthProviderError::Provider {
                status: status.as_u16(),
                message: format!("malformed provider response: {e}"),
            })?;

        Ok(SignIn { user, session: body })
    }

    /// Ask the provider to send a password-recovery email. Callers in
    /// enumeration-sensitive flows ignore the outcome.
    pub async fn send_recovery_email(&self, email: &str) -> Result<(), AuthProviderError> {
        let response = self.client
            .post(format!("{}/recover", self.base_url))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(AuthProviderError::Provider {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }
        Ok(())
    }

    /// Resolve the identity behind a bearer token.
    pub async fn get_user(&self, access_token: &str) -> Result<ProviderUser, AuthProviderError> {
        let response = self.client
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(AuthProviderError::Provider {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        serde_json::from_value(body).map_err(|e| AuthProviderError::Provider {
            status: status.as_u16(),
            message: format!("malformed provider response: {e}"),
        })
    }
}

/// Providers are inconsistent about where the human-readable message lives.
fn provider_error_message(body: &Value) -> String {
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(msg) = body.get(key).and_then(Value::as_str) {
            return msg.to_string();
        }
    }
    body.to_string()
}
