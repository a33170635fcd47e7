use agora_shared::errors::{AppError, ErrorCode};

/// Canonical form used for all internal lookups. The original casing is
/// still forwarded to the auth provider, which owns its own rules.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a stored display name into first/last at the first whitespace
/// boundary. A single-word name has an empty last name.
pub fn split_display_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Map a provider sign-in failure onto the user-facing taxonomy. Providers
/// signal the cause in free-text messages, so this matches substrings.
pub fn map_provider_error(status: u16, message: &str) -> AppError {
    let lowered = message.to_lowercase();
    if lowered.contains("invalid login credentials") {
        return AppError::new(ErrorCode::InvalidCredentials, "password incorrect");
    }
    if lowered.contains("not confirmed") {
        return AppError::with_details(
            ErrorCode::EmailNotVerified,
            "email address not verified",
            serde_json::json!({ "needsVerification": true }),
        );
    }
    AppError::dependency(format!("auth provider returned {status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_email("  Max.Mustermann@Example.COM ");
        assert_eq!(once, "max.mustermann@example.com");
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn case_and_whitespace_variants_normalize_identically() {
        let variants = ["max@example.com", " MAX@example.com", "Max@Example.Com\t"];
        let normalized: Vec<_> = variants.iter().map(|v| normalize_email(v)).collect();
        assert!(normalized.iter().all(|n| n == "max@example.com"));
    }

    #[test]
    fn display_name_splits_at_first_whitespace() {
        assert_eq!(
            split_display_name("Max Mustermann"),
            ("Max".into(), "Mustermann".into())
        );
        assert_eq!(
            split_display_name("Anna Maria Schmidt"),
            ("Anna".into(), "Maria Schmidt".into())
        );
        assert_eq!(split_display_name("Cher"), ("Cher".into(), String::new()));
    }

    #[test]
    fn credential_mismatch_maps_to_password_incorrect() {
        let err = map_provider_error(400, "Invalid login credentials");
        assert_eq!(err.to_string(), "password incorrect");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unconfirmed_email_maps_to_needs_verification() {
        let err = map_provider_error(400, "Email not confirmed");
        match err {
            AppError::Known { details: Some(d), .. } => {
                assert_eq!(d["needsVerification"], true);
            }
            other => panic!("expected details on {other:?}"),
        }
    }

    #[test]
    fn unknown_provider_faults_are_dependency_errors() {
        let err = map_provider_error(502, "upstream unavailable");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
