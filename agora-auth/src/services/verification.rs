use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use agora_shared::errors::{AppError, ErrorCode};

use crate::models::EmailVerification;

pub const TOKEN_TTL_HOURS: i64 = 24;

pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

pub fn expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(TOKEN_TTL_HOURS)
}

/// Decide the outcome of a verification attempt over the unconsumed rows
/// matching the submitted token.
///
/// Zero rows means the token never existed or was already consumed (the
/// two are deliberately indistinguishable to the caller). More than one
/// row should be impossible given token uniqueness and is surfaced as an
/// integrity fault rather than picking one arbitrarily.
pub fn evaluate<'a>(
    rows: &'a [EmailVerification],
    now: DateTime<Utc>,
) -> Result<&'a EmailVerification, AppError> {
    let row = match rows {
        [] => {
            return Err(AppError::new(
                ErrorCode::TokenInvalid,
                "invalid or already used token",
            ))
        }
        [row] => row,
        _ => {
            return Err(AppError::new(
                ErrorCode::IntegrityError,
                "duplicate verification records for token",
            ))
        }
    };

    if row.expires_at < now {
        return Err(AppError::new(ErrorCode::TokenExpired, "verification token expired"));
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn row(expires_at: DateTime<Utc>) -> EmailVerification {
        EmailVerification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "max@example.com".into(),
            token: new_token(),
            expires_at,
            verified_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn tokens_are_uuid_shaped_and_distinct() {
        let a = new_token();
        let b = new_token();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn expiry_is_twenty_four_hours_out() {
        let now = Utc::now();
        assert_eq!(expiry(now) - now, Duration::hours(24));
    }

    #[test]
    fn zero_rows_is_invalid_or_used() {
        let err = evaluate(&[], Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "invalid or already used token");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_rows_are_an_integrity_fault() {
        let now = Utc::now();
        let rows = vec![row(now + Duration::hours(1)), row(now + Duration::hours(1))];
        let err = evaluate(&rows, now).unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn expired_token_is_rejected_even_when_unconsumed() {
        let now = Utc::now();
        let rows = vec![row(now - Duration::minutes(1))];
        let err = evaluate(&rows, now).unwrap_err();
        assert_eq!(err.to_string(), "verification token expired");
    }

    #[test]
    fn well_formed_unexpired_token_is_accepted() {
        let now = Utc::now();
        let rows = vec![row(now + Duration::hours(23))];
        let accepted = evaluate(&rows, now).unwrap();
        assert_eq!(accepted.id, rows[0].id);
    }

    // A consumed token never matches the unverified query again, so a second
    // attempt sees zero rows and fails the same way an unknown token does.
    #[test]
    fn consumed_token_fails_like_an_unknown_one() {
        let err = evaluate(&[], Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "invalid or already used token");
    }
}
