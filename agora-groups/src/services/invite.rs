use rand::Rng;

use agora_shared::errors::{AppError, ErrorCode};

pub const CODE_LEN: usize = 8;

/// Submitted codes are accepted between 6 and 8 characters: the generator
/// has always emitted 8, but 6-character codes from the earlier generator
/// are still live in the group table.
pub const MIN_JOIN_CODE_LEN: usize = 6;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One random invite code: 8 uppercase base-36 digits.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Draw codes until the collision check clears one. No side effects happen
/// here; the caller inserts the group row only after a free code is
/// returned. The loop is unbounded by design: with 36^8 codes a saturated
/// table is an operational problem long before the loop is.
pub fn generate_unique_code<R, F, E>(rng: &mut R, mut is_taken: F) -> Result<String, E>
where
    R: Rng,
    F: FnMut(&str) -> Result<bool, E>,
{
    loop {
        let code = generate_code(rng);
        if !is_taken(&code)? {
            return Ok(code);
        }
    }
}

/// Normalize and validate a user-submitted join code. Rejection happens
/// before any store lookup.
pub fn normalize_join_code(input: &str) -> Result<String, AppError> {
    let code = input.trim().to_uppercase();
    let valid_shape = (MIN_JOIN_CODE_LEN..=CODE_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !valid_shape {
        return Err(AppError::new(ErrorCode::InvalidInviteCode, "invalid code"));
    }
    Ok(code)
}

/// Participant display names need at least two characters after trimming.
pub fn validate_display_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.chars().count() < 2 {
        return Err(AppError::new(
            ErrorCode::InvalidDisplayName,
            "display name must be at least 2 characters",
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_codes_are_eight_uppercase_alphanumerics() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), 8);
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn unique_generation_retries_past_collisions() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut attempts = 0;
        let code = generate_unique_code(&mut rng, |_| -> Result<bool, std::convert::Infallible> {
            attempts += 1;
            Ok(attempts <= 3)
        })
        .unwrap();
        assert_eq!(attempts, 4);
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn unique_generation_propagates_lookup_failure() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = generate_unique_code(&mut rng, |_| Err("store down"));
        assert_eq!(result.unwrap_err(), "store down");
    }

    #[test]
    fn join_codes_are_uppercased_and_trimmed() {
        assert_eq!(normalize_join_code(" abc123 ").unwrap(), "ABC123");
        assert_eq!(normalize_join_code("ABC123XY").unwrap(), "ABC123XY");
    }

    #[test]
    fn malformed_join_codes_are_rejected() {
        // Too short: no store lookup happens for these.
        assert!(normalize_join_code("AB").is_err());
        assert!(normalize_join_code("").is_err());
        // Too long.
        assert!(normalize_join_code("ABC123XYZ").is_err());
        // Bad alphabet.
        assert!(normalize_join_code("ABC-12").is_err());
        assert!(normalize_join_code("ÄBC123").is_err());
    }

    #[test]
    fn display_names_are_trimmed_and_length_checked() {
        assert_eq!(validate_display_name("  Max Mustermann ").unwrap(), "Max Mustermann");
        assert!(validate_display_name(" M ").is_err());
        assert!(validate_display_name("   ").is_err());
    }
}
