use serde::{Deserialize, Serialize};

/// Canonical role enumeration.
///
/// Earlier handlers used `spieler`/`spielleiter` and `player`/`instructor`
/// interchangeably; the canonical wire form is the English pair, and the
/// German names are accepted as parse-only aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Player,
    Instructor,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Player => write!(f, "player"),
            UserRole::Instructor => write!(f, "instructor"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "player" | "spieler" => Ok(UserRole::Player),
            "instructor" | "spielleiter" => Ok(UserRole::Instructor),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_legacy_names() {
        assert_eq!("player".parse::<UserRole>().unwrap(), UserRole::Player);
        assert_eq!("spieler".parse::<UserRole>().unwrap(), UserRole::Player);
        assert_eq!("instructor".parse::<UserRole>().unwrap(), UserRole::Instructor);
        assert_eq!("Spielleiter".parse::<UserRole>().unwrap(), UserRole::Instructor);
        assert!("moderator".parse::<UserRole>().is_err());
    }

    #[test]
    fn emits_only_canonical_names() {
        assert_eq!(UserRole::Player.to_string(), "player");
        assert_eq!(UserRole::Instructor.to_string(), "instructor");
        assert_eq!(serde_json::to_string(&UserRole::Instructor).unwrap(), "\"instructor\"");
    }
}
