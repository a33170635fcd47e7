use serde::{Deserialize, Serialize};

/// Group summary shown to a player between code validation and the final
/// join confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instructor_name: String,
    pub current_players: i64,
    pub max_players: i32,
    pub age_group: String,
    pub target_audience: String,
}

/// Serializable view state for the join screen.
///
/// The flow is linear: `AwaitingCode → CodeValidated → Joined`. The only
/// backwards transition is an explicit `Back` from the caller; events that
/// do not apply to the current step leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum JoinFlowState {
    AwaitingCode,
    CodeValidated {
        code: String,
        group: GroupSummary,
    },
    Joined {
        code: String,
        group: GroupSummary,
        display_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JoinFlowEvent {
    CodeAccepted { code: String, group: GroupSummary },
    JoinConfirmed { display_name: String },
    Back,
}

impl JoinFlowState {
    pub fn update(self, event: JoinFlowEvent) -> JoinFlowState {
        match (self, event) {
            (_, JoinFlowEvent::Back) => JoinFlowState::AwaitingCode,
            (JoinFlowState::AwaitingCode, JoinFlowEvent::CodeAccepted { code, group }) => {
                JoinFlowState::CodeValidated { code, group }
            }
            (
                JoinFlowState::CodeValidated { code, group },
                JoinFlowEvent::JoinConfirmed { display_name },
            ) => JoinFlowState::Joined {
                code,
                group,
                display_name,
            },
            (state, _) => state,
        }
    }
}

impl Default for JoinFlowState {
    fn default() -> Self {
        JoinFlowState::AwaitingCode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> GroupSummary {
        GroupSummary {
            name: "Klasse 10b".into(),
            description: Some("Planspiel Kommunalpolitik".into()),
            instructor_name: "Erika Musterfrau".into(),
            current_players: 3,
            max_players: 30,
            age_group: "14-16".into(),
            target_audience: "school".into(),
        }
    }

    #[test]
    fn advances_linearly_through_the_flow() {
        let state = JoinFlowState::AwaitingCode.update(JoinFlowEvent::CodeAccepted {
            code: "ABC123".into(),
            group: summary(),
        });
        assert!(matches!(state, JoinFlowState::CodeValidated { ref code, .. } if code == "ABC123"));

        let state = state.update(JoinFlowEvent::JoinConfirmed {
            display_name: "Max Mustermann".into(),
        });
        match state {
            JoinFlowState::Joined { code, display_name, group } => {
                assert_eq!(code, "ABC123");
                assert_eq!(display_name, "Max Mustermann");
                assert_eq!(group.instructor_name, "Erika Musterfrau");
            }
            other => panic!("expected Joined, got {other:?}"),
        }
    }

    #[test]
    fn join_before_validation_is_ignored() {
        let state = JoinFlowState::AwaitingCode.update(JoinFlowEvent::JoinConfirmed {
            display_name: "Max".into(),
        });
        assert_eq!(state, JoinFlowState::AwaitingCode);
    }

    #[test]
    fn back_returns_to_awaiting_code_from_any_step() {
        let validated = JoinFlowState::CodeValidated {
            code: "ABC123".into(),
            group: summary(),
        };
        assert_eq!(validated.update(JoinFlowEvent::Back), JoinFlowState::AwaitingCode);
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = JoinFlowState::CodeValidated {
            code: "ABC123".into(),
            group: summary(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"step\":\"codeValidated\""));
        let back: JoinFlowState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
