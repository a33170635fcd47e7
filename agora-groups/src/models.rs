use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{group_participants, groups, profiles};

// --- Groups ---

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = groups)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub instructor_name: String,
    pub age_group: String,
    pub target_audience: String,
    pub max_players: i32,
    pub invite_code: String,
    pub pause_points: serde_json::Value,
    pub show_results_to_players: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = groups)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub instructor_name: String,
    pub age_group: String,
    pub target_audience: String,
    pub max_players: i32,
    pub invite_code: String,
    pub pause_points: serde_json::Value,
    pub show_results_to_players: bool,
}

// --- Participants ---

#[derive(Debug, Queryable, Identifiable, Serialize)]
#[diesel(table_name = group_participants)]
#[serde(rename_all = "camelCase")]
pub struct GroupParticipant {
    pub id: Uuid,
    pub group_id: Uuid,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = group_participants)]
pub struct NewGroupParticipant {
    pub group_id: Uuid,
    pub display_name: String,
}

// --- Profiles (read-only here, owned by the auth service schema) ---

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = profiles)]
pub struct Profile {
    pub id: Uuid,
    pub auth_user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
