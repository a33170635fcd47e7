use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::feedback;

/// Rectangular page region the player marked before submitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Queryable, Identifiable, Serialize)]
#[diesel(table_name = feedback)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: String,
    pub page_url: String,
    pub screenshot_data: String,
    pub marked_area: serde_json::Value,
    pub feedback_text: String,
    pub player_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = feedback)]
pub struct NewFeedback {
    pub user_id: Uuid,
    pub session_id: String,
    pub page_url: String,
    pub screenshot_data: String,
    pub marked_area: serde_json::Value,
    pub feedback_text: String,
    pub player_email: Option<String>,
}
