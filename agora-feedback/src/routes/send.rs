use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use agora_shared::clients::email::{EmailClient, FeedbackReport};
use agora_shared::errors::{AppError, AppResult, ErrorCode};
use agora_shared::types::ApiResponse;

use crate::models::{Feedback, MarkedArea, NewFeedback};
use crate::schema::feedback;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendFeedbackRequest {
    pub user_id: Option<Uuid>,
    pub session_id: Option<String>,
    pub page_url: Option<String>,
    pub screenshot_data: Option<String>,
    pub marked_area: Option<MarkedArea>,
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub player_email: Option<String>,
}

/// Every submitted field is checked before anything is written; the error
/// names all missing fields at once so the client can fix one round trip.
fn missing_fields(req: &SendFeedbackRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if req.user_id.is_none() {
        missing.push("user_id");
    }
    if req.session_id.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("session_id");
    }
    if req.page_url.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("page_url");
    }
    if req.screenshot_data.as_deref().map_or(true, |s| s.is_empty()) {
        missing.push("screenshot_data");
    }
    if req.marked_area.is_none() {
        missing.push("marked_area");
    }
    if req.feedback_text.as_deref().map_or(true, |s| s.trim().is_empty()) {
        missing.push("feedback_text");
    }
    missing
}

pub async fn send_feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendFeedbackRequest>,
) -> AppResult<Json<ApiResponse<&'static str>>> {
    let missing = missing_fields(&req);
    if !missing.is_empty() {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }

    let email_api_key = state.config.email_api_key()?.to_string();
    let inbox = state.config.feedback_inbox()?.to_string();

    let user_id = req.user_id.unwrap_or_default();
    let session_id = req.session_id.unwrap_or_default();
    let page_url = req.page_url.unwrap_or_default();
    let marked_area = req.marked_area.unwrap_or(MarkedArea { x: 0.0, y: 0.0, width: 0.0, height: 0.0 });
    let feedback_text = req.feedback_text.unwrap_or_default();

    let marked_area_json = serde_json::to_value(&marked_area)
        .map_err(|e| AppError::internal(e.to_string()))?;

    let mut conn = state.db.get().map_err(|e| AppError::internal(e.to_string()))?;

    // The audit record is written first and kept even if the report email
    // fails afterwards.
    let record: Feedback = diesel::insert_into(feedback::table)
        .values(&NewFeedback {
            user_id,
            session_id: session_id.clone(),
            page_url: page_url.clone(),
            screenshot_data: req.screenshot_data.unwrap_or_default(),
            marked_area: marked_area_json.clone(),
            feedback_text: feedback_text.clone(),
            player_email: req.player_email.clone(),
        })
        .get_result(&mut conn)?;

    let email = EmailClient::new(&email_api_key, &state.config.from_email, "Agora");
    let user_id_text = user_id.to_string();
    let marked_area_text = marked_area_json.to_string();
    let report = FeedbackReport {
        user_id: &user_id_text,
        session_id: &session_id,
        page_url: &page_url,
        marked_area: &marked_area_text,
        feedback_text: &feedback_text,
        reply_to: req.player_email.as_deref(),
    };
    email
        .send_feedback_report(&inbox, &report)
        .await
        .map_err(|e| AppError::dependency(format!("failed to send feedback email: {e}")))?;

    tracing::info!(feedback_id = %record.id, user_id = %user_id, "feedback submitted");

    Ok(Json(ApiResponse::ok_with_message("ok", "feedback received")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SendFeedbackRequest {
        serde_json::from_str(
            r#"{
                "user_id": "7f1a6f5e-3f49-4f41-b5a8-5c9f6f2a1d00",
                "session_id": "sess-42",
                "page_url": "https://agora.example/round/3",
                "screenshot_data": "data:image/png;base64,iVBOR",
                "marked_area": {"x": 10.0, "y": 20.0, "width": 100.0, "height": 50.0},
                "feedback_text": "The vote button overlaps the timer."
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn complete_request_has_no_missing_fields() {
        assert!(missing_fields(&full_request()).is_empty());
    }

    #[test]
    fn all_absent_fields_are_listed_at_once() {
        let req: SendFeedbackRequest = serde_json::from_str("{}").unwrap();
        let missing = missing_fields(&req);
        assert_eq!(
            missing,
            vec!["user_id", "session_id", "page_url", "screenshot_data", "marked_area", "feedback_text"]
        );
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let mut req = full_request();
        req.feedback_text = Some("   ".into());
        assert_eq!(missing_fields(&req), vec!["feedback_text"]);
    }

    #[test]
    fn marked_area_round_trips_as_rectangle() {
        let area = full_request().marked_area.unwrap();
        assert_eq!(area, MarkedArea { x: 10.0, y: 20.0, width: 100.0, height: 50.0 });
    }
}
