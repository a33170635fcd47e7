use reqwest::Client;
use serde::Serialize;

const EMAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email send failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    api_key: String,
    from_email: String,
    from_name: String,
}

#[derive(Debug, Serialize)]
struct SendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
}

impl EmailClient {
    pub fn new(api_key: &str, from_email: &str, from_name: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            from_email: from_email.to_string(),
            from_name: from_name.to_string(),
        }
    }

    /// One POST to the email API. A non-2xx response surfaces as
    /// `EmailError::Api` carrying the provider's status and body; whether
    /// that is fatal is the caller's decision.
    pub async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<(), EmailError> {
        let request = SendRequest {
            from: format!("{} <{}>", self.from_name, self.from_email),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: html.to_string(),
            text: text.to_string(),
            reply_to: reply_to.map(|r| r.to_string()),
        };

        let response = self.client
            .post(EMAIL_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api { status: status.as_u16(), body });
        }

        tracing::debug!(to = %to, subject = %subject, "email sent");
        Ok(())
    }

    pub async fn send_verification_link(&self, to: &str, link: &str) -> Result<(), EmailError> {
        let (html, text) = verification_bodies(link);
        self.send_email(to, "Agora - Verify your email", &html, &text, None)
            .await
    }

    pub async fn send_feedback_report(
        &self,
        to: &str,
        report: &FeedbackReport<'_>,
    ) -> Result<(), EmailError> {
        let (html, text) = feedback_bodies(report);
        self.send_email(to, "Agora - Player feedback", &html, &text, report.reply_to)
            .await
    }
}

pub struct FeedbackReport<'a> {
    pub user_id: &'a str,
    pub session_id: &'a str,
    pub page_url: &'a str,
    pub marked_area: &'a str,
    pub feedback_text: &'a str,
    pub reply_to: Option<&'a str>,
}

pub fn verification_bodies(link: &str) -> (String, String) {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #1d4ed8;">Agora - Email Verification</h2>
        <p>Confirm your email address to activate your account:</p>
        <p style="text-align: center; margin: 24px 0;">
        <a href="{link}" style="background: #1d4ed8; color: #ffffff; padding: 12px 24px; border-radius: 8px; text-decoration: none;">Verify email</a>
        </p>
        <p style="color: #666;">Or open this link: {link}</p>
        <p style="color: #666; margin-top: 20px;">This link expires in 24 hours.</p>
        </div>"#
    );
    let text = format!(
        "Confirm your email address to activate your Agora account:\n\n{link}\n\nThis link expires in 24 hours.",
    );
    (html, text)
}

pub fn feedback_bodies(report: &FeedbackReport<'_>) -> (String, String) {
    let FeedbackReport { user_id, session_id, page_url, marked_area, feedback_text, .. } = report;
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
        <h2 style="color: #1d4ed8;">Agora - Player feedback</h2>
        <p><strong>Page:</strong> {page_url}</p>
        <p><strong>User:</strong> {user_id} (session {session_id})</p>
        <p><strong>Marked area:</strong> {marked_area}</p>
        <p style="white-space: pre-wrap; background: #f4f4f5; padding: 16px; border-radius: 8px;">{feedback_text}</p>
        <p style="color: #666;">Screenshot attached in the stored feedback record.</p>
        </div>"#
    );
    let text = format!(
        "Player feedback\n\nPage: {page_url}\nUser: {user_id} (session {session_id})\nMarked area: {marked_area}\n\n{feedback_text}",
    );
    (html, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_bodies_carry_the_link_in_both_variants() {
        let (html, text) = verification_bodies("https://agora.example/verify?token=abc");
        assert!(html.contains("https://agora.example/verify?token=abc"));
        assert!(text.contains("https://agora.example/verify?token=abc"));
        assert!(text.contains("24 hours"));
    }

    #[test]
    fn feedback_bodies_include_page_and_message() {
        let report = FeedbackReport {
            user_id: "u-1",
            session_id: "s-1",
            page_url: "https://agora.example/round/3",
            marked_area: "{\"x\":10,\"y\":20,\"width\":100,\"height\":50}",
            feedback_text: "The vote button overlaps the timer.",
            reply_to: Some("max@example.com"),
        };
        let (html, text) = feedback_bodies(&report);
        assert!(html.contains("https://agora.example/round/3"));
        assert!(text.contains("The vote button overlaps the timer."));
    }

    #[test]
    fn send_request_omits_reply_to_when_absent() {
        let request = SendRequest {
            from: "Agora <noreply@agora.example>".into(),
            to: vec!["max@example.com".into()],
            subject: "s".into(),
            html: "<p>h</p>".into(),
            text: "t".into(),
            reply_to: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("reply_to").is_none());
        assert_eq!(json["to"][0], "max@example.com");
    }
}
