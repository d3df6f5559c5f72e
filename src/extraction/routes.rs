//! Extraction route handlers

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::{ExtractedFields, ExtractionError};
use crate::error::Result;
use crate::AppState;

/// Extraction request; `message` is read when `text` is absent or blank
#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExtractRequest {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The message text, preferring `text` over `message`.
    pub fn into_text(self) -> Option<String> {
        let non_blank = |t: &String| !t.trim().is_empty();
        self.text.filter(non_blank).or(self.message.filter(non_blank))
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub ok: bool,
    pub data: ExtractedFields,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract))
}

/// Extract intent, boat size, dates and e-mail from a customer message
pub async fn extract(State(state): State<AppState>, body: Bytes) -> Result<Json<ExtractResponse>> {
    let text = ExtractRequest::from_body(&body)
        .into_text()
        .ok_or(ExtractionError::MissingText)?;

    let data = state.extractor.extract(&text);
    tracing::debug!(intent = ?data.intent, dates = data.dates.len(), "Message extracted");

    Ok(Json(ExtractResponse { ok: true, data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_message_together() {
        let request = ExtractRequest::from_body(br#"{"text": "book", "message": "price"}"#);
        assert_eq!(request.into_text().as_deref(), Some("book"));
    }

    #[test]
    fn test_message_used_when_text_blank() {
        let request = ExtractRequest::from_body(br#"{"text": " ", "message": "price"}"#);
        assert_eq!(request.into_text().as_deref(), Some("price"));

        let request = ExtractRequest::from_body(br#"{"message": "price"}"#);
        assert_eq!(request.into_text().as_deref(), Some("price"));
    }

    #[test]
    fn test_missing_text() {
        assert_eq!(ExtractRequest::from_body(b"{}").into_text(), None);
        assert_eq!(ExtractRequest::from_body(b"not json").into_text(), None);
    }
}
