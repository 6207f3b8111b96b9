//! Request / response bodies for `POST /api/chat`.
//!
//! The endpoint always answers with a [`ChatResponse`]: `answer` carries the
//! model text on success, while failures send an empty `answer` plus a
//! human-readable `error` string that clients show verbatim.

use serde::{Deserialize, Deserializer, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    /// The user's chat input. A missing field or `null` is treated like an
    /// empty one; numbers and booleans are accepted as their text form.
    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged, expecting = "a string, number or boolean")]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Text(s) => s,
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// The message with surrounding whitespace removed, or `None` when there
    /// is nothing left to send.
    pub fn trimmed_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatResponse {
    /// Model reply. Empty when `error` is set.
    #[serde(default)]
    pub answer: String,
    /// Translated failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn success(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            answer: String::new(),
            error: Some(error.into()),
        }
    }

    /// `true` when the body carries a usable answer.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.answer.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_message_field_deserializes_to_none() {
        let req: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.message, None);
        assert_eq!(req.trimmed_message(), None);
    }

    #[test]
    fn scalar_messages_are_read_as_text() {
        let req: ChatRequest = serde_json::from_value(json!({ "message": 42 })).unwrap();
        assert_eq!(req.trimmed_message(), Some("42"));
        let req: ChatRequest = serde_json::from_value(json!({ "message": 2.5 })).unwrap();
        assert_eq!(req.trimmed_message(), Some("2.5"));
        let req: ChatRequest = serde_json::from_value(json!({ "message": true })).unwrap();
        assert_eq!(req.trimmed_message(), Some("true"));
        let req: ChatRequest = serde_json::from_value(json!({ "message": null })).unwrap();
        assert_eq!(req.message, None);
    }

    #[test]
    fn structured_message_is_rejected() {
        let err = serde_json::from_value::<ChatRequest>(json!({ "message": { "a": 1 } }))
            .unwrap_err()
            .to_string();
        assert!(err.contains("a string, number or boolean"), "got {err}");
    }

    #[test]
    fn whitespace_message_has_no_trimmed_content() {
        let req = ChatRequest::new("  \n\t ");
        assert_eq!(req.trimmed_message(), None);
    }

    #[test]
    fn trimmed_message_strips_outer_whitespace_only() {
        let req = ChatRequest::new("  wie geht's?  ");
        assert_eq!(req.trimmed_message(), Some("wie geht's?"));
    }

    #[test]
    fn success_body_omits_error_field() {
        let body = serde_json::to_value(ChatResponse::success("Hallo")).unwrap();
        assert_eq!(body, json!({ "answer": "Hallo" }));
    }

    #[test]
    fn failure_body_has_empty_answer() {
        let body = serde_json::to_value(ChatResponse::failure("kaputt")).unwrap();
        assert_eq!(body, json!({ "answer": "", "error": "kaputt" }));
    }

    #[test]
    fn empty_answer_is_not_a_success() {
        assert!(!ChatResponse::success("").is_success());
        assert!(!ChatResponse::failure("x").is_success());
        assert!(ChatResponse::success("ok").is_success());
    }
}
