//! Webhook body model.
//!
//! HikVision devices are inconsistent about `Content-Type`: some send JSON
//! labelled `text/plain`, some send `application/json`, some send nothing.
//! The body is therefore always tried as JSON first and kept as text only
//! when that fails.

use serde_json::Value;

/// The body of one inbound webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// Body parsed as a JSON document.
    Json(Value),
    /// Body that is not JSON, forwarded as a JSON string.
    Text(String),
}

impl WebhookPayload {
    /// Decode raw body bytes. Never fails.
    ///
    /// A blank body with no content type, or a JSON one, decodes to an empty
    /// JSON object. A blank body of any other type stays text.
    pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return match content_type {
                Some(ct) if !is_json_type(ct) => {
                    WebhookPayload::Text(String::from_utf8_lossy(bytes).into_owned())
                }
                _ => WebhookPayload::Json(Value::Object(Default::default())),
            };
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => WebhookPayload::Json(value),
            Err(e) => {
                tracing::warn!(
                    content_type = content_type.unwrap_or("none"),
                    error = %e,
                    "Body is not JSON, sending as-is"
                );
                WebhookPayload::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookPayload::Json(_) => "json",
            WebhookPayload::Text(_) => "text",
        }
    }

    /// The JSON value posted downstream.
    pub fn to_json(&self) -> Value {
        match self {
            WebhookPayload::Json(value) => value.clone(),
            WebhookPayload::Text(text) => Value::String(text.clone()),
        }
    }

    /// Serialized form cut to at most `limit` characters.
    pub fn preview(&self, limit: usize) -> String {
        let serialized = self.to_json().to_string();
        match serialized.char_indices().nth(limit) {
            Some((idx, _)) => serialized[..idx].to_string(),
            None => serialized,
        }
    }
}

/// `application/json` or any `+json` suffix type, parameters ignored.
fn is_json_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
