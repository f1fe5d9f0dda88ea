//! Shared request and response types for the coursewiki item REST API.
//!
//! The server embeds these in its REST surface; external editor front-ends
//! consume them verbatim.

use serde::{Deserialize, Serialize};

/// Envelope carried by every item REST response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestEnvelope {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xsrf_token: Option<String>,
}

impl RestEnvelope {
    pub fn success(
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
        xsrf_token: Option<String>,
    ) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            payload,
            xsrf_token,
        }
    }

    /// Failure envelope echoing the key the caller asked about.
    pub fn failure(status_code: u16, message: impl Into<String>, key: &str) -> Self {
        Self {
            status_code,
            message: message.into(),
            payload: Some(serde_json::json!({ "key": key })),
            xsrf_token: None,
        }
    }
}

/// Wiki entry fields as exposed to the object editor.
///
/// `key` is read-only: it is present in GET payloads and ignored on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiItemPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub position: i32,
    pub is_html: bool,
    pub html: String,
    pub is_draft: bool,
}

/// Body of `PUT /rest/wiki/item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiItemPutRequest {
    pub key: String,
    pub payload: WikiItemPayload,
    pub xsrf_token: String,
}
