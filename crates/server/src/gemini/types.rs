//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the fields this service reads or writes are modelled; unknown
//! response fields (safety ratings, usage metadata) are ignored.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A request with a single user turn made of `parts`.
    #[must_use]
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
        }
    }
}

/// One turn of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// `"user"` or `"model"`; omitted on requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of content: text or inline binary data.
///
/// Gemini distinguishes parts by which field is present, so this is an
/// untagged enum rather than a `type`-tagged one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Base64 bytes sent inline with the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Response body from `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it is a text part.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        match self.candidates.first()?.content.as_ref()?.parts.first()? {
            Part::Text { text } => Some(text.as_str()),
            Part::InlineData { .. } => None,
        }
    }
}

/// A generated candidate reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Missing when the candidate was blocked.
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
