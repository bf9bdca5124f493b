//! Gemini API integration for the chat and image-classifier routes.
//!
//! Both routes are single-shot proxies: one `generateContent` call per
//! request, no conversation history, no streaming, no retries.
//!
//! ```text
//! POST {base}/v1beta/models/{model}:generateContent
//! x-goog-api-key: <GEMINI_API_KEY>
//!
//! {"contents":[{"parts":[{"text":"..."}]}]}
//! ```
//!
//! Replies are read from `candidates[0].content.parts[0].text`.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{GenerateContentRequest, GenerateContentResponse, Part};
