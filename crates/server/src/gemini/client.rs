//! Gemini API client.

use std::sync::Arc;

use folio_core::InlineImage;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::GeminiConfig;

use super::error::GeminiError;
use super::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, Part};

/// Instruction prepended to every chat message.
const CHAT_PROMPT_PREAMBLE: &str =
    "You are an AI assistant that answers questions about the portfolio owner. Be concise and helpful.";

/// Instruction sent alongside every classified image.
const CLASSIFY_PROMPT: &str = "Classify the main object in this image. Return only the label.";

const NO_CHAT_RESPONSE: &str = "No response.";
const UNKNOWN_LABEL: &str = "Unknown";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    chat_model: String,
    vision_model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing API key is not an error here; calls fail with
    /// [`GeminiError::NotConfigured`] instead, so the rest of the API can
    /// run without AI features.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                chat_model: config.chat_model.clone(),
                vision_model: config.vision_model.clone(),
            }),
        })
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.api_key.is_some()
    }

    /// Ask the chat model about the portfolio owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, the request fails, or Gemini
    /// answers with a non-success status.
    #[instrument(skip(self, message), fields(model = %self.inner.chat_model, message_len = message.len()))]
    pub async fn chat(&self, message: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::single_turn(vec![Part::text(chat_prompt(message))]);
        let response = self
            .generate_content(&self.inner.chat_model, &request)
            .await?;

        Ok(reply_text(&response, NO_CHAT_RESPONSE))
    }

    /// Ask the vision model for a one-word label of the main object.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, the request fails, or Gemini
    /// answers with a non-success status.
    #[instrument(skip(self, image), fields(model = %self.inner.vision_model, mime = image.mime_type(), bytes = image.encoded_len()))]
    pub async fn classify_image(&self, image: &InlineImage) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::single_turn(vec![
            Part::inline_data(image.mime_type(), image.data()),
            Part::text(CLASSIFY_PROMPT),
        ]);
        let response = self
            .generate_content(&self.inner.vision_model, &request)
            .await?;

        Ok(reply_text(&response, UNKNOWN_LABEL))
    }

    /// Send a raw `generateContent` request to `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, the request fails, or the
    /// response cannot be parsed.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(GeminiError::NotConfigured)?;

        let response = self
            .inner
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{model}:generateContent",
            self.inner.base_url
        )
    }

    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")));
        }

        let message = serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
            |_| status.canonical_reason().unwrap_or("unknown").to_owned(),
            |envelope| {
                tracing::debug!(
                    code = envelope.error.code,
                    status = %envelope.error.status,
                    "Gemini returned an error envelope"
                );
                envelope.error.message
            },
        );

        Err(GeminiError::Api {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

/// Build the single-turn chat prompt.
fn chat_prompt(message: &str) -> String {
    format!("{CHAT_PROMPT_PREAMBLE}\nUser: {message}")
}

/// Extract the reply text, falling back when Gemini returned nothing usable.
fn reply_text(response: &GenerateContentResponse, fallback: &str) -> String {
    response
        .first_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use url::Url;

    use super::*;

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(SecretString::from),
            base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
            chat_model: "gemini-pro".to_string(),
            vision_model: "gemini-pro-vision".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_chat_prompt_embeds_message() {
        assert_eq!(
            chat_prompt("What do you work on?"),
            "You are an AI assistant that answers questions about the portfolio owner. Be concise and helpful.\nUser: What do you work on?"
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(&config(Some("k"))).unwrap();
        assert_eq!(
            client.endpoint("gemini-pro"),
            "http://127.0.0.1:9/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_reply_text_fallbacks() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  Cat\n"}]}}]
        }))
        .unwrap();
        assert_eq!(reply_text(&response, UNKNOWN_LABEL), "Cat");

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        }))
        .unwrap();
        assert_eq!(reply_text(&blank, NO_CHAT_RESPONSE), "No response.");
        assert_eq!(
            reply_text(&GenerateContentResponse::default(), UNKNOWN_LABEL),
            "Unknown"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(&config(None)).unwrap();
        assert!(!client.is_configured());

        let err = client.chat("hello").await.unwrap_err();
        assert!(matches!(err, GeminiError::NotConfigured));
    }

    #[test]
    fn test_gemini_client_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<GeminiClient>();
    }
}
