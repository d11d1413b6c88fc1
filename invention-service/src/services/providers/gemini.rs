//! Gemini AI provider implementation.
//!
//! Calls the `generateContent` method of Google's Generative Language API and
//! returns the text of the first candidate.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    /// Uses reqwest's default client settings; no timeout is imposed on the
    /// model call.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Build the API URL for the configured model and the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method,
            self.config.api_key.expose_secret()
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!(
                "Failed to parse response: {}",
                e.without_url()
            ))
        })?;

        api_response.into_text()
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().trim().is_empty()
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Only text parts are produced or read; other part kinds deserialize with
/// `text: None`.
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, ProviderError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => {
                    tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
                    Err(ProviderError::ContentFiltered)
                }
                None => Err(ProviderError::EmptyResponse(
                    "Gemini returned no candidates".to_string(),
                )),
            };
        };

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::ContentFiltered);
        }

        candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| {
                ProviderError::EmptyResponse("Gemini candidate has no text part".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> Result<String, ProviderError> {
        serde_json::from_value::<GenerateContentResponse>(body)
            .unwrap()
            .into_text()
    }

    #[test]
    fn request_serializes_to_generate_content_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart {
                    text: Some("hi".to_string()),
                }],
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
        );
    }

    #[test]
    fn first_text_part_of_first_candidate_is_returned() {
        let text = parse(serde_json::json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "1876\n" }] }, "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "1877" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(text, "1876\n");
    }

    #[test]
    fn safety_finish_reason_is_content_filtered() {
        let err = parse(serde_json::json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        }))
        .unwrap_err();

        assert!(matches!(err, ProviderError::ContentFiltered));
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let err = parse(serde_json::json!({ "promptFeedback": { "blockReason": "OTHER" } }))
            .unwrap_err();

        assert!(matches!(err, ProviderError::ContentFiltered));
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = parse(serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(_)));
    }

    #[test]
    fn api_url_embeds_model_and_key() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: Secret::new("secret".to_string()),
            model: "gemini-pro".to_string(),
            api_base: "http://localhost:1234/v1beta/".to_string(),
        });

        assert_eq!(
            provider.api_url("generateContent"),
            "http://localhost:1234/v1beta/models/gemini-pro:generateContent?key=secret"
        );
    }
}
