//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockReply {
    Text(String),
    Failure(String),
}

/// Mock text provider with a fixed reply. Every prompt it receives is recorded.
pub struct MockTextProvider {
    reply: MockReply,
    enabled: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Answers every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    /// Fails every call with a network error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Failure(message.into()))
    }

    /// Reports itself unconfigured and rejects calls.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::replying("")
        }
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            enabled: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Failure(message) => Err(ProviderError::NetworkError(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.enabled
    }
}
