//! Text-generation provider abstraction and implementations.
//!
//! The service only needs one capability from a model backend: turn a prompt
//! into text. Gemini is the production backend; the mock is scripted for tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` as the sole input and return the model's reply text.
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Model identifier the provider sends requests to.
    fn model(&self) -> &str;

    /// Whether the provider has what it needs to make calls. Makes no
    /// network request.
    fn is_configured(&self) -> bool;
}
