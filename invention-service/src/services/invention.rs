//! Invention-date lookup: prompt construction, the model call, and reply parsing.

use super::providers::{ProviderError, TextProvider};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

pub const NO_ITEM_MESSAGE: &str = "No item provided";
pub const UNDETERMINED_MESSAGE: &str = "Could not determine invention date";

/// Failure kinds, in the order they can be detected.
#[derive(Debug, Error)]
pub enum InventionError {
    /// Item missing or blank; no model call was made.
    #[error("{}", NO_ITEM_MESSAGE)]
    NoItem,

    /// The model answered, but not with an integer year.
    #[error("{}", UNDETERMINED_MESSAGE)]
    UndeterminedDate,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<InventionError> for AppError {
    fn from(err: InventionError) -> Self {
        match err {
            InventionError::NoItem => AppError::BadRequest(anyhow::anyhow!(NO_ITEM_MESSAGE)),
            InventionError::UndeterminedDate => {
                AppError::NotFound(anyhow::anyhow!(UNDETERMINED_MESSAGE))
            }
            InventionError::Provider(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}

/// The prompt sent to the model for `item`, which is interpolated verbatim.
pub fn build_prompt(item: &str) -> String {
    format!(
        "When was the {item} invented? Please respond with just the year \
         (use negative numbers for BCE). If you're not certain, respond with 'unknown'."
    )
}

/// Parse a model reply as a signed base-10 year after trimming whitespace.
/// Anything else, `unknown` included, yields `None`.
pub fn parse_year(reply: &str) -> Option<i64> {
    reply.trim().parse::<i64>().ok()
}

#[derive(Clone)]
pub struct InventionService {
    provider: Arc<dyn TextProvider>,
}

impl InventionService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Estimate the year `item` was invented. Negative years are BCE.
    ///
    /// Makes exactly one provider call when `item` is non-blank and none
    /// otherwise.
    pub async fn invention_date(&self, item: Option<&str>) -> Result<i64, InventionError> {
        let item = match item {
            Some(item) if !item.trim().is_empty() => item,
            _ => return Err(InventionError::NoItem),
        };

        let prompt = build_prompt(item);
        let reply = self.provider.generate_text(&prompt).await.map_err(|e| {
            tracing::error!(
                item = %item,
                model = %self.provider.model(),
                error = %e,
                "Text provider call failed"
            );
            e
        })?;

        match parse_year(&reply) {
            Some(year) => {
                tracing::info!(item = %item, year, "Determined invention date");
                Ok(year)
            }
            None => {
                tracing::warn!(item = %item, reply = %reply.trim(), "Model reply is not a year");
                Err(InventionError::UndeterminedDate)
            }
        }
    }
}
