//! Capability abstractions behind the chat gateway.
//!
//! Translation, retrieval and generation are separate traits so each can be
//! swapped or tested on its own.

pub mod placeholder;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

pub use placeholder::{EmptyRetriever, PassthroughTranslator, PlaceholderGenerator};

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
            ProviderError::ApiError(msg) => AppError::BadGateway(msg),
            ProviderError::InvalidRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
        }
    }
}

/// A retrieved passage used to ground an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    /// Where the passage came from (file, URL, collection id).
    pub source: String,
    pub content: String,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_lang` (short code such as `hi`).
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<ContextDocument>, ProviderError>;
}

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        query: &str,
        context: &[ContextDocument],
    ) -> Result<String, ProviderError>;
}
