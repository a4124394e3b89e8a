//! Inert providers. With these wired in, every question receives the
//! configured placeholder answer.

use super::{ContextDocument, Generator, ProviderError, Retriever, Translator};
use async_trait::async_trait;

/// Returns text unchanged regardless of the target language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }
}

/// Finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRetriever;

#[async_trait]
impl Retriever for EmptyRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<ContextDocument>, ProviderError> {
        Ok(Vec::new())
    }
}

/// Answers every query with a fixed response.
#[derive(Debug, Clone)]
pub struct PlaceholderGenerator {
    response: String,
}

impl PlaceholderGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl Generator for PlaceholderGenerator {
    async fn generate(
        &self,
        _query: &str,
        _context: &[ContextDocument],
    ) -> Result<String, ProviderError> {
        Ok(self.response.clone())
    }
}
