//! Chat gateway: translate the question, retrieve context, generate an
//! answer, translate the answer back.

use crate::models::{ChatQuery, ChatResponse};
use crate::services::providers::{
    EmptyRetriever, Generator, PassthroughTranslator, PlaceholderGenerator, ProviderError,
    Retriever, Translator,
};
use std::sync::Arc;

/// Language the retriever and generator operate in.
pub const PIVOT_LANGUAGE: &str = "en";

#[derive(Clone)]
pub struct ChatGateway {
    translator: Arc<dyn Translator>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
}

impl ChatGateway {
    pub fn new(
        translator: Arc<dyn Translator>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            translator,
            retriever,
            generator,
        }
    }

    /// Gateway that answers every question with `response`.
    pub fn placeholder(response: impl Into<String>) -> Self {
        Self::new(
            Arc::new(PassthroughTranslator),
            Arc::new(EmptyRetriever),
            Arc::new(PlaceholderGenerator::new(response)),
        )
    }

    pub async fn answer(&self, query: &ChatQuery) -> Result<ChatResponse, ProviderError> {
        let question = self
            .translator
            .translate(&query.question, PIVOT_LANGUAGE)
            .await?;

        let context = self.retriever.retrieve(&question).await?;
        tracing::debug!(documents = context.len(), "Retrieved chat context");

        let answer = self.generator.generate(&question, &context).await?;

        let response = self.translator.translate(&answer, &query.language).await?;

        Ok(ChatResponse { response })
    }
}
