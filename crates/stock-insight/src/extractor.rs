//! Company name extraction from free-text queries

use crate::assistant::Assistant;
use crate::error::Result;
use crate::prompts::Prompts;
use std::sync::Arc;
use tracing::{info, instrument};

/// Asks the model which companies a query mentions
#[derive(Clone)]
pub struct EntityExtractor {
    assistant: Assistant,
    prompts: Arc<Prompts>,
}

impl EntityExtractor {
    pub fn new(assistant: Assistant, prompts: Arc<Prompts>) -> Self {
        Self { assistant, prompts }
    }

    /// Company names mentioned in `query`, in the order the model listed them
    ///
    /// The names are not validated; model transport errors propagate.
    #[instrument(skip(self))]
    pub async fn extract(&self, query: &str) -> Result<Vec<String>> {
        let prompt = self.prompts.extraction(query)?;
        let reply = self.assistant.ask(prompt).await?;
        let companies = parse_company_list(&reply);
        info!(?companies, "extracted company names");
        Ok(companies)
    }
}

/// Split a comma-separated model reply into trimmed, non-empty names
pub fn parse_company_list(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
