//! Summary Generator: tiered narrative generation for resumes.
//!
//! Tiers are tried in order: each configured external tier gets exactly one
//! attempt bounded by `timeout`, and any failure (transport, API error, empty
//! text, timeout) falls through to the next. The rule-based fallback always
//! succeeds, so `generate` never returns an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::generation::fallback::fallback_summary;
use crate::generation::prompts::{build_summary_prompt, SUMMARY_SYSTEM};
use crate::llm_client::{ChatCompletionsClient, LlmError, TextGenerator};
use crate::resumes::snapshot::UserSnapshot;

/// One external provider in the chain.
#[derive(Clone)]
pub struct SummaryTier {
    pub label: &'static str,
    pub generator: Arc<dyn TextGenerator>,
}

#[derive(Clone)]
pub struct SummaryGenerator {
    tiers: Vec<SummaryTier>,
    timeout: Duration,
}

impl SummaryGenerator {
    pub fn new(tiers: Vec<SummaryTier>, timeout: Duration) -> Self {
        Self { tiers, timeout }
    }

    /// Rule-based composer only.
    #[cfg(test)]
    pub fn fallback_only() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    /// Secondary (Hugging Face router) first when `HF_TOKEN` is set, then
    /// primary (OpenAI) when `OPENAI_API_KEY` is set.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.generation_timeout_secs);
        let mut tiers = Vec::new();

        if let Some(token) = &config.hf_token {
            let client = ChatCompletionsClient::huggingface(token, timeout)?;
            info!("Secondary summary tier enabled (model: {})", client.model());
            tiers.push(SummaryTier {
                label: "huggingface",
                generator: Arc::new(client),
            });
        }
        if let Some(key) = &config.openai_api_key {
            let client = ChatCompletionsClient::openai(key, timeout)?;
            info!("Primary summary tier enabled (model: {})", client.model());
            tiers.push(SummaryTier {
                label: "openai",
                generator: Arc::new(client),
            });
        }

        Ok(Self::new(tiers, timeout))
    }

    pub fn tier_labels(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.label).collect()
    }

    pub async fn generate(&self, snapshot: &UserSnapshot) -> String {
        if !self.tiers.is_empty() {
            let prompt = build_summary_prompt(snapshot);
            for tier in &self.tiers {
                match self.attempt(tier, &prompt).await {
                    Ok(text) => {
                        info!("Summary generated by {} tier", tier.label);
                        return text;
                    }
                    Err(e) => warn!("Summary tier {} failed, falling through: {e}", tier.label),
                }
            }
        }

        fallback_summary(snapshot)
    }

    async fn attempt(&self, tier: &SummaryTier, prompt: &str) -> Result<String, LlmError> {
        let text = tokio::time::timeout(self.timeout, tier.generator.complete(SUMMARY_SYSTEM, prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}
