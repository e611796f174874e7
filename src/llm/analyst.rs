use crate::llm::client::GeminiClient;
use crate::llm::prompts::{
    build_analysis_prompt, DEFAULT_MODEL, EMPTY_REPLY_FALLBACK, FAILURE_FALLBACK,
    SYSTEM_INSTRUCTION,
};
use crate::record::TaxRecord;
use crate::stats::SummaryStats;
use log::{info, warn};

/// Asks Gemini for a short executive recommendation on the pending input
/// VAT. Never fails: errors become a fixed fallback message.
pub struct VatAnalyst {
    client: GeminiClient,
    model: String,
    system_instruction: String,
}

impl VatAnalyst {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// `None` when there is nothing to analyse; no request is made then.
    pub async fn analyze(&self, records: &[TaxRecord]) -> Option<String> {
        if records.is_empty() {
            return None;
        }

        let stats = SummaryStats::from_records(records);
        Some(self.analyze_stats(&stats).await)
    }

    pub async fn analyze_stats(&self, stats: &SummaryStats) -> String {
        let prompt = build_analysis_prompt(stats);
        info!("Requesting narrative from {}", self.model);

        match self
            .client
            .generate_text(&self.model, &self.system_instruction, &prompt)
            .await
        {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Narrative request failed: {}", e);
                FAILURE_FALLBACK.to_string()
            }
        }
    }
}
