use crate::error::{Result, TaxFollowupError};
use crate::llm::types::*;
use reqwest::Client;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Points the client at another endpoint, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Single-turn text generation. Returns the reply text, which may be
    /// empty when the model produced no text parts.
    pub async fn generate_text(
        &self,
        model: &str,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: Some(Content::user(system_instruction)),
        };

        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(TaxFollowupError::GeminiError(format!(
                "status {}: {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        Ok(body.first_text().unwrap_or_default())
    }
}
