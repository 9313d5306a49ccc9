//! Gemini REST transport for text generation

use async_trait::async_trait;

use shared::SYSTEM_PROMPT;

use crate::error::{GenerationFailure, GenerationResult};
use crate::traits::TextGenerator;
use crate::types::Generation;

/// Text generation over the Gemini `generateContent` REST endpoint.
///
/// One reqwest client per instance; the section fan-out shares its
/// connection pool across all concurrent requests. Grounding via the
/// `google_search` tool is always on and the request asks for exactly one
/// candidate.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, user_prompt: &str) -> GenerationResult<Generation> {
        let request_body = serde_json::json!({
            "contents": [{"parts": [{"text": user_prompt}]}],
            "tools": [{"google_search": {}}],
            "systemInstruction": {"parts": [{"text": SYSTEM_PROMPT}]},
            "generationConfig": {
                "candidateCount": 1,
            },
        });

        let response = self
            .client
            .post(format!("{}?key={}", self.api_url, self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationFailure::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(GenerationFailure::from_status(status.as_u16()));
        }

        let response_json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| GenerationFailure::InvalidBody {
                    message: e.to_string(),
                })?;

        // missing fields mean an empty candidate, not a failed request
        let text = response_json
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .unwrap_or("")
            .to_string();

        let usage_metadata = response_json.get("usageMetadata");
        let input_tokens = usage_metadata
            .and_then(|u| u.get("promptTokenCount"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);
        let output_tokens = usage_metadata
            .and_then(|u| u.get("candidatesTokenCount"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0);

        Ok(Generation {
            text,
            input_tokens,
            output_tokens,
        })
    }
}
