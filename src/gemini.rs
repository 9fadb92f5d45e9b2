use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use reqwest::Client;
use tracing::{info, error};

use crate::{generator::TextGenerator, models::GenerationRequest};

pub const DEMO_KEY: &str = "DEMO_KEY";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("API error: status={status} body={body}")] Api { status: u16, body: String },
    #[error("parse error: {0}")] Parse(String),
    #[error("no text content found in response")] EmptyResponse,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.api_key == DEMO_KEY
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent?key={}", self.base_url, model, self.api_key)
    }

    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GeminiError> {
        if self.is_demo() {
            info!("Using demo mode - generating canned prompt");
            return Ok(demo_text(&request.instruction));
        }

        let url = self.endpoint(&request.model);
        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let payload = json!({
            "contents": [{
                "parts": [{"text": request.instruction}]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": request.max_output_tokens
            }
        });

        let response = self.client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| GeminiError::Http(e.to_string()))?;
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            error!("❌ Gemini API text generation failed with status {}: {}", status, response_text);
            return Err(GeminiError::Api { status: status.as_u16(), body: response_text });
        }

        extract_text(&response_text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, request: GenerationRequest) -> anyhow::Result<String> {
        Ok(GeminiClient::generate_text(self, &request).await?)
    }
}

fn extract_text(body: &str) -> Result<String, GeminiError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GeminiError::Parse(e.to_string()))?;

    parsed.candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .find_map(|p| match p {
            Part::Text { text } if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => None,
        })
        .ok_or(GeminiError::EmptyResponse)
}

fn demo_text(instruction: &str) -> String {
    let subject = instruction
        .split('"')
        .nth(1)
        .unwrap_or("your topic");
    format!(
        "Demo prompt: You are an expert collaborator. Produce an original, vivid piece about \"{subject}\". \
        Open with a concrete hook, build on specific sensory and practical details, and close with a clear takeaway. \
        Keep the voice consistent and avoid generic filler."
    )
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_first_text_part() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"x","mimeType":"image/png"}},{"text":"  Write a haiku about tides.\n"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Write a haiku about tides.");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        assert!(matches!(extract_text(r#"{"candidates":[]}"#), Err(GeminiError::EmptyResponse)));
        assert!(matches!(extract_text(r#"{}"#), Err(GeminiError::EmptyResponse)));
        assert!(matches!(extract_text("not json"), Err(GeminiError::Parse(_))));
    }

    #[test]
    fn endpoint_uses_model_and_trims_base() {
        let client = GeminiClient::new("k".into(), "https://example.test/v1beta/".into());
        assert_eq!(client.endpoint("gemini-1.5-flash"), "https://example.test/v1beta/models/gemini-1.5-flash:generateContent?key=k");
    }

    #[tokio::test]
    async fn demo_mode_answers_offline() {
        let client = GeminiClient::new(DEMO_KEY.into(), "http://127.0.0.1:9".into());
        let request = GenerationRequest {
            instruction: "Generate a calm code prompt about \"a tiny VM\" with".into(),
            model: "gemini-1.5-flash".into(),
            max_output_tokens: 300,
        };
        let text = GeminiClient::generate_text(&client, &request).await.unwrap();
        assert!(text.contains("\"a tiny VM\""));
    }
}
