use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::generator::TextModel;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("no API key configured (set GOOGLE_API_KEY)")] MissingApiKey,
    #[error("HTTP error: {0}")] Http(String),
    #[error("status={status} body={body}")] Status { status: StatusCode, body: String },
    #[error("parse error: {0}")] Parse(String),
    #[error("prompt blocked: {0}")] Blocked(String),
}

/// Shortens `s` to at most `max` chars for log output.
pub fn preview(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...[{} chars]", &s[..idx], s.chars().count()),
        None => s.to_string(),
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str { &self.model }

    pub async fn generate_text(&self, system_instruction: &str, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, api_key);

        info!("🔗 Making request to: {}", url.replace(api_key, "***"));
        debug!("📤 Prompt: {}", preview(prompt, 200));

        let payload = json!({
            "systemInstruction": {
                "parts": [{"text": system_instruction}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });

        let response = self.client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.without_url().to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response.text().await
            .map_err(|e| GeminiError::Http(e.without_url().to_string()))?;

        if !status.is_success() {
            error!("❌ Gemini API text generation failed with status {}: {}", status, preview(&response_text, 500));
            return Err(GeminiError::Status { status, body: response_text });
        }

        debug!("📥 Raw Gemini API response: {}", preview(&response_text, 1000));

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| GeminiError::Parse(format!("{}: {}", e, preview(&response_text, 200))))?;

        extract_text(parsed)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn complete(&self, system_instruction: &str, prompt: &str) -> Result<String, GeminiError> {
        self.generate_text(system_instruction, prompt).await
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    block_reason: Option<String>,
}

/// Joins the text parts of the first candidate. Empty output is not an error here.
fn extract_text(resp: GeminiResponse) -> Result<String, GeminiError> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            error!("⛔ Prompt blocked by Gemini: {}", reason);
            return Err(GeminiError::Blocked(reason));
        }
        info!("⚠️ No candidates in Gemini response");
        return Ok(String::new());
    };

    let text: String = candidate.content.parts.into_iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text),
            Part::Other(_) => None,
        })
        .collect();
    info!("✅ Extracted {} chars of generated text", text.chars().count());
    Ok(text)
}
