use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    gemini::{preview, GeminiError},
    models::{GenerationRequest, GenerationResult},
    profile::PromptProfile,
};

/// Hosted text model that turns a system instruction plus a user prompt into text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, system_instruction: &str, prompt: &str) -> Result<String, GeminiError>;
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("content service unavailable: {0}")]
    Unavailable(#[from] GeminiError),
}

pub struct ContentGenerator {
    profile: Arc<PromptProfile>,
    system_instruction: String,
    model: Arc<dyn TextModel>,
}

/// `Product Name: <name>, Context: <context>`, with `None` standing in for a missing context.
pub fn build_prompt(product_name: &str, context: Option<&str>) -> String {
    format!("Product Name: {}, Context: {}", product_name, context.unwrap_or("None"))
}

impl ContentGenerator {
    pub fn new(profile: Arc<PromptProfile>, model: Arc<dyn TextModel>) -> Self {
        let system_instruction = profile.system_instruction();
        Self { profile, system_instruction, model }
    }

    pub fn profile(&self) -> &PromptProfile { &self.profile }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let prompt = build_prompt(&request.product_name, request.context.as_deref());
        info!("🚀 Generating content with prompt: {}", preview(&prompt, 120));

        let content = self.model.complete(&self.system_instruction, &prompt).await
            .inspect_err(|e| error!("❌ Content generation failed: {}", e))?;

        if content.trim().is_empty() {
            warn!("⚠️ Model returned blank content");
        }
        info!("✅ Generated {} chars of content", content.chars().count());
        Ok(GenerationResult { content })
    }
}
