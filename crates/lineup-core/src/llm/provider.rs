//! Vision provider trait and request/response types.
//!
//! Defines the interface that all model backends implement, plus the
//! factory that creates the right backend from CLI flags and config.

use crate::config::LlmConfig;
use crate::error::PipelineError;
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// Generation is greedy: a fixed zero temperature makes the output
/// reproducible for a fixed model and input.
pub const GREEDY_TEMPERATURE: f32 = 0.0;

/// Base64-encoded image ready to send to a model API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and format string.
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A single-turn generation request: one image plus one text prompt.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The image under analysis
    pub image: ImageInput,
    /// Fully rendered prompt text
    pub prompt: String,
    /// Ceiling on generated tokens
    pub max_new_tokens: u32,
}

/// The reply from a generation call.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Generated text. When `transcript` is set this is the full decoded
    /// chat transcript; otherwise it is the assistant reply alone.
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Whether `text` is a raw transcript that still contains the chat
    /// template, requiring assistant-marker extraction downstream
    pub transcript: bool,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all vision model backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionProvider>` for dynamic dispatch).
#[async_trait]
pub trait VisionProvider: Send + Sync + std::fmt::Debug {
    /// Backend name for logging (e.g., "ollama", "openai").
    fn name(&self) -> &str;

    /// Check whether the backend is configured and reachable.
    async fn is_available(&self) -> bool;

    /// Run one generation for the given request.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, PipelineError>;

    /// Per-request transport timeout for this backend.
    fn timeout(&self) -> Duration;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the appropriate backend from CLI flags and config.
pub struct VisionProviderFactory;

impl VisionProviderFactory {
    /// Create a provider based on backend name, config, and optional model override.
    ///
    /// # Arguments
    /// * `provider` - Backend identifier ("ollama" or "openai")
    /// * `config` - The full `[llm]` config section
    /// * `model_override` - Optional model name that overrides the config default
    pub fn create(
        provider: &str,
        config: &LlmConfig,
        model_override: Option<&str>,
    ) -> Result<Box<dyn VisionProvider>, PipelineError> {
        match provider {
            "ollama" => {
                let cfg = config.ollama.clone().unwrap_or_default();
                let model = model_override
                    .map(String::from)
                    .unwrap_or(cfg.model.clone());
                Ok(Box::new(super::ollama::OllamaProvider::new(
                    &cfg.endpoint,
                    &model,
                    cfg.raw_transcript,
                )))
            }
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| PipelineError::Llm {
                    message: "OpenAI API key not set. Set OPENAI_API_KEY env var.".to_string(),
                    status_code: None,
                })?;
                let model = model_override
                    .map(String::from)
                    .unwrap_or(cfg.model.clone());
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &api_key,
                    &model,
                    &cfg.endpoint,
                )))
            }
            other => Err(PipelineError::Llm {
                message: format!("Unknown model provider: {other}"),
                status_code: None,
            }),
        }
    }
}
