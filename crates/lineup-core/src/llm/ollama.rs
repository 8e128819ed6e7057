//! Ollama backend for the locally hosted fine-tuned vision model.
//!
//! Talks to a local Ollama instance via its HTTP API. No authentication
//! required — just needs Ollama running with the fine-tuned weights loaded.

use super::provider::{GenerateRequest, GenerateResponse, VisionProvider, GREEDY_TEMPERATURE};
use crate::error::PipelineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Ollama provider for local vision model inference.
#[derive(Debug)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    /// Ask for the raw completion (full chat transcript) instead of the
    /// templated reply. Used for parity with raw decode pipelines where the
    /// assistant text must be recovered by marker split.
    raw_transcript: bool,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(endpoint: &str, model: &str, raw_transcript: bool) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            raw_transcript,
            client: reqwest::Client::new(),
        }
    }
}

/// Ollama /api/generate request body.
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    images: Vec<String>,
    stream: bool,
    raw: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama /api/generate response.
#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl VisionProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, PipelineError> {
        let url = format!("{}/api/generate", self.endpoint);
        let start = Instant::now();

        let body = OllamaRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            images: vec![request.image.data.clone()],
            stream: false,
            raw: self.raw_transcript,
            options: OllamaOptions {
                temperature: GREEDY_TEMPERATURE,
                num_predict: request.max_new_tokens,
            },
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| PipelineError::Llm {
                message: format!("Ollama request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Llm {
                message: format!("Ollama HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let ollama_resp: OllamaResponse = resp.json().await.map_err(|e| PipelineError::Llm {
            message: format!("Failed to parse Ollama response: {e}"),
            status_code: None,
        })?;

        if ollama_resp.response.trim().is_empty() {
            return Err(PipelineError::Llm {
                message: "Ollama returned empty response — no content generated".to_string(),
                status_code: None,
            });
        }

        Ok(GenerateResponse {
            text: ollama_resp.response,
            model: self.model.clone(),
            transcript: self.raw_transcript,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn timeout(&self) -> Duration {
        // Vision models running locally can be slow
        Duration::from_secs(120)
    }
}
