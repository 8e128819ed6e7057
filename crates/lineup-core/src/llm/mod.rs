//! Vision model access for player identification and captioning.
//!
//! Provides a provider abstraction over the backends that can serve the
//! fine-tuned vision model: a local Ollama instance (the default deployment)
//! and any OpenAI-compatible chat completions endpoint.

pub(crate) mod ollama;
pub(crate) mod openai;
pub(crate) mod provider;

pub use provider::{
    GenerateRequest, GenerateResponse, ImageInput, VisionProvider, VisionProviderFactory,
};
