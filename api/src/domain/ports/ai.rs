//! Generative AI port trait
//!
//! Defines the interface to the external text-generation model. Callers treat
//! every answer as advisory: a failure here must never fail the request that
//! asked for it.

use async_trait::async_trait;

use crate::error::AiError;

/// Port trait for text generation
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send a prompt and return the model's text answer
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
