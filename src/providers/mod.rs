mod chat;
mod factory;
mod fallback;
mod groq;
mod open_router;
mod prompt;

pub use factory::{ProviderFactory, ProviderKind};
pub use fallback::FallbackChain;
pub use groq::GroqProvider;
pub use open_router::OpenRouterProvider;
pub use prompt::{build_recipe_prompt, RECIPE_GENERATOR_PROMPT};

use async_trait::async_trait;

use crate::error::GenerationError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openrouter", "groq")
    fn provider_name(&self) -> &str;

    /// Send the prompt as a single user message and return the raw answer text
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
