use crate::config::{GeneratorConfig, ProviderConfig};
use crate::error::GenerationError;
use crate::providers::{GroqProvider, LlmProvider, OpenRouterProvider};
use log::{info, warn};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Hosted providers the factory knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenRouter,
    Groq,
}

impl ProviderKind {
    /// Provider name used in configuration and fallback order
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Groq => "groq",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GenerationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "groq" => Ok(ProviderKind::Groq),
            other => Err(GenerationError::Configuration(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, GenerationError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(GenerationError::Configuration(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name.parse::<ProviderKind>()? {
            ProviderKind::OpenRouter => Ok(Box::new(OpenRouterProvider::new(config, timeout)?)),
            ProviderKind::Groq => Ok(Box::new(GroqProvider::new(config, timeout)?)),
        }
    }

    /// Build the providers named in `config.order`, in that order.
    ///
    /// Providers that are disabled, unknown, or have no API key are skipped,
    /// so the result may be empty.
    pub fn from_config(config: &GeneratorConfig) -> Vec<Box<dyn LlmProvider>> {
        Self::build_chain(config, config.request_timeout())
    }

    /// Like `from_config`, with an explicit per-attempt timeout
    pub fn build_chain(config: &GeneratorConfig, timeout: Duration) -> Vec<Box<dyn LlmProvider>> {
        let mut providers = Vec::new();

        for provider_name in &config.order {
            let kind = match provider_name.parse::<ProviderKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!("Skipping provider '{}': {}", provider_name, e);
                    continue;
                }
            };

            match Self::create(kind.as_str(), &config.provider(kind.as_str()), timeout) {
                Ok(provider) => {
                    info!("Added '{}' to fallback chain", kind);
                    providers.push(provider);
                }
                Err(e) => {
                    warn!("Skipping provider '{}': {}", kind, e);
                }
            }
        }

        providers
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec![ProviderKind::OpenRouter.as_str(), ProviderKind::Groq.as_str()]
    }
}
