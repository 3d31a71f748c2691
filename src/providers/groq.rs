use crate::config::{env_var, mask_key, ProviderConfig};
use crate::error::GenerationError;
use crate::providers::chat::{build_client, send_chat_completion};
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqProvider {
    /// Create a new Groq provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| env_var("GROQ_API_KEY"))
            .ok_or_else(|| {
                GenerationError::Configuration(
                    "GROQ_API_KEY not found in config or environment".to_string(),
                )
            })?;
        info!("Groq API key loaded ({})", mask_key(&api_key, 10));

        Ok(GroqProvider {
            client: build_client(timeout)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model
                .clone()
                .or_else(|| env_var("GROQ_MODEL"))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature.unwrap_or(0.7),
            max_tokens: config.max_tokens.unwrap_or(4096),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GroqProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        send_chat_completion(
            &self.client,
            "Groq",
            &self.base_url,
            &self.api_key,
            &[],
            &self.request_body(prompt),
        )
        .await
    }
}
