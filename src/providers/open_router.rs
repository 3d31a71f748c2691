use crate::config::{env_var, mask_key, ProviderConfig};
use crate::error::GenerationError;
use crate::providers::chat::{build_client, send_chat_completion};
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";
const DEFAULT_REFERER: &str = "http://localhost:5173";
const DEFAULT_TITLE: &str = "ChefAI Companion";

pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    referer: String,
    title: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, GenerationError> {
        // Try config first, then fall back to environment variables
        let api_key = config
            .api_key
            .clone()
            .or_else(|| env_var("OPENROUTER_API_KEY"))
            .or_else(|| env_var("OPENAI_API_KEY"))
            .ok_or_else(|| {
                GenerationError::Configuration(
                    "OPENROUTER_API_KEY not found in config or environment".to_string(),
                )
            })?;
        info!("OpenRouter API key loaded ({})", mask_key(&api_key, 15));

        Ok(OpenRouterProvider {
            client: build_client(timeout)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model
                .clone()
                .or_else(|| env_var("OPENROUTER_MODEL"))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            referer: config
                .referer
                .clone()
                .or_else(|| env_var("FRONTEND_URL"))
                .unwrap_or_else(|| DEFAULT_REFERER.to_string()),
            title: config
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenRouterProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = Map::new();
        body.insert("model".to_string(), json!(self.model));
        body.insert(
            "messages".to_string(),
            json!([{ "role": "user", "content": prompt }]),
        );
        // OpenRouter uses the model's own sampling defaults unless configured
        if let Some(temperature) = self.temperature {
            body.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(max_tokens) = self.max_tokens {
            body.insert("max_tokens".to_string(), json!(max_tokens));
        }
        Value::Object(body)
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        send_chat_completion(
            &self.client,
            "OpenRouter",
            &self.base_url,
            &self.api_key,
            &[
                ("HTTP-Referer", self.referer.as_str()),
                ("X-Title", self.title.as_str()),
            ],
            &self.request_body(prompt),
        )
        .await
    }
}
