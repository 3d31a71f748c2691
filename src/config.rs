use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Upper bound on the number of recipes returned per request
pub const MAX_RECIPES: usize = 5;

/// Main generator configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Order of providers to try (first to last)
    #[serde(default = "default_order")]
    pub order: Vec<String>,
    /// Request timeout in seconds, applied to each provider attempt
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum number of recipes returned (clamped to 1..=5)
    #[serde(default = "default_max_recipes")]
    pub max_recipes: usize,
}

/// Configuration for a specific LLM provider.
///
/// Every field is optional: missing keys and models fall back to the
/// provider's environment variables and built-in defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider takes part in the fallback chain
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL of the chat-completions API (for proxies and tests)
    pub base_url: Option<String>,
    /// Model identifier (e.g., "llama-3.3-70b-versatile")
    pub model: Option<String>,
    /// Sampling temperature sent with the request
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// `HTTP-Referer` header (OpenRouter attribution)
    pub referer: Option<String>,
    /// `X-Title` header (OpenRouter attribution)
    pub title: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: None,
            model: None,
            temperature: None,
            max_tokens: None,
            referer: None,
            title: None,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            order: default_order(),
            timeout: default_timeout(),
            max_recipes: default_max_recipes(),
        }
    }
}

// Default value functions
fn default_enabled() -> bool {
    true
}

fn default_order() -> Vec<String> {
    vec!["openrouter".to_string(), "groq".to_string()]
}

fn default_timeout() -> u64 {
    30
}

fn default_max_recipes() -> usize {
    MAX_RECIPES
}

impl GeneratorConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEFAI__ prefix
    /// 2. chefai.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEFAI__PROVIDERS__GROQ__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Recipe cap after clamping to the supported range
    pub fn recipe_limit(&self) -> usize {
        self.max_recipes.clamp(1, MAX_RECIPES)
    }

    /// Per-attempt request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Provider configuration for `name` (case-insensitive), or defaults
    /// when it has no entry
    pub fn provider(&self, name: &str) -> ProviderConfig {
        self.providers
            .get(name)
            .or_else(|| {
                self.providers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, config)| config)
            })
            .cloned()
            .unwrap_or_default()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<GeneratorConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("chefai").required(false))
        // Use double underscore for nested: CHEFAI__PROVIDERS__GROQ__API_KEY
        .add_source(
            Environment::with_prefix("CHEFAI")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("order")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Read a legacy environment variable, treating blank values as unset
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Shorten a secret to a loggable prefix
pub(crate) fn mask_key(key: &str, visible: usize) -> String {
    let prefix: String = key.chars().take(visible).collect();
    format!("{}...", prefix)
}
