use std::time::Duration;

use log::info;

use crate::config::{load_config, GeneratorConfig};
use crate::error::GenerationError;
use crate::ingredients::normalize_ingredients;
use crate::model::Recipe;
use crate::providers::{
    build_recipe_prompt, FallbackChain, LlmProvider, ProviderFactory, ProviderKind,
};

/// Turns an ingredient list into AI-generated recipes
pub struct RecipeGenerator {
    chain: FallbackChain,
}

impl RecipeGenerator {
    /// Build a generator over an explicit, ordered provider list
    pub fn new(providers: Vec<Box<dyn LlmProvider>>, max_recipes: usize) -> Self {
        RecipeGenerator {
            chain: FallbackChain::new(providers, max_recipes),
        }
    }

    /// Build a generator from configuration, skipping unconfigured providers
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(ProviderFactory::from_config(config), config.recipe_limit())
    }

    /// Build a generator from `chefai.toml` and environment variables
    pub fn from_env() -> Result<Self, GenerationError> {
        let config = load_config()?;
        Ok(Self::from_config(&config))
    }

    /// Creates a new builder for configuring a generator
    ///
    /// # Example
    /// ```
    /// use chefai::RecipeGenerator;
    ///
    /// let builder = RecipeGenerator::builder();
    /// ```
    pub fn builder() -> RecipeGeneratorBuilder {
        RecipeGeneratorBuilder::default()
    }

    /// Names of the providers in the order they will be tried
    pub fn provider_names(&self) -> Vec<&str> {
        self.chain.provider_names()
    }

    /// Generate up to five recipes from the given ingredients
    ///
    /// # Errors
    /// Returns `GenerationError` if:
    /// - No ingredient is left after trimming blanks (`InvalidInput`)
    /// - No provider is configured (`Configuration`)
    /// - Every provider failed to answer with a recipe array (`AllProvidersFailed`)
    pub async fn generate<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<Recipe>, GenerationError> {
        let ingredients = normalize_ingredients(ingredients)?;
        info!(
            "Generating recipes for ingredients: {}",
            ingredients.join(", ")
        );

        let prompt = build_recipe_prompt(&ingredients);
        self.chain.generate(&prompt).await
    }
}

/// Builder for configuring a `RecipeGenerator`
#[derive(Default)]
pub struct RecipeGeneratorBuilder {
    config: Option<GeneratorConfig>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_recipes: Option<usize>,
    providers: Vec<Box<dyn LlmProvider>>,
}

impl RecipeGeneratorBuilder {
    /// Start from a loaded configuration instead of the defaults
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use only this provider
    ///
    /// # Example
    /// ```
    /// use chefai::{ProviderKind, RecipeGenerator};
    ///
    /// let builder = RecipeGenerator::builder()
    ///     .provider(ProviderKind::Groq)
    ///     .api_key("gsk_your_key");
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the selected provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the selected provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the selected provider at another chat-completions base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a timeout for each provider request.
    ///
    /// Takes precedence over the whole-second `timeout` from configuration.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Cap the number of returned recipes (clamped to 1..=5)
    pub fn max_recipes(mut self, max_recipes: usize) -> Self {
        self.max_recipes = Some(max_recipes);
        self
    }

    /// Append a ready-made provider to the chain.
    ///
    /// When any provider is added this way, configuration-based providers
    /// are not built.
    pub fn with_provider(mut self, provider: Box<dyn LlmProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Build the generator
    ///
    /// # Errors
    /// Returns `GenerationError::Configuration` if provider overrides
    /// (`api_key`, `model`, `base_url`) are given without `provider()`.
    pub fn build(self) -> Result<RecipeGenerator, GenerationError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(max_recipes) = self.max_recipes {
            config.max_recipes = max_recipes;
        }
        let timeout = self.timeout.unwrap_or_else(|| config.request_timeout());

        if !self.providers.is_empty() {
            return Ok(RecipeGenerator::new(self.providers, config.recipe_limit()));
        }

        let has_overrides =
            self.api_key.is_some() || self.model.is_some() || self.base_url.is_some();

        match self.provider {
            Some(kind) => {
                let name = kind.as_str().to_string();
                let provider_config = config.providers.entry(name.clone()).or_default();
                if self.api_key.is_some() {
                    provider_config.api_key = self.api_key;
                }
                if self.model.is_some() {
                    provider_config.model = self.model;
                }
                if self.base_url.is_some() {
                    provider_config.base_url = self.base_url;
                }
                config.order = vec![name];
            }
            None if has_overrides => {
                return Err(GenerationError::Configuration(
                    "api_key(), model() and base_url() require provider()".to_string(),
                ));
            }
            None => {}
        }

        Ok(RecipeGenerator::new(
            ProviderFactory::build_chain(&config, timeout),
            config.recipe_limit(),
        ))
    }
}
