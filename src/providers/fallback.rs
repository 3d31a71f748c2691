use crate::config::MAX_RECIPES;
use crate::error::GenerationError;
use crate::model::Recipe;
use crate::parser::parse_recipes;
use crate::providers::LlmProvider;
use log::{info, warn};

/// Ordered list of providers tried one after another.
///
/// An attempt succeeds only when the provider answers and the answer parses
/// into an array of recipe objects. Providers are tried once each,
/// sequentially, with no delay between attempts.
pub struct FallbackChain {
    providers: Vec<Box<dyn LlmProvider>>,
    max_recipes: usize,
}

impl FallbackChain {
    /// `max_recipes` is clamped to `1..=MAX_RECIPES`
    pub fn new(providers: Vec<Box<dyn LlmProvider>>, max_recipes: usize) -> Self {
        FallbackChain {
            providers,
            max_recipes: max_recipes.clamp(1, MAX_RECIPES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of the providers in the order they will be tried
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    async fn attempt(
        &self,
        provider: &dyn LlmProvider,
        prompt: &str,
    ) -> Result<Vec<Recipe>, GenerationError> {
        let content = provider.complete(prompt).await?;
        info!("Received response from {}", provider.provider_name());
        parse_recipes(&content, self.max_recipes)?
            .into_iter()
            .map(Recipe::from_value)
            .collect()
    }

    /// Run the prompt through the chain and return the parsed recipes
    pub async fn generate(&self, prompt: &str) -> Result<Vec<Recipe>, GenerationError> {
        if self.providers.is_empty() {
            return Err(GenerationError::Configuration(
                "No API key found. Please add OPENROUTER_API_KEY or GROQ_API_KEY to your environment variables."
                    .to_string(),
            ));
        }

        let mut last_error = None;

        for (index, provider) in self.providers.iter().enumerate() {
            info!("Using {} API...", provider.provider_name());

            match self.attempt(provider.as_ref(), prompt).await {
                Ok(recipes) => {
                    info!(
                        "Generated {} recipes using {}",
                        recipes.len(),
                        provider.provider_name()
                    );
                    return Ok(recipes);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    match self.providers.get(index + 1) {
                        Some(next) => warn!(
                            "{} failed, trying {}... {}",
                            provider.provider_name(),
                            next.provider_name(),
                            e
                        ),
                        None => warn!("{} failed: {}", provider.provider_name(), e),
                    }
                    last_error = Some(e);
                }
            }
        }

        // non-empty chain, every attempt recorded an error
        let source = last_error.unwrap_or_else(|| {
            GenerationError::Configuration("No providers were attempted".to_string())
        });
        Err(GenerationError::AllProvidersFailed {
            source: Box::new(source),
        })
    }
}
