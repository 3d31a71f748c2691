pub mod config;
pub mod error;
pub mod generator;
pub mod ingredients;
pub mod model;
pub mod parser;
pub mod providers;

// Re-export commonly used types
pub use crate::config::{GeneratorConfig, ProviderConfig};
pub use crate::error::GenerationError;
pub use crate::generator::{RecipeGenerator, RecipeGeneratorBuilder};
pub use crate::ingredients::{normalize_ingredients, normalize_ingredients_value};
pub use crate::model::{Difficulty, ErrorResponse, GenerationResponse, Recipe};
pub use crate::parser::parse_recipes;
pub use crate::providers::{LlmProvider, ProviderKind};

/// Generate recipes using providers from `chefai.toml` and the environment
///
/// This is a convenience function equivalent to
/// `RecipeGenerator::from_env()?.generate(ingredients)`.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = chefai::generate_recipes(&["chicken", "rice", "bell pepper"]).await?;
/// for recipe in recipes {
///     println!("{} ({} servings)", recipe.name, recipe.servings.unwrap_or(0));
/// }
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipes<S: AsRef<str>>(
    ingredients: &[S],
) -> Result<Vec<Recipe>, GenerationError> {
    // Reject bad input before any configuration is loaded
    normalize_ingredients(ingredients)?;
    RecipeGenerator::from_env()?.generate(ingredients).await
}
