/// The prompt template used for generating recipes from ingredients.
///
/// The template asks for exactly 4-5 recipes as a bare JSON array and embeds
/// an example object with every field the response parser expects.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro. It contains an `{{INGREDIENTS}}` placeholder that
/// `build_recipe_prompt` fills in.
pub const RECIPE_GENERATOR_PROMPT: &str = include_str!("prompt.txt");

/// Render the prompt for a cleaned, non-empty ingredient list.
pub fn build_recipe_prompt<S: AsRef<str>>(ingredients: &[S]) -> String {
    let ingredient_list = ingredients
        .iter()
        .map(|ingredient| ingredient.as_ref())
        .collect::<Vec<_>>()
        .join(", ");

    RECIPE_GENERATOR_PROMPT
        .trim_end()
        .replace("{{INGREDIENTS}}", &ingredient_list)
}
