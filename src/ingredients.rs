use serde_json::Value;

use crate::error::GenerationError;

const MISSING_LIST: &str = "Please provide an array of ingredients";
const NO_VALID_INGREDIENT: &str = "Please provide at least one valid ingredient";

/// Trim every ingredient and drop the ones left empty.
///
/// Order of the surviving ingredients is preserved. Fails when nothing
/// usable remains.
pub fn normalize_ingredients<S: AsRef<str>>(
    ingredients: &[S],
) -> Result<Vec<String>, GenerationError> {
    if ingredients.is_empty() {
        return Err(GenerationError::InvalidInput(MISSING_LIST.to_string()));
    }

    let cleaned: Vec<String> = ingredients
        .iter()
        .map(|ingredient| ingredient.as_ref().trim())
        .filter(|ingredient| !ingredient.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return Err(GenerationError::InvalidInput(
            NO_VALID_INGREDIENT.to_string(),
        ));
    }

    Ok(cleaned)
}

/// Normalize the `ingredients` field of a raw JSON request body.
///
/// Accepts `None` for a missing field. Non-string array elements are skipped.
pub fn normalize_ingredients_value(value: Option<&Value>) -> Result<Vec<String>, GenerationError> {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(GenerationError::InvalidInput(MISSING_LIST.to_string())),
    };

    let strings: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
    if strings.is_empty() {
        return Err(GenerationError::InvalidInput(
            NO_VALID_INGREDIENT.to_string(),
        ));
    }

    normalize_ingredients(&strings)
}
