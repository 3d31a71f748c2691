use log::{debug, error};
use serde_json::Value;

use crate::error::GenerationError;

/// Extract the recipe array from a model's raw text answer.
///
/// Tries a strict parse after removing markdown code fences, then falls back
/// to the widest `[`..`]` span in the text. The result is truncated to
/// `limit` elements; the elements themselves are returned untouched.
pub fn parse_recipes(raw: &str, limit: usize) -> Result<Vec<Value>, GenerationError> {
    let parsed = match parse_strict(raw) {
        Some(value) => value,
        None => {
            error!("JSON parse error. Content received: {}", raw);
            parse_recovery(raw).ok_or_else(|| GenerationError::RecipeParse {
                raw: raw.to_string(),
            })?
        }
    };

    match parsed {
        Value::Array(mut recipes) => {
            if recipes.len() > limit {
                debug!("Truncating {} recipes to {}", recipes.len(), limit);
                recipes.truncate(limit);
            }
            Ok(recipes)
        }
        _ => Err(GenerationError::RecipeShape),
    }
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_strict(raw: &str) -> Option<Value> {
    serde_json::from_str(&strip_fences(raw)).ok()
}

/// First `[` to last `]`, inclusive. Brackets are not balanced.
fn bracket_span(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn parse_recovery(raw: &str) -> Option<Value> {
    let span = bracket_span(raw)?;
    serde_json::from_str(span).ok()
}
