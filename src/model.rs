use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::GenerationError;

/// A generated recipe.
///
/// Model output is taken as-is: every field may be missing, `servings` may
/// arrive as a string, and fields outside the requested shape are kept in
/// `extra` so they round-trip back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub prep_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cook_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(
        default,
        deserialize_with = "lenient_servings",
        skip_serializing_if = "Option::is_none"
    )]
    pub servings: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Convert one parsed array element into a recipe.
    ///
    /// Only non-object elements are rejected; field contents are not validated.
    pub fn from_value(value: Value) -> Result<Self, GenerationError> {
        if !value.is_object() {
            return Err(GenerationError::RecipeShape);
        }
        serde_json::from_value(value).map_err(|_| GenerationError::RecipeShape)
    }
}

/// Recipe difficulty, matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Anything else the model came up with, kept verbatim
    Other(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Other(other) => other,
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(value.to_string()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => Difficulty::from(s.as_str()),
            other => Difficulty::Other(other.to_string()),
        })
    }
}

/// Accept any scalar as text; `null` becomes empty
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept a list of strings, a single string, or a list with non-string items
fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Accept `4`, `"4"` or `"4 servings"`; anything else becomes `None`
fn lenient_servings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s
            .split_whitespace()
            .next()
            .and_then(|first| first.parse::<u32>().ok()),
        _ => None,
    })
}

/// Successful response body of a generation request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub count: usize,
    pub recipes: Vec<Recipe>,
}

impl From<Vec<Recipe>> for GenerationResponse {
    fn from(recipes: Vec<Recipe>) -> Self {
        GenerationResponse {
            success: true,
            count: recipes.len(),
            recipes,
        }
    }
}

/// Failure body of a generation request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&GenerationError> for ErrorResponse {
    fn from(err: &GenerationError) -> Self {
        let error = match err {
            GenerationError::InvalidInput(_) => "Invalid request",
            _ => "Failed to generate recipes",
        };
        let message = match err {
            GenerationError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        };
        ErrorResponse {
            error: error.to_string(),
            message,
        }
    }
}
