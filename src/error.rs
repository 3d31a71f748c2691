use thiserror::Error;

/// Errors that can occur while generating recipes
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The ingredient list was missing, not a list, or empty after cleanup
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// No usable provider is configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to load configuration sources
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// Provider answered with a non-2xx status
    #[error("{provider} API Error: {status} - {body}{}", http_hint(.status))]
    ProviderHttp {
        provider: String,
        status: u16,
        body: String,
    },

    /// Completion body did not contain `choices[0].message.content`
    #[error("Invalid response format from {provider}")]
    ProviderResponseShape { provider: String },

    /// Request never produced a readable response (connect, timeout, decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Neither the strict nor the recovery parse produced JSON
    #[error("Failed to parse recipe JSON from model response")]
    RecipeParse { raw: String },

    /// JSON parsed, but it is not an array of recipe objects
    #[error("Response is not an array of recipes")]
    RecipeShape,

    /// Every configured provider failed; carries the last error
    #[error("Failed to generate recipes: {source}")]
    AllProvidersFailed {
        #[source]
        source: Box<GenerationError>,
    },
}

fn http_hint(status: &u16) -> &'static str {
    match *status {
        401 => "\n\nThis usually means your API key is invalid or expired.",
        429 => "\n\nRate limit exceeded. Please try again later.",
        _ => "",
    }
}

impl GenerationError {
    /// Whether the next provider in the chain should be tried after this error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::ProviderHttp { .. }
                | GenerationError::ProviderResponseShape { .. }
                | GenerationError::Transport(_)
                | GenerationError::RecipeParse { .. }
                | GenerationError::RecipeShape
        )
    }

    /// HTTP-equivalent status a caller should answer with
    pub fn status_hint(&self) -> u16 {
        match self {
            GenerationError::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}
