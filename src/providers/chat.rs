//! OpenAI-compatible chat-completions call shared by the hosted providers.

use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::GenerationError;

/// Build an HTTP client whose requests give up after `timeout`
pub(crate) fn build_client(timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        GenerationError::Configuration(format!("Failed to build HTTP client: {}", e))
    })
}

/// POST `body` to `{base_url}/chat/completions` and return the trimmed
/// `choices[0].message.content`.
pub(crate) async fn send_chat_completion(
    client: &Client,
    label: &str,
    base_url: &str,
    api_key: &str,
    extra_headers: &[(&str, &str)],
    body: &Value,
) -> Result<String, GenerationError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    debug!("Sending request to {} at {}", label, url);

    let mut request = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(body);
    for (name, value) in extra_headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::ProviderHttp {
            provider: label.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let response_body: Value = response.json().await?;
    debug!("{} response: {:?}", label, response_body);

    extract_content(&response_body)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| GenerationError::ProviderResponseShape {
            provider: label.to_string(),
        })
}

fn extract_content(response_body: &Value) -> Option<&str> {
    response_body
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}
