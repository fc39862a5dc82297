use crate::core::config::LlmConfig;
use crate::core::error::{ChatError, Result};
use crate::llm::TextGenerator;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI Responses API client
pub struct ResponsesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for ResponsesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsesClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl ResponsesClient {
    pub fn new(api_key: String, base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        })
    }

    /// Build a client, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ChatError::LlmError(format!(
                    "API key not set (export {} to process code and notebooks)",
                    config.api_key_env
                ))
            })?;

        Self::new(
            api_key,
            &config.api_url,
            &config.model,
            Duration::from_secs(config.timeout_sec),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for ResponsesClient {
    async fn generate(&self, instructions: &str, content: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "input": [
                {"role": "system", "content": instructions},
                {"role": "user", "content": content},
            ],
        });

        let url = format!("{}/responses", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ChatError::LlmError(format!(
                "{} returned {}: {}",
                url,
                status.as_u16(),
                text.trim()
            )));
        }

        let data: Value = resp.json().await?;
        output_text(&data)
    }
}

/// Concatenate the `output_text` parts of a Responses API payload.
fn output_text(data: &Value) -> Result<String> {
    if let Some(text) = data["output_text"].as_str() {
        return Ok(text.to_string());
    }

    let parts: Vec<&str> = data["output"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item["content"].as_array())
        .flatten()
        .filter(|part| part["type"] == "output_text")
        .filter_map(|part| part["text"].as_str())
        .collect();

    if parts.is_empty() {
        return Err(ChatError::LlmError(
            "Response contained no output text".to_string(),
        ));
    }
    Ok(parts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_output_text_from_message_parts() {
        let data = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "role": "assistant", "content": [
                    {"type": "output_text", "text": "Hello "},
                    {"type": "refusal", "refusal": "no"},
                    {"type": "output_text", "text": "world"}
                ]}
            ]
        });
        assert_eq!(output_text(&data).unwrap(), "Hello world");
    }

    #[test]
    fn test_output_text_shortcut() {
        let data = json!({"output_text": "done", "output": []});
        assert_eq!(output_text(&data).unwrap(), "done");
    }

    #[test]
    fn test_output_text_missing() {
        let err = output_text(&json!({"output": []})).unwrap_err();
        assert!(matches!(err, ChatError::LlmError(_)));
    }

    #[test]
    #[serial]
    fn test_from_config_requires_key() {
        let config = LlmConfig {
            api_key_env: "REPOCHAT_TEST_MISSING_KEY".to_string(),
            ..LlmConfig::default()
        };
        std::env::remove_var("REPOCHAT_TEST_MISSING_KEY");

        let err = ResponsesClient::from_config(&config).unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("REPOCHAT_TEST_MISSING_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_config_uses_model() {
        let config = LlmConfig {
            api_key_env: "REPOCHAT_TEST_KEY".to_string(),
            api_url: "http://localhost:9/v1/".to_string(),
            ..LlmConfig::default()
        };
        std::env::set_var("REPOCHAT_TEST_KEY", "sk-test");

        let client = ResponsesClient::from_config(&config).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.base_url, "http://localhost:9/v1");

        std::env::remove_var("REPOCHAT_TEST_KEY");
    }
}
