use std::time::Duration;

use async_trait::async_trait;
use common::{
    env_config::LlmConfig,
    error::{AppError, Res},
};
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dtos::chat::PromptMessage;

#[automock]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the prompt once and returns the assistant's reply.
    async fn complete(&self, messages: Vec<PromptMessage>) -> Res<String>;
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Value,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Res<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

/// Strings pass through, anything else is kept as its JSON text.
fn reply_text(content: Value) -> String {
    match content {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: Vec<PromptMessage>) -> Res<String> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("LLM_API_KEY is not configured".to_string()));
        }

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages: &messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Completion request failed with {}: {}", status, body);
            return Err(AppError::Internal(format!(
                "Completion request failed with status {}",
                status
            )));
        }

        let body: CompletionResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| reply_text(choice.message.content))
            .ok_or_else(|| AppError::Internal("Completion returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_string_reply_is_stored_as_json_text() {
        assert_eq!(reply_text(json!("Preheat the oven.")), "Preheat the oven.");
        assert_eq!(
            reply_text(json!([{ "text": "Hi" }])),
            r#"[{"text":"Hi"}]"#
        );
    }

    #[tokio::test]
    async fn missing_api_key_is_a_config_error() {
        let client = OpenAiClient::new(&LlmConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let err = client.complete(Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
