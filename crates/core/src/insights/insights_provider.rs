//! HTTP implementation of the insight provider.
//!
//! Speaks the chat-completions JSON shape against a configurable endpoint.
//! One attempt per call, no retries; failures surface as `RemoteService`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::insights_traits::InsightProviderTrait;
use crate::errors::{Error, Result};

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the hosted model.
#[derive(Debug, Clone)]
pub struct InsightProviderConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

pub struct HttpInsightProvider {
    client: Client,
    config: InsightProviderConfig,
}

impl HttpInsightProvider {
    pub fn new(config: InsightProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::RemoteService(e.to_string()))?;
        Ok(HttpInsightProvider { client, config })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl InsightProviderTrait for HttpInsightProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RemoteService(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::RemoteService(format!(
                "model endpoint returned status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteService(e.to_string()))?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::RemoteService("model returned no choices".to_string()))
    }
}
