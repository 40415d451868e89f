use crate::{errors::PromptError, providers::ai::AiProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

// --- DashScope-specific request and response structures ---

#[derive(Serialize)]
struct DashScopeRequest<'a> {
    model: &'a str,
    input: Input<'a>,
}

#[derive(Serialize)]
struct Input<'a> {
    prompt: &'a str,
}

#[derive(Deserialize, Debug)]
struct DashScopeResponse {
    output: Output,
}

#[derive(Deserialize, Debug)]
struct Output {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DashScopeErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// --- DashScope Provider implementation ---

/// A provider for the Alibaba Cloud DashScope text-generation API (Qwen models).
#[derive(Clone, Debug)]
pub struct DashScopeProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl DashScopeProvider {
    /// Creates a new `DashScopeProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, PromptError> {
        if api_key.trim().is_empty() {
            return Err(PromptError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for DashScopeProvider {
    async fn generate(&self, prompt: &str) -> Result<String, PromptError> {
        let request_body = DashScopeRequest {
            model: &self.model,
            input: Input { prompt },
        };

        debug!(model = %self.model, "--> Sending prompt to DashScope");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<DashScopeErrorBody>(&error_text)
                .ok()
                .and_then(|body| match (body.code, body.message) {
                    (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                    (None, Some(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or(error_text);
            return Err(PromptError::AiApi(format!(
                "DashScope ({status}): {message}"
            )));
        }

        let dashscope_response: DashScopeResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        dashscope_response
            .output
            .text
            .ok_or_else(|| PromptError::AiApi("DashScope response contained no text".to_string()))
    }
}
