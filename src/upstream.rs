use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse};

// Raw failure of the remote completion call, for server logs only
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("response had no choices")]
    NoChoices,
}

// Longest slice of an error body kept for the logs
pub const MAX_ERROR_BODY_CHARS: usize = 800;

pub fn truncate_error_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// The remote language model, opaque to the handler
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, UpstreamError>;
}

// OpenAI compatible chat completions client
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl Completion for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, UpstreamError> {
        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        Ok(res.json::<ChatCompletionResponse>().await?)
    }
}
