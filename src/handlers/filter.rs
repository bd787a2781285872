use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use std::sync::Arc;

use crate::client_id::ClientId;
use crate::error::{FilterError, INVALID_BODY, TEXT_REQUIRED, TEXT_TOO_LONG};
use crate::metrics::FILTER_REQUESTS;
use crate::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, FilterRequest, FilterResponse,
};
use crate::state::AppState;
use crate::upstream::UpstreamError;

use super::relay;

pub const MAX_TEXT_CHARS: usize = 2000;
pub const TEMPERATURE: f32 = 0.4;
pub const MAX_TOKENS: u32 = 180;

pub const SYSTEM_PROMPT: &str = "You rewrite text to reduce hostility and inflammatory language while \
     preserving the core point. Keep it concise and neutral; avoid insults.";
pub const USER_PROMPT_PREFIX: &str = "Rewrite this to be calm, non-toxic, and constructive:\n\n";
pub const FALLBACK_TEXT: &str = "I want to express my view more constructively and calmly.";

// Trim, then require 1..=2000 characters
pub fn validate_text(raw: Option<&str>) -> Result<String, FilterError> {
    let text = raw.unwrap_or_default().trim();
    if text.is_empty() {
        return Err(FilterError::Validation(TEXT_REQUIRED));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(FilterError::Validation(TEXT_TOO_LONG));
    }
    Ok(text.to_string())
}

pub fn build_completion_request(model: &str, text: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!("{USER_PROMPT_PREFIX}{text}")),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

// First choice, trimmed, with a fallback for empty output
fn into_filtered(response: ChatCompletionResponse) -> Result<FilterResponse, UpstreamError> {
    let content = response.first_content().ok_or(UpstreamError::NoChoices)?;
    let text = content.unwrap_or_default().trim();

    let filtered_text = if text.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        text.to_string()
    };
    Ok(FilterResponse { filtered_text })
}

// Limit, validate, then ask the model for a calmer rewrite.
// The limiter runs before the payload is looked at, so malformed or
// oversized bodies still spend quota.
pub async fn rewrite(
    state: &AppState,
    client: &ClientId,
    payload: Result<FilterRequest, FilterError>,
) -> Result<FilterResponse, FilterError> {
    FILTER_REQUESTS.inc();

    relay::admit(state, client)?;

    let text = validate_text(payload?.original_text.as_deref())?;
    let api_key = relay::api_key(state)?;

    let request = build_completion_request(&state.model, &text);

    relay::complete(state, api_key, &request)
        .await
        .and_then(into_filtered)
        .map_err(|err| relay::upstream_failed(err, client))
}

//post handler
pub async fn filter_handler(
    State(state): State<Arc<AppState>>,
    client: ClientId,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<FilterResponse>, FilterError> {
    let payload = relay::read_body(payload, INVALID_BODY);

    rewrite(&state, &client, payload).await.map(Json)
}
