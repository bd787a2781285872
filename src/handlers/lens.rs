use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client_id::ClientId;
use crate::error::{FilterError, INVALID_LENS_BODY};
use crate::metrics::LENS_REQUESTS;
use crate::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, FlipResponse, GenerateAllResponse,
    LensRequest,
};
use crate::state::AppState;

use super::filter::validate_text;
use super::relay;

// Keep in sync with the timelines the web client renders
pub const LENSES: [&str; 5] = ["calm", "bridge", "cynical", "opposite", "playful"];
pub const DEFAULT_LENS: &str = "default";

pub const LENS_TEMPERATURE: f32 = 0.7;
pub const LENS_MAX_TOKENS: u32 = 240;

pub const LENS_SYSTEM_PROMPT: &str = "You rewrite short social posts into specific \"lenses\" (a.k.a. timelines).\n\
- Keep meaning intact.\n\
- Be concise (1-3 sentences).\n\
- Match the requested lens style.\n\
- If lens is \"default\" return a clean, readable version with neutral tone.";

// blank or missing lens -> "default"
pub fn normalize_lens(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|lens| !lens.is_empty())
        .unwrap_or(DEFAULT_LENS)
}

pub fn build_lens_request(model: &str, lens: &str, text: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(LENS_SYSTEM_PROMPT),
            ChatMessage::user(format!("Lens: {lens}\n---\n{text}")),
        ],
        temperature: LENS_TEMPERATURE,
        max_tokens: LENS_MAX_TOKENS,
    }
}

// Lens output may legitimately come back empty, no fallback here
fn lens_text(response: &ChatCompletionResponse) -> String {
    response
        .first_content()
        .flatten()
        .unwrap_or_default()
        .trim()
        .to_string()
}

async fn rewrite_in_lens(
    state: &AppState,
    client: &ClientId,
    api_key: &str,
    lens: &str,
    text: &str,
) -> Result<String, FilterError> {
    let request = build_lens_request(&state.model, lens, text);
    let response = relay::complete(state, api_key, &request)
        .await
        .map_err(|err| relay::upstream_failed(err, client))?;
    Ok(lens_text(&response))
}

// Single lens rewrite, same limit/validate/key order as /filter
pub async fn flip(
    state: &AppState,
    client: &ClientId,
    payload: Result<LensRequest, FilterError>,
) -> Result<FlipResponse, FilterError> {
    LENS_REQUESTS.inc();

    relay::admit(state, client)?;

    let payload = payload?;
    let text = validate_text(payload.original.as_deref())?;
    let lens = normalize_lens(payload.lens.as_deref());
    let api_key = relay::api_key(state)?;

    let text = rewrite_in_lens(state, client, api_key, lens, &text).await?;
    Ok(FlipResponse { ok: true, text })
}

// Every lens, one upstream call each, first failure aborts the batch.
// Counts as a single request against the limiter.
pub async fn generate_all(
    state: &AppState,
    client: &ClientId,
    payload: Result<LensRequest, FilterError>,
) -> Result<GenerateAllResponse, FilterError> {
    LENS_REQUESTS.inc();

    relay::admit(state, client)?;

    let text = validate_text(payload?.original.as_deref())?;
    let api_key = relay::api_key(state)?;

    let mut results = BTreeMap::new();
    for lens in LENSES {
        let rewritten = rewrite_in_lens(state, client, api_key, lens, &text).await?;
        results.insert(lens.to_string(), rewritten);
    }
    Ok(GenerateAllResponse { ok: true, results })
}

pub async fn flip_handler(
    State(state): State<Arc<AppState>>,
    client: ClientId,
    payload: Result<Json<LensRequest>, JsonRejection>,
) -> Result<Json<FlipResponse>, FilterError> {
    let payload = relay::read_body(payload, INVALID_LENS_BODY);
    flip(&state, &client, payload).await.map(Json)
}

pub async fn generate_all_handler(
    State(state): State<Arc<AppState>>,
    client: ClientId,
    payload: Result<Json<LensRequest>, JsonRejection>,
) -> Result<Json<GenerateAllResponse>, FilterError> {
    let payload = relay::read_body(payload, INVALID_LENS_BODY);
    generate_all(&state, &client, payload).await.map(Json)
}
