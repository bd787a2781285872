use axum::Json;
use axum::extract::rejection::JsonRejection;
use std::time::Instant;
use tokio::time::timeout;

use crate::client_id::ClientId;
use crate::error::FilterError;
use crate::metrics::{RATE_LIMIT_CLIENTS, RATE_LIMITED, UPSTREAM_FAILURES, UPSTREAM_LATENCY};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use crate::state::AppState;
use crate::upstream::UpstreamError;

// Steps shared by every route that relays text to the model

pub(crate) fn admit(state: &AppState, client: &ClientId) -> Result<(), FilterError> {
    let decision = state.rate_limiter.check(client.as_str());
    RATE_LIMIT_CLIENTS.set(state.rate_limiter.tracked_clients() as f64);
    if !decision.is_admitted() {
        RATE_LIMITED.inc();
        tracing::warn!(client = client.as_str(), "rate limit exceeded");
        return Err(FilterError::RateLimited);
    }
    Ok(())
}

pub(crate) fn read_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    message: &'static str,
) -> Result<T, FilterError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable request body");
        FilterError::Validation(message)
    })
}

pub(crate) fn api_key(state: &AppState) -> Result<&str, FilterError> {
    state.api_key.as_deref().ok_or_else(|| {
        tracing::error!("OPENAI_API_KEY not configured, rejecting rewrite");
        FilterError::MissingApiKey
    })
}

// One bounded upstream call, timed
pub(crate) async fn complete(
    state: &AppState,
    api_key: &str,
    request: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, UpstreamError> {
    let start_time = Instant::now();
    let result = match timeout(
        state.upstream_timeout,
        state.completion.complete(api_key, request),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(state.upstream_timeout)),
    };
    UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());
    result
}

// Raw detail goes to the log, the caller only sees the generic message
pub(crate) fn upstream_failed(err: UpstreamError, client: &ClientId) -> FilterError {
    UPSTREAM_FAILURES.inc();
    tracing::error!(error = %err, client = client.as_str(), "upstream model failed");
    FilterError::Upstream(err)
}
