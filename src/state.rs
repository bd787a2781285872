use std::sync::Arc;
use std::time::Duration;

use crate::config::Args;
use crate::rate_limit::{RateLimiter, SystemClock};
use crate::upstream::Completion;

// app's shared state
pub struct AppState {
    pub completion: Arc<dyn Completion>,
    pub api_key: Option<String>, // None -> /filter answers 500
    pub model: String,
    pub upstream_timeout: Duration,
    pub rate_limiter: Arc<RateLimiter>,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn from_args(args: &Args, completion: Arc<dyn Completion>) -> Self {
        Self {
            completion,
            api_key: args.api_key(),
            model: args.model.clone(),
            upstream_timeout: args.upstream_timeout(),
            rate_limiter: Arc::new(RateLimiter::new(
                args.rate_limit,
                args.rate_window(),
                Arc::new(SystemClock),
            )),
            allowed_origins: args.origins(),
        }
    }
}
