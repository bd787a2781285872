mod health;
mod metrics;
mod filter;
mod lens;
mod relay;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use filter::{filter_handler, rewrite};
pub use filter::{
    FALLBACK_TEXT, MAX_TEXT_CHARS, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, USER_PROMPT_PREFIX,
    build_completion_request, validate_text,
};
pub use lens::{flip, flip_handler, generate_all, generate_all_handler};
pub use lens::{
    DEFAULT_LENS, LENS_MAX_TOKENS, LENS_SYSTEM_PROMPT, LENS_TEMPERATURE, LENSES, build_lens_request,
    normalize_lens,
};
