use clap::Parser;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "flipside-gateway")]
#[command(about = "Rate limited relay that rewrites text into a calmer tone")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Allowed CORS origins (comma-separated)
    // Example: "http://localhost:3000,https://flipside.app"
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = DEFAULT_ORIGIN)]
    pub allowed_origins: String,

    // Credential for the completion API, rewrite routes answer 500 without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    // Model used for rewriting
    #[arg(short, long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    // Base URL of the chat completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    // Upstream timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 20)]
    pub upstream_timeout: u64,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 30)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 60)]
    pub rate_window: u64,

    // Stale rate limit entry sweep interval in seconds, 0 disables it
    #[arg(long, env = "RATE_LIMIT_SWEEP_SECS", default_value_t = 300)]
    pub sweep_interval: u64,
}

impl Args {
    pub fn origins(&self) -> Vec<String> {
        parse_origins(&self.allowed_origins)
    }

    // empty keys count as missing
    pub fn api_key(&self) -> Option<String> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

// Split "a, b,,c" into origins, falling back to the local dev origin
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_ORIGIN.to_string()]
    } else {
        origins
    }
}
