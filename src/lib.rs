pub mod app;
pub mod client_id;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;

pub use app::build_app;
pub use error::FilterError;
pub use rate_limit::{Clock, Decision, RateLimiter};
pub use state::AppState;
