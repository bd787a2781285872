use anyhow::Context;
use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use flipside_gateway::build_app;
use flipside_gateway::config::Args;
use flipside_gateway::rate_limit::sweeper;
use flipside_gateway::state::AppState;
use flipside_gateway::upstream::OpenAiClient;

// this is main async function with tokio
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // parse cli arguments (env vars fill in anything not given)
    let args = Args::parse();

    let completion = OpenAiClient::new(&args.openai_base_url, args.upstream_timeout())
        .context("building upstream http client")?;
    let state = Arc::new(AppState::from_args(&args, Arc::new(completion)));

    if state.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, /filter will answer 500 until it is configured");
    }

    // spawn the background sweeper
    if let Some(every) = args.sweep_interval() {
        let limiter = Arc::clone(&state.rate_limiter);
        tokio::spawn(async move {
            sweeper(limiter, every).await;
        });
    }

    let app = build_app(Arc::clone(&state));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("FlipSide gateway running on http://{}", addr);
    tracing::info!(model = %args.model, base_url = %args.openai_base_url, "forwarding rewrites");
    tracing::info!(origins = ?state.allowed_origins, "CORS origins");
    tracing::info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
