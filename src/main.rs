use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use humanivio_api::config::Args;
use humanivio_api::rate_limit::{InMemoryQuota, quota_sweeper};
use humanivio_api::state::AppState;
use humanivio_api::upstream::OpenAiRewriter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "humanivio_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if args.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set, every humanize call will fail upstream");
    }

    let quota = Arc::new(InMemoryQuota::new(
        args.daily_limit,
        Duration::from_secs(args.quota_window),
    ));
    let rewriter = Arc::new(OpenAiRewriter::new(
        args.api_key.clone(),
        args.model.clone(),
        &args.upstream_url,
        Duration::from_secs(args.upstream_timeout),
    )?);

    // spawn the background sweeper
    let sweeper_quota = Arc::clone(&quota);
    let sweep_every = Duration::from_secs(args.sweep_interval.max(1));
    tokio::spawn(async move {
        quota_sweeper(sweeper_quota, sweep_every).await;
    });

    let state = Arc::new(AppState::new(quota, rewriter));
    let app = humanivio_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        address = %addr,
        upstream = %args.upstream_url,
        model = %args.model,
        daily_limit = args.daily_limit,
        quota_window_secs = args.quota_window,
        "Humanivio API listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
