//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use advisor::{
    AdvisorConfig, AdvisorState, GeminiClient, GeminiConfig, YahooChartClient, YahooConfig,
    advisor_router,
};
use axum::{
    http,
    http::{Method, header},
};
use platform::clock::{Clock, SystemClock};
use platform::config::env_or;
use resilience::{
    MemoryResponseCache, RequestGate, ResilienceConfig, RetryPolicy, SlidingWindowRateLimiter,
    spawn_sweeper,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,advisor=info,resilience=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration
    let resilience_config = ResilienceConfig::from_env();
    let advisor_config = AdvisorConfig::from_env();
    let gemini_config = GeminiConfig::from_env();
    let yahoo_config = YahooConfig::from_env();

    tracing::info!(
        max_requests = resilience_config.rate_limit.max_requests,
        window_secs = resilience_config.rate_limit.window.as_secs(),
        max_attempts = resilience_config.retry.max_attempts,
        base_delay_ms = resilience_config.retry.base_delay.as_millis() as u64,
        "Resilience configured"
    );

    if !gemini_config.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set, AI endpoints will serve fallbacks");
    }

    // Upstream clients
    let text = GeminiClient::new(gemini_config)?;
    let market = YahooChartClient::new(yahoo_config)?;

    // Shared limiter and cache behind the request gate
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let limiter = Arc::new(SlidingWindowRateLimiter::new(
        resilience_config.rate_limit.clone(),
    ));
    let cache = Arc::new(MemoryResponseCache::new());
    let gate = RequestGate::new(
        Arc::clone(&limiter),
        Arc::clone(&cache),
        RetryPolicy::new(resilience_config.retry.clone()),
        Arc::clone(&clock),
    );

    let sweeper = spawn_sweeper(
        limiter,
        cache,
        clock,
        resilience_config.sweep_interval,
        advisor_config.max_ttl(),
    );

    let state = AdvisorState {
        gate: Arc::new(gate),
        text: Arc::new(text),
        market: Arc::new(market),
        config: Arc::new(advisor_config),
    };

    // CORS configuration
    let frontend_origins: String = env_or(
        "FRONTEND_ORIGINS",
        "http://localhost:5173,http://127.0.0.1:5173".to_string(),
    );

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::RETRY_AFTER, advisor::X_CACHE]);

    // Build router
    let app = advisor_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env_or("PORT", 5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
