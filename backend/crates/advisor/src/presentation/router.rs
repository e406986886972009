//! Advisor Router

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::upstream::{MarketData, TextGenerator};
use crate::presentation::handlers::{self, AdvisorState};

/// Create the advisor router for any upstream implementation
pub fn advisor_router<T, M>(state: AdvisorState<T, M>) -> Router
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/", get(handlers::home))
        .route("/api/health", get(handlers::health::<T, M>))
        .route("/api/quotes", get(handlers::get_quotes::<T, M>))
        .route("/api/history", get(handlers::get_history::<T, M>))
        .route("/api/convert", get(handlers::convert::<T, M>))
        .route(
            "/api/ai/analyze-portfolio",
            post(handlers::analyze_portfolio::<T, M>),
        )
        .route("/api/ai/goal-advice", post(handlers::goal_advice::<T, M>))
        .route(
            "/api/ai/expense-advice",
            post(handlers::expense_advice::<T, M>),
        )
        .route("/api/ai/news", get(handlers::market_news::<T, M>))
        .route("/api/ai/chat", post(handlers::chat::<T, M>))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
