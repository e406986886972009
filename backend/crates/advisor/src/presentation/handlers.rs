//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::ClientKey;
use resilience::Served;
use serde_json::Value;

use crate::application::AdvisorGate;
use crate::application::analyze_portfolio::AnalyzePortfolioUseCase;
use crate::application::chat::ChatUseCase;
use crate::application::config::AdvisorConfig;
use crate::application::convert_currency::ConvertCurrencyUseCase;
use crate::application::expense_advice::ExpenseAdviceUseCase;
use crate::application::get_history::GetHistoryUseCase;
use crate::application::get_quotes::GetQuotesUseCase;
use crate::application::goal_advice::GoalAdviceUseCase;
use crate::application::market_news::MarketNewsUseCase;
use crate::domain::upstream::{MarketData, TextGenerator};
use crate::error::AdvisorResult;
use crate::presentation::dto::{
    AnalyzePortfolioRequest, ChatRequest, ConvertQuery, ExpenseAdviceRequest, GoalAdviceRequest,
    HealthResponse, HistoryQuery, HomeResponse, NewsQuery, QuotesQuery,
};

/// Response header naming where the body came from (`HIT`, `MISS` or `FALLBACK`)
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Shared state for advisor handlers
pub struct AdvisorState<T, M> {
    pub gate: Arc<AdvisorGate>,
    pub text: Arc<T>,
    pub market: Arc<M>,
    pub config: Arc<AdvisorConfig>,
}

// Manual impl: the upstream types themselves need not be Clone
impl<T, M> Clone for AdvisorState<T, M> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            text: Arc::clone(&self.text),
            market: Arc::clone(&self.market),
            config: Arc::clone(&self.config),
        }
    }
}

fn served_response(served: Served<Value>) -> Response {
    let mut response = Json(served.value).into_response();
    response.headers_mut().insert(
        X_CACHE,
        HeaderValue::from_static(served.source.as_header_value()),
    );
    response
}

/// GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Hello from the finance advisor backend!",
    })
}

/// GET /api/health
pub async fn health<T, M>(State(state): State<AdvisorState<T, M>>) -> Json<HealthResponse>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "ok",
        cache_entries: state.gate.cache().len(),
        tracked_clients: state.gate.limiter().tracked_clients(),
    })
}

/// GET /api/quotes?symbols=A,B
pub async fn get_quotes<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    query: Result<Query<QuotesQuery>, QueryRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Query(query) = query?;

    let use_case = GetQuotesUseCase::new(state.gate, state.market, state.config);
    let served = use_case.execute(&client, &query.symbols).await?;

    Ok(served_response(served))
}

/// GET /api/history?symbol=X&period=1mo&interval=1d
pub async fn get_history<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Query(query) = query?;

    let use_case = GetHistoryUseCase::new(state.gate, state.market, state.config);
    let served = use_case.execute(&client, query.into()).await?;

    Ok(served_response(served))
}

/// GET /api/convert?amount=100&base=USD&quote=INR
pub async fn convert<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Query(query) = query?;

    let use_case = ConvertCurrencyUseCase::new(state.gate, state.market, state.config);
    let served = use_case.execute(&client, query.into()).await?;

    Ok(served_response(served))
}

/// POST /api/ai/analyze-portfolio
pub async fn analyze_portfolio<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    body: Result<Json<AnalyzePortfolioRequest>, JsonRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = AnalyzePortfolioUseCase::new(state.gate, state.text, state.config);
    let served = use_case.execute(&client, req.portfolio).await?;

    Ok(served_response(served))
}

/// POST /api/ai/goal-advice
pub async fn goal_advice<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    body: Result<Json<GoalAdviceRequest>, JsonRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = GoalAdviceUseCase::new(state.gate, state.text, state.config);
    let served = use_case.execute(&client, req.goal).await?;

    Ok(served_response(served))
}

/// POST /api/ai/expense-advice
pub async fn expense_advice<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    body: Result<Json<ExpenseAdviceRequest>, JsonRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = ExpenseAdviceUseCase::new(state.gate, state.text, state.config);
    let served = use_case.execute(&client, req.into()).await?;

    Ok(served_response(served))
}

/// GET /api/ai/news?topic=...
pub async fn market_news<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Query(query) = query?;

    let use_case = MarketNewsUseCase::new(state.gate, state.text, state.config);
    let served = use_case.execute(&client, query.topic.as_deref()).await?;

    Ok(served_response(served))
}

/// POST /api/ai/chat
pub async fn chat<T, M>(
    State(state): State<AdvisorState<T, M>>,
    client: ClientKey,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AdvisorResult<Response>
where
    T: TextGenerator + Send + Sync + 'static,
    M: MarketData + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = ChatUseCase::new(state.gate, state.text, state.config);
    let served = use_case.execute(&client, req.into()).await?;

    Ok(served_response(served))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::not_found("No such endpoint")
}
