use crate::schemas::{
    bad_request, internal_error, ApiError, ApiResponse, AppState, CachedData, ErrorResponse,
    PeriodQuery,
};
use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{Datelike, Utc};
use common::{CreditSummary, DashboardSummary, MonthlyFlowSeries, PortfolioSummary};
use model::entities::{account, credit_card, investment, transaction};
use sea_orm::EntityTrait;
use tracing::{debug, error, instrument, trace};

/// Number of months covered by the income/expense chart.
const CHART_MONTHS: usize = 6;

/// Resolves the month a summary should cover: the query parameters when
/// given, otherwise the current calendar month at evaluation time.
fn resolve_period(query: &PeriodQuery) -> (i32, u32) {
    let today = Utc::now().date_naive();
    (
        query.year.unwrap_or_else(|| today.year()),
        query.month.unwrap_or_else(|| today.month()),
    )
}

async fn fetch_all<E>(state: &AppState, what: &str) -> Result<Vec<E::Model>, ApiError>
where
    E: EntityTrait,
{
    E::find().all(&state.db).await.map_err(|db_error| {
        error!("Failed to retrieve {} from database: {}", what, db_error);
        internal_error(format!("Failed to retrieve {what}: {db_error}"))
    })
}

/// Get the dashboard overview
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "summary",
    responses(
        (status = 200, description = "Dashboard summary computed successfully", body = ApiResponse<DashboardSummary>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard_summary(
    Query(query): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    trace!("Entering get_dashboard_summary function");

    // Create cache key
    let cache_key = format!("summary_{:?}", query);

    // Check cache first
    if let Some(CachedData::Summary(summary)) = state.cache.get(&cache_key).await {
        debug!("Serving dashboard summary from cache");
        let response = ApiResponse {
            data: summary,
            message: "Dashboard summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let accounts = fetch_all::<account::Entity>(&state, "accounts").await?;
    let cards = fetch_all::<credit_card::Entity>(&state, "cards").await?;
    let investments = fetch_all::<investment::Entity>(&state, "investments").await?;
    let entries = fetch_all::<transaction::Entity>(&state, "transactions").await?;

    let (year, month) = resolve_period(&query);
    let summary = compute::dashboard_summary(&accounts, &cards, &investments, &entries, year, month)
        .map_err(|e| bad_request("INVALID_PERIOD", e.to_string()))?;

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Summary(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Dashboard summary computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get credit totals and per-card utilization
#[utoipa::path(
    get,
    path = "/api/v1/summary/cards",
    tag = "summary",
    responses(
        (status = 200, description = "Credit summary computed successfully", body = ApiResponse<CreditSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_credit_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CreditSummary>>, ApiError> {
    trace!("Entering get_credit_summary function");

    let cache_key = "credit_summary".to_string();

    if let Some(CachedData::Credit(summary)) = state.cache.get(&cache_key).await {
        debug!("Serving credit summary from cache");
        let response = ApiResponse {
            data: summary,
            message: "Credit summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let cards = fetch_all::<credit_card::Entity>(&state, "cards").await?;
    let summary = compute::card::credit_summary(&cards);

    state
        .cache
        .insert(cache_key, CachedData::Credit(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Credit summary computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get portfolio totals and the allocation breakdown
#[utoipa::path(
    get,
    path = "/api/v1/summary/investments",
    tag = "summary",
    responses(
        (status = 200, description = "Portfolio summary computed successfully", body = ApiResponse<PortfolioSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_portfolio_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PortfolioSummary>>, ApiError> {
    trace!("Entering get_portfolio_summary function");

    let cache_key = "portfolio_summary".to_string();

    if let Some(CachedData::Portfolio(summary)) = state.cache.get(&cache_key).await {
        debug!("Serving portfolio summary from cache");
        let response = ApiResponse {
            data: summary,
            message: "Portfolio summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let investments = fetch_all::<investment::Entity>(&state, "investments").await?;
    let summary = compute::investment::portfolio_summary(&investments);

    state
        .cache
        .insert(cache_key, CachedData::Portfolio(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Portfolio summary computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get the trailing six-month income/expense series
#[utoipa::path(
    get,
    path = "/api/v1/summary/monthly",
    tag = "summary",
    responses(
        (status = 200, description = "Monthly series computed successfully", body = ApiResponse<MonthlyFlowSeries>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly_series(
    Query(query): Query<PeriodQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthlyFlowSeries>>, ApiError> {
    trace!("Entering get_monthly_series function");

    let cache_key = format!("monthly_{:?}", query);

    if let Some(CachedData::Monthly(series)) = state.cache.get(&cache_key).await {
        debug!("Serving monthly series from cache");
        let response = ApiResponse {
            data: series,
            message: "Monthly series retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let entries = fetch_all::<transaction::Entity>(&state, "transactions").await?;

    let (year, month) = resolve_period(&query);
    let series = compute::transaction::trailing_flows(&entries, year, month, CHART_MONTHS)
        .map_err(|e| bad_request("INVALID_PERIOD", e.to_string()))?;

    state
        .cache
        .insert(cache_key, CachedData::Monthly(series.clone()))
        .await;

    let response = ApiResponse {
        data: series,
        message: "Monthly series computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
