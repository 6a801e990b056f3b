use axum::http::StatusCode;
use axum::response::Json;
use common::{
    AllocationSlice, CardUtilization, CreditSummary, DashboardSummary, MonthlyFlow,
    MonthlyFlowSeries, PortfolioSummary,
};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for derived summaries
    pub cache: Cache<String, CachedData>,
}

impl AppState {
    /// Drops every cached summary. Called after any entity mutation so the
    /// next summary request recomputes from fresh entity lists.
    pub fn invalidate_summaries(&self) {
        self.cache.invalidate_all();
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Summary(DashboardSummary),
    Credit(CreditSummary),
    Portfolio(PortfolioSummary),
    Monthly(MonthlyFlowSeries),
}

/// Query parameters accepted by the list endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    /// Sort key: a field name, prefixed with '-' for descending order
    /// (e.g. "-date")
    pub sort: Option<String>,
    /// Maximum number of records to return
    pub limit: Option<u64>,
}

/// Query parameters selecting the month summarized by the summary endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct PeriodQuery {
    /// Year (e.g. 2025); defaults to the current year
    pub year: Option<i32>,
    /// Month (1-12); defaults to the current month
    pub month: Option<u32>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Error type returned by handlers: a status code plus a coded JSON body.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn bad_request(code: &str, error: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn not_found(error: impl Into<String>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: error.into(),
            code: "NOT_FOUND".to_string(),
            success: false,
        }),
    )
}

pub fn internal_error(error: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.into(),
            code: "INTERNAL_ERROR".to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::create_account,
        crate::handlers::accounts::list_accounts,
        crate::handlers::accounts::get_account,
        crate::handlers::accounts::update_account,
        crate::handlers::accounts::delete_account,
        crate::handlers::cards::create_card,
        crate::handlers::cards::list_cards,
        crate::handlers::cards::get_card,
        crate::handlers::cards::update_card,
        crate::handlers::cards::delete_card,
        crate::handlers::investments::create_investment,
        crate::handlers::investments::list_investments,
        crate::handlers::investments::get_investment,
        crate::handlers::investments::update_investment,
        crate::handlers::investments::delete_investment,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::summary::get_dashboard_summary,
        crate::handlers::summary::get_credit_summary,
        crate::handlers::summary::get_portfolio_summary,
        crate::handlers::summary::get_monthly_series,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::accounts::AccountResponse>,
            ApiResponse<crate::handlers::cards::CardResponse>,
            ApiResponse<crate::handlers::investments::InvestmentResponse>,
            ApiResponse<crate::handlers::transactions::TransactionResponse>,
            ApiResponse<DashboardSummary>,
            ApiResponse<CreditSummary>,
            ApiResponse<PortfolioSummary>,
            ApiResponse<MonthlyFlowSeries>,
            ErrorResponse,
            HealthResponse,
            ListQuery,
            PeriodQuery,
            crate::handlers::accounts::CreateAccountRequest,
            crate::handlers::accounts::UpdateAccountRequest,
            crate::handlers::accounts::AccountResponse,
            crate::handlers::cards::CreateCardRequest,
            crate::handlers::cards::UpdateCardRequest,
            crate::handlers::cards::CardResponse,
            crate::handlers::investments::CreateInvestmentRequest,
            crate::handlers::investments::UpdateInvestmentRequest,
            crate::handlers::investments::InvestmentResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::UpdateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::transactions::TransactionListQuery,
            model::entities::account::AccountType,
            model::entities::investment::InvestmentKind,
            model::entities::transaction::TransactionKind,
            model::entities::transaction::Category,
            DashboardSummary,
            CreditSummary,
            CardUtilization,
            PortfolioSummary,
            AllocationSlice,
            MonthlyFlow,
            MonthlyFlowSeries,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Account CRUD endpoints"),
        (name = "cards", description = "Credit card CRUD endpoints"),
        (name = "investments", description = "Investment CRUD endpoints"),
        (name = "transactions", description = "Ledger entry CRUD endpoints"),
        (name = "summary", description = "Derived dashboard metrics"),
    ),
    info(
        title = "Finboard API",
        description = "Personal finance dashboard API - accounts, cards, investments and a flat transaction ledger with derived dashboard metrics",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
