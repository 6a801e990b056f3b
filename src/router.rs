use crate::handlers::{
    accounts::{create_account, delete_account, get_account, list_accounts, update_account},
    cards::{create_card, delete_card, get_card, list_cards, update_card},
    health::health_check,
    investments::{
        create_investment, delete_investment, get_investment, list_investments, update_investment,
    },
    summary::{
        get_credit_summary, get_dashboard_summary, get_monthly_series, get_portfolio_summary,
    },
    transactions::{
        create_transaction, delete_transaction, get_transaction, list_transactions,
        update_transaction,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account CRUD routes
        .route("/api/v1/accounts", post(create_account))
        .route("/api/v1/accounts", get(list_accounts))
        .route("/api/v1/accounts/:account_id", get(get_account))
        .route("/api/v1/accounts/:account_id", put(update_account))
        .route("/api/v1/accounts/:account_id", delete(delete_account))
        // Credit card CRUD routes
        .route("/api/v1/cards", post(create_card))
        .route("/api/v1/cards", get(list_cards))
        .route("/api/v1/cards/:card_id", get(get_card))
        .route("/api/v1/cards/:card_id", put(update_card))
        .route("/api/v1/cards/:card_id", delete(delete_card))
        // Investment CRUD routes
        .route("/api/v1/investments", post(create_investment))
        .route("/api/v1/investments", get(list_investments))
        .route("/api/v1/investments/:investment_id", get(get_investment))
        .route("/api/v1/investments/:investment_id", put(update_investment))
        .route(
            "/api/v1/investments/:investment_id",
            delete(delete_investment),
        )
        // Ledger entry CRUD routes
        .route("/api/v1/transactions", post(create_transaction))
        .route("/api/v1/transactions", get(list_transactions))
        .route("/api/v1/transactions/:transaction_id", get(get_transaction))
        .route(
            "/api/v1/transactions/:transaction_id",
            put(update_transaction),
        )
        .route(
            "/api/v1/transactions/:transaction_id",
            delete(delete_transaction),
        )
        // Derived dashboard metrics
        .route("/api/v1/summary", get(get_dashboard_summary))
        .route("/api/v1/summary/cards", get(get_credit_summary))
        .route("/api/v1/summary/investments", get(get_portfolio_summary))
        .route("/api/v1/summary/monthly", get(get_monthly_series))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
