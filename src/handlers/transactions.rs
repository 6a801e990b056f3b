use crate::helpers::sort::parse_sort;
use crate::schemas::{
    bad_request, internal_error, not_found, ApiError, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use compute::transaction::EntryFilter;
use model::entities::transaction::{self, Category, TransactionKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new ledger entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Free-text description
    pub description: String,
    /// Unsigned amount; the direction comes from `kind`
    pub amount: Decimal,
    /// Entry direction (income, expense or transfer)
    pub kind: TransactionKind,
    /// Spending/earning category
    pub category: Category,
    /// Date the entry was booked
    pub date: NaiveDate,
}

/// Request body for updating a ledger entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateTransactionRequest {
    /// Free-text description
    pub description: Option<String>,
    /// Unsigned amount; the direction comes from `kind`
    pub amount: Option<Decimal>,
    /// Entry direction (income, expense or transfer)
    pub kind: Option<TransactionKind>,
    /// Spending/earning category
    pub category: Option<Category>,
    /// Date the entry was booked
    pub date: Option<NaiveDate>,
}

/// Query parameters for the transaction list: sorting plus the pure filters
/// of the transactions page (substring search, kind, category)
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionListQuery {
    /// Sort key: a field name, prefixed with '-' for descending order
    pub sort: Option<String>,
    /// Maximum number of records to return
    pub limit: Option<u64>,
    /// Case-insensitive substring match on the description
    pub search: Option<String>,
    /// Only entries of this kind
    pub kind: Option<TransactionKind>,
    /// Only entries of this category
    pub category: Option<Category>,
}

/// Ledger entry response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    /// Display label for the kind
    pub kind_label: String,
    pub category: Category,
    /// Display label for the category
    pub category_label: String,
    pub date: NaiveDate,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount: model.amount,
            kind: model.kind,
            kind_label: model.kind.label().to_string(),
            category: model.category,
            category_label: model.category.label().to_string(),
            date: model.date,
        }
    }
}

fn order_column(field: &str) -> Option<transaction::Column> {
    match field {
        "id" => Some(transaction::Column::Id),
        "description" => Some(transaction::Column::Description),
        "amount" => Some(transaction::Column::Amount),
        "kind" | "type" => Some(transaction::Column::Kind),
        "category" => Some(transaction::Column::Category),
        "date" => Some(transaction::Column::Date),
        _ => None,
    }
}

/// Create a new ledger entry
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), ApiError> {
    trace!("Entering create_transaction function");
    debug!(
        "Creating transaction with description: {}, amount: {}",
        request.description, request.amount
    );

    // Amounts are unsigned magnitudes; the kind carries the direction.
    if request.amount < Decimal::ZERO {
        warn!("Rejecting negative transaction amount: {}", request.amount);
        return Err(bad_request(
            "INVALID_AMOUNT",
            "Amount cannot be negative; use kind=expense for outgoing entries",
        ));
    }

    let new_transaction = transaction::ActiveModel {
        description: Set(request.description.clone()),
        amount: Set(request.amount),
        kind: Set(request.kind),
        category: Set(request.category),
        date: Set(request.date),
        ..Default::default()
    };

    trace!("Attempting to insert new transaction into database");
    match new_transaction.insert(&state.db).await {
        Ok(transaction_model) => {
            info!(
                "Transaction created successfully with ID: {}, description: {}, amount: {}",
                transaction_model.id, transaction_model.description, transaction_model.amount
            );
            state.invalidate_summaries();
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create transaction '{}': {}",
                request.description, db_error
            );
            Err(internal_error(format!(
                "Failed to create transaction: {db_error}"
            )))
        }
    }
}

/// Get all ledger entries
///
/// Sorting and the limit run in the database; the search/kind/category
/// filters are applied to the fetched page, mirroring how the dashboard
/// filters the list it already holds.
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_transactions(
    Query(params): Query<TransactionListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, ApiError> {
    trace!("Entering list_transactions function");
    debug!("Fetching transactions with params: {:?}", params);

    let mut query = transaction::Entity::find();
    if let Some(sort) = &params.sort {
        let (field, order) = parse_sort(sort);
        let column = order_column(field).ok_or_else(|| {
            warn!("Rejecting unknown transaction sort field: {}", field);
            bad_request(
                "INVALID_SORT_FIELD",
                format!("Cannot sort transactions by '{field}'"),
            )
        })?;
        query = query.order_by(column, order);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    let entries = match query.all(&state.db).await {
        Ok(entries) => entries,
        Err(db_error) => {
            error!("Failed to retrieve transactions from database: {}", db_error);
            return Err(internal_error(format!(
                "Failed to retrieve transactions: {db_error}"
            )));
        }
    };

    let fetched_count = entries.len();
    let filter = EntryFilter {
        search: params.search.clone(),
        kind: params.kind,
        category: params.category,
    };
    let filtered = filter.apply(entries);

    debug!(
        "Retrieved {} transactions, {} after filtering",
        fetched_count,
        filtered.len()
    );

    let transaction_responses: Vec<TransactionResponse> = filtered
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    info!(
        "Successfully retrieved {} transactions",
        transaction_responses.len()
    );
    let response = ApiResponse {
        data: transaction_responses,
        message: "Transactions retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a specific ledger entry by ID
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction retrieved successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    trace!(
        "Entering get_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction_model)) => {
            info!(
                "Successfully retrieved transaction with ID: {}, description: {}",
                transaction_model.id, transaction_model.description
            );
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Transaction with ID {} not found", transaction_id);
            Err(not_found(format!(
                "Transaction with id {transaction_id} not found"
            )))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(internal_error(format!(
                "Failed to retrieve transaction: {db_error}"
            )))
        }
    }
}

/// Update a ledger entry
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    trace!(
        "Entering update_transaction function for transaction_id: {}",
        transaction_id
    );

    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            warn!("Rejecting negative transaction amount: {}", amount);
            return Err(bad_request(
                "INVALID_AMOUNT",
                "Amount cannot be negative; use kind=expense for outgoing entries",
            ));
        }
    }

    let existing_transaction = match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction)) => {
            debug!("Found existing transaction: {}", transaction.description);
            transaction
        }
        Ok(None) => {
            warn!("Transaction with ID {} not found for update", transaction_id);
            return Err(not_found(format!(
                "Transaction with id {transaction_id} not found"
            )));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup transaction with ID {} for update: {}",
                transaction_id, db_error
            );
            return Err(internal_error(format!(
                "Failed to lookup transaction: {db_error}"
            )));
        }
    };

    let mut transaction_active: transaction::ActiveModel = existing_transaction.into();

    if let Some(description) = request.description {
        transaction_active.description = Set(description);
    }
    if let Some(amount) = request.amount {
        transaction_active.amount = Set(amount);
    }
    if let Some(kind) = request.kind {
        transaction_active.kind = Set(kind);
    }
    if let Some(category) = request.category {
        transaction_active.category = Set(category);
    }
    if let Some(date) = request.date {
        transaction_active.date = Set(date);
    }

    trace!("Attempting to update transaction in database");
    match transaction_active.update(&state.db).await {
        Ok(updated_transaction) => {
            info!("Transaction with ID {} updated successfully", transaction_id);
            state.invalidate_summaries();
            let response = ApiResponse {
                data: TransactionResponse::from(updated_transaction),
                message: "Transaction updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(internal_error(format!(
                "Failed to update transaction: {db_error}"
            )))
        }
    }
}

/// Delete a ledger entry
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!(
        "Entering delete_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::delete_by_id(transaction_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("Transaction with ID {} deleted successfully", transaction_id);
                state.invalidate_summaries();
                let response = ApiResponse {
                    data: format!("Transaction {transaction_id} deleted"),
                    message: "Transaction deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Transaction with ID {} not found for deletion (no rows affected)",
                    transaction_id
                );
                Err(not_found(format!(
                    "Transaction with id {transaction_id} not found"
                )))
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(internal_error(format!(
                "Failed to delete transaction: {db_error}"
            )))
        }
    }
}
