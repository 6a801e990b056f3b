use crate::helpers::sort::parse_sort;
use crate::schemas::{
    bad_request, internal_error, not_found, ApiError, ApiResponse, AppState, ErrorResponse,
    ListQuery,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use model::entities::account::{self, AccountType};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name
    pub name: String,
    /// Account type (checking, savings or wallet)
    pub account_type: AccountType,
    /// Bank holding the account
    pub bank: Option<String>,
    /// Opening balance; negative values are allowed
    pub balance: Decimal,
    /// Accent color (default: "blue")
    pub color: Option<String>,
}

/// Request body for updating an account
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAccountRequest {
    /// Account name
    pub name: Option<String>,
    /// Account type (checking, savings or wallet)
    pub account_type: Option<AccountType>,
    /// Bank holding the account
    pub bank: Option<String>,
    /// Current balance
    pub balance: Option<Decimal>,
    /// Accent color
    pub color: Option<String>,
}

/// Account response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
    pub account_type: AccountType,
    /// Display label for the account type
    pub type_label: String,
    pub bank: Option<String>,
    pub balance: Decimal,
    pub color: String,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            account_type: model.account_type,
            type_label: model.account_type.label().to_string(),
            bank: model.bank,
            balance: model.balance,
            color: model.color,
        }
    }
}

fn order_column(field: &str) -> Option<account::Column> {
    match field {
        "id" => Some(account::Column::Id),
        "name" => Some(account::Column::Name),
        "account_type" | "type" => Some(account::Column::AccountType),
        "bank" => Some(account::Column::Bank),
        "balance" => Some(account::Column::Balance),
        _ => None,
    }
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    trace!("Entering create_account function");
    debug!(
        "Creating account with name: {}, balance: {}",
        request.name, request.balance
    );

    let new_account = account::ActiveModel {
        name: Set(request.name.clone()),
        account_type: Set(request.account_type),
        bank: Set(request.bank.clone()),
        balance: Set(request.balance),
        color: Set(request.color.clone().unwrap_or_else(|| "blue".to_string())),
        ..Default::default()
    };

    trace!("Attempting to insert new account into database");
    match new_account.insert(&state.db).await {
        Ok(account_model) => {
            info!(
                "Account created successfully with ID: {}, name: {}",
                account_model.id, account_model.name
            );
            state.invalidate_summaries();
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create account '{}': {}", request.name, db_error);
            Err(internal_error(format!(
                "Failed to create account: {db_error}"
            )))
        }
    }
}

/// Get all accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Accounts retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_accounts(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    trace!("Entering list_accounts function");
    debug!("Fetching accounts with params: {:?}", params);

    let mut query = account::Entity::find();
    if let Some(sort) = &params.sort {
        let (field, order) = parse_sort(sort);
        let column = order_column(field).ok_or_else(|| {
            warn!("Rejecting unknown account sort field: {}", field);
            bad_request(
                "INVALID_SORT_FIELD",
                format!("Cannot sort accounts by '{field}'"),
            )
        })?;
        query = query.order_by(column, order);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    match query.all(&state.db).await {
        Ok(accounts) => {
            let account_count = accounts.len();
            debug!("Retrieved {} accounts from database", account_count);

            let account_responses: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();

            info!("Successfully retrieved {} accounts", account_count);
            let response = ApiResponse {
                data: account_responses,
                message: "Accounts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve accounts from database: {}", db_error);
            Err(internal_error(format!(
                "Failed to retrieve accounts: {db_error}"
            )))
        }
    }
}

/// Get a specific account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    trace!("Entering get_account function for account_id: {}", account_id);

    match account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account_model)) => {
            info!(
                "Successfully retrieved account with ID: {}, name: {}",
                account_model.id, account_model.name
            );
            let response = ApiResponse {
                data: AccountResponse::from(account_model),
                message: "Account retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Account with ID {} not found", account_id);
            Err(not_found(format!("Account with id {account_id} not found")))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve account with ID {}: {}",
                account_id, db_error
            );
            Err(internal_error(format!(
                "Failed to retrieve account: {db_error}"
            )))
        }
    }
}

/// Update an account
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<AccountResponse>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    trace!("Entering update_account function for account_id: {}", account_id);

    // First, find the existing account
    let existing_account = match account::Entity::find_by_id(account_id).one(&state.db).await {
        Ok(Some(account)) => {
            debug!("Found existing account: {}", account.name);
            account
        }
        Ok(None) => {
            warn!("Account with ID {} not found for update", account_id);
            return Err(not_found(format!("Account with id {account_id} not found")));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup account with ID {} for update: {}",
                account_id, db_error
            );
            return Err(internal_error(format!(
                "Failed to lookup account: {db_error}"
            )));
        }
    };

    // Create active model for update
    let mut account_active: account::ActiveModel = existing_account.into();
    let mut updated_fields = Vec::new();

    // Update only provided fields
    if let Some(name) = request.name {
        account_active.name = Set(name.clone());
        updated_fields.push(format!("name: {name}"));
    }
    if let Some(account_type) = request.account_type {
        account_active.account_type = Set(account_type);
        updated_fields.push(format!("account_type: {account_type:?}"));
    }
    if let Some(bank) = request.bank {
        account_active.bank = Set(Some(bank.clone()));
        updated_fields.push(format!("bank: {bank}"));
    }
    if let Some(balance) = request.balance {
        account_active.balance = Set(balance);
        updated_fields.push(format!("balance: {balance}"));
    }
    if let Some(color) = request.color {
        account_active.color = Set(color.clone());
        updated_fields.push(format!("color: {color}"));
    }

    if updated_fields.is_empty() {
        debug!("No fields to update for account ID: {}", account_id);
    } else {
        debug!("Updating fields: {}", updated_fields.join(", "));
    }

    trace!("Attempting to update account in database");
    match account_active.update(&state.db).await {
        Ok(updated_account) => {
            info!("Account with ID {} updated successfully", account_id);
            state.invalidate_summaries();
            let response = ApiResponse {
                data: AccountResponse::from(updated_account),
                message: "Account updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update account with ID {}: {}",
                account_id, db_error
            );
            Err(internal_error(format!(
                "Failed to update account: {db_error}"
            )))
        }
    }
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_account function for account_id: {}", account_id);

    match account::Entity::delete_by_id(account_id).exec(&state.db).await {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("Account with ID {} deleted successfully", account_id);
                state.invalidate_summaries();
                let response = ApiResponse {
                    data: format!("Account {account_id} deleted"),
                    message: "Account deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Account with ID {} not found for deletion (no rows affected)",
                    account_id
                );
                Err(not_found(format!("Account with id {account_id} not found")))
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete account with ID {}: {}",
                account_id, db_error
            );
            Err(internal_error(format!(
                "Failed to delete account: {db_error}"
            )))
        }
    }
}
