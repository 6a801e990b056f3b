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
use chrono::{NaiveDate, Utc};
use model::entities::investment::{self, InvestmentKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new investment position
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInvestmentRequest {
    /// Position name
    pub name: String,
    /// Asset class
    pub kind: InvestmentKind,
    /// Institution holding the position
    pub institution: Option<String>,
    /// Amount originally invested
    pub invested_amount: Decimal,
    /// Current market value
    pub current_value: Decimal,
    /// Purchase date (default: today)
    pub purchase_date: Option<NaiveDate>,
}

/// Request body for updating an investment position
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateInvestmentRequest {
    /// Position name
    pub name: Option<String>,
    /// Asset class
    pub kind: Option<InvestmentKind>,
    /// Institution holding the position
    pub institution: Option<String>,
    /// Amount originally invested
    pub invested_amount: Option<Decimal>,
    /// Current market value
    pub current_value: Option<Decimal>,
    /// Purchase date
    pub purchase_date: Option<NaiveDate>,
}

/// Investment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvestmentResponse {
    pub id: i32,
    pub name: String,
    pub kind: InvestmentKind,
    /// Display label for the asset class
    pub kind_label: String,
    pub institution: Option<String>,
    pub invested_amount: Decimal,
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
    /// `current_value - invested_amount`
    pub return_value: Decimal,
    /// Return as a percentage of the invested amount; 0 when nothing is invested
    pub return_percent: Decimal,
}

impl From<investment::Model> for InvestmentResponse {
    fn from(model: investment::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind,
            kind_label: model.kind.label().to_string(),
            institution: model.institution,
            invested_amount: model.invested_amount,
            current_value: model.current_value,
            purchase_date: model.purchase_date,
            return_value: model.current_value - model.invested_amount,
            return_percent: compute::investment::return_percent(
                model.invested_amount,
                model.current_value,
            ),
        }
    }
}

fn order_column(field: &str) -> Option<investment::Column> {
    match field {
        "id" => Some(investment::Column::Id),
        "name" => Some(investment::Column::Name),
        "kind" | "type" => Some(investment::Column::Kind),
        "institution" => Some(investment::Column::Institution),
        "invested_amount" => Some(investment::Column::InvestedAmount),
        "current_value" => Some(investment::Column::CurrentValue),
        "purchase_date" => Some(investment::Column::PurchaseDate),
        _ => None,
    }
}

fn validate_amount(value: Decimal, code: &str, what: &str) -> Result<(), ApiError> {
    if value < Decimal::ZERO {
        warn!("Rejecting negative {}: {}", what, value);
        return Err(bad_request(code, format!("{what} cannot be negative")));
    }
    Ok(())
}

/// Create a new investment position
#[utoipa::path(
    post,
    path = "/api/v1/investments",
    tag = "investments",
    request_body = CreateInvestmentRequest,
    responses(
        (status = 201, description = "Investment created successfully", body = ApiResponse<InvestmentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_investment(
    State(state): State<AppState>,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvestmentResponse>>), ApiError> {
    trace!("Entering create_investment function");
    debug!(
        "Creating investment with name: {}, invested: {}, current: {}",
        request.name, request.invested_amount, request.current_value
    );

    validate_amount(
        request.invested_amount,
        "INVALID_INVESTED_AMOUNT",
        "Invested amount",
    )?;
    validate_amount(request.current_value, "INVALID_CURRENT_VALUE", "Current value")?;

    let new_investment = investment::ActiveModel {
        name: Set(request.name.clone()),
        kind: Set(request.kind),
        institution: Set(request.institution.clone()),
        invested_amount: Set(request.invested_amount),
        current_value: Set(request.current_value),
        purchase_date: Set(request
            .purchase_date
            .unwrap_or_else(|| Utc::now().date_naive())),
        ..Default::default()
    };

    trace!("Attempting to insert new investment into database");
    match new_investment.insert(&state.db).await {
        Ok(investment_model) => {
            info!(
                "Investment created successfully with ID: {}, name: {}",
                investment_model.id, investment_model.name
            );
            state.invalidate_summaries();
            let response = ApiResponse {
                data: InvestmentResponse::from(investment_model),
                message: "Investment created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create investment '{}': {}",
                request.name, db_error
            );
            Err(internal_error(format!(
                "Failed to create investment: {db_error}"
            )))
        }
    }
}

/// Get all investment positions
#[utoipa::path(
    get,
    path = "/api/v1/investments",
    tag = "investments",
    responses(
        (status = 200, description = "Investments retrieved successfully", body = ApiResponse<Vec<InvestmentResponse>>),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_investments(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InvestmentResponse>>>, ApiError> {
    trace!("Entering list_investments function");
    debug!("Fetching investments with params: {:?}", params);

    let mut query = investment::Entity::find();
    if let Some(sort) = &params.sort {
        let (field, order) = parse_sort(sort);
        let column = order_column(field).ok_or_else(|| {
            warn!("Rejecting unknown investment sort field: {}", field);
            bad_request(
                "INVALID_SORT_FIELD",
                format!("Cannot sort investments by '{field}'"),
            )
        })?;
        query = query.order_by(column, order);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    match query.all(&state.db).await {
        Ok(investments) => {
            let investment_count = investments.len();
            debug!("Retrieved {} investments from database", investment_count);

            let investment_responses: Vec<InvestmentResponse> = investments
                .into_iter()
                .map(InvestmentResponse::from)
                .collect();

            info!("Successfully retrieved {} investments", investment_count);
            let response = ApiResponse {
                data: investment_responses,
                message: "Investments retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve investments from database: {}", db_error);
            Err(internal_error(format!(
                "Failed to retrieve investments: {db_error}"
            )))
        }
    }
}

/// Get a specific investment position by ID
#[utoipa::path(
    get,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    responses(
        (status = 200, description = "Investment retrieved successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InvestmentResponse>>, ApiError> {
    trace!(
        "Entering get_investment function for investment_id: {}",
        investment_id
    );

    match investment::Entity::find_by_id(investment_id)
        .one(&state.db)
        .await
    {
        Ok(Some(investment_model)) => {
            info!(
                "Successfully retrieved investment with ID: {}, name: {}",
                investment_model.id, investment_model.name
            );
            let response = ApiResponse {
                data: InvestmentResponse::from(investment_model),
                message: "Investment retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Investment with ID {} not found", investment_id);
            Err(not_found(format!(
                "Investment with id {investment_id} not found"
            )))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve investment with ID {}: {}",
                investment_id, db_error
            );
            Err(internal_error(format!(
                "Failed to retrieve investment: {db_error}"
            )))
        }
    }
}

/// Update an investment position
#[utoipa::path(
    put,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    request_body = UpdateInvestmentRequest,
    responses(
        (status = 200, description = "Investment updated successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateInvestmentRequest>,
) -> Result<Json<ApiResponse<InvestmentResponse>>, ApiError> {
    trace!(
        "Entering update_investment function for investment_id: {}",
        investment_id
    );

    if let Some(invested_amount) = request.invested_amount {
        validate_amount(invested_amount, "INVALID_INVESTED_AMOUNT", "Invested amount")?;
    }
    if let Some(current_value) = request.current_value {
        validate_amount(current_value, "INVALID_CURRENT_VALUE", "Current value")?;
    }

    let existing_investment = match investment::Entity::find_by_id(investment_id)
        .one(&state.db)
        .await
    {
        Ok(Some(investment)) => {
            debug!("Found existing investment: {}", investment.name);
            investment
        }
        Ok(None) => {
            warn!("Investment with ID {} not found for update", investment_id);
            return Err(not_found(format!(
                "Investment with id {investment_id} not found"
            )));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup investment with ID {} for update: {}",
                investment_id, db_error
            );
            return Err(internal_error(format!(
                "Failed to lookup investment: {db_error}"
            )));
        }
    };

    let mut investment_active: investment::ActiveModel = existing_investment.into();

    if let Some(name) = request.name {
        investment_active.name = Set(name);
    }
    if let Some(kind) = request.kind {
        investment_active.kind = Set(kind);
    }
    if let Some(institution) = request.institution {
        investment_active.institution = Set(Some(institution));
    }
    if let Some(invested_amount) = request.invested_amount {
        investment_active.invested_amount = Set(invested_amount);
    }
    if let Some(current_value) = request.current_value {
        investment_active.current_value = Set(current_value);
    }
    if let Some(purchase_date) = request.purchase_date {
        investment_active.purchase_date = Set(purchase_date);
    }

    trace!("Attempting to update investment in database");
    match investment_active.update(&state.db).await {
        Ok(updated_investment) => {
            info!("Investment with ID {} updated successfully", investment_id);
            state.invalidate_summaries();
            let response = ApiResponse {
                data: InvestmentResponse::from(updated_investment),
                message: "Investment updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update investment with ID {}: {}",
                investment_id, db_error
            );
            Err(internal_error(format!(
                "Failed to update investment: {db_error}"
            )))
        }
    }
}

/// Delete an investment position
#[utoipa::path(
    delete,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    responses(
        (status = 200, description = "Investment deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!(
        "Entering delete_investment function for investment_id: {}",
        investment_id
    );

    match investment::Entity::delete_by_id(investment_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("Investment with ID {} deleted successfully", investment_id);
                state.invalidate_summaries();
                let response = ApiResponse {
                    data: format!("Investment {investment_id} deleted"),
                    message: "Investment deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Investment with ID {} not found for deletion (no rows affected)",
                    investment_id
                );
                Err(not_found(format!(
                    "Investment with id {investment_id} not found"
                )))
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete investment with ID {}: {}",
                investment_id, db_error
            );
            Err(internal_error(format!(
                "Failed to delete investment: {db_error}"
            )))
        }
    }
}
