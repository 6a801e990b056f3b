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
use model::entities::credit_card;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new credit card
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCardRequest {
    /// Card name
    pub name: String,
    /// Issuing bank
    pub bank: String,
    /// Total credit limit
    pub limit: Decimal,
    /// Amount already on the open bill (default: 0)
    pub current_bill: Option<Decimal>,
    /// Day of the month the bill falls due (1-31)
    pub due_day: Option<i16>,
    /// Day of the month the bill closes (1-31)
    pub closing_day: Option<i16>,
    /// Card face color (default: "black")
    pub color: Option<String>,
}

/// Request body for updating a credit card
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCardRequest {
    /// Card name
    pub name: Option<String>,
    /// Issuing bank
    pub bank: Option<String>,
    /// Total credit limit
    pub limit: Option<Decimal>,
    /// Amount already on the open bill
    pub current_bill: Option<Decimal>,
    /// Day of the month the bill falls due (1-31)
    pub due_day: Option<i16>,
    /// Day of the month the bill closes (1-31)
    pub closing_day: Option<i16>,
    /// Card face color
    pub color: Option<String>,
}

/// Credit card response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub id: i32,
    pub name: String,
    pub bank: String,
    pub limit: Decimal,
    pub current_bill: Decimal,
    pub due_day: Option<i16>,
    pub closing_day: Option<i16>,
    pub color: String,
    /// `current_bill / limit * 100`; 0 when the limit is 0
    pub utilization: Decimal,
}

impl From<credit_card::Model> for CardResponse {
    fn from(model: credit_card::Model) -> Self {
        let utilization = compute::card::utilization(&model);
        Self {
            id: model.id,
            name: model.name,
            bank: model.bank,
            limit: model.credit_limit,
            current_bill: model.current_bill,
            due_day: model.due_day,
            closing_day: model.closing_day,
            color: model.color,
            utilization,
        }
    }
}

fn order_column(field: &str) -> Option<credit_card::Column> {
    match field {
        "id" => Some(credit_card::Column::Id),
        "name" => Some(credit_card::Column::Name),
        "bank" => Some(credit_card::Column::Bank),
        "limit" | "credit_limit" => Some(credit_card::Column::CreditLimit),
        "current_bill" => Some(credit_card::Column::CurrentBill),
        "due_day" => Some(credit_card::Column::DueDay),
        "closing_day" => Some(credit_card::Column::ClosingDay),
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

fn validate_day(day: Option<i16>, code: &str, what: &str) -> Result<(), ApiError> {
    if let Some(day) = day {
        if !(1..=31).contains(&day) {
            warn!("Rejecting out-of-range {}: {}", what, day);
            return Err(bad_request(
                code,
                format!("{what} must be a day of the month (1-31), got {day}"),
            ));
        }
    }
    Ok(())
}

/// Create a new credit card
#[utoipa::path(
    post,
    path = "/api/v1/cards",
    tag = "cards",
    request_body = CreateCardRequest,
    responses(
        (status = 201, description = "Card created successfully", body = ApiResponse<CardResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_card(
    State(state): State<AppState>,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CardResponse>>), ApiError> {
    trace!("Entering create_card function");
    debug!(
        "Creating card with name: {}, bank: {}, limit: {}",
        request.name, request.bank, request.limit
    );

    validate_amount(request.limit, "INVALID_LIMIT", "Credit limit")?;
    let current_bill = request.current_bill.unwrap_or(Decimal::ZERO);
    validate_amount(current_bill, "INVALID_CURRENT_BILL", "Current bill")?;
    validate_day(request.due_day, "INVALID_DUE_DAY", "Due day")?;
    validate_day(request.closing_day, "INVALID_CLOSING_DAY", "Closing day")?;

    let new_card = credit_card::ActiveModel {
        name: Set(request.name.clone()),
        bank: Set(request.bank.clone()),
        credit_limit: Set(request.limit),
        current_bill: Set(current_bill),
        due_day: Set(request.due_day),
        closing_day: Set(request.closing_day),
        color: Set(request.color.clone().unwrap_or_else(|| "black".to_string())),
        ..Default::default()
    };

    trace!("Attempting to insert new card into database");
    match new_card.insert(&state.db).await {
        Ok(card_model) => {
            info!(
                "Card created successfully with ID: {}, name: {}",
                card_model.id, card_model.name
            );
            state.invalidate_summaries();
            let response = ApiResponse {
                data: CardResponse::from(card_model),
                message: "Card created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create card '{}': {}", request.name, db_error);
            Err(internal_error(format!("Failed to create card: {db_error}")))
        }
    }
}

/// Get all credit cards
#[utoipa::path(
    get,
    path = "/api/v1/cards",
    tag = "cards",
    responses(
        (status = 200, description = "Cards retrieved successfully", body = ApiResponse<Vec<CardResponse>>),
        (status = 400, description = "Invalid sort field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_cards(
    Query(params): Query<ListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CardResponse>>>, ApiError> {
    trace!("Entering list_cards function");
    debug!("Fetching cards with params: {:?}", params);

    let mut query = credit_card::Entity::find();
    if let Some(sort) = &params.sort {
        let (field, order) = parse_sort(sort);
        let column = order_column(field).ok_or_else(|| {
            warn!("Rejecting unknown card sort field: {}", field);
            bad_request(
                "INVALID_SORT_FIELD",
                format!("Cannot sort cards by '{field}'"),
            )
        })?;
        query = query.order_by(column, order);
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    match query.all(&state.db).await {
        Ok(cards) => {
            let card_count = cards.len();
            debug!("Retrieved {} cards from database", card_count);

            let card_responses: Vec<CardResponse> =
                cards.into_iter().map(CardResponse::from).collect();

            info!("Successfully retrieved {} cards", card_count);
            let response = ApiResponse {
                data: card_responses,
                message: "Cards retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve cards from database: {}", db_error);
            Err(internal_error(format!(
                "Failed to retrieve cards: {db_error}"
            )))
        }
    }
}

/// Get a specific credit card by ID
#[utoipa::path(
    get,
    path = "/api/v1/cards/{card_id}",
    tag = "cards",
    params(
        ("card_id" = i32, Path, description = "Card ID"),
    ),
    responses(
        (status = 200, description = "Card retrieved successfully", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_card(
    Path(card_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CardResponse>>, ApiError> {
    trace!("Entering get_card function for card_id: {}", card_id);

    match credit_card::Entity::find_by_id(card_id).one(&state.db).await {
        Ok(Some(card_model)) => {
            info!(
                "Successfully retrieved card with ID: {}, name: {}",
                card_model.id, card_model.name
            );
            let response = ApiResponse {
                data: CardResponse::from(card_model),
                message: "Card retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Card with ID {} not found", card_id);
            Err(not_found(format!("Card with id {card_id} not found")))
        }
        Err(db_error) => {
            error!("Failed to retrieve card with ID {}: {}", card_id, db_error);
            Err(internal_error(format!(
                "Failed to retrieve card: {db_error}"
            )))
        }
    }
}

/// Update a credit card
#[utoipa::path(
    put,
    path = "/api/v1/cards/{card_id}",
    tag = "cards",
    params(
        ("card_id" = i32, Path, description = "Card ID"),
    ),
    request_body = UpdateCardRequest,
    responses(
        (status = 200, description = "Card updated successfully", body = ApiResponse<CardResponse>),
        (status = 404, description = "Card not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_card(
    Path(card_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCardRequest>,
) -> Result<Json<ApiResponse<CardResponse>>, ApiError> {
    trace!("Entering update_card function for card_id: {}", card_id);

    if let Some(limit) = request.limit {
        validate_amount(limit, "INVALID_LIMIT", "Credit limit")?;
    }
    if let Some(current_bill) = request.current_bill {
        validate_amount(current_bill, "INVALID_CURRENT_BILL", "Current bill")?;
    }
    validate_day(request.due_day, "INVALID_DUE_DAY", "Due day")?;
    validate_day(request.closing_day, "INVALID_CLOSING_DAY", "Closing day")?;

    // First, find the existing card
    let existing_card = match credit_card::Entity::find_by_id(card_id).one(&state.db).await {
        Ok(Some(card)) => {
            debug!("Found existing card: {}", card.name);
            card
        }
        Ok(None) => {
            warn!("Card with ID {} not found for update", card_id);
            return Err(not_found(format!("Card with id {card_id} not found")));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup card with ID {} for update: {}",
                card_id, db_error
            );
            return Err(internal_error(format!("Failed to lookup card: {db_error}")));
        }
    };

    // Create active model for update
    let mut card_active: credit_card::ActiveModel = existing_card.into();
    let mut updated_fields = Vec::new();

    // Update only provided fields
    if let Some(name) = request.name {
        card_active.name = Set(name.clone());
        updated_fields.push(format!("name: {name}"));
    }
    if let Some(bank) = request.bank {
        card_active.bank = Set(bank.clone());
        updated_fields.push(format!("bank: {bank}"));
    }
    if let Some(limit) = request.limit {
        card_active.credit_limit = Set(limit);
        updated_fields.push(format!("limit: {limit}"));
    }
    if let Some(current_bill) = request.current_bill {
        card_active.current_bill = Set(current_bill);
        updated_fields.push(format!("current_bill: {current_bill}"));
    }
    if let Some(due_day) = request.due_day {
        card_active.due_day = Set(Some(due_day));
        updated_fields.push(format!("due_day: {due_day}"));
    }
    if let Some(closing_day) = request.closing_day {
        card_active.closing_day = Set(Some(closing_day));
        updated_fields.push(format!("closing_day: {closing_day}"));
    }
    if let Some(color) = request.color {
        card_active.color = Set(color.clone());
        updated_fields.push(format!("color: {color}"));
    }

    if updated_fields.is_empty() {
        debug!("No fields to update for card ID: {}", card_id);
    } else {
        debug!("Updating fields: {}", updated_fields.join(", "));
    }

    trace!("Attempting to update card in database");
    match card_active.update(&state.db).await {
        Ok(updated_card) => {
            info!("Card with ID {} updated successfully", card_id);
            state.invalidate_summaries();
            let response = ApiResponse {
                data: CardResponse::from(updated_card),
                message: "Card updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update card with ID {}: {}", card_id, db_error);
            Err(internal_error(format!("Failed to update card: {db_error}")))
        }
    }
}

/// Delete a credit card
#[utoipa::path(
    delete,
    path = "/api/v1/cards/{card_id}",
    tag = "cards",
    params(
        ("card_id" = i32, Path, description = "Card ID"),
    ),
    responses(
        (status = 200, description = "Card deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Card not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_card(
    Path(card_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_card function for card_id: {}", card_id);

    match credit_card::Entity::delete_by_id(card_id).exec(&state.db).await {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("Card with ID {} deleted successfully", card_id);
                state.invalidate_summaries();
                let response = ApiResponse {
                    data: format!("Card {card_id} deleted"),
                    message: "Card deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Card with ID {} not found for deletion (no rows affected)",
                    card_id
                );
                Err(not_found(format!("Card with id {card_id} not found")))
            }
        }
        Err(db_error) => {
            error!("Failed to delete card with ID {}: {}", card_id, db_error);
            Err(internal_error(format!("Failed to delete card: {db_error}")))
        }
    }
}
