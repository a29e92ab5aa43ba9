//! Obligation (payables/receivables) routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_db::{
    entities::sea_orm_active_enums::{ObligationDirection, ObligationStatus},
    repositories::obligation::{CreateObligationInput, ObligationError, ObligationRepository},
};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the obligation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/obligations", get(list_obligations))
        .route("/obligations", post(create_obligation))
        .route("/obligations/{id}", get(get_obligation))
        .route("/obligations/{id}", delete(delete_obligation))
        .route("/obligations/{id}/settle", post(settle_obligation))
}

/// Query parameters for listing obligations.
#[derive(Debug, Deserialize)]
pub struct ListObligationsQuery {
    /// Filter by direction.
    pub direction: Option<ObligationDirection>,
    /// Filter by status.
    pub status: Option<ObligationStatus>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating an obligation.
#[derive(Debug, Deserialize)]
pub struct CreateObligationRequest {
    /// Payable or receivable.
    pub direction: ObligationDirection,
    /// Supplier counterparty (payables).
    pub supplier_id: Option<Uuid>,
    /// Customer counterparty (receivables).
    pub customer_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Amount (positive).
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
}

/// Request body for settling an obligation.
#[derive(Debug, Deserialize)]
pub struct SettleObligationRequest {
    /// Bank account to debit or credit.
    pub bank_account_id: Uuid,
    /// Settlement date. Defaults to today.
    pub settled_at: Option<NaiveDate>,
}

/// GET /obligations - List the user's obligations.
async fn list_obligations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListObligationsQuery>,
) -> impl IntoResponse {
    let repo = ObligationRepository::new((*state.db).clone());

    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };
    match repo
        .list(user.user_id(), query.direction, query.status, &page)
        .await
    {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list obligations");
            internal_error()
        }
    }
}

/// GET /obligations/{id} - Fetch an obligation.
async fn get_obligation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ObligationRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(obligation)) => Json(obligation).into_response(),
        Ok(None) => obligation_error(ObligationError::NotFound(id)),
        Err(e) => {
            error!(error = %e, "Failed to fetch obligation");
            internal_error()
        }
    }
}

/// POST /obligations - Create an obligation.
async fn create_obligation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateObligationRequest>,
) -> impl IntoResponse {
    let repo = ObligationRepository::new((*state.db).clone());

    let input = CreateObligationInput {
        direction: payload.direction,
        supplier_id: payload.supplier_id,
        customer_id: payload.customer_id,
        description: payload.description,
        amount: payload.amount,
        due_date: payload.due_date,
    };
    match repo.create(user.user_id(), input).await {
        Ok(obligation) => (StatusCode::CREATED, Json(obligation)).into_response(),
        Err(e) => obligation_error(e),
    }
}

/// POST /obligations/{id}/settle - Settle an obligation against a bank
/// account.
async fn settle_obligation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SettleObligationRequest>,
) -> impl IntoResponse {
    let repo = ObligationRepository::new((*state.db).clone());

    match repo
        .settle(
            user.user_id(),
            id,
            payload.bank_account_id,
            payload.settled_at,
        )
        .await
    {
        Ok(obligation) => Json(obligation).into_response(),
        Err(e) => obligation_error(e),
    }
}

/// DELETE /obligations/{id} - Delete an unsettled obligation.
async fn delete_obligation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ObligationRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => obligation_error(e),
    }
}

fn obligation_error(e: ObligationError) -> axum::response::Response {
    match e {
        ObligationError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Obligation not found: {id}")
            })),
        )
            .into_response(),
        ObligationError::AlreadySettled(id) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already_settled",
                "message": format!("Obligation already settled: {id}")
            })),
        )
            .into_response(),
        ObligationError::CounterpartyMismatch => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "counterparty_mismatch",
                "message": "A payable needs a supplier and a receivable needs a customer"
            })),
        )
            .into_response(),
        ObligationError::BankAccountNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "bank_account_not_found",
                "message": format!("Bank account not found: {id}")
            })),
        )
            .into_response(),
        ObligationError::InsufficientBalance {
            required,
            available,
        } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "insufficient_balance",
                "message": format!("Insufficient balance: required {required}, available {available}")
            })),
        )
            .into_response(),
        ObligationError::NonPositiveAmount => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Amount must be positive"
            })),
        )
            .into_response(),
        ObligationError::Database(err) => {
            error!(error = %err, "Database error in obligation operation");
            internal_error()
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An unexpected error occurred"
        })),
    )
        .into_response()
}
