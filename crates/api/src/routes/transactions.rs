//! Ledger transaction routes.

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
    entities::sea_orm_active_enums::EntryKind,
    repositories::transaction::{
        CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    },
};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the ledger transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by kind.
    pub kind: Option<EntryKind>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Entry date range start (inclusive).
    pub from: Option<NaiveDate>,
    /// Entry date range end (inclusive).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a ledger transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Bank account to debit/credit.
    pub bank_account_id: Option<Uuid>,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Amount (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Date the entry applies to.
    pub entry_date: NaiveDate,
}

/// GET /transactions - List the user's ledger transactions.
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let filter = TransactionFilter {
        kind: query.kind,
        category_id: query.category_id,
        date_from: query.from,
        date_to: query.to,
    };
    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };
    match repo.list(user.user_id(), filter, &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error()
        }
    }
}

/// GET /transactions/{id} - Fetch a ledger transaction.
async fn get_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(transaction)) => Json(transaction).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Transaction not found: {id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch transaction");
            internal_error()
        }
    }
}

/// POST /transactions - Create a ledger transaction.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let input = CreateTransactionInput {
        bank_account_id: payload.bank_account_id,
        category_id: payload.category_id,
        description: payload.description,
        amount: payload.amount,
        kind: payload.kind,
        entry_date: payload.entry_date,
    };
    match repo.create(user.user_id(), input).await {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => transaction_error(e),
    }
}

/// DELETE /transactions/{id} - Delete a transaction, reversing its balance
/// adjustment.
async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => transaction_error(e),
    }
}

fn transaction_error(e: TransactionError) -> axum::response::Response {
    match e {
        TransactionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Transaction not found: {id}")
            })),
        )
            .into_response(),
        TransactionError::BankAccountNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "bank_account_not_found",
                "message": format!("Bank account not found: {id}")
            })),
        )
            .into_response(),
        TransactionError::InsufficientBalance {
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
        TransactionError::NonPositiveAmount => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Amount must be positive"
            })),
        )
            .into_response(),
        TransactionError::Database(err) => {
            error!(error = %err, "Database error in transaction operation");
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
