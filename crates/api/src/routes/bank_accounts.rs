//! Bank account management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_db::{
    entities::sea_orm_active_enums::BankAccountType,
    repositories::bank_account::{BankAccountRepository, CreateBankAccountInput},
};

/// Creates the bank account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank-accounts", get(list_accounts))
        .route("/bank-accounts", post(create_account))
        .route("/bank-accounts/{id}", get(get_account))
        .route("/bank-accounts/{id}", put(update_account))
}

/// Request body for creating a bank account.
#[derive(Debug, Deserialize)]
pub struct CreateBankAccountRequest {
    /// Display name.
    pub name: String,
    /// Bank institution name.
    pub bank_name: Option<String>,
    /// Kind of account.
    pub account_type: BankAccountType,
    /// Opening balance. Defaults to zero.
    pub initial_balance: Option<Decimal>,
}

/// Request body for updating a bank account.
#[derive(Debug, Deserialize)]
pub struct UpdateBankAccountRequest {
    /// New display name.
    pub name: Option<String>,
    /// New bank institution name.
    pub bank_name: Option<String>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

/// GET /bank-accounts - List the user's bank accounts.
async fn list_accounts(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = BankAccountRepository::new((*state.db).clone());

    match repo.list(user.user_id()).await {
        Ok(accounts) => Json(json!({ "data": accounts })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list bank accounts");
            internal_error()
        }
    }
}

/// GET /bank-accounts/{id} - Fetch a bank account.
async fn get_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BankAccountRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(account)) => Json(account).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to fetch bank account");
            internal_error()
        }
    }
}

/// POST /bank-accounts - Create a bank account.
async fn create_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBankAccountRequest>,
) -> impl IntoResponse {
    let repo = BankAccountRepository::new((*state.db).clone());

    let input = CreateBankAccountInput {
        name: payload.name,
        bank_name: payload.bank_name,
        account_type: payload.account_type,
        initial_balance: payload.initial_balance.unwrap_or(Decimal::ZERO),
    };
    match repo.create(user.user_id(), input).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create bank account");
            internal_error()
        }
    }
}

/// PUT /bank-accounts/{id} - Update a bank account.
///
/// Balances cannot be edited here; they change only through ledger
/// transactions, payments, and settlements.
async fn update_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBankAccountRequest>,
) -> impl IntoResponse {
    let repo = BankAccountRepository::new((*state.db).clone());

    match repo
        .update(
            user.user_id(),
            id,
            payload.name,
            payload.bank_name,
            payload.is_active,
        )
        .await
    {
        Ok(Some(account)) => Json(account).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update bank account");
            internal_error()
        }
    }
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Bank account not found: {id}")
        })),
    )
        .into_response()
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
