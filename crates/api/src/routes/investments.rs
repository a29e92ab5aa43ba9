//! Investment tracking routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
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
    entities::sea_orm_active_enums::InvestmentKind,
    repositories::investment::{CreateInvestmentInput, InvestmentRepository},
};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the investment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/investments", get(list_investments))
        .route("/investments", post(create_investment))
        .route("/investments/{id}", get(get_investment))
        .route("/investments/{id}", put(update_investment))
        .route("/investments/{id}", delete(delete_investment))
        .route("/investments/{id}/redeem", post(redeem_investment))
}

/// Request body for creating an investment.
#[derive(Debug, Deserialize)]
pub struct CreateInvestmentRequest {
    /// Display name.
    pub name: String,
    /// Kind of investment.
    pub kind: InvestmentKind,
    /// Amount originally invested.
    pub amount_invested: Decimal,
    /// Application date.
    pub applied_at: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for updating an investment.
#[derive(Debug, Deserialize)]
pub struct UpdateInvestmentRequest {
    /// New display name.
    pub name: Option<String>,
    /// Updated market value.
    pub current_value: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Request body for redeeming an investment.
#[derive(Debug, Deserialize)]
pub struct RedeemInvestmentRequest {
    /// Redemption date.
    pub redeemed_at: NaiveDate,
    /// Final value at redemption.
    pub final_value: Option<Decimal>,
}

/// GET /investments - List the user's investments.
async fn list_investments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.list(user.user_id(), &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list investments");
            internal_error()
        }
    }
}

/// GET /investments/{id} - Fetch an investment.
async fn get_investment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(investment)) => Json(investment).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to fetch investment");
            internal_error()
        }
    }
}

/// POST /investments - Create an investment.
async fn create_investment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInvestmentRequest>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    let input = CreateInvestmentInput {
        name: payload.name,
        kind: payload.kind,
        amount_invested: payload.amount_invested,
        applied_at: payload.applied_at,
        notes: payload.notes,
    };
    match repo.create(user.user_id(), input).await {
        Ok(investment) => (StatusCode::CREATED, Json(investment)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create investment");
            internal_error()
        }
    }
}

/// PUT /investments/{id} - Update an investment.
async fn update_investment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvestmentRequest>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo
        .update(
            user.user_id(),
            id,
            payload.name,
            payload.current_value,
            payload.notes,
        )
        .await
    {
        Ok(Some(investment)) => Json(investment).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update investment");
            internal_error()
        }
    }
}

/// POST /investments/{id}/redeem - Record a redemption, closing the position.
async fn redeem_investment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RedeemInvestmentRequest>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo
        .redeem(user.user_id(), id, payload.redeemed_at, payload.final_value)
        .await
    {
        Ok(Some(investment)) => Json(investment).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to redeem investment");
            internal_error()
        }
    }
}

/// DELETE /investments/{id} - Delete an investment.
async fn delete_investment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvestmentRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete investment");
            internal_error()
        }
    }
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Investment not found: {id}")
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
