//! Fixed-account routes: templates, occurrences, the overdue sweep, batch
//! payment, and statistics.

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
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_core::fixed_account::FixedAccountError;
use centavo_db::{
    entities::sea_orm_active_enums::{EntryKind, PaymentMethod, Periodicity},
    repositories::fixed_account::{
        CreateFixedAccountInput, FixedAccountRepoError, FixedAccountRepository,
        PayOccurrencesInput, UpdateFixedAccountInput,
    },
    repositories::obligation::ObligationRepository,
};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the fixed-account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fixed-accounts", get(list_fixed_accounts))
        .route("/fixed-accounts", post(create_fixed_account))
        .route("/fixed-accounts/statistics", get(statistics))
        .route("/fixed-accounts/check-overdue", post(check_overdue))
        .route("/fixed-accounts/pay", post(pay_occurrences))
        .route("/fixed-accounts/{id}", get(get_fixed_account))
        .route("/fixed-accounts/{id}", put(update_fixed_account))
        .route("/fixed-accounts/{id}", delete(delete_fixed_account))
        .route("/fixed-accounts/{id}/occurrences", get(list_occurrences))
        .route("/fixed-accounts/{id}/pay", post(pay_template))
}

/// Query parameters for listing fixed accounts.
#[derive(Debug, Deserialize)]
pub struct ListFixedAccountsQuery {
    /// Filter by active flag.
    pub active: Option<bool>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a fixed account.
#[derive(Debug, Deserialize)]
pub struct CreateFixedAccountRequest {
    /// Category.
    pub category_id: Uuid,
    /// Supplier counterparty.
    pub supplier_id: Option<Uuid>,
    /// Default bank account for payments.
    pub bank_account_id: Option<Uuid>,
    /// Description.
    pub description: String,
    /// Per-occurrence amount (positive).
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// Recurrence period.
    pub periodicity: Periodicity,
    /// First due date.
    pub start_date: NaiveDate,
    /// How the obligation is usually paid.
    pub payment_method: Option<PaymentMethod>,
    /// Days ahead of the due date to raise a reminder. Defaults to 3.
    pub reminder_days: Option<i32>,
}

/// Request body for updating a fixed account.
#[derive(Debug, Deserialize)]
pub struct UpdateFixedAccountRequest {
    /// New description.
    pub description: Option<String>,
    /// New per-occurrence amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category_id: Option<Uuid>,
    /// New supplier.
    pub supplier_id: Option<Uuid>,
    /// New default bank account.
    pub bank_account_id: Option<Uuid>,
    /// New payment method.
    pub payment_method: Option<PaymentMethod>,
    /// New reminder window.
    pub reminder_days: Option<i32>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

/// Request body for paying a batch of occurrences.
#[derive(Debug, Deserialize)]
pub struct PayOccurrencesRequest {
    /// Occurrences to pay.
    pub occurrence_ids: Vec<Uuid>,
    /// Bank account override.
    pub bank_account_id: Option<Uuid>,
    /// Payment date. Defaults to today.
    pub paid_at: Option<NaiveDate>,
}

/// Request body for paying a template's current occurrence.
#[derive(Debug, Deserialize, Default)]
pub struct PayTemplateRequest {
    /// Bank account override.
    pub bank_account_id: Option<Uuid>,
    /// Payment date. Defaults to today.
    pub paid_at: Option<NaiveDate>,
}

/// GET /fixed-accounts - List the user's templates.
async fn list_fixed_accounts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListFixedAccountsQuery>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };
    match repo.list(user.user_id(), query.active, &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => fixed_account_error(e),
    }
}

/// GET /fixed-accounts/{id} - Fetch a template with its category and
/// supplier names.
async fn get_fixed_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    match repo.find_with_refs(user.user_id(), id).await {
        Ok(Some(account)) => Json(account).into_response(),
        Ok(None) => fixed_account_error(FixedAccountError::NotFound(id).into()),
        Err(e) => fixed_account_error(e),
    }
}

/// POST /fixed-accounts - Create a template.
async fn create_fixed_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFixedAccountRequest>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    let input = CreateFixedAccountInput {
        category_id: payload.category_id,
        supplier_id: payload.supplier_id,
        bank_account_id: payload.bank_account_id,
        description: payload.description,
        amount: payload.amount,
        kind: payload.kind,
        periodicity: payload.periodicity,
        start_date: payload.start_date,
        payment_method: payload.payment_method,
        reminder_days: payload.reminder_days.unwrap_or(3),
    };
    match repo.create(user.user_id(), input).await {
        Ok(account) => {
            info!(fixed_account_id = %account.id, "Fixed account created");
            (StatusCode::CREATED, Json(account)).into_response()
        }
        Err(e) => fixed_account_error(e),
    }
}

/// PUT /fixed-accounts/{id} - Update a template.
async fn update_fixed_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFixedAccountRequest>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    let input = UpdateFixedAccountInput {
        description: payload.description,
        amount: payload.amount,
        category_id: payload.category_id,
        supplier_id: payload.supplier_id,
        bank_account_id: payload.bank_account_id,
        payment_method: payload.payment_method,
        reminder_days: payload.reminder_days,
        is_active: payload.is_active,
    };
    match repo.update(user.user_id(), id, input).await {
        Ok(account) => Json(account).into_response(),
        Err(e) => fixed_account_error(e),
    }
}

/// DELETE /fixed-accounts/{id} - Delete a template without payment history.
async fn delete_fixed_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => fixed_account_error(e),
    }
}

/// GET /fixed-accounts/{id}/occurrences - List a template's occurrences.
async fn list_occurrences(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    match repo.list_occurrences(user.user_id(), id).await {
        Ok(occurrences) => Json(json!({ "data": occurrences })).into_response(),
        Err(e) => fixed_account_error(e),
    }
}

/// POST /fixed-accounts/check-overdue - Run the overdue sweep.
///
/// Generates occurrences for templates whose due date has arrived, flips
/// stale pending occurrences to overdue, raises reminders, and also marks
/// stale obligations overdue.
async fn check_overdue(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());
    let obligation_repo = ObligationRepository::new((*state.db).clone());
    let today = chrono::Utc::now().date_naive();

    let report = match repo.check_overdue(user.user_id(), today).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Overdue sweep failed");
            return internal_error();
        }
    };

    let obligations_overdue = match obligation_repo.mark_overdue(user.user_id(), today).await {
        Ok(count) => count,
        Err(e) => {
            error!(error = %e, "Obligation overdue pass failed");
            return internal_error();
        }
    };

    info!(
        generated = report.generated,
        marked_overdue = report.marked_overdue,
        failed = report.failed,
        "Overdue sweep finished"
    );
    Json(json!({
        "generated": report.generated,
        "marked_overdue": report.marked_overdue,
        "failed": report.failed,
        "obligations_marked_overdue": obligations_overdue,
    }))
    .into_response()
}

/// POST /fixed-accounts/pay - Pay a batch of occurrences atomically.
async fn pay_occurrences(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PayOccurrencesRequest>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    let input = PayOccurrencesInput {
        occurrence_ids: payload.occurrence_ids,
        bank_account_id: payload.bank_account_id,
        paid_at: payload.paid_at,
    };
    match repo.pay_occurrences(user.user_id(), input).await {
        Ok(paid) => {
            info!(count = paid.len(), "Occurrence batch paid");
            Json(json!({ "data": paid })).into_response()
        }
        Err(e) => fixed_account_error(e),
    }
}

/// POST /fixed-accounts/{id}/pay - Pay a template's current occurrence.
async fn pay_template(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<PayTemplateRequest>>,
) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    match repo
        .pay_template(user.user_id(), id, payload.bank_account_id, payload.paid_at)
        .await
    {
        Ok(paid) => Json(json!({ "data": paid })).into_response(),
        Err(e) => fixed_account_error(e),
    }
}

/// GET /fixed-accounts/statistics - Aggregate statistics over the user's
/// templates.
async fn statistics(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = FixedAccountRepository::new((*state.db).clone());

    match repo.statistics(user.user_id()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => fixed_account_error(e),
    }
}

#[allow(clippy::too_many_lines)]
fn fixed_account_error(e: FixedAccountRepoError) -> axum::response::Response {
    match e {
        FixedAccountRepoError::Domain(domain) => match domain {
            FixedAccountError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": format!("Fixed account not found: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::OccurrenceNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "occurrence_not_found",
                    "message": format!("Occurrence not found: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::CategoryNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "category_not_found",
                    "message": format!("Category not found: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::SupplierNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "supplier_not_found",
                    "message": format!("Supplier not found: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::BankAccountNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "bank_account_not_found",
                    "message": format!("Bank account not found: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::InactiveTemplate => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "inactive_template",
                    "message": "Fixed account is inactive"
                })),
            )
                .into_response(),
            FixedAccountError::AlreadyPaid(id) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "already_paid",
                    "message": format!("Occurrence already paid: {id}")
                })),
            )
                .into_response(),
            FixedAccountError::InsufficientBalance {
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
            FixedAccountError::NoBankAccount => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "no_bank_account",
                    "message": "No bank account linked for payment"
                })),
            )
                .into_response(),
            FixedAccountError::NonPositiveAmount => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Amount must be positive"
                })),
            )
                .into_response(),
            FixedAccountError::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "empty_batch",
                    "message": "Payment batch contains no occurrences"
                })),
            )
                .into_response(),
        },
        FixedAccountRepoError::HasPaidOccurrences(count) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "has_paid_occurrences",
                "message": format!("Fixed account has {count} paid occurrences and cannot be deleted")
            })),
        )
            .into_response(),
        FixedAccountRepoError::Database(err) => {
            error!(error = %err, "Database error in fixed-account operation");
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
