//! Customer management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_db::repositories::customer::{CustomerInput, CustomerRepository};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers", post(create_customer))
        .route("/customers/{id}", get(get_customer))
        .route("/customers/{id}", put(update_customer))
        .route("/customers/{id}", delete(delete_customer))
}

/// Request body for creating a customer.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer name.
    pub name: String,
    /// Tax document.
    pub document: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Request body for updating a customer.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    /// New name.
    pub name: Option<String>,
    /// New tax document.
    pub document: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
}

/// GET /customers - List the user's customers.
async fn list_customers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());

    match repo.list(user.user_id(), &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list customers");
            internal_error()
        }
    }
}

/// GET /customers/{id} - Fetch a customer.
async fn get_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(customer)) => Json(customer).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to fetch customer");
            internal_error()
        }
    }
}

/// POST /customers - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());

    let input = CustomerInput {
        name: None,
        document: payload.document,
        email: payload.email,
        phone: payload.phone,
    };
    match repo.create(user.user_id(), &payload.name, input).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create customer");
            internal_error()
        }
    }
}

/// PUT /customers/{id} - Update a customer.
async fn update_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());

    let input = CustomerInput {
        name: payload.name,
        document: payload.document,
        email: payload.email,
        phone: payload.phone,
    };
    match repo.update(user.user_id(), id, input).await {
        Ok(Some(customer)) => Json(customer).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update customer");
            internal_error()
        }
    }
}

/// DELETE /customers/{id} - Delete a customer.
async fn delete_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CustomerRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete customer");
            internal_error()
        }
    }
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Customer not found: {id}")
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
