//! Supplier management routes.

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
use centavo_db::repositories::supplier::{SupplierInput, SupplierRepository};
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers))
        .route("/suppliers", post(create_supplier))
        .route("/suppliers/{id}", get(get_supplier))
        .route("/suppliers/{id}", put(update_supplier))
        .route("/suppliers/{id}", delete(delete_supplier))
}

/// Request body for creating a supplier.
#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    /// Supplier name.
    pub name: String,
    /// Tax document.
    pub document: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Request body for updating a supplier.
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierRequest {
    /// New name.
    pub name: Option<String>,
    /// New tax document.
    pub document: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
}

/// GET /suppliers - List the user's suppliers.
async fn list_suppliers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    match repo.list(user.user_id(), &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list suppliers");
            internal_error()
        }
    }
}

/// GET /suppliers/{id} - Fetch a supplier.
async fn get_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(supplier)) => Json(supplier).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to fetch supplier");
            internal_error()
        }
    }
}

/// POST /suppliers - Create a supplier.
async fn create_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSupplierRequest>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    let input = SupplierInput {
        name: None,
        document: payload.document,
        email: payload.email,
        phone: payload.phone,
        is_active: None,
    };
    match repo.create(user.user_id(), &payload.name, input).await {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create supplier");
            internal_error()
        }
    }
}

/// PUT /suppliers/{id} - Update a supplier.
async fn update_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    let input = SupplierInput {
        name: payload.name,
        document: payload.document,
        email: payload.email,
        phone: payload.phone,
        is_active: payload.is_active,
    };
    match repo.update(user.user_id(), id, input).await {
        Ok(Some(supplier)) => Json(supplier).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to update supplier");
            internal_error()
        }
    }
}

/// DELETE /suppliers/{id} - Delete a supplier.
async fn delete_supplier(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupplierRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete supplier");
            internal_error()
        }
    }
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Supplier not found: {id}")
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
