//! Category management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
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
use centavo_db::{
    entities::sea_orm_active_enums::EntryKind,
    repositories::category::{CategoryError, CategoryRepository},
};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
        .route("/categories/{id}", get(get_category))
        .route("/categories/{id}", put(update_category))
        .route("/categories/{id}", delete(delete_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name (unique per user and kind).
    pub name: String,
    /// Income or expense.
    pub kind: EntryKind,
    /// Display color.
    pub color: Option<String>,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New display color.
    pub color: Option<String>,
}

/// GET /categories - List the user's categories.
async fn list_categories(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.list(user.user_id()).await {
        Ok(categories) => Json(json!({ "data": categories })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list categories");
            internal_error()
        }
    }
}

/// GET /categories/{id} - Fetch a category.
async fn get_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.find_by_id(user.user_id(), id).await {
        Ok(Some(category)) => Json(category).into_response(),
        Ok(None) => category_error(CategoryError::NotFound(id)),
        Err(e) => {
            error!(error = %e, "Failed to fetch category");
            internal_error()
        }
    }
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo
        .create(user.user_id(), &payload.name, payload.kind, payload.color)
        .await
    {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => category_error(e),
    }
}

/// PUT /categories/{id} - Update a category.
async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo
        .update(user.user_id(), id, payload.name, payload.color)
        .await
    {
        Ok(category) => Json(category).into_response(),
        Err(e) => category_error(e),
    }
}

/// DELETE /categories/{id} - Delete a category.
async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => category_error(e),
    }
}

fn category_error(e: CategoryError) -> axum::response::Response {
    match e {
        CategoryError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Category not found: {id}")
            })),
        )
            .into_response(),
        CategoryError::DuplicateName(name) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_name",
                "message": format!("Category '{name}' already exists")
            })),
        )
            .into_response(),
        CategoryError::InUse(count) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "in_use",
                "message": format!("Category is in use by {count} fixed accounts")
            })),
        )
            .into_response(),
        CategoryError::Database(err) => {
            error!(error = %err, "Database error in category operation");
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
