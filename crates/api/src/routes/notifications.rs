//! Notification routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_db::NotificationRepository;
use centavo_shared::types::{PageRequest, PageResponse};

/// Creates the notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/{id}", delete(delete_notification))
}

/// Query parameters for listing notifications.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    /// Only unread notifications.
    #[serde(default)]
    pub unread: bool,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /notifications - List the user's notifications, newest first.
async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    let default_page = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(default_page.page),
        per_page: query.per_page.unwrap_or(default_page.per_page),
    };
    match repo.list(user.user_id(), query.unread, &page).await {
        Ok((items, total)) => {
            Json(PageResponse::new(items, page.page, page.per_page, total)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list notifications");
            internal_error()
        }
    }
}

/// GET /notifications/unread-count - Count unread notifications.
async fn unread_count(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.unread_count(user.user_id()).await {
        Ok(count) => Json(json!({ "unread": count })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to count notifications");
            internal_error()
        }
    }
}

/// POST /notifications/{id}/read - Mark a notification as read.
async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.mark_read(user.user_id(), id).await {
        Ok(Some(notification)) => Json(notification).into_response(),
        Ok(None) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to mark notification read");
            internal_error()
        }
    }
}

/// POST /notifications/read-all - Mark every unread notification as read.
async fn mark_all_read(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.mark_all_read(user.user_id()).await {
        Ok(count) => Json(json!({ "marked_read": count })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to mark notifications read");
            internal_error()
        }
    }
}

/// DELETE /notifications/{id} - Delete a notification.
async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = NotificationRepository::new((*state.db).clone());

    match repo.delete(user.user_id(), id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(id),
        Err(e) => {
            error!(error = %e, "Failed to delete notification");
            internal_error()
        }
    }
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Notification not found: {id}")
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
