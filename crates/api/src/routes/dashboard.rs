//! Dashboard and admin overview routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde_json::json;
use tracing::error;

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_db::DashboardRepository;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/admin/overview", get(admin_overview))
}

/// GET /dashboard - Summary aggregates for the authenticated user.
async fn dashboard(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let repo = DashboardRepository::new((*state.db).clone());
    let today = chrono::Utc::now().date_naive();

    match repo.summary(user.user_id(), today).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build dashboard summary");
            internal_error()
        }
    }
}

/// GET /admin/overview - Cross-user aggregates. Admin only.
async fn admin_overview(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if !user.is_admin() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Admin role required"
            })),
        )
            .into_response();
    }

    let repo = DashboardRepository::new((*state.db).clone());

    match repo.admin_overview().await {
        Ok(overview) => Json(overview).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build admin overview");
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
