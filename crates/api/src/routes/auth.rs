//! Authentication routes for registration, login, and the current user.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::{get, post}};
use serde_json::json;
use tracing::{error, info};

use crate::middleware::AuthUser;
use crate::AppState;
use centavo_core::auth::{hash_password, verify_password};
use centavo_db::{UserRepository, entities::sea_orm_active_enums::UserRole};
use centavo_shared::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that require an authenticated user.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn role_str(role: &UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::User => "user",
    }
}

/// POST /auth/register - Create a user account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "weak_password",
                "message": "Password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_taken",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error during registration");
            return internal_error();
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return internal_error();
        }
    };

    match user_repo
        .create(&payload.email, &password_hash, &payload.name)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            (
                StatusCode::CREATED,
                Json(json!(UserInfo {
                    id: user.id,
                    email: user.email,
                    name: user.name,
                    role: role_str(&user.role).to_string(),
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            internal_error()
        }
    }
}

/// POST /auth/login - Authenticate and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let role = role_str(&user.role);
    let access_token = match state
        .jwt_service
        .generate_access_token(user.id, &user.email, role)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };

    Json(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
            role: role.to_string(),
        },
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
    .into_response()
}

/// GET /auth/me - Return the authenticated user's profile.
async fn me(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(user.user_id()).await {
        Ok(Some(u)) => Json(json!(UserInfo {
            id: u.id,
            email: u.email,
            name: u.name,
            role: role_str(&u.role).to_string(),
        }))
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error fetching profile");
            internal_error()
        }
    }
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
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
