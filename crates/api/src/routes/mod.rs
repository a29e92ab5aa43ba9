//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod bank_accounts;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod fixed_accounts;
pub mod health;
pub mod investments;
pub mod notifications;
pub mod obligations;
pub mod suppliers;
pub mod transactions;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(bank_accounts::routes())
        .merge(categories::routes())
        .merge(customers::routes())
        .merge(dashboard::routes())
        .merge(fixed_accounts::routes())
        .merge(investments::routes())
        .merge(notifications::routes())
        .merge(obligations::routes())
        .merge(suppliers::routes())
        .merge(transactions::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
