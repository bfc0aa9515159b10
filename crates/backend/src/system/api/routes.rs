use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::system::auth;
use crate::system::handlers;
use crate::system::state::AppState;

/// Portal routes: pages, auth API and portal settings
pub fn configure_system_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        .route("/favicon.ico", get(handlers::pages::favicon))
        // ========================================
        // PAGES
        // ========================================
        .route("/", get(handlers::pages::root))
        .route("/login", get(handlers::pages::login_page))
        .route(
            "/dashboard",
            get(handlers::pages::dashboard_page).layer(middleware::from_fn_with_state(
                state,
                auth::middleware::require_session_page,
            )),
        )
        // ========================================
        // AUTH API
        // ========================================
        .route("/api/login", post(handlers::auth::login))
        .route("/api/user", get(handlers::auth::current_user))
        .route("/api/logout", post(handlers::auth::logout))
        // ========================================
        // PORTAL SETTINGS
        // ========================================
        .route("/api/portal/config", get(handlers::portal::config))
}
