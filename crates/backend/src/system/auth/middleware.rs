use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::system::state::AppState;

/// Middleware for page routes that need a session.
/// Without one the browser is redirected (303) to `/login`.
pub async fn require_session_page(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match state.sessions.user_from_headers(req.headers()).await {
        Some((_, user)) => {
            // Add user to request extensions for use in handlers
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
