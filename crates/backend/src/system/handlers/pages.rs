use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::system::auth::extractor::SessionUser;
use crate::system::state::AppState;

/// The frontend is a single-page bundle; every page route serves its
/// `index.html` and the client picks the view from the path and session.
async fn index_html(state: &AppState) -> Response {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Cannot read {}: {}", path.display(), e);
            (StatusCode::NOT_FOUND, "Frontend bundle not found").into_response()
        }
    }
}

/// `/`: dashboard with a session, login page otherwise
pub async fn root(State(state): State<AppState>, SessionUser(user): SessionUser) -> Response {
    tracing::debug!("Root page, session present: {}", user.is_some());
    index_html(&state).await
}

pub async fn login_page(State(state): State<AppState>) -> Response {
    index_html(&state).await
}

/// Guarded by `require_session_page`
pub async fn dashboard_page(State(state): State<AppState>) -> Response {
    index_html(&state).await
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
