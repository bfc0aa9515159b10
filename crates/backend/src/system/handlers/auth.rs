use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use contracts::system::auth::{
    CurrentUserResponse, LoginRequest, LoginResponse, LogoutResponse,
};

use crate::system::auth::{extractor::SessionUser, service};
use crate::system::state::AppState;

const SERVER_ERROR: &str = "Server error";

/// Login handler
///
/// Always answers 200 with `{success, user | message}`; a successful login
/// also sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Malformed login request: {}", e);
            return Json(LoginResponse::failed(SERVER_ERROR)).into_response();
        }
    };

    match service::verify_login(&state, &request).await {
        Ok(user) => {
            let session_id = state.sessions.create(user.clone()).await;
            (
                [(header::SET_COOKIE, state.sessions.set_cookie(&session_id))],
                Json(LoginResponse::ok(user)),
            )
                .into_response()
        }
        Err(failure) => Json(LoginResponse::failed(failure.message())).into_response(),
    }
}

/// Current user handler
pub async fn current_user(SessionUser(user): SessionUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse { user })
}

/// Logout handler
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = state.sessions.session_id(&headers) {
        state.sessions.destroy(&session_id).await;
    }

    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Json(LogoutResponse { success: true }),
    )
        .into_response()
}
