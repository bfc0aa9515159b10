use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::UserProfile;

use crate::system::state::AppState;

/// Logged-in user resolved from the session cookie, if any.
/// Usage in handlers: `async fn handler(SessionUser(user): SessionUser) -> Response`
pub struct SessionUser(pub Option<UserProfile>);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by the session middleware when it ran first
        if let Some(user) = parts.extensions.get::<UserProfile>() {
            return Ok(SessionUser(Some(user.clone())));
        }

        let user = state
            .sessions
            .user_from_headers(&parts.headers)
            .await
            .map(|(_, user)| user);
        Ok(SessionUser(user))
    }
}
