use chrono::Utc;
use contracts::system::auth::{LoginRequest, UserProfile};
use contracts::system::credentials::{authenticate, AuthFailure, CredentialTable};
use once_cell::sync::Lazy;

use crate::system::state::AppState;

static BUILTIN_CREDENTIALS: Lazy<CredentialTable> = Lazy::new(CredentialTable::builtin);

/// Check a login request against the sheet rows, then the built-in table
pub async fn verify_login(
    state: &AppState,
    request: &LoginRequest,
) -> Result<UserProfile, AuthFailure> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(AuthFailure::MissingFields);
    }

    let sheet = state.credentials.table().await;
    let result = authenticate(&sheet, &BUILTIN_CREDENTIALS, request, Utc::now());

    match &result {
        Ok(user) => tracing::info!(
            "Login succeeded: {} ({:?}, {:?})",
            user.display_name,
            user.login_type,
            user.source
        ),
        Err(failure) => tracing::info!(
            "Login rejected for '{}' ({:?}): {:?}",
            request.username.trim(),
            request.login_type,
            failure
        ),
    }

    result
}
