use contracts::shared::portal::PortalConfig;
use contracts::system::auth::{CurrentUserResponse, LoginRequest, LoginResponse, LogoutResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Login with username, password and scheme
///
/// A rejected login is a normal `LoginResponse` with `success == false`.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, String> {
    let response = Request::post(&api_url("/api/login"))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Destroy the server session
pub async fn logout() -> Result<(), String> {
    let response = Request::post(&api_url("/api/logout"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }

    let body = response
        .json::<LogoutResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    if body.success {
        Ok(())
    } else {
        Err("Logout rejected".to_string())
    }
}

/// Get the user of the current session
///
/// An `Err` means no portal backend answered (static hosting).
pub async fn get_current_user() -> Result<CurrentUserResponse, String> {
    let response = Request::get(&api_url("/api/user"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Get current user failed: {}", response.status()));
    }

    response
        .json::<CurrentUserResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Portal settings; callers fall back to `PortalConfig::default()`
pub async fn get_portal_config() -> Result<PortalConfig, String> {
    let response = Request::get(&api_url("/api/portal/config"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Get portal config failed: {}", response.status()));
    }

    response
        .json::<PortalConfig>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
