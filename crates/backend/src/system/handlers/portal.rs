use axum::{extract::State, Json};
use contracts::shared::portal::PortalConfig;

use crate::system::state::AppState;

/// Embed URLs, WhatsApp contacts and message origins for the dashboard
pub async fn config(State(state): State<AppState>) -> Json<PortalConfig> {
    Json(state.config.portal.clone())
}
