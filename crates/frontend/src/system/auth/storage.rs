use contracts::system::auth::UserProfile;
use web_sys::window;

/// localStorage key of the signed-in profile (static mode)
const USER_KEY: &str = "apotek_alpro_user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save profile to localStorage as JSON
pub fn save_user(user: &UserProfile) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(user) {
        Ok(json) => {
            let _ = storage.set_item(USER_KEY, &json);
        }
        Err(e) => log::error!("Failed to serialize user profile: {}", e),
    }
}

/// Load profile from localStorage; unreadable entries are dropped
pub fn load_user() -> Option<UserProfile> {
    let json = get_local_storage()?.get_item(USER_KEY).ok()??;
    match serde_json::from_str(&json) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("Discarding stored user profile: {}", e);
            clear_user();
            None
        }
    }
}

pub fn clear_user() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(USER_KEY);
    }
}
