use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::UserProfile;
use tokio::sync::RwLock;

use crate::shared::config::SessionConfig;

struct Session {
    user: UserProfile,
    expires_at: DateTime<Utc>,
}

/// In-memory server-side sessions keyed by a random id.
///
/// Sessions are lost on restart.
pub struct SessionStore {
    cookie_name: String,
    ttl: Duration,
    secure: bool,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            ttl: Duration::hours(config.ttl_hours),
            secure: config.secure,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Store the user and return the new session id
    pub async fn create(&self, user: UserProfile) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > Utc::now());
        sessions.insert(id.clone(), Session { user, expires_at });
        id
    }

    pub async fn get(&self, id: &str) -> Option<UserProfile> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user.clone())
    }

    pub async fn destroy(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    /// Session id from the `Cookie` request header
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
    }

    /// Resolve the logged-in user for a request
    pub async fn user_from_headers(&self, headers: &HeaderMap) -> Option<(String, UserProfile)> {
        let id = self.session_id(headers)?;
        let user = self.get(&id).await?;
        Some((id, user))
    }

    pub fn set_cookie(&self, id: &str) -> HeaderValue {
        self.cookie_header(id, self.ttl.num_seconds())
    }

    pub fn clear_cookie(&self) -> HeaderValue {
        self.cookie_header("", 0)
    }

    fn cookie_header(&self, value: &str, max_age: i64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Name and value are ASCII (config name + uuid)
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}
