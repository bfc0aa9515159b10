use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential scheme selected on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    /// Store code + password
    #[default]
    Outlet,
    /// Head-office email + password
    Hq,
}

impl LoginType {
    pub fn code(&self) -> &'static str {
        match self {
            LoginType::Outlet => "outlet",
            LoginType::Hq => "hq",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "outlet" => Some(LoginType::Outlet),
            "hq" => Some(LoginType::Hq),
            _ => None,
        }
    }

    /// Label shown above the username field
    pub fn username_label(&self) -> &'static str {
        match self {
            LoginType::Outlet => "Store Code",
            LoginType::Hq => "Email",
        }
    }

    pub fn username_placeholder(&self) -> &'static str {
        match self {
            LoginType::Outlet => "Enter store code (e.g., JKJSTT1)",
            LoginType::Hq => "Enter email address",
        }
    }

    /// Label shown on the header badge, e.g. "OUTLET User"
    pub fn badge(&self) -> String {
        format!("{} User", self.code().to_uppercase())
    }
}

/// Which credential table produced the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    Sheets,
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub login_type: LoginType,
}

/// Display profile of an authenticated user.
///
/// For outlet logins `am` carries the account manager, for HQ logins the role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "type")]
    pub login_type: LoginType,
    pub display_name: String,
    pub full_store_name: String,
    pub am: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub source: CredentialSource,
    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn ok(user: UserProfile) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            message: Some(message.into()),
        }
    }
}

/// Body of `GET /api/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Option<UserProfile>,
}

/// Body of `POST /api/logout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_accepts_camel_case_login_type() {
        let json = r#"{"username":"DEMO","password":"demo123","loginType":"hq"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.login_type, LoginType::Hq);
    }

    #[test]
    fn login_request_defaults_to_outlet() {
        let json = r#"{"username":"DEMO","password":"demo123"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.login_type, LoginType::Outlet);
    }

    #[test]
    fn failed_response_omits_user() {
        let value = serde_json::to_value(LoginResponse::failed("Invalid credentials")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Invalid credentials");
        assert!(value.get("user").is_none());
    }

    #[test]
    fn profile_serializes_type_field() {
        let profile = UserProfile {
            login_type: LoginType::Outlet,
            display_name: "DEMO".into(),
            full_store_name: "Demo Store".into(),
            am: "Demo Manager".into(),
            email: None,
            source: CredentialSource::Static,
            login_time: Utc::now(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["type"], "outlet");
        assert_eq!(value["displayName"], "DEMO");
        assert_eq!(value["source"], "static");
    }
}
