//! Credential rows and the login check.
//!
//! Rows come verbatim from the "Outlet Login" and "HQ Login" sheets (or the
//! built-in table when the sheet is unreachable). Passwords are compared as
//! plain text; only the key is matched case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::{CredentialSource, LoginRequest, LoginType, UserProfile};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MISSING_FIELDS: &str = "Please fill in all fields";

/// Row of the "Outlet Login" sheet (columns A..D)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletCredential {
    pub short_store_name: String,
    pub store_name: String,
    pub am: String,
    pub password: String,
}

/// Row of the "HQ Login" sheet (columns A..H, only the used ones are kept)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HqCredential {
    pub name: String,
    pub email: String,
    pub status: String,
    pub role: String,
    pub password: String,
}

fn cell(columns: &[String], index: usize) -> String {
    columns
        .get(index)
        .map(|value| value.replace('"', "").trim().to_string())
        .unwrap_or_default()
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

impl OutletCredential {
    /// Build a row from sheet columns; `None` for short or incomplete rows.
    pub fn from_columns(columns: &[String]) -> Option<Self> {
        if columns.len() < 4 {
            return None;
        }
        let short_store_name = cell(columns, 0);
        let password = cell(columns, 3);
        if short_store_name.is_empty() || password.is_empty() {
            return None;
        }
        let store_name = or_default(cell(columns, 1), &short_store_name);
        Some(Self {
            am: or_default(cell(columns, 2), "Account Manager"),
            store_name,
            short_store_name,
            password,
        })
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.short_store_name.to_lowercase() == username.to_lowercase() && self.password == password
    }

    fn to_profile(&self, source: CredentialSource, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            login_type: LoginType::Outlet,
            display_name: self.short_store_name.clone(),
            full_store_name: self.store_name.clone(),
            am: self.am.clone(),
            email: None,
            source,
            login_time: now,
        }
    }
}

impl HqCredential {
    /// Build a row from sheet columns; inactive users are skipped.
    pub fn from_columns(columns: &[String]) -> Option<Self> {
        if columns.len() < 8 {
            return None;
        }
        let email = cell(columns, 1);
        let password = cell(columns, 7);
        let status = cell(columns, 2);
        if email.is_empty() || password.is_empty() {
            return None;
        }
        if status.to_lowercase() != "active" {
            return None;
        }
        Some(Self {
            name: or_default(cell(columns, 0), "HQ User"),
            role: or_default(cell(columns, 3), "HQ User"),
            email,
            status,
            password,
        })
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.email.to_lowercase() == username.to_lowercase() && self.password == password
    }

    fn to_profile(&self, source: CredentialSource, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            login_type: LoginType::Hq,
            display_name: self.name.clone(),
            full_store_name: self.name.clone(),
            am: self.role.clone(),
            email: Some(self.email.clone()),
            source,
            login_time: now,
        }
    }
}

/// Both credential tabs of the spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTable {
    pub outlet: Vec<OutletCredential>,
    pub hq: Vec<HqCredential>,
}

impl CredentialTable {
    pub fn is_empty(&self) -> bool {
        self.outlet.is_empty() && self.hq.is_empty()
    }

    /// Linear scan for a matching row of the given scheme
    pub fn find(
        &self,
        login_type: LoginType,
        username: &str,
        password: &str,
        source: CredentialSource,
        now: DateTime<Utc>,
    ) -> Option<UserProfile> {
        match login_type {
            LoginType::Outlet => self
                .outlet
                .iter()
                .find(|row| row.matches(username, password))
                .map(|row| row.to_profile(source, now)),
            LoginType::Hq => self
                .hq
                .iter()
                .find(|row| row.matches(username, password))
                .map(|row| row.to_profile(source, now)),
        }
    }

    /// Credentials used when the sheet cannot be reached
    pub fn builtin() -> Self {
        let outlet = |short: &str, store: &str, am: &str, password: &str| OutletCredential {
            short_store_name: short.into(),
            store_name: store.into(),
            am: am.into(),
            password: password.into(),
        };
        let hq = |name: &str, email: &str, role: &str, password: &str| HqCredential {
            name: name.into(),
            email: email.into(),
            status: "Active".into(),
            role: role.into(),
            password: password.into(),
        };

        Self {
            outlet: vec![
                outlet("JKJSTT1", "Jakarta Selatan Store", "Account Manager 1", "Alpro@123"),
                outlet("BEKASI1", "Bekasi Central Store", "Account Manager 2", "Alpro@123"),
                outlet("DEMO", "Demo Store", "Demo Manager", "demo123"),
            ],
            hq: vec![
                hq(
                    "Eni Khuzaimah",
                    "eni.khuzaimah@apotekalpro.id",
                    "Marketing Director",
                    "Alpro@123",
                ),
                hq("Demo User", "demo@apotekalpro.id", "Demo Role", "demo123"),
            ],
        }
    }
}

/// Why a login attempt was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingFields,
    InvalidCredentials,
}

impl AuthFailure {
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingFields => MISSING_FIELDS,
            AuthFailure::InvalidCredentials => INVALID_CREDENTIALS,
        }
    }
}

/// Check a login request against the live sheet rows first, then the fallback table.
pub fn authenticate(
    sheets: &CredentialTable,
    fallback: &CredentialTable,
    request: &LoginRequest,
    now: DateTime<Utc>,
) -> Result<UserProfile, AuthFailure> {
    let username = request.username.trim();
    let password = request.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthFailure::MissingFields);
    }

    sheets
        .find(request.login_type, username, password, CredentialSource::Sheets, now)
        .or_else(|| {
            fallback.find(request.login_type, username, password, CredentialSource::Static, now)
        })
        .ok_or(AuthFailure::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, login_type: LoginType) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
            login_type,
        }
    }

    fn cols(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn demo_outlet_login_succeeds() {
        let builtin = CredentialTable::builtin();
        let profile = authenticate(
            &CredentialTable::default(),
            &builtin,
            &request("DEMO", "demo123", LoginType::Outlet),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(profile.display_name, "DEMO");
        assert_eq!(profile.login_type, LoginType::Outlet);
        assert_eq!(profile.full_store_name, "Demo Store");
        assert_eq!(profile.source, CredentialSource::Static);
    }

    #[test]
    fn every_builtin_row_authenticates() {
        let builtin = CredentialTable::builtin();
        let empty = CredentialTable::default();
        for row in &builtin.outlet {
            let profile = authenticate(
                &empty,
                &builtin,
                &request(&row.short_store_name, &row.password, LoginType::Outlet),
                Utc::now(),
            )
            .unwrap();
            assert_eq!(profile.display_name, row.short_store_name);
            assert_eq!(profile.am, row.am);
        }
        for row in &builtin.hq {
            let profile = authenticate(
                &empty,
                &builtin,
                &request(&row.email, &row.password, LoginType::Hq),
                Utc::now(),
            )
            .unwrap();
            assert_eq!(profile.display_name, row.name);
            assert_eq!(profile.email.as_deref(), Some(row.email.as_str()));
        }
    }

    #[test]
    fn username_is_case_insensitive_password_is_not() {
        let builtin = CredentialTable::builtin();
        let empty = CredentialTable::default();
        assert!(authenticate(
            &empty,
            &builtin,
            &request("demo", "demo123", LoginType::Outlet),
            Utc::now()
        )
        .is_ok());
        assert_eq!(
            authenticate(
                &empty,
                &builtin,
                &request("DEMO", "DEMO123", LoginType::Outlet),
                Utc::now()
            ),
            Err(AuthFailure::InvalidCredentials)
        );
    }

    #[test]
    fn wrong_scheme_and_unknown_user_share_one_message() {
        let builtin = CredentialTable::builtin();
        let empty = CredentialTable::default();
        let wrong_scheme = authenticate(
            &empty,
            &builtin,
            &request("DEMO", "demo123", LoginType::Hq),
            Utc::now(),
        )
        .unwrap_err();
        let unknown = authenticate(
            &empty,
            &builtin,
            &request("NOPE", "demo123", LoginType::Outlet),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(wrong_scheme.message(), unknown.message());
        assert_eq!(unknown.message(), "Invalid credentials");
    }

    #[test]
    fn empty_fields_are_rejected() {
        let builtin = CredentialTable::builtin();
        assert_eq!(
            authenticate(
                &CredentialTable::default(),
                &builtin,
                &request("  ", "demo123", LoginType::Outlet),
                Utc::now()
            ),
            Err(AuthFailure::MissingFields)
        );
    }

    #[test]
    fn sheet_rows_take_precedence() {
        let sheets = CredentialTable {
            outlet: vec![OutletCredential::from_columns(&cols(&[
                "DEMO",
                "Sheet Store",
                "Sheet AM",
                "demo123",
            ]))
            .unwrap()],
            hq: vec![],
        };
        let profile = authenticate(
            &sheets,
            &CredentialTable::builtin(),
            &request("DEMO", "demo123", LoginType::Outlet),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(profile.full_store_name, "Sheet Store");
        assert_eq!(profile.source, CredentialSource::Sheets);
    }

    #[test]
    fn outlet_row_parsing_applies_defaults() {
        let row = OutletCredential::from_columns(&cols(&["\"ABC1\"", "", "", " pw "])).unwrap();
        assert_eq!(row.short_store_name, "ABC1");
        assert_eq!(row.store_name, "ABC1");
        assert_eq!(row.am, "Account Manager");
        assert_eq!(row.password, "pw");

        assert!(OutletCredential::from_columns(&cols(&["ABC1", "x", "y"])).is_none());
        assert!(OutletCredential::from_columns(&cols(&["ABC1", "x", "y", ""])).is_none());
    }

    #[test]
    fn hq_row_parsing_skips_inactive_users() {
        let active = cols(&[
            "Jane", "jane@apotekalpro.id", "Active", "Analyst", "2024-01-01", "HQ", "", "secret",
        ]);
        let row = HqCredential::from_columns(&active).unwrap();
        assert_eq!(row.name, "Jane");
        assert_eq!(row.role, "Analyst");

        let mut inactive = active.clone();
        inactive[2] = "Inactive".into();
        assert!(HqCredential::from_columns(&inactive).is_none());
        assert!(HqCredential::from_columns(&active[..7]).is_none());
    }
}
