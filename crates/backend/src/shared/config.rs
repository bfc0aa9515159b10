use contracts::shared::portal::PortalConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sheets: SheetsConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub portal: PortalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built frontend (index.html, pkg/, assets/)
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    /// When false only the built-in credential table is used
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub spreadsheet_id: String,
    pub outlet_gid: String,
    pub hq_gid: String,
    pub cache_ttl_secs: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    /// Adds the `Secure` attribute; needs HTTPS
    #[serde(default)]
    pub secure: bool,
}

fn default_true() -> bool {
    true
}

impl SheetsConfig {
    pub fn export_url(&self, gid: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
            self.spreadsheet_id, gid
        )
    }

    pub fn outlet_url(&self) -> String {
        self.export_url(&self.outlet_gid)
    }

    pub fn hq_url(&self) -> String {
        self.export_url(&self.hq_gid)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[sheets]
enabled = true
spreadsheet_id = "1wCvZ1WAlHAn-B8UPP5AUEPzQ5Auf84BJFeG48Hlo9wE"
outlet_gid = "0"
hq_gid = "1"
cache_ttl_secs = 300
timeout_secs = 10

[session]
cookie_name = "alpro_session"
ttl_hours = 24
secure = false
"#;

pub fn default_config() -> anyhow::Result<Config> {
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (copied there by build.rs)
/// 2. Falls back to embedded default config
///
/// `PORT` from the environment overrides `server.port`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            default_config()?
        }
    };

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        config.server.port = port;
    }

    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    if config_path.exists() {
        Some(config_path)
    } else {
        tracing::warn!("config.toml not found at: {}", config_path.display());
        None
    }
}

/// Resolve the static directory; relative paths are taken from the
/// executable directory first, then from the working directory.
pub fn resolve_static_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.server.static_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        let candidate = exe_dir.join(dir);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(&config.server.static_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sheets.cache_ttl_secs, 300);
        assert_eq!(config.session.ttl_hours, 24);
        assert!(config.sheets.enabled);
        assert_eq!(config.portal, PortalConfig::default());
    }

    #[test]
    fn test_export_urls_use_gids() {
        let config = default_config().unwrap();
        assert!(config.sheets.outlet_url().ends_with("/export?format=csv&gid=0"));
        assert!(config.sheets.hq_url().ends_with("/export?format=csv&gid=1"));
    }

    #[test]
    fn test_portal_section_overrides_embeds() {
        let text = format!(
            "{}\n[portal.embeds]\ntiktok_cuan = \"https://example.org/\"\n",
            DEFAULT_CONFIG
        );
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.portal.embeds.tiktok_cuan, "https://example.org/");
    }

    #[test]
    fn test_monitoring_embed_can_be_configured() {
        let text = format!(
            "{}\n[portal.embeds]\ntiktok_analytics = \"https://example.org/tiktok\"\n",
            DEFAULT_CONFIG
        );
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.portal.embeds.tiktok_analytics, "https://example.org/tiktok");
        assert_eq!(
            config.portal.embeds.new_year_new_me,
            "https://gdmmhrhz.gensparkspace.com/"
        );
    }
}
