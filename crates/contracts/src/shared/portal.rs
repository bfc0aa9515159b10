use serde::{Deserialize, Serialize};

use crate::dashboard::iframe_loader::LoaderConfig;
use crate::dashboard::tabs::{CampaignTab, MonitoringTab};

pub const BRAND_NAME: &str = "Apotek Alpro";
/// Shown under the brand on the login page, header and homepage
pub const PORTAL_NAME: &str = "BPT Portal";

/// Portal settings shared by the server and the static client.
///
/// Served by `GET /api/portal/config`; the client falls back to
/// [`PortalConfig::default`] when the endpoint is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub embeds: EmbedUrls,
    pub whatsapp: WhatsAppConfig,
    /// Origins allowed to post messages to the dashboard (prefix match)
    pub allowed_origins: Vec<String>,
    pub iframe_loader: LoaderConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            embeds: EmbedUrls::default(),
            whatsapp: WhatsAppConfig::default(),
            allowed_origins: vec![
                "https://zyqsemod.gensparkspace.com".into(),
                "http://localhost".into(),
                "https://localhost".into(),
            ],
            iframe_loader: LoaderConfig::default(),
        }
    }
}

/// Fixed iframe sources of the dashboard panes.
///
/// An empty string means the pane has no dashboard configured yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedUrls {
    pub oct_kenali_gula: String,
    pub sept_women_health: String,
    pub dec_anniversary_sales: String,
    pub new_year_new_me: String,
    pub tiktok_analytics: String,
    pub performance_metrics: String,
    pub health_news: String,
    pub tiktok_cuan: String,
}

impl EmbedUrls {
    pub fn campaign(&self, tab: CampaignTab) -> &str {
        match tab {
            CampaignTab::OctKenaliGula => &self.oct_kenali_gula,
            CampaignTab::SeptWomenHealth => &self.sept_women_health,
            CampaignTab::DecAnniversarySales => &self.dec_anniversary_sales,
            CampaignTab::NewYearNewMe => &self.new_year_new_me,
        }
    }

    pub fn monitoring(&self, tab: MonitoringTab) -> &str {
        match tab {
            MonitoringTab::TiktokAnalytics => &self.tiktok_analytics,
            MonitoringTab::PerformanceMetrics => &self.performance_metrics,
        }
    }
}

impl Default for EmbedUrls {
    fn default() -> Self {
        Self {
            oct_kenali_gula: "https://qqssaxti.gensparkspace.com".into(),
            sept_women_health: "https://apotekalpro-womanhealth.pages.dev/#metrics".into(),
            dec_anniversary_sales: "https://eruyktmb.gensparkspace.com/".into(),
            new_year_new_me: "https://gdmmhrhz.gensparkspace.com/".into(),
            tiktok_analytics: String::new(),
            performance_metrics: String::new(),
            health_news: "https://www.alodokter.com/".into(),
            tiktok_cuan: "https://zyqsemod.gensparkspace.com/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    /// Digits only, with country code
    pub support_phone: String,
    pub support_phone_display: String,
    /// Contact opened from the homepage button
    pub homepage_phone: String,
    pub group_url: String,
    pub default_message: String,
    /// Delay before probing whether a strategy opened a window
    pub probe_delay_ms: u32,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            support_phone: "6285890874888".into(),
            support_phone_display: "+62 858-9087-4888".into(),
            homepage_phone: "6287785731144".into(),
            group_url: "https://chat.whatsapp.com/HukQMDMTtJjFi12x1lAty3".into(),
            default_message: "Hello from Apotek Alpro".into(),
            probe_delay_ms: 1_500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PortalConfig =
            serde_json::from_str(r#"{"embeds":{"tiktok_cuan":"https://example.org/"}}"#).unwrap();
        assert_eq!(config.embeds.tiktok_cuan, "https://example.org/");
        assert_eq!(config.embeds.health_news, EmbedUrls::default().health_news);
        assert_eq!(config.whatsapp, WhatsAppConfig::default());
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn portal_name_is_the_short_form() {
        assert_eq!(PORTAL_NAME, "BPT Portal");
        assert!(!PORTAL_NAME.contains("Brand Partnership"));
    }

    #[test]
    fn every_campaign_has_an_embed() {
        let embeds = EmbedUrls::default();
        for tab in CampaignTab::ALL {
            assert!(embeds.campaign(tab).starts_with("https://"), "{}", tab.code());
        }
        assert_eq!(
            embeds.campaign(CampaignTab::SeptWomenHealth),
            "https://apotekalpro-womanhealth.pages.dev/#metrics"
        );
    }

    #[test]
    fn monitoring_embeds_are_unset_by_default() {
        let embeds = EmbedUrls::default();
        for tab in MonitoringTab::ALL {
            assert!(embeds.monitoring(tab).is_empty());
        }

        let config: PortalConfig = serde_json::from_str(
            r#"{"embeds":{"performance_metrics":"https://example.org/perf"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.embeds.monitoring(MonitoringTab::PerformanceMetrics),
            "https://example.org/perf"
        );
    }
}
