use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dashboard panes, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabId {
    Homepage,
    Campaign,
    Monitoring,
    HealthNews,
    TiktokCuan,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Homepage,
        TabId::Campaign,
        TabId::Monitoring,
        TabId::HealthNews,
        TabId::TiktokCuan,
    ];

    /// DOM id of the pane, also the `data-tab` value of its nav button
    pub fn code(&self) -> &'static str {
        match self {
            TabId::Homepage => "homepage",
            TabId::Campaign => "campaign",
            TabId::Monitoring => "monitoring",
            TabId::HealthNews => "health-news",
            TabId::TiktokCuan => "tiktok-cuan",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TabId::Homepage => "Homepage",
            TabId::Campaign => "Campaign",
            TabId::Monitoring => "Monitoring",
            TabId::HealthNews => "Health News",
            TabId::TiktokCuan => "TikTok Cuan",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.code() == code)
    }

    /// Alt+Digit1..Digit5 shortcut mapping
    pub fn from_shortcut(key_code: &str) -> Option<Self> {
        match key_code {
            "Digit1" => Some(TabId::Homepage),
            "Digit2" => Some(TabId::Campaign),
            "Digit3" => Some(TabId::Monitoring),
            "Digit4" => Some(TabId::HealthNews),
            "Digit5" => Some(TabId::TiktokCuan),
            _ => None,
        }
    }
}

/// Result of a switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSwitch {
    /// Target was already active; nothing changed
    Unchanged,
    /// Target became active. `first_visit` is true when its pane initializer must run.
    Activated { tab: TabId, first_visit: bool },
}

/// Single-active tab state with lazy pane initialization.
#[derive(Debug, Clone)]
pub struct TabSwitcher {
    current: TabId,
    initialized: HashSet<TabId>,
}

impl TabSwitcher {
    /// The initial tab counts as visited: its pane is rendered eagerly.
    pub fn new(initial: TabId) -> Self {
        let mut initialized = HashSet::new();
        initialized.insert(initial);
        Self {
            current: initial,
            initialized,
        }
    }

    pub fn current(&self) -> TabId {
        self.current
    }

    pub fn is_active(&self, tab: TabId) -> bool {
        self.current == tab
    }

    pub fn is_initialized(&self, tab: TabId) -> bool {
        self.initialized.contains(&tab)
    }

    pub fn switch_to(&mut self, tab: TabId) -> TabSwitch {
        if tab == self.current {
            return TabSwitch::Unchanged;
        }
        self.current = tab;
        let first_visit = self.initialized.insert(tab);
        TabSwitch::Activated { tab, first_visit }
    }
}

impl Default for TabSwitcher {
    fn default() -> Self {
        Self::new(TabId::Homepage)
    }
}

/// Campaigns listed in the campaign pane, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignTab {
    OctKenaliGula,
    SeptWomenHealth,
    DecAnniversarySales,
    NewYearNewMe,
}

impl CampaignTab {
    pub const ALL: [CampaignTab; 4] = [
        CampaignTab::OctKenaliGula,
        CampaignTab::SeptWomenHealth,
        CampaignTab::DecAnniversarySales,
        CampaignTab::NewYearNewMe,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CampaignTab::OctKenaliGula => "oct-kenali-gula",
            CampaignTab::SeptWomenHealth => "sept-women-health",
            CampaignTab::DecAnniversarySales => "dec-anniversary-sales",
            CampaignTab::NewYearNewMe => "new-year-new-me",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CampaignTab::OctKenaliGula => "Oct: Kenali Gula",
            CampaignTab::SeptWomenHealth => "Sept: Women Health",
            CampaignTab::DecAnniversarySales => "Dec: Anniversary Sales",
            CampaignTab::NewYearNewMe => "New Year New Me",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.code() == code)
    }
}

impl Default for CampaignTab {
    fn default() -> Self {
        CampaignTab::OctKenaliGula
    }
}

/// Sub-tabs of the monitoring pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitoringTab {
    TiktokAnalytics,
    PerformanceMetrics,
}

impl MonitoringTab {
    pub const ALL: [MonitoringTab; 2] = [
        MonitoringTab::TiktokAnalytics,
        MonitoringTab::PerformanceMetrics,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MonitoringTab::TiktokAnalytics => "tiktok-analytics",
            MonitoringTab::PerformanceMetrics => "performance-metrics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MonitoringTab::TiktokAnalytics => "TikTok Analytics",
            MonitoringTab::PerformanceMetrics => "Performance Metrics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_to_active_tab_is_noop() {
        let mut switcher = TabSwitcher::default();
        assert_eq!(switcher.switch_to(TabId::Homepage), TabSwitch::Unchanged);
        assert_eq!(switcher.current(), TabId::Homepage);
    }

    #[test]
    fn initializer_runs_once_per_pane() {
        let mut switcher = TabSwitcher::default();
        assert!(!switcher.is_initialized(TabId::TiktokCuan));

        assert_eq!(
            switcher.switch_to(TabId::TiktokCuan),
            TabSwitch::Activated {
                tab: TabId::TiktokCuan,
                first_visit: true
            }
        );
        assert_eq!(switcher.switch_to(TabId::TiktokCuan), TabSwitch::Unchanged);
        switcher.switch_to(TabId::Campaign);
        assert_eq!(
            switcher.switch_to(TabId::TiktokCuan),
            TabSwitch::Activated {
                tab: TabId::TiktokCuan,
                first_visit: false
            }
        );
    }

    #[test]
    fn exactly_one_tab_is_active() {
        let mut switcher = TabSwitcher::default();
        switcher.switch_to(TabId::HealthNews);
        let active: Vec<_> = TabId::ALL
            .into_iter()
            .filter(|tab| switcher.is_active(*tab))
            .collect();
        assert_eq!(active, vec![TabId::HealthNews]);
    }

    #[test]
    fn codes_and_shortcuts_round_trip() {
        assert_eq!(TabId::from_code("health-news"), Some(TabId::HealthNews));
        assert_eq!(TabId::from_code("unknown"), None);
        assert_eq!(TabId::from_shortcut("Digit5"), Some(TabId::TiktokCuan));
        assert_eq!(TabId::from_shortcut("Digit6"), None);
        assert_eq!(
            serde_json::to_string(&TabId::TiktokCuan).unwrap(),
            "\"tiktok-cuan\""
        );
    }

    #[test]
    fn campaign_codes_match_serde_names() {
        for tab in CampaignTab::ALL {
            let json = serde_json::to_string(&tab).unwrap();
            assert_eq!(json, format!("\"{}\"", tab.code()));
            assert_eq!(CampaignTab::from_code(tab.code()), Some(tab));
        }
        assert_eq!(CampaignTab::default(), CampaignTab::OctKenaliGula);
    }
}
