use contracts::dashboard::messaging::NoticeLevel;
use contracts::dashboard::tabs::{CampaignTab, MonitoringTab, TabId, TabSwitch, TabSwitcher};
use contracts::shared::portal::PortalConfig;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api;

/// How long a toast stays on screen
const NOTIFICATION_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Dashboard-wide state provided through context
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub tabs: RwSignal<TabSwitcher>,
    pub campaign_tab: RwSignal<CampaignTab>,
    pub monitoring_tab: RwSignal<MonitoringTab>,
    pub portal: RwSignal<PortalConfig>,
    pub notifications: RwSignal<Vec<Notification>>,
    /// Quick-message panel opened from frame messages or buttons
    pub whatsapp_panel_open: RwSignal<bool>,
    /// URL the launcher could not open; shows the manual fallback overlay
    pub whatsapp_fallback: RwSignal<Option<String>>,
    next_notification_id: StoredValue<u64>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            tabs: RwSignal::new(TabSwitcher::default()),
            campaign_tab: RwSignal::new(CampaignTab::default()),
            monitoring_tab: RwSignal::new(MonitoringTab::TiktokAnalytics),
            portal: RwSignal::new(PortalConfig::default()),
            notifications: RwSignal::new(Vec::new()),
            whatsapp_panel_open: RwSignal::new(false),
            whatsapp_fallback: RwSignal::new(None),
            next_notification_id: StoredValue::new(0),
        }
    }

    /// Fetch portal settings; the built-in defaults stay when the API is absent
    pub fn load_portal_config(&self) {
        let portal = self.portal;
        spawn_local(async move {
            match api::get_portal_config().await {
                Ok(config) => portal.set(config),
                Err(e) => log::info!("Using built-in portal config: {}", e),
            }
        });
    }

    pub fn is_active(&self, tab: TabId) -> bool {
        self.tabs.with(|tabs| tabs.is_active(tab))
    }

    pub fn is_initialized(&self, tab: TabId) -> bool {
        self.tabs.with(|tabs| tabs.is_initialized(tab))
    }

    /// Activate a tab; switching to the active tab changes nothing
    pub fn switch_tab(&self, tab: TabId) {
        let mut result = TabSwitch::Unchanged;
        self.tabs.update(|tabs| result = tabs.switch_to(tab));

        if let TabSwitch::Activated { tab, first_visit } = result {
            log::debug!("Tab '{}' active (first visit: {})", tab.code(), first_visit);
            if first_visit && tab == TabId::HealthNews {
                self.notify(NoticeLevel::Success, "Health News loaded successfully");
            }
        }
    }

    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let id = self.next_notification_id.get_value();
        self.next_notification_id.set_value(id + 1);

        self.notifications.update(|list| {
            list.push(Notification {
                id,
                level,
                message: message.into(),
            })
        });

        let notifications = self.notifications;
        spawn_local(async move {
            TimeoutFuture::new(NOTIFICATION_MS).await;
            notifications.update(|list| list.retain(|n| n.id != id));
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the dashboard context
pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}
