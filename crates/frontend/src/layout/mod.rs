pub mod global_context;
pub mod notifications;
pub mod tabs;
pub mod top_header;

use contracts::dashboard::tabs::TabId;
use leptos::prelude::*;
use notifications::Notifications;
use tabs::{TabNav, TabPage};
use top_header::TopHeader;

use crate::shared::whatsapp::{WhatsAppFallback, WhatsAppPanel};

/// Dashboard shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |              TabNav                      |
/// +------------------------------------------+
/// |  one TabPage per pane (one visible)      |
/// +------------------------------------------+
/// ```
///
/// Overlays (WhatsApp panel, fallback, toasts) sit outside the panes.
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <TabNav />
            <main class="app-main">
                {TabId::ALL
                    .into_iter()
                    .map(|tab| view! { <TabPage tab=tab /> })
                    .collect_view()}
            </main>
            <WhatsAppPanel />
            <WhatsAppFallback />
            <Notifications />
        </div>
    }
}
