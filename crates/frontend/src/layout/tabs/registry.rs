//! Pane registry: the single place mapping a tab to its view.

use contracts::dashboard::tabs::TabId;
use leptos::prelude::*;

use crate::dashboards::{
    CampaignPane, HealthNewsPane, HomepagePane, MonitoringPane, TiktokCuanPane,
};

pub fn render_tab_content(tab: TabId) -> AnyView {
    match tab {
        TabId::Homepage => view! { <HomepagePane /> }.into_any(),
        TabId::Campaign => view! { <CampaignPane /> }.into_any(),
        TabId::Monitoring => view! { <MonitoringPane /> }.into_any(),
        TabId::HealthNews => view! { <HealthNewsPane /> }.into_any(),
        TabId::TiktokCuan => view! { <TiktokCuanPane /> }.into_any(),
    }
}
