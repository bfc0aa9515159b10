use contracts::dashboard::tabs::CampaignTab;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::layout::tabs::SubTabs;
use crate::shared::iframe_frame::ManagedFrame;

#[component]
pub fn CampaignPane() -> impl IntoView {
    let ctx = use_global_context();

    let src = Signal::derive(move || {
        let tab = ctx.campaign_tab.get();
        ctx.portal.with(|p| p.embeds.campaign(tab).to_string())
    });

    view! {
        <div class="pane pane--campaign">
            <div class="pane__header">
                <h2>"📢 Campaign"</h2>
                <SubTabs items={&CampaignTab::ALL} active=ctx.campaign_tab label=CampaignTab::title />
            </div>
            <ManagedFrame
                src=src
                title="Campaign Dashboard"
                loading_text="Loading campaign dashboard..."
            />
        </div>
    }
}
