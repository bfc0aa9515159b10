use contracts::dashboard::tabs::MonitoringTab;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::layout::tabs::SubTabs;
use crate::shared::iframe_frame::ManagedFrame;

#[component]
pub fn MonitoringPane() -> impl IntoView {
    let ctx = use_global_context();

    let src = Signal::derive(move || {
        let tab = ctx.monitoring_tab.get();
        ctx.portal.with(|p| p.embeds.monitoring(tab).to_string())
    });
    let configured = move || !src.with(|url| url.is_empty());

    view! {
        <div class="pane pane--monitoring">
            <div class="pane__header">
                <h2>"📊 Monitoring"</h2>
                <SubTabs
                    items={&MonitoringTab::ALL}
                    active=ctx.monitoring_tab
                    label=MonitoringTab::title
                />
            </div>
            <Show
                when=configured
                fallback=move || view! {
                    <div class="pane__placeholder">
                        <p>
                            <strong>{move || ctx.monitoring_tab.get().title()}</strong>
                            " has no dashboard configured yet."
                        </p>
                        <small>"Set its URL under [portal.embeds] in config.toml."</small>
                    </div>
                }
            >
                <ManagedFrame
                    src=src
                    title="Monitoring Dashboard"
                    loading_text="Loading monitoring dashboard..."
                />
            </Show>
        </div>
    }
}
