use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::shared::iframe_frame::ManagedFrame;

#[component]
pub fn HealthNewsPane() -> impl IntoView {
    let ctx = use_global_context();
    let src = Signal::derive(move || ctx.portal.with(|p| p.embeds.health_news.clone()));

    view! {
        <div class="pane pane--health-news">
            <div class="pane__header">
                <h2>"📰 Health News"</h2>
            </div>
            <ManagedFrame src=src title="Health News" loading_text="Loading health news..." />
        </div>
    }
}
