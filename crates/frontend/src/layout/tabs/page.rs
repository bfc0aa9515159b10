//! TabPage component - wrapper for one dashboard pane
//!
//! The pane body is rendered the first time its tab becomes active and is
//! kept mounted afterwards; inactive panes are only hidden.

use super::registry::render_tab_content;
use contracts::dashboard::tabs::TabId;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;

#[component]
pub fn TabPage(tab: TabId) -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <section
            class="tab-pane"
            class:active=move || ctx.is_active(tab)
            data-tab-key=tab.code()
        >
            <Show when=move || ctx.is_initialized(tab)>
                {move || {
                    log::debug!("Rendering pane '{}'", tab.code());
                    render_tab_content(tab)
                }}
            </Show>
        </section>
    }
}
