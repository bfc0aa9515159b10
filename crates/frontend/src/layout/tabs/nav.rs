use contracts::dashboard::tabs::TabId;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;

fn icon(tab: TabId) -> &'static str {
    match tab {
        TabId::Homepage => "🏠",
        TabId::Campaign => "📢",
        TabId::Monitoring => "📊",
        TabId::HealthNews => "📰",
        TabId::TiktokCuan => "🎵",
    }
}

#[component]
pub fn TabNav() -> impl IntoView {
    let ctx = use_global_context();

    let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
        if !ev.alt_key() {
            return;
        }
        if let Some(tab) = TabId::from_shortcut(&ev.code()) {
            ev.prevent_default();
            ctx.switch_tab(tab);
        }
    });
    on_cleanup(move || keydown.remove());

    view! {
        <nav class="tab-nav">
            {TabId::ALL
                .into_iter()
                .enumerate()
                .map(|(index, tab)| {
                    view! {
                        <button
                            class="tab-nav__item"
                            class:active=move || ctx.is_active(tab)
                            data-tab=tab.code()
                            title=format!("{} (Alt+{})", tab.title(), index + 1)
                            on:click=move |_| ctx.switch_tab(tab)
                        >
                            <span class="tab-nav__icon">{icon(tab)}</span>
                            {tab.title()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
