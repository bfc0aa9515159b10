use contracts::dashboard::messaging::NoticeLevel;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;

fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notification notification--info",
        NoticeLevel::Success => "notification notification--success",
        NoticeLevel::Warning => "notification notification--warning",
        NoticeLevel::Error => "notification notification--error",
    }
}

/// Toast stack; entries remove themselves after a few seconds.
#[component]
pub fn Notifications() -> impl IntoView {
    let ctx = use_global_context();

    // Escape dismisses every toast
    let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            ctx.notifications.update(|list| list.clear());
        }
    });
    on_cleanup(move || keydown.remove());

    view! {
        <div class="notifications">
            <For
                each=move || ctx.notifications.get()
                key=|n| n.id
                children=move |n| {
                    view! { <div class=level_class(n.level)>{n.message}</div> }
                }
            />
        </div>
    }
}
