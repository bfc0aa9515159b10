use contracts::dashboard::messaging::NoticeLevel;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::shared::iframe_frame::ManagedFrame;
use crate::shared::whatsapp::{contact_phone, join_group};

#[component]
pub fn TiktokCuanPane() -> impl IntoView {
    let ctx = use_global_context();
    let src = Signal::derive(move || ctx.portal.with(|p| p.embeds.tiktok_cuan.clone()));
    let support_display =
        move || ctx.portal.with(|p| p.whatsapp.support_phone_display.clone());

    let contact_support = move |_| {
        let (phone, message) = ctx
            .portal
            .with_untracked(|p| (p.whatsapp.support_phone.clone(), p.whatsapp.default_message.clone()));
        ctx.notify(NoticeLevel::Success, "Opening WhatsApp...");
        contact_phone(ctx, &phone, &message);
    };

    view! {
        <div class="pane pane--tiktok-cuan">
            <div class="pane__header">
                <h2>"🎵 TikTok Cuan"</h2>
                <div class="pane__actions">
                    <button class="btn-whatsapp" data-whatsapp-direct="" on:click=move |_| join_group(ctx)>
                        "Join WhatsApp Group"
                    </button>
                    <button class="btn-secondary" on:click=contact_support title=support_display>
                        "Contact Support"
                    </button>
                    <button class="btn-secondary" on:click=move |_| ctx.whatsapp_panel_open.set(true)>
                        "Quick Message"
                    </button>
                </div>
            </div>
            <ManagedFrame
                src=src
                title="TikTok Cuan"
                loading_text="Loading TikTok Cuan Dashboard..."
                allow="clipboard-write; fullscreen"
            />
        </div>
    }
}
