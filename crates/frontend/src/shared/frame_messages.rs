//! `postMessage` bridge between embedded pages and the dashboard.

use contracts::dashboard::messaging::{decode_message, react, FrameAction, RejectReason};
use leptos::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::whatsapp::open_whatsapp;

fn reply(event: &MessageEvent, response: &impl Serialize) {
    let Some(source) = event
        .source()
        .and_then(|s| s.dyn_into::<web_sys::Window>().ok())
    else {
        log::debug!("Frame message has no window source, reply dropped");
        return;
    };

    match response.serialize(&Serializer::json_compatible()) {
        Ok(value) => {
            if let Err(e) = source.post_message(&value, &event.origin()) {
                log::warn!("Failed to reply to frame: {:?}", e);
            }
        }
        Err(e) => log::error!("Failed to serialize frame reply: {}", e),
    }
}

fn open_external(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("Failed to open {}: {:?}", url, e);
        }
    }
}

fn handle_message(ctx: AppGlobalContext, event: MessageEvent) {
    let origin = event.origin();
    let data: serde_json::Value = match serde_wasm_bindgen::from_value(event.data()) {
        Ok(data) => data,
        Err(_) => return,
    };

    let portal = ctx.portal.get_untracked();
    let message = match decode_message(&origin, &data, &portal.allowed_origins) {
        Ok(message) => message,
        Err(RejectReason::UnauthorizedOrigin) => {
            log::debug!("Ignoring message from unauthorized origin {}", origin);
            return;
        }
        Err(RejectReason::Unrecognized) => return,
    };

    for action in react(&message, &portal) {
        match action {
            FrameAction::OpenWhatsApp { primary, fallbacks } => {
                let mut urls = vec![primary];
                urls.extend(fallbacks);
                open_whatsapp(ctx, urls);
            }
            FrameAction::ShowWhatsAppPanel => ctx.whatsapp_panel_open.set(true),
            FrameAction::Notify { level, message } => ctx.notify(level, message),
            FrameAction::OpenExternal { url } => open_external(&url),
            FrameAction::Reply(response) => reply(&event, &response),
        }
    }
}

/// Listen for frame messages while the calling component is mounted
pub fn install_frame_message_listener(ctx: AppGlobalContext) {
    let handle = window_event_listener(leptos::ev::message, move |event: MessageEvent| {
        handle_message(ctx, event);
    });
    on_cleanup(move || handle.remove());
}
