//! Application shell: auth gate between the login page and the dashboard.

use crate::layout::global_context::use_global_context;
use crate::layout::Shell;
use crate::shared::frame_messages::install_frame_message_listener;
use crate::shared::whatsapp::install_whatsapp_link_interceptor;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

const LOGIN_PATH: &str = "/login";
const DASHBOARD_PATH: &str = "/dashboard";

/// Keep the address bar on the page being shown without reloading
fn sync_path(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let current = window.location().pathname().unwrap_or_default();
    if current == path {
        return;
    }
    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
            log::warn!("Failed to update path to {}: {:?}", path, e);
        }
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_global_context();

    ctx.load_portal_config();
    install_frame_message_listener(ctx);
    install_whatsapp_link_interceptor(ctx);
    sync_path(DASHBOARD_PATH);

    view! { <Shell /> }
}

#[component]
fn LoginScreen() -> impl IntoView {
    sync_path(LOGIN_PATH);
    view! { <LoginPage /> }
}

#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="app-loading">
            <div class="spinner"></div>
            <p>"Loading..."</p>
        </div>
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    let ready = move || auth_state.get().ready;
    let signed_in = move || auth_state.get().user.is_some();

    view! {
        <Show when=ready fallback=|| view! { <LoadingScreen /> }>
            <Show when=signed_in fallback=|| view! { <LoginScreen /> }>
                <MainLayout />
            </Show>
        </Show>
    }
}
