//! Opening WhatsApp links from the dashboard.
//!
//! Popup blockers and network filters make a single `window.open` unreliable,
//! so every URL goes through the strategies of `WhatsAppLauncher`. When all
//! URLs fail the manual fallback overlay is shown. Nothing here returns an
//! error to the caller.

use contracts::dashboard::messaging::NoticeLevel;
use contracts::dashboard::whatsapp::{
    classify_click, contact_urls, fallback_options, FallbackAction, LaunchProbe, LaunchStep,
    LaunchStrategy, LinkIntercept, WhatsAppLauncher, DIRECT_SELECTOR,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

use crate::layout::global_context::{use_global_context, AppGlobalContext};
use crate::shared::clipboard::copy_to_clipboard_with_callback;

/// Named target reused by link and form strategies, so retries land in one tab
const LAUNCH_TARGET: &str = "alpro_whatsapp";
/// Ancestors inspected above a clicked element
const INTERCEPT_DEPTH: usize = 5;

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))
}

fn body() -> Result<web_sys::HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

fn open_popup(url: &str) -> Result<Option<Window>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let popup = window.open_with_url_and_target(url, "_blank")?;
    if let Some(popup) = &popup {
        // Detach the opened page from the portal
        let _ = popup.set_opener(&JsValue::NULL);
    }
    Ok(popup)
}

fn click_anchor(url: &str) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document()?.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_target(LAUNCH_TARGET);
    anchor.set_rel("noopener noreferrer");
    HtmlElement::style(&anchor).set_property("display", "none")?;

    let body = body()?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

/// GET forms drop the action's query string, so it is re-sent as hidden fields
fn submit_form(url: &str) -> Result<(), JsValue> {
    let document = document()?;
    let form: HtmlFormElement = document.create_element("form")?.dyn_into()?;
    let (action, query) = url.split_once('?').unwrap_or((url, ""));
    form.set_action(action);
    form.set_method("GET");
    form.set_target(LAUNCH_TARGET);
    HtmlElement::style(&form).set_property("display", "none")?;

    for (name, value) in query.split('&').filter_map(|pair| pair.split_once('=')) {
        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type("hidden");
        input.set_name(name);
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        input.set_value(&value);
        form.append_child(&input)?;
    }

    let body = body()?;
    body.append_child(&form)?;
    form.submit()?;
    body.remove_child(&form)?;
    Ok(())
}

fn assign_location(url: &str) -> Result<(), JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .location()
        .set_href(url)
}

/// Run one strategy; `Some(window)` only when a handle could be observed
fn run_strategy(strategy: LaunchStrategy, url: &str) -> Result<Option<Window>, JsValue> {
    match strategy {
        LaunchStrategy::Popup => open_popup(url),
        // no handle to inspect: counted as not opened, so the cascade continues to LocationAssign
        LaunchStrategy::AnchorClick => click_anchor(url).map(|_| None),
        LaunchStrategy::FormSubmit => submit_form(url).map(|_| None),
        LaunchStrategy::LocationAssign => assign_location(url).map(|_| None),
    }
}

fn probe(handle: Option<&Window>) -> LaunchProbe {
    match handle {
        None => LaunchProbe::NO_HANDLE,
        Some(window) => LaunchProbe {
            handle_present: true,
            handle_closed: window.closed().unwrap_or(true),
        },
    }
}

/// Walk all strategies for one URL; true when a live window was detected
async fn launch(url: String, probe_delay_ms: u32) -> bool {
    let mut launcher = WhatsAppLauncher::new(url, probe_delay_ms);
    let mut step = launcher.begin();

    loop {
        match step {
            LaunchStep::Attempt {
                strategy,
                url,
                probe_delay_ms,
            } => {
                log::debug!("WhatsApp: trying {} for {}", strategy.label(), url);
                step = match run_strategy(strategy, &url) {
                    Ok(handle) => {
                        TimeoutFuture::new(probe_delay_ms).await;
                        launcher.record(probe(handle.as_ref()))
                    }
                    Err(e) => {
                        log::warn!("WhatsApp: {} failed: {:?}", strategy.label(), e);
                        launcher.record_error()
                    }
                };
            }
            LaunchStep::Done { strategy } => {
                log::info!("WhatsApp opened via {}", strategy.label());
                return true;
            }
            LaunchStep::ShowFallback => return false,
        }
    }
}

/// Non-empty URLs in order, each once
fn unique_urls(urls: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for url in urls {
        if !url.is_empty() && !unique.contains(&url) {
            unique.push(url);
        }
    }
    unique
}

/// Try each URL in turn; shows the fallback overlay for the first one when none opens
pub fn open_whatsapp(ctx: AppGlobalContext, urls: Vec<String>) {
    let unique = unique_urls(urls);
    let Some(first) = unique.first().cloned() else {
        return;
    };
    let probe_delay_ms = ctx.portal.with_untracked(|p| p.whatsapp.probe_delay_ms);

    spawn_local(async move {
        for url in unique {
            if launch(url, probe_delay_ms).await {
                return;
            }
        }
        log::warn!("WhatsApp: every strategy failed, showing manual options");
        ctx.whatsapp_fallback.set(Some(first));
    });
}

/// Contact a phone number: WhatsApp Web, wa.me, api.whatsapp.com, then the group
pub fn contact_phone(ctx: AppGlobalContext, phone: &str, message: &str) {
    let urls = ctx
        .portal
        .with_untracked(|p| contact_urls(phone, message, &p.whatsapp.group_url));
    open_whatsapp(ctx, urls);
}

pub fn join_group(ctx: AppGlobalContext) {
    let group_url = ctx.portal.with_untracked(|p| p.whatsapp.group_url.clone());
    ctx.notify(NoticeLevel::Success, "Opening WhatsApp Group...");
    open_whatsapp(ctx, vec![group_url]);
}

fn follow_intercept(ctx: AppGlobalContext, intercept: LinkIntercept) {
    match intercept {
        LinkIntercept::Contact(target) => {
            ctx.notify(
                NoticeLevel::Success,
                format!("Opening WhatsApp for {}...", target.phone),
            );
            contact_phone(ctx, &target.phone, &target.message);
        }
        LinkIntercept::Link(url) => {
            let group_url = ctx.portal.with_untracked(|p| p.whatsapp.group_url.clone());
            open_whatsapp(ctx, vec![url, group_url]);
        }
        LinkIntercept::OpenPanel => ctx.whatsapp_panel_open.set(true),
    }
}

/// Route clicks on WhatsApp links in the portal through the launcher.
///
/// Controls under `data-whatsapp-direct` open WhatsApp themselves and are skipped.
pub fn install_whatsapp_link_interceptor(ctx: AppGlobalContext) {
    let handle = window_event_listener(leptos::ev::click, move |ev| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if matches!(target.closest(DIRECT_SELECTOR), Ok(Some(_))) {
            return;
        }

        let mut element = Some(target);
        for _ in 0..INTERCEPT_DEPTH {
            let Some(current) = element else {
                return;
            };
            let href = current.get_attribute("href").unwrap_or_default();
            let class = current.get_attribute("class").unwrap_or_default();
            if let Some(intercept) = classify_click(&href, &class, &current.id()) {
                ev.prevent_default();
                log::debug!("WhatsApp link intercepted: {:?}", intercept);
                follow_intercept(ctx, intercept);
                return;
            }
            element = current.parent_element();
        }
    });
    on_cleanup(move || handle.remove());
}

/// Manual options shown after every strategy failed
#[component]
pub fn WhatsAppFallback() -> impl IntoView {
    let ctx = use_global_context();

    let options = move || {
        let url = ctx.whatsapp_fallback.get()?;
        Some(ctx.portal.with(|p| fallback_options(&p.whatsapp, &url)))
    };

    view! {
        <Show when=move || ctx.whatsapp_fallback.get().is_some()>
            <div class="whatsapp-fallback__backdrop" data-whatsapp-direct="">
                <div class="whatsapp-fallback">
                    <div class="whatsapp-fallback__header">
                        <h3>"📱 WhatsApp Connection Issue"</h3>
                        <button
                            class="whatsapp-fallback__close"
                            aria-label="Close"
                            on:click=move |_| ctx.whatsapp_fallback.set(None)
                        >
                            "×"
                        </button>
                    </div>
                    <p>"WhatsApp could not be opened automatically. Try one of these options:"</p>
                    <div class="whatsapp-fallback__options">
                        {move || {
                            options()
                                .unwrap_or_default()
                                .into_iter()
                                .map(|option| {
                                    let body = view! {
                                        <span class="whatsapp-fallback__icon">{option.icon.clone()}</span>
                                        <span class="whatsapp-fallback__text">
                                            <strong>{option.title.clone()}</strong>
                                            <small>{option.description.clone()}</small>
                                        </span>
                                    };
                                    match option.action {
                                        FallbackAction::Link(href) => view! {
                                            <a
                                                class="whatsapp-fallback__option"
                                                href=href
                                                target="_blank"
                                                rel="noopener noreferrer"
                                            >
                                                {body}
                                            </a>
                                        }
                                        .into_any(),
                                        FallbackAction::Copy(text) => view! {
                                            <button
                                                class="whatsapp-fallback__option"
                                                on:click=move |_| {
                                                    let copied_text = text.clone();
                                                    copy_to_clipboard_with_callback(&text, move |ok| {
                                                        if ok {
                                                            ctx.notify(
                                                                NoticeLevel::Success,
                                                                format!("Copied {}", copied_text),
                                                            );
                                                        } else {
                                                            ctx.notify(
                                                                NoticeLevel::Error,
                                                                "Could not copy to clipboard",
                                                            );
                                                        }
                                                    });
                                                }
                                            >
                                                {body}
                                            </button>
                                        }
                                        .into_any(),
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Quick-message panel: message to a number, or the group when no number is given
#[component]
pub fn WhatsAppPanel() -> impl IntoView {
    let ctx = use_global_context();
    let (phone, set_phone) = signal(String::new());
    let (message, set_message) = signal(String::new());

    let close = move || {
        set_phone.set(String::new());
        set_message.set(String::new());
        ctx.whatsapp_panel_open.set(false);
    };

    let send = move |_: leptos::ev::MouseEvent| {
        let text = message.get_untracked().trim().to_string();
        if text.is_empty() {
            ctx.notify(NoticeLevel::Warning, "Please enter a message");
            return;
        }
        let number = phone.get_untracked().trim().to_string();
        if number.is_empty() {
            join_group(ctx);
        } else {
            ctx.notify(NoticeLevel::Success, "Opening WhatsApp...");
            contact_phone(ctx, &number, &text);
        }
        close();
    };

    view! {
        <Show when=move || ctx.whatsapp_panel_open.get()>
            <div class="whatsapp-panel" data-whatsapp-direct="">
                <div class="whatsapp-panel__header">
                    <h3>"💬 WhatsApp"</h3>
                    <button class="whatsapp-panel__close" aria-label="Close" on:click=move |_| close()>
                        "×"
                    </button>
                </div>
                <button
                    class="btn-primary"
                    on:click=move |_| {
                        join_group(ctx);
                        close();
                    }
                >
                    "Join WhatsApp Group"
                </button>
                <div class="whatsapp-panel__form">
                    <input
                        type="tel"
                        placeholder="Phone number (optional)"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Type your message..."
                        prop:value=move || message.get()
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn-secondary" on:click=send>"Send Message"</button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_list_skips_blanks_and_repeats() {
        let group = "https://chat.whatsapp.com/HukQMDMTtJjFi12x1lAty3".to_string();
        let urls = vec![
            "https://wa.me/62812".to_string(),
            String::new(),
            group.clone(),
            group.clone(),
        ];
        assert_eq!(unique_urls(urls), ["https://wa.me/62812".to_string(), group]);
    }
}
