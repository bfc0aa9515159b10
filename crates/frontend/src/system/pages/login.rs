use contracts::shared::portal::{BRAND_NAME, PORTAL_NAME};
use contracts::system::auth::{LoginRequest, LoginType};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{check_login, use_auth, AuthState};

/// Pause between the welcome message and the dashboard
const WELCOME_DELAY_MS: u32 = 1_000;
const ERROR_VISIBLE_MS: u32 = 5_000;

/// Alt+O / Alt+H switch the credential scheme
fn shortcut_login_type(ev: &web_sys::KeyboardEvent) -> Option<LoginType> {
    if !ev.alt_key() {
        return None;
    }
    match (ev.key().to_lowercase().as_str(), ev.code().as_str()) {
        ("o", _) | (_, "KeyO") => Some(LoginType::Outlet),
        ("h", _) | (_, "KeyH") => Some(LoginType::Hq),
        _ => None,
    }
}

/// Records a newly shown error; `None` once the page is gone
fn bump_error_seq(seq: StoredValue<u32>) -> Option<u32> {
    seq.try_update_value(|n| {
        *n += 1;
        *n
    })
}

/// Auto-hide for the error numbered `shown`. A newer error keeps its own
/// timer, and a page unmounted in the meantime is left alone.
fn hide_error_if_current(
    seq: StoredValue<u32>,
    shown: u32,
    set_error_message: WriteSignal<Option<String>>,
) {
    if seq.try_get_value() == Some(shown) {
        set_error_message.try_set(None);
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (login_type, set_login_type) = signal(LoginType::Outlet);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (success_message, set_success_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);
    // Bumped on every error so an older auto-hide timer leaves a newer message alone
    let error_seq = StoredValue::new(0u32);

    let (auth_state, set_auth_state) = use_auth();

    let show_error = move |message: String| {
        set_success_message.try_set(None);
        set_error_message.try_set(Some(message));
        if let Some(shown) = bump_error_seq(error_seq) {
            spawn_local(async move {
                TimeoutFuture::new(ERROR_VISIBLE_MS).await;
                hide_error_if_current(error_seq, shown, set_error_message);
            });
        }
    };

    let switch_type = move |next: LoginType| {
        if login_type.get_untracked() != next {
            set_login_type.set(next);
            set_error_message.set(None);
        }
    };

    let keydown = window_event_listener(leptos::ev::keydown, move |ev| {
        if let Some(next) = shortcut_login_type(&ev) {
            ev.prevent_default();
            switch_type(next);
        }
    });
    on_cleanup(move || keydown.remove());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = LoginRequest {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked().trim().to_string(),
            login_type: login_type.get_untracked(),
        };
        if request.username.is_empty() || request.password.is_empty() {
            show_error(contracts::system::credentials::MISSING_FIELDS.to_string());
            return;
        }

        let mode = auth_state.get_untracked().mode;
        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match check_login(mode, request).await {
                Ok(user) => {
                    log::info!("Login succeeded for {}", user.display_name);
                    set_success_message.set(Some(format!("Welcome, {}!", user.display_name)));
                    TimeoutFuture::new(WELCOME_DELAY_MS).await;
                    set_auth_state.set(AuthState {
                        user: Some(user),
                        mode,
                        ready: true,
                    });
                }
                Err(message) => {
                    log::warn!("Login rejected: {}", message);
                    show_error(message);
                }
            }
            // a successful login has already unmounted this page
            set_is_loading.try_set(false);
        });
    };

    let type_button = move |kind: LoginType, icon: &'static str, title: &'static str| {
        view! {
            <button
                type="button"
                class="login-type-btn"
                class:active=move || login_type.get() == kind
                on:click=move |_| switch_type(kind)
            >
                {icon} " " {title}
            </button>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-header">
                    <h1>{BRAND_NAME}</h1>
                    <h2>{PORTAL_NAME}</h2>
                </div>

                <div class="login-type-toggle">
                    {type_button(LoginType::Outlet, "🏪", "Outlet Login")}
                    {type_button(LoginType::Hq, "🏢", "HQ Login")}
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>
                <Show when=move || success_message.get().is_some()>
                    <div class="success-message">
                        {move || success_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">{move || login_type.get().username_label()}</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            placeholder=move || login_type.get().username_placeholder()
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "🔄 Logging in..." } else { "🚀 Login" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"Shortcuts: " <strong>"Alt+O"</strong> " outlet, " <strong>"Alt+H"</strong> " HQ"</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_timer_clears_its_own_message() {
        let owner = Owner::new();
        owner.with(|| {
            let seq = StoredValue::new(0u32);
            let (error, set_error) = signal(Some("Invalid credentials".to_string()));

            let shown = bump_error_seq(seq).unwrap();
            hide_error_if_current(seq, shown, set_error);
            assert_eq!(error.get_untracked(), None);
        });
    }

    #[test]
    fn newer_error_outlives_older_timer() {
        let owner = Owner::new();
        owner.with(|| {
            let seq = StoredValue::new(0u32);
            let (error, set_error) = signal(None::<String>);

            let first = bump_error_seq(seq).unwrap();
            set_error.set(Some("second".into()));
            let second = bump_error_seq(seq).unwrap();
            assert_ne!(first, second);

            hide_error_if_current(seq, first, set_error);
            assert_eq!(error.get_untracked().as_deref(), Some("second"));
        });
    }

    #[test]
    fn error_timer_after_unmount_is_harmless() {
        let page = Owner::new();
        let (seq, set_error) = page.with(|| {
            let seq = StoredValue::new(0u32);
            let (_, set_error) = signal(Some("Invalid credentials".to_string()));
            (seq, set_error)
        });
        let shown = page.with(|| bump_error_seq(seq)).unwrap();

        // login succeeded and the page went away before the timer fired
        page.cleanup();

        hide_error_if_current(seq, shown, set_error);
        assert_eq!(bump_error_seq(seq), None);
        assert!(set_error.try_set(None).is_some());
    }
}
