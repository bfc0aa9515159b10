//! TopHeader component - portal top bar.
//!
//! Contains:
//! - Brand
//! - User badge, name and store details
//! - Logout

use crate::system::auth::context::{do_logout, use_auth};
use contracts::shared::portal::{BRAND_NAME, PORTAL_NAME};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        log::info!("User logged out");
        do_logout(auth_state, set_auth_state);
    };

    let user = move || auth_state.get().user;

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <span class="top-header__logo">"💊"</span>
                <div>
                    <span class="top-header__title">{BRAND_NAME}</span>
                    <span class="top-header__subtitle">{PORTAL_NAME}</span>
                </div>
            </div>

            <div class="top-header__actions">
                {move || user().map(|u| view! {
                    <div class="top-header__user">
                        <span class="top-header__badge">{u.login_type.badge()}</span>
                        <div class="top-header__user-info">
                            <strong>{u.display_name.clone()}</strong>
                            <small>{u.full_store_name.clone()}</small>
                            <small>{u.am.clone()}</small>
                        </div>
                    </div>
                })}

                <button class="top-header__logout" on:click=logout title="Logout">
                    "Logout"
                </button>
            </div>
        </header>
    }
}
