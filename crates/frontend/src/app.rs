use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Dashboard-wide state for every component below
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
