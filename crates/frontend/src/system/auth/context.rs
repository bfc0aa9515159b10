use chrono::Utc;
use contracts::system::auth::{LoginRequest, UserProfile};
use contracts::system::credentials::{authenticate, CredentialTable};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

/// Where logins are checked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Portal backend with cookie sessions
    #[default]
    Server,
    /// No backend answered; built-in table and localStorage
    Static,
}

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub mode: AuthMode,
    /// Session restore finished
    pub ready: bool,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Restore the session once on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let state = match api::get_current_user().await {
                Ok(response) => AuthState {
                    user: response.user,
                    mode: AuthMode::Server,
                    ready: true,
                },
                Err(e) => {
                    log::info!("Portal API unavailable ({}), using static login", e);
                    AuthState {
                        user: storage::load_user(),
                        mode: AuthMode::Static,
                        ready: true,
                    }
                }
            };
            set_auth_state.set(state);
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Check a login in the given mode and return the profile or the message to show
pub async fn check_login(mode: AuthMode, request: LoginRequest) -> Result<UserProfile, String> {
    match mode {
        AuthMode::Server => {
            let response = api::login(&request).await?;
            match (response.success, response.user) {
                (true, Some(user)) => Ok(user),
                _ => Err(response
                    .message
                    .unwrap_or_else(|| contracts::system::credentials::INVALID_CREDENTIALS.into())),
            }
        }
        AuthMode::Static => {
            let user = authenticate(
                &CredentialTable::default(),
                &CredentialTable::builtin(),
                &request,
                Utc::now(),
            )
            .map_err(|failure| failure.message().to_string())?;
            storage::save_user(&user);
            Ok(user)
        }
    }
}

/// Helper: Perform logout
pub fn do_logout(auth_state: ReadSignal<AuthState>, set_auth_state: WriteSignal<AuthState>) {
    let mode = auth_state.get_untracked().mode;
    storage::clear_user();

    if mode == AuthMode::Server {
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                log::warn!("Logout request failed: {}", e);
            }
        });
    }

    set_auth_state.update(|state| state.user = None);
}
