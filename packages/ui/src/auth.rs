//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] builds the one [`SessionManager`] the app uses, runs
//! `resume()` on mount (which honors the 24-hour freshness window and only
//! touches the network when the stored session is stale), and exposes the
//! result through a `Signal<AuthState>`. A confirmed 401 redirects to the
//! login screen; every other validation failure leaves the session on screen
//! with a non-fatal warning in `auth_error`.

use api::{ApiClient, ClientConfig, HttpTransport, SessionManager, SessionPhase, UserProfile};
use dioxus::prelude::*;
use store::SessionStore;

use crate::redirect_to;

/// The concrete session manager type shared through context.
pub type AppSession = SessionManager<Box<dyn SessionStore>, HttpTransport>;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    /// True until the mount-time `resume()` has finished.
    pub loading: bool,
    pub phase: SessionPhase,
    /// Non-fatal warning from a degraded validation, or a login failure.
    pub auth_error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            phase: SessionPhase::Unauthenticated,
            auth_error: None,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the shared session manager (cheap clone of an `Arc` handle).
pub fn use_session() -> AppSession {
    use_context::<AppSession>()
}

/// Get the shared API client. Clones share one token and one request cache.
pub fn use_api() -> ApiClient<HttpTransport> {
    use_context::<ApiClient<HttpTransport>>()
}

/// Copy the manager's current snapshot into the UI signal.
pub fn sync_auth(mut auth_state: Signal<AuthState>, session: &AppSession) {
    let snap = session.snapshot();
    auth_state.set(AuthState {
        user: snap.user,
        loading: snap.phase == SessionPhase::Validating,
        phase: snap.phase,
        auth_error: snap.auth_error,
    });
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    let client = use_context_provider(|| ApiClient::new(&ClientConfig::default()));
    let session = use_context_provider(|| {
        let session = AppSession::new(
            store::boxed_platform_store(),
            client.clone(),
            &ClientConfig::default(),
        );
        session.set_on_expired(|| redirect_to("/login"));
        session
    });

    // Restore the session on mount. `resume` decides by itself whether a
    // network validation is needed.
    use_future({
        let session = session.clone();
        move || {
            let session = session.clone();
            async move {
                session.resume().await;
                sync_auth(auth_state, &session);
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth_state = use_auth();
    let session = use_session();

    let onclick = move |_| {
        session.logout();
        sync_auth(auth_state, &session);
        redirect_to("/login");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
