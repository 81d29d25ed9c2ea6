//! This crate contains all shared UI for the Lingzhi workspace.

use dioxus::prelude::*;

mod auth;
pub use auth::{
    sync_auth, use_api, use_auth, use_session, AppSession, AuthProvider, AuthState, LogoutButton,
};

mod navbar;
pub use navbar::Navbar;

mod components;
pub use components::{EmptyState, ErrorNotice, Loader, PointsBadge};

mod install_prompt;
pub use install_prompt::InstallPrompt;

/// Navigate the browser to a path (no-op outside the web build).
pub fn redirect_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("redirect requested: {path}");
    }
}

/// Shared card shell used by the listing views.
#[component]
pub fn Card(title: String, children: Element) -> Element {
    rsx! {
        div {
            class: "card",
            h3 { class: "card-title", "{title}" }
            {children}
        }
    }
}
