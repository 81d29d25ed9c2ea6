use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::components::PointsBadge;
use crate::LogoutButton;

/// Top navigation bar: brand, page links passed as children, and the
/// session corner (points badge + sign-out, or nothing while anonymous).
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        div {
            class: "navbar",
            span { class: "navbar-brand", "Lingzhi" }
            div {
                class: "navbar-links",
                {children}
            }
            div {
                class: "navbar-session",
                if let Some(user) = &state.user {
                    PointsBadge {
                        total_lingzhi: user.total_lingzhi,
                        level: user.level,
                    }
                    LogoutButton { class: "navbar-logout" }
                }
            }
        }
    }
}
