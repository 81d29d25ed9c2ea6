//! Profile page: the cached user record plus a fresh balance if the last
//! validation produced one. Shows the session phase so a degraded session
//! is visible to the user without being fatal.

use api::SessionPhase;
use dioxus::prelude::*;
use ui::{use_auth, Card, Loader, PointsBadge};

use super::Shell;
use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let state = auth();
    if state.loading {
        return rsx! { Loader {} };
    }
    let Some(user) = state.user else {
        nav.replace(Route::Login {});
        return rsx! {};
    };

    let freshness = match state.phase {
        SessionPhase::AuthenticatedFresh => "Verified just now",
        SessionPhase::AuthenticatedCached => "Loaded from this device",
        SessionPhase::AuthenticatedDegraded => "Could not verify; showing saved data",
        SessionPhase::Validating | SessionPhase::Unauthenticated => "",
    };

    rsx! {
        Shell {
            Card {
                title: "{user.username}",
                if let Some(nickname) = &user.nickname {
                    p { class: "profile-nickname", "{nickname}" }
                }
                PointsBadge { total_lingzhi: user.total_lingzhi, level: user.level }
                if user.is_merchant {
                    p { class: "profile-role", "Merchant account" }
                }
                if !freshness.is_empty() {
                    p { class: "card-meta", "{freshness}" }
                }
            }
        }
    }
}
