//! Dashboard: profile summary, today's check-in card, and the degraded-
//! session warning with a manual retry.
//!
//! A degraded session still renders the cached profile; only an explicit
//! 401 ever empties this page (the provider redirects before we get here).

use dioxus::prelude::*;
use ui::{sync_auth, use_api, use_auth, use_session, Card, ErrorNotice, Loader, PointsBadge};

use super::Shell;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let session = use_session();
    let api = use_api();
    let nav = use_navigator();
    let mut retrying = use_signal(|| false);
    let mut require_complete = use_signal(|| false);

    // Profile-completeness side read; failures degrade to "nothing to show".
    use_future({
        let session = session.clone();
        move || {
            let session = session.clone();
            async move {
                require_complete.set(session.check_require_complete().await);
            }
        }
    });

    let checkin = use_resource(move || {
        let api = api.clone();
        async move { api.checkin_status().await }
    });

    let state = auth();
    if state.loading {
        return rsx! { Loader {} };
    }
    let Some(user) = state.user else {
        nav.replace(Route::Login {});
        return rsx! {};
    };

    let display_name = user.nickname.clone().unwrap_or_else(|| user.username.clone());

    let retry = move |_| {
        let session = session.clone();
        async move {
            retrying.set(true);
            session.retry_auth().await;
            sync_auth(auth, &session);
            retrying.set(false);
        }
    };

    let checkin_card = match &*checkin.read_unchecked() {
        None => rsx! { Loader { label: "Checking..." } },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(status)) if status.checked_in_today => rsx! {
            p { "Checked in today. Streak: {status.streak} days." }
        },
        Some(Ok(status)) => rsx! {
            p { "Check in today for {status.today_reward} 灵值." }
            Link { to: Route::CheckIn {}, class: "primary", "Go to check-in" }
        },
    };

    rsx! {
        Shell {
            div {
                class: "home",

                if let Some(error) = &state.auth_error {
                    div {
                        class: "degraded-banner",
                        ErrorNotice { message: "{error}" }
                        button {
                            class: "secondary",
                            disabled: retrying(),
                            onclick: retry,
                            if retrying() { "Retrying..." } else { "Retry" }
                        }
                    }
                }

                if require_complete() {
                    div {
                        class: "complete-profile-banner",
                        "Your profile is missing required fields. "
                        Link { to: Route::Profile {}, "Complete it now" }
                    }
                }

                Card {
                    title: "Welcome back, {display_name}",
                    PointsBadge { total_lingzhi: user.total_lingzhi, level: user.level }
                }

                Card {
                    title: "Daily check-in",
                    {checkin_card}
                }
            }
        }
    }
}
