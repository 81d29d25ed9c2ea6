//! Daily check-in page.
//!
//! Completing a check-in invalidates the cached status inside the API
//! client, so the restart of the resource below re-fetches real state
//! instead of replaying the stale cache entry.

use api::CheckinResult;
use dioxus::prelude::*;
use ui::{use_api, Card, ErrorNotice, Loader};

use super::Shell;

#[component]
pub fn CheckIn() -> Element {
    let api = use_api();
    let mut working = use_signal(|| false);
    let mut last_result = use_signal(|| Option::<CheckinResult>::None);
    let mut action_error = use_signal(|| Option::<String>::None);

    let mut status = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.checkin_status().await }
        }
    });

    let on_checkin = move |_| {
        let api = api.clone();
        async move {
            working.set(true);
            action_error.set(None);
            match api.complete_checkin().await {
                Ok(result) => {
                    last_result.set(Some(result));
                    status.restart();
                }
                Err(e) => action_error.set(Some(e.user_message())),
            }
            working.set(false);
        }
    };

    let body = match &*status.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(status)) if status.checked_in_today => rsx! {
            p { class: "checkin-done", "Already checked in today." }
            p { "Current streak: {status.streak} days." }
        },
        Some(Ok(status)) => rsx! {
            p { "Today's reward: {status.today_reward} 灵值" }
            p { "Current streak: {status.streak} days" }
            button {
                class: "primary",
                disabled: working(),
                onclick: on_checkin,
                if working() { "Checking in..." } else { "Check in" }
            }
        },
    };

    rsx! {
        Shell {
            Card {
                title: "Daily check-in",
                {body}

                if let Some(result) = last_result() {
                    p {
                        class: "checkin-reward",
                        "+{result.reward} 灵值 · balance {result.total_lingzhi} · streak {result.streak}"
                    }
                }
                if let Some(error) = action_error() {
                    ErrorNotice { message: error }
                }
            }
        }
    }
}
