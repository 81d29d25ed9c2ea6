//! Recharge tiers. Selecting a tier is where a payment flow would start;
//! this view only renders the catalogue the backend offers.

use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

#[component]
pub fn Recharge() -> Element {
    let api = use_api();

    let tiers = use_resource(move || {
        let api = api.clone();
        async move { api.recharge_tiers().await }
    });

    let body = match &*tiers.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(tiers)) if tiers.is_empty() => rsx! {
            EmptyState { title: "Recharge is not available right now" }
        },
        Some(Ok(tiers)) => rsx! {
            div {
                class: "card-grid",
                for tier in tiers.clone() {
                    Card {
                        key: "{tier.id}",
                        title: "{tier.lingzhi} 灵值",
                        p { class: "tier-price", "¥{tier.price}" }
                        if tier.bonus > 0 {
                            p { class: "tier-bonus", "+{tier.bonus} bonus" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Shell {
            h1 { "Recharge" }
            {body}
        }
    }
}
