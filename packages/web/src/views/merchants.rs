use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

/// Merchant directory (unpaged; the directory is small).
#[component]
pub fn Merchants() -> Element {
    let api = use_api();

    let listing = use_resource(move || {
        let api = api.clone();
        async move { api.merchants().await }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(listing)) if listing.items.is_empty() => rsx! {
            EmptyState { title: "No merchants registered" }
        },
        Some(Ok(listing)) => rsx! {
            div {
                class: "card-grid",
                for merchant in listing.items.clone() {
                    Card {
                        key: "{merchant.id}",
                        title: "{merchant.name}",
                        if merchant.verified {
                            span { class: "verified-badge", "Verified" }
                        }
                        if let Some(description) = &merchant.description {
                            p { "{description}" }
                        }
                        if let Some(address) = &merchant.address {
                            p { class: "card-meta", "{address}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Shell {
            h1 { "Merchants" }
            {body}
        }
    }
}
