//! Resource marketplace listing. This fetch carries the client's 5-second
//! timeout; a slow backend surfaces as a transient error here instead of a
//! spinner that never resolves.

use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

#[component]
pub fn Resources() -> Element {
    let api = use_api();
    let mut page = use_signal(|| 1u32);

    let listing = use_resource(move || {
        let api = api.clone();
        let page = page();
        async move { api.resources(page).await }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(listing)) if listing.items.is_empty() => rsx! {
            EmptyState {
                title: "No resources yet",
                hint: "Uploaded resources will show up here.",
            }
        },
        Some(Ok(listing)) => rsx! {
            div {
                class: "card-grid",
                for resource in listing.items.clone() {
                    Card {
                        key: "{resource.id}",
                        title: "{resource.title}",
                        if let Some(summary) = &resource.summary {
                            p { "{summary}" }
                        }
                        p {
                            class: "card-meta",
                            if resource.price_lingzhi == 0 {
                                "Free"
                            } else {
                                "{resource.price_lingzhi} 灵值"
                            }
                            " · {resource.downloads} downloads"
                        }
                    }
                }
            }
            div {
                class: "pager",
                button {
                    class: "secondary",
                    disabled: page() <= 1,
                    onclick: move |_| page.set(page() - 1),
                    "Previous"
                }
                span { "Page {page}" }
                button {
                    class: "secondary",
                    onclick: move |_| page.set(page() + 1),
                    "Next"
                }
            }
        },
    };

    rsx! {
        Shell {
            h1 { "Resources" }
            {body}
        }
    }
}
