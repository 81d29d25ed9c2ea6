use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

/// Knowledge-base article listing.
#[component]
pub fn Knowledge() -> Element {
    let api = use_api();
    let mut page = use_signal(|| 1u32);

    let listing = use_resource(move || {
        let api = api.clone();
        let page = page();
        async move { api.knowledge(page).await }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(listing)) if listing.items.is_empty() => rsx! {
            EmptyState {
                title: "Nothing here yet",
                hint: "Articles appear once editors publish them.",
            }
        },
        Some(Ok(listing)) => rsx! {
            div {
                class: "news-list",
                for article in listing.items.clone() {
                    Card {
                        key: "{article.id}",
                        title: "{article.title}",
                        if let Some(summary) = &article.summary {
                            p { "{summary}" }
                        }
                        p { class: "card-meta", "{article.views} views" }
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
            h1 { "Knowledge base" }
            {body}
        }
    }
}
