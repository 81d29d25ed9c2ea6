use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

/// Platform news feed.
#[component]
pub fn News() -> Element {
    let api = use_api();
    let mut page = use_signal(|| 1u32);

    let listing = use_resource(move || {
        let api = api.clone();
        let page = page();
        async move { api.news(page).await }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(listing)) if listing.items.is_empty() => rsx! {
            EmptyState { title: "No news yet" }
        },
        Some(Ok(listing)) => rsx! {
            div {
                class: "news-list",
                for item in listing.items.clone() {
                    Card {
                        key: "{item.id}",
                        title: "{item.title}",
                        if let Some(summary) = &item.summary {
                            p { "{summary}" }
                        }
                        if let Some(published_at) = &item.published_at {
                            p { class: "card-meta", "{published_at}" }
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
            h1 { "News" }
            {body}
        }
    }
}
