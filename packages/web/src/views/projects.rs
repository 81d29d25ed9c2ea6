use dioxus::prelude::*;
use ui::{use_api, Card, EmptyState, ErrorNotice, Loader};

use super::Shell;

/// Community projects listing.
#[component]
pub fn Projects() -> Element {
    let api = use_api();
    let mut page = use_signal(|| 1u32);

    let listing = use_resource(move || {
        let api = api.clone();
        let page = page();
        async move { api.projects(page).await }
    });

    let body = match &*listing.read_unchecked() {
        None => rsx! { Loader {} },
        Some(Err(e)) => rsx! { ErrorNotice { message: e.user_message() } },
        Some(Ok(listing)) if listing.items.is_empty() => rsx! {
            EmptyState { title: "No open projects" }
        },
        Some(Ok(listing)) => rsx! {
            div {
                class: "card-grid",
                for project in listing.items.clone() {
                    Card {
                        key: "{project.id}",
                        title: "{project.title}",
                        if let Some(summary) = &project.summary {
                            p { "{summary}" }
                        }
                        p {
                            class: "card-meta",
                            "Reward: {project.reward_lingzhi} 灵值"
                            if let Some(status) = &project.status {
                                " · {status}"
                            }
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
            h1 { "Projects" }
            {body}
        }
    }
}
