//! Small shared primitives: loading, empty and error states, plus the
//! points badge. Every listing view renders exactly one of loader / error /
//! empty / content.

use dioxus::prelude::*;

/// Spinner shown while a fetch is pending.
#[component]
pub fn Loader(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loader",
            span { class: "loader-spinner" }
            span { class: "loader-label", "{label}" }
        }
    }
}

/// Empty state shown when a listing returns no items.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default = "".to_string())] hint: String,
) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h2 { "{title}" }
            if !hint.is_empty() {
                p { "{hint}" }
            }
        }
    }
}

/// Inline, non-blocking error text. Used for both fetch failures and the
/// session manager's degraded-validation warning.
#[component]
pub fn ErrorNotice(message: String) -> Element {
    rsx! {
        div {
            class: "error-notice",
            role: "alert",
            "{message}"
        }
    }
}

/// The user's points balance and level, shown in the navbar and profile.
#[component]
pub fn PointsBadge(total_lingzhi: i64, level: u32) -> Element {
    rsx! {
        span {
            class: "points-badge",
            title: "Lingzhi balance",
            span { class: "points-badge-amount", "{total_lingzhi} 灵值" }
            span { class: "points-badge-level", "Lv.{level}" }
        }
    }
}
