//! Install-to-home-screen banner.
//!
//! Listens for the browser's `beforeinstallprompt` event, holds on to it,
//! and offers an "Install" button that replays the deferred prompt.
//! `appinstalled` hides the banner for good. Renders nothing on non-web
//! targets and in browsers that never fire the event.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    thread_local! {
        /// The deferred `beforeinstallprompt` event, if the browser offered one.
        pub static DEFERRED_PROMPT: RefCell<Option<web_sys::Event>> = RefCell::new(None);
    }

    /// Wire up both install events; `on_change(available)` flips the banner.
    pub fn listen(on_change: Rc<dyn Fn(bool)>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let capture = {
            let on_change = Rc::clone(&on_change);
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                DEFERRED_PROMPT.with(|slot| *slot.borrow_mut() = Some(event));
                on_change(true);
            })
        };
        let installed = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            DEFERRED_PROMPT.with(|slot| *slot.borrow_mut() = None);
            on_change(false);
        });

        let _ = window.add_event_listener_with_callback(
            "beforeinstallprompt",
            capture.as_ref().unchecked_ref(),
        );
        let _ = window
            .add_event_listener_with_callback("appinstalled", installed.as_ref().unchecked_ref());

        // Listeners live for the lifetime of the page.
        capture.forget();
        installed.forget();
    }

    /// Replay the deferred prompt, consuming it.
    pub fn show_prompt() {
        DEFERRED_PROMPT.with(|slot| {
            let Some(event) = slot.borrow_mut().take() else {
                return;
            };
            if let Ok(prompt) = js_sys::Reflect::get(&event, &JsValue::from_str("prompt")) {
                if let Some(prompt) = prompt.dyn_ref::<js_sys::Function>() {
                    let _ = prompt.call0(&event);
                }
            }
        });
    }
}

/// Banner offering to install the app, shown only once the browser has
/// signalled installability.
#[component]
pub fn InstallPrompt() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let mut available = use_signal(|| false);

        use_effect(move || {
            web::listen(std::rc::Rc::new(move |now_available| {
                // Signals are Copy; rebind so the closure stays `Fn`.
                let mut available = available;
                available.set(now_available);
            }));
        });

        if !available() {
            return rsx! {};
        }

        rsx! {
            div {
                class: "install-prompt",
                span { "Add Lingzhi to your home screen" }
                button {
                    class: "install-prompt-button",
                    onclick: move |_| {
                        web::show_prompt();
                        available.set(false);
                    },
                    "Install"
                }
                button {
                    class: "install-prompt-dismiss",
                    onclick: move |_| available.set(false),
                    "Not now"
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rsx! {}
    }
}
