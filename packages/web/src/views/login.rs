//! Credential login form.
//!
//! Empty fields are caught by the session manager before any network call
//! and surface inline; a rejected login records a human-readable error and
//! keeps the form usable.

use dioxus::prelude::*;
use ui::{sync_auth, use_auth, use_session};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    // Already signed in: nothing to do here.
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Home {});
    }

    let onsubmit = move |evt: Event<FormData>| {
        let session = session.clone();
        async move {
            evt.prevent_default();
            if submitting() {
                return;
            }
            submitting.set(true);
            let ok = session.login(&username(), &password()).await;
            sync_auth(auth, &session);
            submitting.set(false);
            if ok {
                nav.push(Route::Home {});
            }
        }
    };

    rsx! {
        div {
            class: "login-container",

            h1 { class: "login-title", "Lingzhi" }
            p { class: "login-subtitle", "Sign in to your points account" }

            form {
                class: "login-form",
                onsubmit: onsubmit,

                div {
                    class: "form-field",
                    label { "Username" }
                    input {
                        r#type: "text",
                        placeholder: "username or email",
                        value: username(),
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                }

                if let Some(error) = auth().auth_error {
                    p { class: "form-error", "{error}" }
                }

                button {
                    class: "primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
