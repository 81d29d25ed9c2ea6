use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    CheckIn, Home, Knowledge, Login, Merchants, News, Profile, Projects, Recharge, Resources,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/home")]
    Home {},
    #[route("/checkin")]
    CheckIn {},
    #[route("/resources")]
    Resources {},
    #[route("/projects")]
    Projects {},
    #[route("/merchants")]
    Merchants {},
    #[route("/news")]
    News {},
    #[route("/knowledge")]
    Knowledge {},
    #[route("/recharge")]
    Recharge {},
    #[route("/profile")]
    Profile {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Renderer features are only enabled by dx builds
    // (`dx serve --platform web` turns on `web` → `dioxus/web`).
    #[cfg(feature = "web")]
    dioxus::launch(App);
    #[cfg(not(feature = "web"))]
    {
        let _ = App;
        eprintln!("built without the `web` feature; use `dx serve --platform web`");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the dashboard.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Home {});
    rsx! {}
}
