use dioxus::prelude::*;

use ui::{InstallPrompt, Navbar};

use crate::Route;

mod login;
pub use login::Login;

mod home;
pub use home::Home;

mod checkin;
pub use checkin::CheckIn;

mod resources;
pub use resources::Resources;

mod projects;
pub use projects::Projects;

mod merchants;
pub use merchants::Merchants;

mod news;
pub use news::News;

mod knowledge;
pub use knowledge::Knowledge;

mod recharge;
pub use recharge::Recharge;

mod profile;
pub use profile::Profile;

/// Common page chrome: navbar with the section links, the install banner,
/// and the page content below.
#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::CheckIn {}, "Check-in" }
            Link { to: Route::Resources {}, "Resources" }
            Link { to: Route::Projects {}, "Projects" }
            Link { to: Route::Merchants {}, "Merchants" }
            Link { to: Route::News {}, "News" }
            Link { to: Route::Knowledge {}, "Knowledge" }
            Link { to: Route::Recharge {}, "Recharge" }
            Link { to: Route::Profile {}, "Profile" }
        }
        InstallPrompt {}
        main {
            class: "page",
            {children}
        }
    }
}
