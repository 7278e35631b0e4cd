use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet shared by every shell.
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Shells register a `NavBuilder` whose closures construct fully formed
/// `Link`s, so `ui` never needs to know each platform's `Route` enum. Each
/// closure receives the label and returns a link already containing it.
///
/// Registration happens once, at the top of the shell's `App()`:
/// ```ignore
/// use ui::components::app_navbar::{register_nav, NavBuilder};
/// register_nav(NavBuilder {
///     home: |label| rsx!(Link { class: "navbar__link", to: Route::Home {}, "{label}" }),
///     insights: |label| rsx!(Link { class: "navbar__link", to: Route::Insights {}, "{label}" }),
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub insights: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    // Fall back to raw children when no builder is registered, so a shell can
    // still pass its own links directly.
    let internal_nav = NAV_BUILDER.get().map(|builder| {
        let home = (builder.home)("Home");
        let insights = (builder.insights)("Insights");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {insights}
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header { class: "navbar",
            div { class: "navbar__brand",
                span { class: "navbar__title", "Pulseboard" }
                span { class: "navbar__tagline", "Social growth, side by side" }
            }

            match internal_nav {
                Some(nav) => nav,
                None => rsx! {
                    nav { class: "navbar__links", {children} }
                },
            }
        }
    }
}
