use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            h1 { "Pulseboard" }
            p { "Track your growth against the competition across TikTok, Instagram, and YouTube." }

            ul { class: "page-home__features",
                li { "Views, engagement, and posting cadence on one timeline" }
                li { "Side-by-side competitor accounts" }
                li { "Shareable dashboards — the URL is the filter state" }
            }
            p { class: "page-home__cta",
                "Head to Insights to start comparing."
            }
        }
    }
}
