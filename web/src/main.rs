use dioxus::prelude::*;

use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppHeader)]
    #[route("/")]
    Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[cfg(feature = "server")]
fn main() {
    env_logger::init();

    // Load and validate the spreadsheet before serving anything.
    match api::load_startup_dataset() {
        Ok(dataset) => log::info!(
            "serving {} constituencies across {} elections",
            dataset.constituencies().len(),
            dataset.years().len()
        ),
        Err(err) => {
            log::error!("cannot load turnout data: {err}");
            std::process::exit(1);
        }
    }

    LaunchBuilder::server().launch(App);
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Shared page chrome around the routed views.
#[component]
fn AppHeader() -> Element {
    rsx! {
        header { class: "topbar",
            div { class: "topbar__inner",
                span { class: "topbar__brand", "Election Turnout" }
                span { class: "topbar__subtitle", "Lok Sabha 2014 / 2019 / 2024" }
            }
        }
        Outlet::<Route> {}
    }
}
