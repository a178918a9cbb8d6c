mod canvas;
mod components;
mod coords;
mod effects;
mod pages;
mod storage;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/play/:mode")]
    PlayMode { mode: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::play::Play { mode: None::<String> }
    }
}

/// Deep link straight into a tier; falls back to the first tier when locked.
#[component]
fn PlayMode(mode: String) -> Element {
    rsx! {
        pages::play::Play { mode: Some(mode) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");
const CONFETTI_JS: &str = "https://cdn.jsdelivr.net/npm/canvas-confetti@1.9.3/dist/confetti.browser.min.js";

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        document::Script { src: CONFETTI_JS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
