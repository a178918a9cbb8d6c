use coordplane_shared::modes::{all_configs, UNLOCK_THRESHOLD};
use dioxus::prelude::*;

#[component]
pub fn HelpOverlay(show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "help-overlay-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "help-overlay",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "How to Play" }

                div { class: "help-info-section",
                    p { "A point appears in the prompt above the board. Click where you think it is." }
                    p {
                        "Land close enough and you score; the next point follows shortly. "
                        "A miss marks where you clicked so you can compare."
                    }
                    p { "The readout under the board shows the point under your pointer." }
                }

                div { class: "help-divider" }

                h2 { class: "help-section-title", "Levels" }

                div { class: "help-info-section",
                    p { "Each level unlocks after {UNLOCK_THRESHOLD} correct answers in the one before it." }
                    for config in all_configs() {
                        div { key: "{config.id}", class: "shortcut-row",
                            span { class: "shortcut-keys", strong { "{config.display_name}" } }
                            span { "{config.description}" }
                        }
                    }
                }

                div { class: "help-divider" }

                div { class: "shortcut-section",
                    h3 { "Keys" }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "H" } " / " kbd { "?" } }
                        span { "Toggle this help" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "1" } " - " kbd { "4" } }
                        span { "Switch level" }
                    }
                    div { class: "shortcut-row",
                        span { class: "shortcut-keys", kbd { "Esc" } }
                        span { "Close help" }
                    }
                }

                button {
                    class: "help-close",
                    onclick: move |_| show.set(false),
                    "Got it"
                }
            }
        }
    }
}
