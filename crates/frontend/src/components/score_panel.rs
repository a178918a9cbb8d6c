use coordplane_shared::modes::{config_for, UNLOCK_THRESHOLD};
use coordplane_shared::{ModeId, Progress};
use dioxus::prelude::*;

/// Session score plus lifetime completions per tier.
#[component]
pub fn ScorePanel(score: u32, progress: Progress, on_reset: EventHandler<()>) -> Element {
    let mut confirming = use_signal(|| false);

    rsx! {
        div { class: "panel score-panel",
            h3 { "Score" }
            div { class: "score-value", "{score}" }

            h3 { "Progress" }
            for mode in ModeId::ALL {
                {
                    let count = progress.get(mode);
                    let name = config_for(mode).display_name;
                    let unlocks_next = mode != ModeId::Challenge && count < UNLOCK_THRESHOLD;
                    rsx! {
                        div { key: "{mode}", class: "progress-row",
                            span { class: "progress-label", "{name}" }
                            if unlocks_next {
                                span { class: "progress-value", "{count} / {UNLOCK_THRESHOLD}" }
                            } else {
                                span { class: "progress-value", "{count}" }
                            }
                        }
                    }
                }
            }

            if *confirming.read() {
                div { class: "reset-confirm",
                    span { "Erase all progress?" }
                    button {
                        class: "danger",
                        onclick: move |_| {
                            confirming.set(false);
                            on_reset.call(());
                        },
                        "Erase"
                    }
                    button {
                        onclick: move |_| confirming.set(false),
                        "Cancel"
                    }
                }
            } else {
                button {
                    class: "reset-btn",
                    onclick: move |_| confirming.set(true),
                    "Reset progress"
                }
            }
        }
    }
}
