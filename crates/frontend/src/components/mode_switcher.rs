use coordplane_shared::modes::config_for;
use coordplane_shared::{ModeId, Progress};
use dioxus::prelude::*;

#[component]
pub fn ModeSwitcher(current: ModeId, progress: Progress, on_select: EventHandler<ModeId>) -> Element {
    rsx! {
        div { class: "mode-switcher",
            for mode in ModeId::ALL {
                {
                    let config = config_for(mode);
                    let needed = progress.remaining_to_unlock(mode);
                    let locked = needed > 0;
                    let title = match mode.prerequisite() {
                        Some(prev) if locked => format!("{needed} more in {} to unlock", config_for(prev).display_name),
                        _ => config.description.to_string(),
                    };
                    rsx! {
                        button {
                            key: "{mode}",
                            class: if mode == current { "mode-btn active" } else if locked { "mode-btn locked" } else { "mode-btn" },
                            disabled: locked,
                            title: "{title}",
                            onclick: move |_| on_select.call(mode),
                            span { class: "mode-name", "{config.display_name}" }
                            if locked {
                                span { class: "mode-lock", "\u{1F512} {needed}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
