use coordplane_shared::{ClickOutcome, Feedback, Game, ModeId, Point};
use dioxus::core::Task;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::components::board::Board;
use crate::components::help_overlay::HelpOverlay;
use crate::components::mode_switcher::ModeSwitcher;
use crate::components::score_panel::ScorePanel;
use crate::effects;
use crate::storage::{self, LocalStore};

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Cancel the delayed advance, if one is scheduled.
fn cancel_advance_task(mut slot: Signal<Option<Task>>) {
    if let Some(task) = slot.write().take() {
        task.cancel();
    }
}

#[component]
pub fn Play(mode: Option<String>) -> Element {
    let mut game = use_signal(|| Game::new(LocalStore::open(), random_seed()));
    let mut advance_task = use_signal(|| None::<Task>);
    let mut notice = use_signal(|| None::<String>);
    let mut show_help = use_signal(|| false);

    // Another tab finished a round or reset progress.
    use_hook(move || {
        storage::watch_external_changes(move || {
            if let Ok(mut g) = game.try_write() {
                g.reload_progress();
            }
        });
    });

    // Deep link: /play/:mode. Locked or unknown tiers leave play where it is.
    use_effect(use_reactive!(|mode| {
        let Some(raw) = mode else {
            return;
        };
        let result = raw.parse::<ModeId>().and_then(|next| {
            cancel_advance_task(advance_task);
            game.write().switch_mode(next)
        });
        match result {
            Ok(()) => notice.set(None),
            Err(e) => {
                tracing::warn!(error = %e, "Deep link rejected");
                notice.set(Some(e.to_string()));
            }
        }
    }));

    let mut select_mode = move |next: ModeId| {
        cancel_advance_task(advance_task);
        match game.write().switch_mode(next) {
            Ok(()) => notice.set(None),
            Err(e) => notice.set(Some(e.to_string())),
        }
    };

    let on_pick = move |at: Point| {
        let outcome = game.write().click(at, js_sys::Date::now());
        match outcome {
            ClickOutcome::Hit { ticket, celebration } => {
                effects::celebrate(celebration);
                let delay_ms = u32::try_from(ticket.delay.as_millis()).unwrap_or(u32::MAX);
                let task = spawn(async move {
                    TimeoutFuture::new(delay_ms).await;
                    game.write().advance(ticket);
                });
                advance_task.set(Some(task));
            }
            ClickOutcome::Miss { distance } => {
                tracing::debug!(distance, "Missed target");
            }
            ClickOutcome::Ignored => {}
        }
    };

    let on_reset = move |_: ()| {
        cancel_advance_task(advance_task);
        game.write().reset_progress();
        notice.set(None);
    };

    let g = game.read();
    let current = g.mode();
    let config = g.config();
    let feedback = g.feedback();
    let score = g.score();
    let progress = g.progress().clone();
    let last_result = g.last_result();
    drop(g);
    let notice_text = notice.read().clone();

    let feedback_class = match feedback {
        Feedback::Prompt { .. } => "feedback prompt",
        Feedback::Hit => "feedback hit",
        Feedback::Miss { .. } => "feedback miss",
    };

    rsx! {
        div {
            class: "app",
            tabindex: "0",
            onkeydown: move |evt: Event<KeyboardData>| {
                match evt.key() {
                    Key::Escape => show_help.set(false),
                    Key::Character(c) if c == "h" || c == "H" || c == "?" => {
                        let open = *show_help.peek();
                        show_help.set(!open);
                    }
                    Key::Character(c) => {
                        let picked = c
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|i| ModeId::ALL.get(i).copied());
                        if let Some(next) = picked {
                            select_mode(next);
                        }
                    }
                    _ => {}
                }
            },

            // Header
            div { class: "header",
                h1 { "Coordinate Plane" }
                ModeSwitcher {
                    current: current,
                    progress: progress.clone(),
                    on_select: move |next| select_mode(next),
                }
                button {
                    class: "help-btn",
                    title: "How to play",
                    onclick: move |_| show_help.set(true),
                    "?"
                }
            }

            // Sidebar
            div { class: "sidebar",
                div { class: "panel",
                    h3 { "{config.display_name}" }
                    p { class: "mode-description", "{config.description}" }
                }
                ScorePanel {
                    score: score,
                    progress: progress,
                    on_reset: on_reset,
                }
            }

            // Board
            div { class: "main",
                if let Some(text) = notice_text {
                    div { class: "notice", "{text}" }
                }
                div { class: "{feedback_class}", "{feedback}" }
                Board {
                    mode: current,
                    last_result: last_result,
                    on_pick: on_pick,
                }
            }

            HelpOverlay { show: show_help }
        }
    }
}
