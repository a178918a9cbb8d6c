use coordplane_shared::mapper::{Mapper, Viewport, MAX_CANVAS_WIDTH};
use coordplane_shared::modes::config_for;
use coordplane_shared::{LastResult, ModeId, Point};
use dioxus::prelude::*;

use crate::canvas;
use crate::coords;

const BOARD_CONTAINER_ID: &str = "plane-board-container";
const BOARD_CANVAS_ID: &str = "plane-board-canvas";

/// The coordinate-plane canvas.
///
/// Redraws whenever the tier, the last result, or the container width change,
/// and reports clicks as exact logical points through `on_pick`.
#[component]
pub fn Board(mode: ModeId, last_result: Option<LastResult>, on_pick: EventHandler<Point>) -> Element {
    let config = config_for(mode);
    let mut container_width = use_signal(|| coords::element_width(BOARD_CONTAINER_ID).unwrap_or(MAX_CANVAS_WIDTH));
    let mut hover = use_signal(|| None::<(i64, i64)>);

    let viewport = Viewport::for_container(*container_width.read(), config.aspect);

    // Props are plain values, so feed them through use_reactive to re-run on change.
    use_effect(use_reactive!(|(mode, last_result)| {
        let config = config_for(mode);
        let viewport = Viewport::for_container(*container_width.read(), config.aspect);
        canvas::redraw(BOARD_CANVAS_ID, config, viewport, last_result.as_ref());
    }));

    // Convert a client-space pointer position to an exact logical point.
    let to_logical = move |client_x: f64, client_y: f64| -> Option<Point> {
        let px = coords::client_to_board(client_x, client_y, BOARD_CANVAS_ID, viewport)?;
        Mapper::new(config, viewport).map(|m| m.to_logical(px))
    };

    // Same conversion, rounded for the on-screen readout.
    let to_display = move |client_x: f64, client_y: f64| -> Option<(i64, i64)> {
        let px = coords::client_to_board(client_x, client_y, BOARD_CANVAS_ID, viewport)?;
        Mapper::new(config, viewport).map(|m| m.to_display(px))
    };

    let readout = match *hover.read() {
        Some((x, y)) => format!("({x}, {y})"),
        None => "\u{2013}".to_string(),
    };

    rsx! {
        div {
            id: BOARD_CONTAINER_ID,
            class: "board-container",

            onresize: move |evt: Event<ResizeData>| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    if (size.width - *container_width.peek()).abs() >= 1.0 {
                        container_width.set(size.width);
                    }
                }
            },

            canvas {
                id: BOARD_CANVAS_ID,
                class: "board-canvas",

                onclick: move |evt: Event<MouseData>| {
                    let client = evt.client_coordinates();
                    if let Some(at) = to_logical(client.x, client.y) {
                        on_pick.call(at);
                    }
                },

                onmousemove: move |evt: Event<MouseData>| {
                    let client = evt.client_coordinates();
                    hover.set(to_display(client.x, client.y));
                },

                onmouseleave: move |_| hover.set(None),

                ontouchmove: move |evt: Event<TouchData>| {
                    if let Some(t) = evt.data().touches().first() {
                        let client = t.client_coordinates();
                        hover.set(to_display(client.x, client.y));
                    }
                },

                ontouchend: move |_| hover.set(None),
            }

            div { class: "coord-readout",
                span { class: "coord-tag", "Pointer: {readout}" }
            }
        }
    }
}
