//! Browser canvas implementation of the board [`Surface`].
//!
//! The only place that touches [`web_sys::CanvasRenderingContext2d`]. Theme ids
//! are resolved to colors here; the shared renderer only speaks [`Ink`].

use coordplane_shared::mapper::{backing_size, effective_dpr, Viewport};
use coordplane_shared::models::{GameConfig, LastResult, Theme};
use coordplane_shared::render::{self, Align, Baseline, Ink, Surface, TextStyle};
use coordplane_shared::Pixel;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

struct Palette {
    background: &'static str,
    axis: &'static str,
    major: &'static str,
    minor: &'static str,
    label: &'static str,
    caption: &'static str,
    success: &'static str,
    failure: &'static str,
}

const SKY: Palette = Palette {
    background: "#f7fbff",
    axis: "#1f3b57",
    major: "rgba(31,59,87,0.45)",
    minor: "rgba(31,59,87,0.15)",
    label: "#35536f",
    caption: "#1f3b57",
    success: "#f5b301",
    failure: "#d62828",
};

const MEADOW: Palette = Palette {
    background: "#f6fbf3",
    axis: "#23472b",
    major: "rgba(35,71,43,0.45)",
    minor: "rgba(35,71,43,0.15)",
    label: "#3c6145",
    caption: "#23472b",
    success: "#f5b301",
    failure: "#d62828",
};

const DUSK: Palette = Palette {
    background: "#1d1b2f",
    axis: "#e6e3ff",
    major: "rgba(230,227,255,0.40)",
    minor: "rgba(230,227,255,0.12)",
    label: "#c3bfe8",
    caption: "#e6e3ff",
    success: "#ffd447",
    failure: "#ff5a5f",
};

const EMBER: Palette = Palette {
    background: "#221612",
    axis: "#ffe6d5",
    major: "rgba(255,230,213,0.40)",
    minor: "rgba(255,230,213,0.12)",
    label: "#f2c4a6",
    caption: "#ffe6d5",
    success: "#ffd447",
    failure: "#ff4d4d",
};

fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Sky => &SKY,
        Theme::Meadow => &MEADOW,
        Theme::Dusk => &DUSK,
        Theme::Ember => &EMBER,
    }
}

fn color(theme: Theme, ink: Ink) -> &'static str {
    let p = palette(theme);
    match ink {
        Ink::Background => p.background,
        Ink::Axis => p.axis,
        Ink::MajorLine => p.major,
        Ink::MinorLine => p.minor,
        Ink::Label => p.label,
        Ink::Caption => p.caption,
        Ink::Success => p.success,
        Ink::Failure => p.failure,
    }
}

fn align_str(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn baseline_str(baseline: Baseline) -> &'static str {
    match baseline {
        Baseline::Top => "top",
        Baseline::Middle => "middle",
        Baseline::Bottom => "bottom",
    }
}

fn font(style: &TextStyle) -> String {
    let weight = if style.bold { "700 " } else { "" };
    format!("{weight}{:.0}px sans-serif", style.size)
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    theme: Theme,
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, viewport: Viewport, ink: Ink) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color(self.theme, ink));
        self.ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
        Ok(())
    }

    fn line(&mut self, from: Pixel, to: Pixel, ink: Ink, width: f64) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(color(self.theme, ink));
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap(if ink == Ink::Failure { "round" } else { "butt" });
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn polygon(&mut self, points: &[Pixel], ink: Ink) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.set_fill_style_str(color(self.theme, ink));
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }

    fn text(&mut self, at: Pixel, text: &str, style: TextStyle) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color(self.theme, style.ink));
        self.ctx.set_font(&font(&style));
        self.ctx.set_text_align(align_str(style.align));
        self.ctx.set_text_baseline(baseline_str(style.baseline));
        self.ctx.fill_text(text, at.x, at.y)
    }
}

fn canvas_element(canvas_id: &str) -> Option<HtmlCanvasElement> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Size the canvas backing store for the device pixel ratio and set the CSS size.
fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport, dpr: f64) -> Result<(), JsValue> {
    let (w, h) = backing_size(viewport, dpr);
    // Assigning width/height clears the canvas, so only do it on change.
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;
    Ok(())
}

/// Repaint the board canvas. Silently skips the frame when the canvas or its
/// 2D context is unavailable.
pub fn redraw(canvas_id: &str, config: &GameConfig, viewport: Viewport, last_result: Option<&LastResult>) {
    let Some(canvas) = canvas_element(canvas_id) else {
        tracing::debug!(canvas_id, "Board canvas not mounted; skipping redraw");
        return;
    };
    let ctx = match canvas.get_context("2d") {
        Ok(Some(obj)) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
        _ => None,
    };
    let Some(ctx) = ctx else {
        tracing::debug!("No 2D context available; skipping redraw");
        return;
    };

    let dpr = effective_dpr(web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0));
    if let Err(e) = paint(&canvas, ctx, config, viewport, dpr, last_result) {
        tracing::warn!(error = ?e, "Board redraw failed");
    }
}

fn paint(
    canvas: &HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: &GameConfig,
    viewport: Viewport,
    dpr: f64,
    last_result: Option<&LastResult>,
) -> Result<(), JsValue> {
    fit_canvas(canvas, viewport, dpr)?;
    // Draw in CSS pixels; the transform maps them onto the device-pixel backing store.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    let mut surface = CanvasSurface {
        ctx,
        theme: config.theme,
    };
    render::draw_scene(&mut surface, config, viewport, last_result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_resolves_every_ink() {
        let inks = [
            Ink::Background,
            Ink::Axis,
            Ink::MajorLine,
            Ink::MinorLine,
            Ink::Label,
            Ink::Caption,
            Ink::Success,
            Ink::Failure,
        ];
        for theme in [Theme::Sky, Theme::Meadow, Theme::Dusk, Theme::Ember] {
            for ink in inks {
                assert!(!color(theme, ink).is_empty());
            }
        }
    }

    #[test]
    fn test_background_differs_from_lines() {
        for theme in [Theme::Sky, Theme::Meadow, Theme::Dusk, Theme::Ember] {
            assert_ne!(color(theme, Ink::Background), color(theme, Ink::Axis));
        }
    }

    #[test]
    fn test_font_string() {
        let style = TextStyle {
            ink: Ink::Label,
            size: 12.0,
            bold: false,
            align: Align::Center,
            baseline: Baseline::Top,
        };
        assert_eq!(font(&style), "12px sans-serif");
        let bold = TextStyle { bold: true, size: 14.0, ..style };
        assert_eq!(font(&bold), "700 14px sans-serif");
    }
}
