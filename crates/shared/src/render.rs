//! Surface-agnostic scene rendering.
//!
//! [`draw_scene`] repaints the whole board from scratch on every call. It only
//! talks to a [`Surface`], using semantic [`Ink`]s instead of colors, so the
//! same code drives the browser canvas and the recording surface used in tests.

use std::f64::consts::PI;

use crate::grid::{self, LineTier};
use crate::mapper::{Mapper, Viewport, MARGIN};
use crate::models::{GameConfig, LastResult, OriginPos, Pixel, Point};

/// Semantic paint roles. The presentation layer maps these to theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Background,
    Axis,
    MajorLine,
    MinorLine,
    Label,
    Caption,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub ink: Ink,
    pub size: f64,
    pub bold: bool,
    pub align: Align,
    pub baseline: Baseline,
}

/// A 2D drawing target in CSS-pixel coordinates.
pub trait Surface {
    type Error;

    fn clear(&mut self, viewport: Viewport, ink: Ink) -> Result<(), Self::Error>;

    fn line(&mut self, from: Pixel, to: Pixel, ink: Ink, width: f64) -> Result<(), Self::Error>;

    /// Fill a closed polygon.
    fn polygon(&mut self, points: &[Pixel], ink: Ink) -> Result<(), Self::Error>;

    fn text(&mut self, at: Pixel, text: &str, style: TextStyle) -> Result<(), Self::Error>;
}

const AXIS_WIDTH: f64 = 2.0;
const MAJOR_WIDTH: f64 = 1.0;
const MINOR_WIDTH: f64 = 0.5;

const LABEL_SIZE: f64 = 12.0;
const CAPTION_SIZE: f64 = 14.0;
/// Gap between an axis (or grid edge) and its labels.
const LABEL_GAP: f64 = 8.0;

/// How far the axes run past the grid before the arrow tip.
const ARROW_OVERHANG: f64 = 22.0;
const ARROW_SIZE: f64 = 10.0;
/// Arrowhead half-angle (~30°).
const ARROW_ANGLE: f64 = PI / 6.0;

const STAR_OUTER_RADIUS: f64 = 14.0;
const STAR_INNER_RATIO: f64 = 0.45;
const CROSS_HALF: f64 = 9.0;
const CROSS_WIDTH: f64 = 3.0;

fn tier_style(tier: LineTier) -> (Ink, f64) {
    match tier {
        LineTier::Axis => (Ink::Axis, AXIS_WIDTH),
        LineTier::Major => (Ink::MajorLine, MAJOR_WIDTH),
        LineTier::Minor => (Ink::MinorLine, MINOR_WIDTH),
    }
}

fn label_style(align: Align, baseline: Baseline) -> TextStyle {
    TextStyle {
        ink: Ink::Label,
        size: LABEL_SIZE,
        bold: false,
        align,
        baseline,
    }
}

/// Repaint the full board.
///
/// Returns `Ok(false)` without touching the surface when the viewport is too
/// small to hold a grid.
///
/// # Errors
///
/// Propagates the first failing surface call.
pub fn draw_scene<S: Surface>(
    surface: &mut S,
    config: &GameConfig,
    viewport: Viewport,
    last_result: Option<&LastResult>,
) -> Result<bool, S::Error> {
    let Some(mapper) = Mapper::new(config, viewport) else {
        tracing::debug!(?viewport, "Viewport too small to draw");
        return Ok(false);
    };

    surface.clear(viewport, Ink::Background)?;
    draw_vertical_lines(surface, &mapper)?;
    draw_horizontal_lines(surface, &mapper)?;
    draw_labels(surface, &mapper)?;
    draw_origin_label(surface, &mapper)?;
    draw_axis_arrows(surface, &mapper)?;
    if let Some(result) = last_result {
        draw_result_marker(surface, &mapper, result)?;
    }
    Ok(true)
}

fn draw_vertical_lines<S: Surface>(surface: &mut S, mapper: &Mapper<'_>) -> Result<(), S::Error> {
    let config = mapper.config();
    let (_, top, _, bottom) = mapper.grid_bounds();
    for x in grid::grid_values(config.x_range[0], config.x_range[1], config.grid_step) {
        let (ink, width) = tier_style(grid::line_tier(x, config.major_grid_step));
        let px = mapper.to_pixel(Point::new(x, 0.0)).x;
        surface.line(Pixel::new(px, top), Pixel::new(px, bottom), ink, width)?;
    }
    Ok(())
}

fn draw_horizontal_lines<S: Surface>(surface: &mut S, mapper: &Mapper<'_>) -> Result<(), S::Error> {
    let config = mapper.config();
    let (left, _, right, _) = mapper.grid_bounds();
    for y in grid::grid_values(config.y_range[0], config.y_range[1], config.grid_step) {
        let (ink, width) = tier_style(grid::line_tier(y, config.major_grid_step));
        let py = mapper.to_pixel(Point::new(0.0, y)).y;
        surface.line(Pixel::new(left, py), Pixel::new(right, py), ink, width)?;
    }
    Ok(())
}

fn draw_labels<S: Surface>(surface: &mut S, mapper: &Mapper<'_>) -> Result<(), S::Error> {
    let config = mapper.config();
    let viewport = mapper.viewport();
    let axes = mapper.axis_origin();

    // Bottom-left boards pin labels to the grid edges; centered boards hug the axes.
    let (x_label_y, y_label_x) = match config.origin_pos {
        OriginPos::BottomLeft => (viewport.height - MARGIN + LABEL_GAP, MARGIN - LABEL_GAP),
        OriginPos::Center => (axes.y + LABEL_GAP, axes.x - LABEL_GAP),
    };

    for x in grid::label_values(config.x_range[0], config.x_range[1], config.label_step) {
        let px = mapper.to_pixel(Point::new(x, 0.0)).x;
        surface.text(
            Pixel::new(px, x_label_y),
            &grid::format_coord(x),
            label_style(Align::Center, Baseline::Top),
        )?;
    }
    for y in grid::label_values(config.y_range[0], config.y_range[1], config.label_step) {
        let py = mapper.to_pixel(Point::new(0.0, y)).y;
        surface.text(
            Pixel::new(y_label_x, py),
            &grid::format_coord(y),
            label_style(Align::Right, Baseline::Middle),
        )?;
    }
    Ok(())
}

fn draw_origin_label<S: Surface>(surface: &mut S, mapper: &Mapper<'_>) -> Result<(), S::Error> {
    let o = mapper.axis_origin();
    surface.text(
        o.offset(-LABEL_GAP, LABEL_GAP),
        "0",
        label_style(Align::Right, Baseline::Top),
    )
}

fn arrowhead(tip: Pixel, angle: f64) -> [Pixel; 3] {
    [
        tip,
        Pixel::new(
            tip.x - ARROW_SIZE * (angle - ARROW_ANGLE).cos(),
            tip.y - ARROW_SIZE * (angle - ARROW_ANGLE).sin(),
        ),
        Pixel::new(
            tip.x - ARROW_SIZE * (angle + ARROW_ANGLE).cos(),
            tip.y - ARROW_SIZE * (angle + ARROW_ANGLE).sin(),
        ),
    ]
}

fn draw_axis_arrows<S: Surface>(surface: &mut S, mapper: &Mapper<'_>) -> Result<(), S::Error> {
    let (_, top, right, _) = mapper.grid_bounds();
    let o = mapper.axis_origin();
    let caption = TextStyle {
        ink: Ink::Caption,
        size: CAPTION_SIZE,
        bold: true,
        align: Align::Center,
        baseline: Baseline::Bottom,
    };

    let x_tip = Pixel::new(right + ARROW_OVERHANG, o.y);
    surface.line(Pixel::new(right, o.y), x_tip, Ink::Axis, AXIS_WIDTH)?;
    surface.polygon(&arrowhead(x_tip, 0.0), Ink::Axis)?;
    surface.text(x_tip.offset(-ARROW_SIZE / 2.0, -LABEL_GAP), "X", caption)?;

    let y_tip = Pixel::new(o.x, top - ARROW_OVERHANG);
    surface.line(Pixel::new(o.x, top), y_tip, Ink::Axis, AXIS_WIDTH)?;
    surface.polygon(&arrowhead(y_tip, -PI / 2.0), Ink::Axis)?;
    surface.text(
        y_tip.offset(LABEL_GAP + 4.0, ARROW_SIZE),
        "Y",
        TextStyle {
            align: Align::Left,
            baseline: Baseline::Middle,
            ..caption
        },
    )?;
    Ok(())
}

/// Ten-vertex star centered on `center`, first point straight up.
fn star_points(center: Pixel) -> Vec<Pixel> {
    let inner = STAR_OUTER_RADIUS * STAR_INNER_RATIO;
    (0..10)
        .map(|i| {
            let angle = PI / 5.0 * f64::from(i) - PI / 2.0;
            let r = if i % 2 == 0 { STAR_OUTER_RADIUS } else { inner };
            Pixel::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

fn draw_result_marker<S: Surface>(
    surface: &mut S,
    mapper: &Mapper<'_>,
    result: &LastResult,
) -> Result<(), S::Error> {
    let at = mapper.to_pixel(result.click_pos);
    if result.success {
        surface.polygon(&star_points(at), Ink::Success)
    } else {
        surface.line(
            at.offset(-CROSS_HALF, -CROSS_HALF),
            at.offset(CROSS_HALF, CROSS_HALF),
            Ink::Failure,
            CROSS_WIDTH,
        )?;
        surface.line(
            at.offset(CROSS_HALF, -CROSS_HALF),
            at.offset(-CROSS_HALF, CROSS_HALF),
            Ink::Failure,
            CROSS_WIDTH,
        )
    }
}
