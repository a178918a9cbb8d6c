/// Logical ↔ pixel coordinate mapping for the game surface.
///
/// The drawable area is the viewport inset by [`MARGIN`] on every side.
/// Logical x grows to the right, logical y grows upward; pixel y grows downward.
use crate::models::{Aspect, GameConfig, Pixel, Point};

/// Inset between the surface edge and the outermost grid line, in CSS pixels.
pub const MARGIN: f64 = 40.0;

/// Narrowest container the surface will shrink to.
pub const MIN_CONTAINER_WIDTH: f64 = 240.0;

/// Widest the surface grows, regardless of container.
pub const MAX_CANVAS_WIDTH: f64 = 800.0;

/// Surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size the surface for a container of the given width.
    pub fn for_container(container_width: f64, aspect: Aspect) -> Self {
        let width = if container_width.is_finite() {
            container_width.clamp(MIN_CONTAINER_WIDTH, MAX_CANVAS_WIDTH)
        } else {
            MIN_CONTAINER_WIDTH
        };
        Self {
            width,
            height: width * aspect.height_ratio(),
        }
    }
}

/// Backing-store size in device pixels for a surface drawn at `viewport` CSS size.
pub fn backing_size(viewport: Viewport, dpr: f64) -> (u32, u32) {
    let dpr = effective_dpr(dpr);
    (
        (viewport.width * dpr).round().max(1.0) as u32,
        (viewport.height * dpr).round().max(1.0) as u32,
    )
}

/// Device pixel ratio with a fallback of 1 for nonsense values.
pub fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Pure mapping between a config's logical ranges and a viewport.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    config: &'a GameConfig,
    viewport: Viewport,
}

impl<'a> Mapper<'a> {
    /// Returns `None` when the drawable area has collapsed to zero or less.
    pub fn new(config: &'a GameConfig, viewport: Viewport) -> Option<Self> {
        let drawable_w = viewport.width - 2.0 * MARGIN;
        let drawable_h = viewport.height - 2.0 * MARGIN;
        if !(drawable_w > 0.0 && drawable_h > 0.0) {
            return None;
        }
        if config.x_span() <= 0.0 || config.y_span() <= 0.0 {
            return None;
        }
        Some(Self { config, viewport })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    fn drawable_w(&self) -> f64 {
        self.viewport.width - 2.0 * MARGIN
    }

    fn drawable_h(&self) -> f64 {
        self.viewport.height - 2.0 * MARGIN
    }

    /// Left, top, right, bottom pixel edges of the grid area.
    pub fn grid_bounds(&self) -> (f64, f64, f64, f64) {
        (
            MARGIN,
            MARGIN,
            self.viewport.width - MARGIN,
            self.viewport.height - MARGIN,
        )
    }

    pub fn to_pixel(&self, p: Point) -> Pixel {
        let [x0, _] = self.config.x_range;
        let [y0, _] = self.config.y_range;
        Pixel {
            x: MARGIN + (p.x - x0) / self.config.x_span() * self.drawable_w(),
            y: self.viewport.height - MARGIN - (p.y - y0) / self.config.y_span() * self.drawable_h(),
        }
    }

    /// Exact inverse of [`Mapper::to_pixel`]. Use this for hit evaluation.
    pub fn to_logical(&self, px: Pixel) -> Point {
        let [x0, _] = self.config.x_range;
        let [y0, _] = self.config.y_range;
        Point {
            x: x0 + (px.x - MARGIN) / self.drawable_w() * self.config.x_span(),
            y: y0 + (self.viewport.height - MARGIN - px.y) / self.drawable_h() * self.config.y_span(),
        }
    }

    /// Rounded logical coordinate, for display only.
    pub fn to_display(&self, px: Pixel) -> (i64, i64) {
        let p = self.to_logical(px);
        (p.x.round() as i64, p.y.round() as i64)
    }

    /// Pixel position of the origin, clamped into the grid area so axes stay
    /// visible when a range does not contain zero.
    pub fn axis_origin(&self) -> Pixel {
        let (left, top, right, bottom) = self.grid_bounds();
        let o = self.to_pixel(Point::ORIGIN);
        Pixel::new(o.x.clamp(left, right), o.y.clamp(top, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModeId;
    use crate::modes::{all_configs, config_for};

    #[test]
    fn test_to_pixel_corners_basic() {
        let c = config_for(ModeId::Basic);
        let m = Mapper::new(c, Viewport::new(480.0, 480.0)).unwrap();
        assert_eq!(m.to_pixel(Point::new(0.0, 0.0)), Pixel::new(40.0, 440.0));
        assert_eq!(m.to_pixel(Point::new(10.0, 10.0)), Pixel::new(440.0, 40.0));
        assert_eq!(m.to_pixel(Point::new(5.0, 5.0)), Pixel::new(240.0, 240.0));
    }

    #[test]
    fn test_to_pixel_center_origin() {
        let c = config_for(ModeId::Advanced);
        let m = Mapper::new(c, Viewport::new(640.0, 480.0)).unwrap();
        let o = m.to_pixel(Point::ORIGIN);
        assert!((o.x - 320.0).abs() < 1e-9);
        assert!((o.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_axis_is_inverted() {
        let c = config_for(ModeId::Advanced);
        let m = Mapper::new(c, Viewport::new(640.0, 480.0)).unwrap();
        let up = m.to_pixel(Point::new(0.0, 5.0));
        let down = m.to_pixel(Point::new(0.0, -5.0));
        assert!(up.y < down.y);
    }

    #[test]
    fn test_round_trip_every_mode_every_lattice_point() {
        for config in all_configs() {
            for width in [MIN_CONTAINER_WIDTH, 333.0, 517.5, MAX_CANVAS_WIDTH] {
                let vp = Viewport::for_container(width, config.aspect);
                let m = Mapper::new(config, vp).unwrap();
                let mut x = config.x_range[0];
                while x <= config.x_range[1] {
                    let mut y = config.y_range[0];
                    while y <= config.y_range[1] {
                        let p = Point::new(x, y);
                        let back = m.to_logical(m.to_pixel(p));
                        assert!((back.x - p.x).abs() <= 0.01, "{config:?} {p:?} -> {back:?}");
                        assert!((back.y - p.y).abs() <= 0.01, "{config:?} {p:?} -> {back:?}");
                        y += config.grid_step / 2.0;
                    }
                    x += config.grid_step / 2.0;
                }
            }
        }
    }

    #[test]
    fn test_to_display_rounds() {
        let c = config_for(ModeId::Basic);
        let m = Mapper::new(c, Viewport::new(480.0, 480.0)).unwrap();
        let px = m.to_pixel(Point::new(3.4, 6.6));
        assert_eq!(m.to_display(px), (3, 7));
        let exact = m.to_logical(px);
        assert!((exact.x - 3.4).abs() < 1e-9);
    }

    #[test]
    fn test_collapsed_viewport_has_no_mapper() {
        let c = config_for(ModeId::Basic);
        assert!(Mapper::new(c, Viewport::new(80.0, 80.0)).is_none());
        assert!(Mapper::new(c, Viewport::new(60.0, 300.0)).is_none());
        assert!(Mapper::new(c, Viewport::new(f64::NAN, 300.0)).is_none());
    }

    #[test]
    fn test_for_container_clamps_and_applies_aspect() {
        let narrow = Viewport::for_container(100.0, Aspect::FourThree);
        assert_eq!(narrow, Viewport::new(MIN_CONTAINER_WIDTH, MIN_CONTAINER_WIDTH * 0.75));
        let wide = Viewport::for_container(2000.0, Aspect::Square);
        assert_eq!(wide, Viewport::new(MAX_CANVAS_WIDTH, MAX_CANVAS_WIDTH));
        let mid = Viewport::for_container(600.0, Aspect::FourThree);
        assert_eq!(mid, Viewport::new(600.0, 450.0));
    }

    #[test]
    fn test_min_container_still_maps() {
        for config in all_configs() {
            let vp = Viewport::for_container(0.0, config.aspect);
            assert!(Mapper::new(config, vp).is_some());
        }
    }

    #[test]
    fn test_backing_size_scales_with_dpr() {
        let vp = Viewport::new(400.0, 300.0);
        assert_eq!(backing_size(vp, 2.0), (800, 600));
        assert_eq!(backing_size(vp, 1.5), (600, 450));
        assert_eq!(backing_size(vp, 0.0), (400, 300));
        assert_eq!(backing_size(vp, f64::NAN), (400, 300));
    }

    #[test]
    fn test_axis_origin_clamped_for_first_quadrant() {
        let c = config_for(ModeId::Intermediate);
        let m = Mapper::new(c, Viewport::new(640.0, 480.0)).unwrap();
        assert_eq!(m.axis_origin(), Pixel::new(MARGIN, 480.0 - MARGIN));
    }
}
