use rand::Rng;

use crate::models::{GameConfig, Point};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// A click hits when it lies within `tolerance` of the target, boundary included.
pub fn is_hit(click: Point, target: Point, tolerance: f64) -> bool {
    distance(click, target) <= tolerance
}

/// Number of target positions along one axis, minus one.
fn max_steps(range: [f64; 2], step: f64) -> u64 {
    // Small slack so 20 / 1.0 does not floor to 19 on an unlucky division.
    ((range[1] - range[0]) / step + 1e-9).floor().max(0.0) as u64
}

fn random_coord<R: Rng>(range: [f64; 2], step: f64, rng: &mut R) -> f64 {
    let k = rng.random_range(0..=max_steps(range, step));
    range[0] + k as f64 * step
}

/// Pick a random target quantized to the config's `target_step`.
///
/// Every coordinate is `range[0] + k * target_step` for some
/// `k` in `0..=floor(span / target_step)`, so it never leaves the range.
/// The origin is a legitimate target.
pub fn random_target<R: Rng>(config: &GameConfig, rng: &mut R) -> Point {
    Point {
        x: random_coord(config.x_range, config.target_step, rng),
        y: random_coord(config.y_range, config.target_step, rng),
    }
}
