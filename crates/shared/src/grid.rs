/// Grid line and label math for the coordinate plane.
///
/// Steps such as 2.5 or 0.1 do not add up exactly in binary floating point,
/// so every accumulated value is snapped to two decimals before it is
/// compared or printed.

/// Tolerance used when deciding whether a value is a whole multiple of a step.
const MULTIPLE_EPSILON: f64 = 1e-6;

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Normalize -0.0 so it compares and prints like zero.
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Visual weight of a grid line. The three classes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTier {
    Axis,
    Major,
    Minor,
}

/// Whether `value` is a whole multiple of `step`.
pub fn is_multiple(value: f64, step: f64) -> bool {
    if step <= 0.0 {
        return false;
    }
    let q = value / step;
    (q - q.round()).abs() < MULTIPLE_EPSILON
}

/// Classify the line drawn at `value`.
pub fn line_tier(value: f64, major_step: Option<f64>) -> LineTier {
    let value = round2(value);
    if value == 0.0 {
        return LineTier::Axis;
    }
    match major_step {
        Some(step) if is_multiple(value, step) => LineTier::Major,
        _ => LineTier::Minor,
    }
}

/// Positions of grid lines from `min` to `max` inclusive, walking by `step`.
///
/// Each accumulated value is corrected to two decimals so long walks do not drift.
pub fn grid_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if step <= 0.0 || min > max {
        return values;
    }
    let mut v = round2(min);
    // Half-cent slack so the closing line survives rounding.
    while v <= max + 0.005 {
        values.push(v);
        v = round2(v + step);
    }
    values
}

/// Label positions: multiples of `label_step` within `[min, max]`, skipping zero.
pub fn label_values(min: f64, max: f64, label_step: f64) -> Vec<f64> {
    if label_step <= 0.0 || min > max {
        return Vec::new();
    }
    let first = (min / label_step - MULTIPLE_EPSILON).ceil() as i64;
    let last = (max / label_step + MULTIPLE_EPSILON).floor() as i64;
    (first..=last)
        .filter(|k| *k != 0)
        .map(|k| round2(k as f64 * label_step))
        .collect()
}

/// Format a coordinate for display: whole numbers without a fractional part,
/// anything else with at most two decimals.
pub fn format_coord(v: f64) -> String {
    let v = round2(v);
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Format a point as `(x, y)`.
pub fn format_pair(x: f64, y: f64) -> String {
    format!("({}, {})", format_coord(x), format_coord(y))
}
