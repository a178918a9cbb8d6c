use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A point in logical (Cartesian) game units. Y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point on the drawing surface in CSS pixels. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Difficulty tiers, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeId {
    Basic,
    Intermediate,
    Advanced,
    Challenge,
}

impl ModeId {
    pub const ALL: [ModeId; 4] = [
        ModeId::Basic,
        ModeId::Intermediate,
        ModeId::Advanced,
        ModeId::Challenge,
    ];

    /// Stable id used as the persisted progress key.
    pub fn id(self) -> &'static str {
        match self {
            ModeId::Basic => "basic",
            ModeId::Intermediate => "intermediate",
            ModeId::Advanced => "advanced",
            ModeId::Challenge => "challenge",
        }
    }

    /// The tier that must be practiced before this one unlocks.
    pub fn prerequisite(self) -> Option<ModeId> {
        match self {
            ModeId::Basic => None,
            ModeId::Intermediate => Some(ModeId::Basic),
            ModeId::Advanced => Some(ModeId::Intermediate),
            ModeId::Challenge => Some(ModeId::Advanced),
        }
    }
}

impl std::fmt::Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModeId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeId::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| GameError::UnknownMode(s.to_string()))
    }
}

/// Where the origin sits on screen; decides how axis labels are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginPos {
    Center,
    BottomLeft,
}

/// Width-to-height shape of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Square,
    FourThree,
}

impl Aspect {
    /// Height as a fraction of width.
    pub fn height_ratio(self) -> f64 {
        match self {
            Aspect::Square => 1.0,
            Aspect::FourThree => 0.75,
        }
    }
}

/// Presentation theme id. The shell resolves it to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Sky,
    Meadow,
    Dusk,
    Ember,
}

/// Static per-tier parameters. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub id: ModeId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub grid_step: f64,
    pub major_grid_step: Option<f64>,
    pub label_step: f64,
    pub target_step: f64,
    /// Success radius in logical units.
    pub tolerance: f64,
    pub origin_pos: OriginPos,
    pub aspect: Aspect,
    pub theme: Theme,
}

impl GameConfig {
    /// Check ranges are ordered and every step is positive.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: &str| GameError::InvalidConfig {
            mode: self.id,
            reason: reason.to_string(),
        };
        if self.x_range[0] >= self.x_range[1] {
            return Err(invalid("x range is empty"));
        }
        if self.y_range[0] >= self.y_range[1] {
            return Err(invalid("y range is empty"));
        }
        let steps = [
            self.grid_step,
            self.label_step,
            self.target_step,
            self.major_grid_step.unwrap_or(1.0),
        ];
        if steps.iter().any(|s| !(*s > 0.0)) {
            return Err(invalid("steps must be positive"));
        }
        if !(self.tolerance > 0.0) {
            return Err(invalid("tolerance must be positive"));
        }
        Ok(())
    }

    pub fn x_span(&self) -> f64 {
        self.x_range[1] - self.x_range[0]
    }

    pub fn y_span(&self) -> f64 {
        self.y_range[1] - self.y_range[0]
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_range[0] && p.x <= self.x_range[1] && p.y >= self.y_range[0] && p.y <= self.y_range[1]
    }
}

/// Outcome of the most recent click, shown until the next target appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastResult {
    pub success: bool,
    /// The target on success, the actual click on failure.
    pub click_pos: Point,
    pub timestamp_ms: f64,
}
