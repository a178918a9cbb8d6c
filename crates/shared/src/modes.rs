//! The static difficulty table.

use crate::models::{Aspect, GameConfig, ModeId, OriginPos, Theme};

/// Completions needed in a tier before the next one unlocks.
pub const UNLOCK_THRESHOLD: u32 = 20;

const BASIC: GameConfig = GameConfig {
    id: ModeId::Basic,
    display_name: "Beginner",
    description: "First quadrant, whole numbers from 0 to 10",
    x_range: [0.0, 10.0],
    y_range: [0.0, 10.0],
    grid_step: 1.0,
    major_grid_step: None,
    label_step: 1.0,
    target_step: 1.0,
    tolerance: 0.5,
    origin_pos: OriginPos::BottomLeft,
    aspect: Aspect::Square,
    theme: Theme::Sky,
};

const INTERMEDIATE: GameConfig = GameConfig {
    id: ModeId::Intermediate,
    display_name: "Intermediate",
    description: "A wider first quadrant with major lines every 5",
    x_range: [0.0, 20.0],
    y_range: [0.0, 15.0],
    grid_step: 1.0,
    major_grid_step: Some(5.0),
    label_step: 5.0,
    target_step: 1.0,
    tolerance: 0.6,
    origin_pos: OriginPos::BottomLeft,
    aspect: Aspect::FourThree,
    theme: Theme::Meadow,
};

const ADVANCED: GameConfig = GameConfig {
    id: ModeId::Advanced,
    display_name: "Advanced",
    description: "All four quadrants, negative coordinates included",
    x_range: [-10.0, 10.0],
    y_range: [-8.0, 8.0],
    grid_step: 1.0,
    major_grid_step: Some(5.0),
    label_step: 2.0,
    target_step: 1.0,
    tolerance: 0.8,
    origin_pos: OriginPos::Center,
    aspect: Aspect::FourThree,
    theme: Theme::Dusk,
};

const CHALLENGE: GameConfig = GameConfig {
    id: ModeId::Challenge,
    display_name: "Challenge",
    description: "Large ranges on a 2.5 unit grid, targets on multiples of 5",
    x_range: [-40.0, 40.0],
    y_range: [-30.0, 30.0],
    grid_step: 2.5,
    major_grid_step: Some(10.0),
    label_step: 10.0,
    target_step: 5.0,
    tolerance: 3.5,
    origin_pos: OriginPos::Center,
    aspect: Aspect::FourThree,
    theme: Theme::Ember,
};

static CONFIGS: [GameConfig; 4] = [BASIC, INTERMEDIATE, ADVANCED, CHALLENGE];

/// Look up the config for a tier.
pub fn config_for(mode: ModeId) -> &'static GameConfig {
    match mode {
        ModeId::Basic => &CONFIGS[0],
        ModeId::Intermediate => &CONFIGS[1],
        ModeId::Advanced => &CONFIGS[2],
        ModeId::Challenge => &CONFIGS[3],
    }
}

/// All tiers in display order.
pub fn all_configs() -> &'static [GameConfig] {
    &CONFIGS
}
