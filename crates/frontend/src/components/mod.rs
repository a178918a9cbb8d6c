pub mod board;
pub mod help_overlay;
pub mod mode_switcher;
pub mod score_panel;
