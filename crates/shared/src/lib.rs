//! Core of the coordinate-plane game: the difficulty table, logical ↔ pixel
//! mapping, grid math, hit-testing, progress persistence, the game state
//! controller, and a renderer that draws through the [`render::Surface`] trait.
//!
//! Nothing here depends on a browser; the frontend supplies the canvas
//! surface and the storage backend.

pub mod calc;
pub mod error;
pub mod game;
pub mod grid;
pub mod mapper;
pub mod models;
pub mod modes;
pub mod progress;
pub mod render;

pub use error::{GameError, ProgressError};
pub use game::{AdvanceTicket, Celebration, ClickOutcome, Feedback, Game};
pub use mapper::{Mapper, Viewport};
pub use models::{GameConfig, LastResult, ModeId, Pixel, Point};
pub use progress::{MemoryStore, Progress, ProgressStore};
