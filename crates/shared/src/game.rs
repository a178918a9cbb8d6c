//! Game state controller.
//!
//! [`Game`] exclusively owns the mutable state of a session: current tier,
//! target, score, feedback, the last click result, and persisted progress.
//! Everything else reads it. All transitions are synchronous; the one delayed
//! step (showing the next target after a hit) is modeled as an
//! [`AdvanceTicket`] the host schedules and hands back to [`Game::advance`].

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::calc;
use crate::error::GameError;
use crate::grid::format_pair;
use crate::models::{GameConfig, LastResult, ModeId, Point};
use crate::modes::config_for;
use crate::progress::{Progress, ProgressStore};

/// Delay between a successful hit and the next target.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Parameters for the celebration effect fired on a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: f64,
}

pub const CELEBRATION: Celebration = Celebration {
    particle_count: 100,
    spread: 70.0,
};

/// Handle for a pending "show next target" step.
///
/// Tickets are single-use; any mode switch or reset invalidates the
/// outstanding one, so a late timer cannot replace a fresh target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    id: u64,
    pub delay: Duration,
}

/// Text shown under the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feedback {
    Prompt { target: Point },
    Hit,
    /// Rounded click coordinates.
    Miss { x: i64, y: i64 },
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::Prompt { target } => {
                write!(f, "Find the point {}", format_pair(target.x, target.y))
            }
            Feedback::Hit => write!(f, "Correct! Get ready for the next point..."),
            Feedback::Miss { x, y } => write!(f, "You clicked ({x}, {y}). Try again!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Hit {
        ticket: AdvanceTicket,
        celebration: Celebration,
    },
    Miss {
        distance: f64,
    },
    /// A hit is already waiting to advance; the click was not evaluated.
    Ignored,
}

pub struct Game<S: ProgressStore> {
    mode: ModeId,
    target: Point,
    score: u32,
    feedback: Feedback,
    last_result: Option<LastResult>,
    progress: Progress,
    store: S,
    rng: SmallRng,
    pending: Option<AdvanceTicket>,
    next_ticket_id: u64,
}

impl<S: ProgressStore> Game<S> {
    /// Start a session in the first tier, loading progress from `store`.
    pub fn new(store: S, seed: u64) -> Self {
        let progress = store.load();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mode = ModeId::Basic;
        let target = calc::random_target(config_for(mode), &mut rng);
        Self {
            mode,
            target,
            score: 0,
            feedback: Feedback::Prompt { target },
            last_result: None,
            progress,
            store,
            rng,
            pending: None,
            next_ticket_id: 0,
        }
    }

    pub fn mode(&self) -> ModeId {
        self.mode
    }

    pub fn config(&self) -> &'static GameConfig {
        config_for(self.mode)
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn last_result(&self) -> Option<LastResult> {
        self.last_result
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    pub fn is_unlocked(&self, mode: ModeId) -> bool {
        self.progress.is_unlocked(mode)
    }

    /// Switch tiers. Locked tiers are rejected and nothing changes.
    ///
    /// Any pending advance is cancelled; persisted progress is untouched.
    pub fn switch_mode(&mut self, mode: ModeId) -> Result<(), GameError> {
        let needed = self.progress.remaining_to_unlock(mode);
        if needed > 0 {
            return Err(GameError::Locked { mode, needed });
        }
        tracing::debug!(from = %self.mode, to = %mode, "Switching mode");
        self.mode = mode;
        self.score = 0;
        self.start_round();
        Ok(())
    }

    /// Evaluate a click at an exact (unrounded) logical point.
    pub fn click(&mut self, at: Point, timestamp_ms: f64) -> ClickOutcome {
        if self.pending.is_some() {
            return ClickOutcome::Ignored;
        }
        let tolerance = self.config().tolerance;
        let distance = calc::distance(at, self.target);
        if distance <= tolerance {
            self.score = self.score.saturating_add(1);
            self.progress.increment(self.mode);
            self.store.save(&self.progress);
            self.last_result = Some(LastResult {
                success: true,
                click_pos: self.target,
                timestamp_ms,
            });
            self.feedback = Feedback::Hit;
            let ticket = self.issue_ticket();
            ClickOutcome::Hit {
                ticket,
                celebration: CELEBRATION,
            }
        } else {
            self.last_result = Some(LastResult {
                success: false,
                click_pos: at,
                timestamp_ms,
            });
            self.feedback = Feedback::Miss {
                x: at.x.round() as i64,
                y: at.y.round() as i64,
            };
            ClickOutcome::Miss { distance }
        }
    }

    /// Complete a delayed advance. Stale tickets are ignored and return `false`.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(ticket = ticket.id, "Ignoring stale advance");
            return false;
        }
        self.start_round();
        true
    }

    /// Pin the target to a specific point and start a fresh round on it.
    pub fn place_target(&mut self, target: Point) {
        self.pending = None;
        self.last_result = None;
        self.target = target;
        self.feedback = Feedback::Prompt { target };
    }

    /// Zero all persisted progress.
    ///
    /// If the current tier becomes locked, play returns to the first tier.
    /// A pending advance is resolved immediately with a fresh round.
    pub fn reset_progress(&mut self) {
        self.progress = Progress::default();
        self.store.save(&self.progress);
        if !self.progress.is_unlocked(self.mode) {
            self.mode = ModeId::Basic;
            self.score = 0;
            self.start_round();
        } else if self.pending.is_some() {
            self.start_round();
        }
        tracing::info!("Progress reset");
    }

    /// Re-read progress from the store, e.g. after another tab wrote it.
    ///
    /// Falls back to the first tier if the current one is no longer unlocked.
    pub fn reload_progress(&mut self) {
        self.progress = self.store.load();
        if !self.progress.is_unlocked(self.mode) {
            tracing::info!(mode = %self.mode, "Tier locked by external reset");
            self.mode = ModeId::Basic;
            self.score = 0;
            self.start_round();
        }
    }

    fn start_round(&mut self) {
        self.pending = None;
        self.last_result = None;
        self.target = calc::random_target(self.config(), &mut self.rng);
        self.feedback = Feedback::Prompt {
            target: self.target,
        };
    }

    fn issue_ticket(&mut self) -> AdvanceTicket {
        self.next_ticket_id += 1;
        let ticket = AdvanceTicket {
            id: self.next_ticket_id,
            delay: ADVANCE_DELAY,
        };
        self.pending = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::UNLOCK_THRESHOLD;
    use crate::progress::MemoryStore;

    fn game() -> Game<MemoryStore> {
        Game::new(MemoryStore::new(), 11)
    }

    fn unlocked_game() -> Game<MemoryStore> {
        let mut p = Progress::default();
        for mode in ModeId::ALL {
            p.set(mode, UNLOCK_THRESHOLD);
        }
        let mut store = MemoryStore::new();
        store.save(&p);
        Game::new(store, 11)
    }

    #[test]
    fn test_new_game_starts_in_basic_with_prompt() {
        let g = game();
        assert_eq!(g.mode(), ModeId::Basic);
        assert_eq!(g.score(), 0);
        assert!(g.config().contains(g.target()));
        assert_eq!(g.feedback(), Feedback::Prompt { target: g.target() });
        assert!(g.last_result().is_none());
    }

    #[test]
    fn test_new_game_loads_progress() {
        let g = Game::new(MemoryStore::with_raw(r#"{"basic": 5}"#), 0);
        assert_eq!(g.progress().get(ModeId::Basic), 5);
    }

    #[test]
    fn test_hit_on_basic_target() {
        let mut g = game();
        g.place_target(Point::new(3.0, 5.0));
        let outcome = g.click(Point::new(3.0, 5.0), 1000.0);
        let ClickOutcome::Hit { ticket, celebration } = outcome else {
            panic!("expected hit, got {outcome:?}");
        };
        assert_eq!(ticket.delay, ADVANCE_DELAY);
        assert_eq!(celebration, CELEBRATION);
        assert_eq!(g.score(), 1);
        assert_eq!(g.progress().get(ModeId::Basic), 1);
        assert_eq!(g.store().load().get(ModeId::Basic), 1);
        assert_eq!(g.pending_advance(), Some(ticket));
        assert_eq!(
            g.last_result(),
            Some(LastResult {
                success: true,
                click_pos: Point::new(3.0, 5.0),
                timestamp_ms: 1000.0
            })
        );
        assert_eq!(g.feedback(), Feedback::Hit);

        assert!(g.advance(ticket));
        assert!(g.last_result().is_none());
        assert!(g.pending_advance().is_none());
        assert_eq!(g.feedback(), Feedback::Prompt { target: g.target() });
    }

    #[test]
    fn test_hit_marker_snaps_to_target() {
        let mut g = game();
        g.place_target(Point::new(4.0, 4.0));
        g.click(Point::new(4.3, 3.8), 0.0);
        let result = g.last_result().unwrap();
        assert!(result.success);
        assert_eq!(result.click_pos, Point::new(4.0, 4.0));
    }

    #[test]
    fn test_challenge_hit_within_tolerance() {
        let mut g = unlocked_game();
        g.switch_mode(ModeId::Challenge).unwrap();
        g.place_target(Point::new(10.0, 10.0));
        assert!(matches!(g.click(Point::new(12.0, 12.0), 0.0), ClickOutcome::Hit { .. }));
    }

    #[test]
    fn test_challenge_miss_shows_rounded_click() {
        let mut g = unlocked_game();
        g.switch_mode(ModeId::Challenge).unwrap();
        g.place_target(Point::new(10.0, 10.0));
        let before = g.progress().clone();
        let outcome = g.click(Point::new(15.0, 15.0), 5.0);
        let ClickOutcome::Miss { distance } = outcome else {
            panic!("expected miss, got {outcome:?}");
        };
        assert!((distance - 7.0710678).abs() < 1e-6);
        assert_eq!(g.feedback(), Feedback::Miss { x: 15, y: 15 });
        assert_eq!(g.feedback().to_string(), "You clicked (15, 15). Try again!");
        assert_eq!(g.progress(), &before);
        assert_eq!(g.score(), 0);
        let result = g.last_result().unwrap();
        assert!(!result.success);
        assert_eq!(result.click_pos, Point::new(15.0, 15.0));
        assert!(g.pending_advance().is_none());
    }

    #[test]
    fn test_miss_evaluates_unrounded_click() {
        let mut g = game();
        g.place_target(Point::new(3.0, 3.0));
        // Displays as (3, 3) but is ~0.57 away, outside the 0.5 tolerance.
        let outcome = g.click(Point::new(3.4, 3.4), 0.0);
        assert!(matches!(outcome, ClickOutcome::Miss { .. }));
        assert_eq!(g.feedback(), Feedback::Miss { x: 3, y: 3 });
        let outcome = g.click(Point::new(3.0, 3.45), 0.0);
        assert!(matches!(outcome, ClickOutcome::Hit { .. }));
    }

    #[test]
    fn test_miss_result_replaced_by_next_click() {
        let mut g = game();
        g.place_target(Point::new(0.0, 0.0));
        g.click(Point::new(5.0, 5.0), 1.0);
        g.click(Point::new(6.0, 6.0), 2.0);
        assert_eq!(g.last_result().unwrap().click_pos, Point::new(6.0, 6.0));
    }

    #[test]
    fn test_clicks_ignored_while_advance_pending() {
        let mut g = game();
        g.place_target(Point::new(2.0, 2.0));
        g.click(Point::new(2.0, 2.0), 0.0);
        assert_eq!(g.click(Point::new(2.0, 2.0), 1.0), ClickOutcome::Ignored);
        assert_eq!(g.score(), 1);
        assert_eq!(g.progress().get(ModeId::Basic), 1);
    }

    #[test]
    fn test_locked_mode_rejected() {
        let mut g = game();
        let err = g.switch_mode(ModeId::Intermediate).unwrap_err();
        assert_eq!(
            err,
            GameError::Locked {
                mode: ModeId::Intermediate,
                needed: UNLOCK_THRESHOLD
            }
        );
        assert_eq!(g.mode(), ModeId::Basic);
    }

    #[test]
    fn test_unlock_at_threshold() {
        let mut g = Game::new(MemoryStore::with_raw(r#"{"basic": 19}"#), 3);
        assert!(!g.is_unlocked(ModeId::Intermediate));
        assert!(g.switch_mode(ModeId::Intermediate).is_err());
        g.place_target(Point::new(1.0, 1.0));
        let ClickOutcome::Hit { .. } = g.click(Point::new(1.0, 1.0), 0.0) else {
            panic!("expected hit");
        };
        assert!(g.is_unlocked(ModeId::Intermediate));
        g.switch_mode(ModeId::Intermediate).unwrap();
        assert_eq!(g.mode(), ModeId::Intermediate);
    }

    #[test]
    fn test_mode_switch_resets_session_but_not_progress() {
        let mut g = unlocked_game();
        g.place_target(Point::new(1.0, 1.0));
        g.click(Point::new(1.0, 1.0), 0.0);
        let saved = g.progress().clone();
        g.switch_mode(ModeId::Advanced).unwrap();
        assert_eq!(g.score(), 0);
        assert!(g.last_result().is_none());
        assert_eq!(g.progress(), &saved);
        assert!(g.config().contains(g.target()));
        assert_eq!(g.feedback(), Feedback::Prompt { target: g.target() });
    }

    #[test]
    fn test_mode_switch_cancels_pending_advance() {
        let mut g = unlocked_game();
        g.place_target(Point::new(1.0, 1.0));
        let ClickOutcome::Hit { ticket, .. } = g.click(Point::new(1.0, 1.0), 0.0) else {
            panic!("expected hit");
        };
        g.switch_mode(ModeId::Advanced).unwrap();
        let fresh = g.target();
        assert!(g.pending_advance().is_none());
        assert!(!g.advance(ticket));
        assert_eq!(g.target(), fresh);
        assert_eq!(g.mode(), ModeId::Advanced);
    }

    #[test]
    fn test_old_ticket_cannot_advance_new_round() {
        let mut g = game();
        g.place_target(Point::new(1.0, 1.0));
        let ClickOutcome::Hit { ticket: first, .. } = g.click(Point::new(1.0, 1.0), 0.0) else {
            panic!("expected hit");
        };
        assert!(g.advance(first));
        let t = g.target();
        g.place_target(t);
        let ClickOutcome::Hit { ticket: second, .. } = g.click(t, 1.0) else {
            panic!("expected hit");
        };
        assert_ne!(first, second);
        assert!(!g.advance(first));
        assert!(g.pending_advance().is_some());
        assert!(g.advance(second));
    }

    #[test]
    fn test_reset_progress_returns_to_basic_when_locked() {
        let mut g = unlocked_game();
        g.switch_mode(ModeId::Challenge).unwrap();
        g.reset_progress();
        assert_eq!(g.mode(), ModeId::Basic);
        assert_eq!(g.progress(), &Progress::default());
        assert_eq!(g.store().load(), Progress::default());
    }

    #[test]
    fn test_reset_progress_in_basic_keeps_round() {
        let mut g = Game::new(MemoryStore::with_raw(r#"{"basic": 3}"#), 9);
        let target = g.target();
        g.reset_progress();
        assert_eq!(g.mode(), ModeId::Basic);
        assert_eq!(g.target(), target);
        assert_eq!(g.progress().get(ModeId::Basic), 0);
    }

    #[test]
    fn test_reset_progress_during_advance_starts_new_round() {
        let mut g = game();
        g.place_target(Point::new(2.0, 2.0));
        let ClickOutcome::Hit { ticket, .. } = g.click(Point::new(2.0, 2.0), 0.0) else {
            panic!("expected hit");
        };
        g.reset_progress();
        assert!(g.pending_advance().is_none());
        assert!(g.last_result().is_none());
        assert!(!g.advance(ticket));
        assert!(!matches!(g.click(g.target(), 1.0), ClickOutcome::Ignored));
    }

    #[test]
    fn test_reload_progress_picks_up_external_write() {
        let mut g = game();
        let mut other = g.store().clone();
        let mut p = Progress::default();
        p.set(ModeId::Basic, 20);
        other.save(&p);
        g.store = other;
        g.reload_progress();
        assert!(g.is_unlocked(ModeId::Intermediate));
    }

    #[test]
    fn test_reload_after_external_reset_leaves_locked_tier() {
        let mut g = unlocked_game();
        g.switch_mode(ModeId::Challenge).unwrap();
        g.place_target(Point::new(5.0, 5.0));
        g.click(Point::new(5.0, 5.0), 0.0);
        g.store = MemoryStore::new();
        g.reload_progress();
        assert_eq!(g.mode(), ModeId::Basic);
        assert_eq!(g.score(), 0);
        assert!(g.pending_advance().is_none());
        assert!(matches!(g.feedback(), Feedback::Prompt { .. }));
    }

    #[test]
    fn test_reload_keeps_unlocked_tier() {
        let mut g = unlocked_game();
        g.switch_mode(ModeId::Advanced).unwrap();
        let target = g.target();
        g.reload_progress();
        assert_eq!(g.mode(), ModeId::Advanced);
        assert_eq!(g.target(), target);
    }

    #[test]
    fn test_feedback_prompt_text() {
        let f = Feedback::Prompt {
            target: Point::new(-5.0, 2.5),
        };
        assert_eq!(f.to_string(), "Find the point (-5, 2.5)");
    }

    #[test]
    fn test_same_seed_same_targets() {
        let a = Game::new(MemoryStore::new(), 1234);
        let b = Game::new(MemoryStore::new(), 1234);
        assert_eq!(a.target(), b.target());
    }
}
