//! Per-tier completion counts and the storage seam they persist through.
//!
//! The persisted form is one flat JSON object, `{"basic": 3, "intermediate": 0, ...}`,
//! stored under [`PROGRESS_KEY`].

use std::collections::{BTreeMap, HashMap};

use crate::error::ProgressError;
use crate::models::ModeId;
use crate::modes::UNLOCK_THRESHOLD;

/// Storage key for the serialized progress blob.
pub const PROGRESS_KEY: &str = "coordplane.progress";

/// Completion count per tier. Missing tiers count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progress {
    counts: BTreeMap<ModeId, u32>,
}

impl Progress {
    pub fn get(&self, mode: ModeId) -> u32 {
        self.counts.get(&mode).copied().unwrap_or(0)
    }

    /// Zero counts are not stored, so an explicit zero equals a missing tier.
    pub fn set(&mut self, mode: ModeId, count: u32) {
        if count == 0 {
            self.counts.remove(&mode);
        } else {
            self.counts.insert(mode, count);
        }
    }

    /// Record one completion. Saturates rather than wrapping.
    pub fn increment(&mut self, mode: ModeId) -> u32 {
        let count = self.counts.entry(mode).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// The first tier is always open; later tiers need the previous one practiced.
    pub fn is_unlocked(&self, mode: ModeId) -> bool {
        self.remaining_to_unlock(mode) == 0
    }

    /// Completions still needed in the prerequisite tier.
    pub fn remaining_to_unlock(&self, mode: ModeId) -> u32 {
        match mode.prerequisite() {
            None => 0,
            Some(prev) => UNLOCK_THRESHOLD.saturating_sub(self.get(prev)),
        }
    }

    /// Serialize with every tier present.
    pub fn to_json(&self) -> Result<String, ProgressError> {
        let full: BTreeMap<&str, u32> = ModeId::ALL.iter().map(|m| (m.id(), self.get(*m))).collect();
        serde_json::to_string(&full).map_err(ProgressError::Serialize)
    }

    /// Parse a stored blob. Unknown keys are ignored; missing tiers read as zero.
    pub fn from_json(raw: &str) -> Result<Self, ProgressError> {
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut progress = Progress::default();
        for mode in ModeId::ALL {
            let Some(value) = map.get(mode.id()) else {
                continue;
            };
            let count = value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ProgressError::BadCount {
                    mode: mode.id().to_string(),
                })?;
            progress.set(mode, count);
        }
        Ok(progress)
    }

    /// Parse a stored blob, falling back to all-zero on absence or corruption.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Progress::default();
        };
        match Progress::from_json(raw) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable progress");
                Progress::default()
            }
        }
    }
}

/// Where progress lives between sessions.
pub trait ProgressStore {
    /// Load saved progress; never fails, corrupt data reads as all-zero.
    fn load(&self) -> Progress;

    /// Persist progress. Failures are logged, not surfaced.
    fn save(&mut self, progress: &Progress);
}

/// In-memory store holding the same JSON blob a browser store would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized blob (possibly corrupt).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()) }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Progress {
        Progress::parse_or_default(self.raw.as_deref())
    }

    fn save(&mut self, progress: &Progress) {
        match progress.to_json() {
            Ok(json) => self.raw = Some(json),
            Err(e) => tracing::warn!(error = %e, "Failed to save progress"),
        }
    }
}
