//! Resume entity and its export gate.

use chrono::{DateTime, Utc};

/// Threshold applied when a resume is created without an explicit one.
pub const DEFAULT_REQUIRED_CLICKS: i64 = 5;

/// A resume whose data export is gated behind share-link clicks.
#[derive(Debug, Clone)]
pub struct Resume {
    pub id: i64,
    /// Clicks accumulated across all share links of this resume.
    pub actual_clicks: i64,
    pub required_clicks: i64,
    pub export_unlocked: bool,
    pub created_at: DateTime<Utc>,
}

impl Resume {
    /// Creates a new Resume instance.
    pub fn new(
        id: i64,
        actual_clicks: i64,
        required_clicks: i64,
        export_unlocked: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            actual_clicks,
            required_clicks,
            export_unlocked,
            created_at,
        }
    }

    /// Current state of the export gate.
    pub fn gate(&self) -> ExportGate {
        ExportGate::from_flag(self.export_unlocked)
    }

    /// Clicks still missing before export unlocks. Zero once unlocked.
    pub fn clicks_remaining(&self) -> i64 {
        if self.export_unlocked {
            0
        } else {
            (self.required_clicks - self.actual_clicks).max(0)
        }
    }
}

/// Input data for creating a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub required_clicks: i64,
}

/// Counter snapshot of a resume, as returned by the store right after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeCounters {
    pub resume_id: i64,
    pub actual_clicks: i64,
    pub required_clicks: i64,
    pub export_unlocked: bool,
}

/// Export gate of a resume.
///
/// `Unlocked` is absorbing: no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportGate {
    Locked,
    Unlocked,
}

impl ExportGate {
    pub fn from_flag(export_unlocked: bool) -> Self {
        if export_unlocked {
            ExportGate::Unlocked
        } else {
            ExportGate::Locked
        }
    }

    /// Applies the unlock threshold to a post-increment click count.
    pub fn evaluate(self, actual_clicks: i64, required_clicks: i64) -> Self {
        match self {
            ExportGate::Unlocked => ExportGate::Unlocked,
            ExportGate::Locked if actual_clicks >= required_clicks => ExportGate::Unlocked,
            ExportGate::Locked => ExportGate::Locked,
        }
    }

    pub fn is_unlocked(self) -> bool {
        matches!(self, ExportGate::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(actual: i64, required: i64, unlocked: bool) -> Resume {
        Resume::new(1, actual, required, unlocked, Utc::now())
    }

    #[test]
    fn test_gate_unlocks_at_threshold() {
        assert_eq!(ExportGate::Locked.evaluate(5, 5), ExportGate::Unlocked);
        assert_eq!(ExportGate::Locked.evaluate(6, 5), ExportGate::Unlocked);
    }

    #[test]
    fn test_gate_stays_locked_below_threshold() {
        assert_eq!(ExportGate::Locked.evaluate(3, 5), ExportGate::Locked);
        assert_eq!(ExportGate::Locked.evaluate(0, 1), ExportGate::Locked);
    }

    #[test]
    fn test_unlocked_is_absorbing() {
        // Threshold raised after unlocking must not relock.
        assert_eq!(ExportGate::Unlocked.evaluate(1, 100), ExportGate::Unlocked);
        assert_eq!(ExportGate::Unlocked.evaluate(100, 1), ExportGate::Unlocked);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(ExportGate::from_flag(false), ExportGate::Locked);
        assert_eq!(ExportGate::from_flag(true), ExportGate::Unlocked);
        assert!(resume(0, 5, true).gate().is_unlocked());
    }

    #[test]
    fn test_clicks_remaining() {
        assert_eq!(resume(2, 5, false).clicks_remaining(), 3);
        assert_eq!(resume(7, 5, false).clicks_remaining(), 0);
        assert_eq!(resume(1, 5, true).clicks_remaining(), 0);
    }
}
