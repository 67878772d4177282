//! Outcome types for role reconciliation.

/// Result of comparing a user's resolved tier with their assigned role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// The resolved tier already matches the assigned role. No gateway calls were made.
    Unchanged,
    /// The assigned role moved from `from` to `to`.
    Changed { from: Option<u64>, to: Option<u64> },
}

/// How a single scheduled per-user update ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Roles were granted and/or revoked.
    Changed,
    /// The user already held the correct role.
    Unchanged,
    /// The user could not be resolved in the guild; nothing was changed.
    Skipped,
    /// A store or gateway step failed; the message describes the error.
    Failed(String),
}

/// Operator-facing summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Users for which an update was attempted.
    pub attempted: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Whether the holder listing covered the whole collection.
    pub complete_snapshot: bool,
}

impl ReconcileSummary {
    /// Tallies one per-user outcome into the summary.
    pub fn record(&mut self, outcome: &UpdateOutcome) {
        self.attempted += 1;
        match outcome {
            UpdateOutcome::Changed => self.changed += 1,
            UpdateOutcome::Unchanged => self.unchanged += 1,
            UpdateOutcome::Skipped => self.skipped += 1,
            UpdateOutcome::Failed(_) => self.failed += 1,
        }
    }
}
