use std::collections::BTreeSet;

use cfcr_core::Session;
use serde::Serialize;

/// Diff between the ids a user asked for and what is already booked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingPlan {
    /// Requested, not yet booked, in the order of the reconciled list.
    pub to_add: Vec<Session>,
    /// Requested but already booked; booking them again is a no-op.
    pub already_booked: Vec<String>,
    /// Requested ids that are not in the schedule snapshot.
    pub unknown: Vec<String>,
}

impl BookingPlan {
    /// Plan against a reconciled session list.
    #[must_use]
    pub fn from_sessions(sessions: &[Session], targets: &BTreeSet<String>) -> Self {
        let mut plan = Self::default();
        let mut seen = BTreeSet::new();

        for session in sessions {
            if !targets.contains(session.id()) || !seen.insert(session.id()) {
                continue;
            }
            if session.booked() {
                plan.already_booked.push(session.id().to_string());
            } else {
                plan.to_add.push(session.clone());
            }
        }

        plan.unknown = targets
            .iter()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        plan
    }

    /// Nothing needs to reach the remote cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty()
    }
}
