use std::collections::HashMap;

/// Availability text keyed by session id, read once per widget fetch.
///
/// An empty snapshot is a valid, degraded result: the widget's availability
/// overlay could not be read and every session falls back to an empty
/// availability string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    availability: HashMap<String, String>,
}

impl ScheduleSnapshot {
    #[must_use]
    pub const fn new(availability: HashMap<String, String>) -> Self {
        Self { availability }
    }

    /// Availability text for `id`, if the snapshot has an entry for it.
    #[must_use]
    pub fn availability(&self, id: &str) -> Option<&str> {
        self.availability.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.availability.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.availability.is_empty()
    }
}

impl FromIterator<(String, String)> for ScheduleSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
