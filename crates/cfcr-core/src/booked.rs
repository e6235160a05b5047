use std::collections::BTreeSet;

use serde::Serialize;

/// Session ids the authenticated account is currently booked into.
///
/// `generation` is the cache generation the set was fetched in. It changes
/// every time the owning account invalidates its cache, so two sets with
/// different generations may disagree about remote state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookedIdSet {
    ids: BTreeSet<String>,
    generation: u64,
}

impl BookedIdSet {
    #[must_use]
    pub const fn new(ids: BTreeSet<String>, generation: u64) -> Self {
        Self { ids, generation }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl FromIterator<String> for BookedIdSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_collapse() {
        let set: BookedIdSet = ["7", "7", "9"].map(String::from).into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("7"));
        assert!(!set.contains("8"));
    }

    #[test]
    fn generation_is_carried() {
        let set = BookedIdSet::new(BTreeSet::new(), 3);
        assert_eq!(set.generation(), 3);
        assert!(set.is_empty());
    }
}
