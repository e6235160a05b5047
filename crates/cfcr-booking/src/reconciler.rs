use std::collections::{BTreeSet, HashSet};

use cfcr_core::{BookedIdSet, LocationFilter, Session, SessionListing};

use crate::plan::BookingPlan;

/// Booking-aware view over one schedule snapshot.
///
/// Holds only the listings. The booked-id set is passed in on every call
/// because it changes after a checkout.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    listings: Vec<SessionListing>,
}

impl Reconciler {
    #[must_use]
    pub const fn new(listings: Vec<SessionListing>) -> Self {
        Self { listings }
    }

    /// Listings in document order.
    #[must_use]
    pub fn listings(&self) -> &[SessionListing] {
        &self.listings
    }

    /// Distinct places, in order of first appearance.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.listings
            .iter()
            .filter(|listing| seen.insert(listing.place.as_str()))
            .map(|listing| listing.place.clone())
            .collect()
    }

    /// Sessions at the filtered places, sorted by `(place, start)` and
    /// marked against `booked`. Ties keep document order.
    #[must_use]
    pub fn sessions(&self, booked: &BookedIdSet, filter: &LocationFilter) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .listings
            .iter()
            .filter(|listing| filter.matches(&listing.place))
            .map(|listing| listing.reconcile(booked))
            .collect();
        sessions.sort_by(|a, b| {
            a.place()
                .cmp(b.place())
                .then_with(|| a.start().cmp(&b.start()))
        });
        sessions
    }

    /// Sessions the account is booked into, in canonical order.
    #[must_use]
    pub fn booked_sessions(&self, booked: &BookedIdSet) -> Vec<Session> {
        self.sessions(booked, &LocationFilter::All)
            .into_iter()
            .filter(Session::booked)
            .collect()
    }

    /// What booking `targets` would take given the current bookings.
    #[must_use]
    pub fn plan(&self, booked: &BookedIdSet, targets: &BTreeSet<String>) -> BookingPlan {
        BookingPlan::from_sessions(&self.sessions(booked, &LocationFilter::All), targets)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};
    use pretty_assertions::assert_eq;

    use super::*;

    fn listing(id: &str, place: &str, hour: i64) -> SessionListing {
        let base = DateTime::parse_from_rfc3339("2024-05-06T00:00:00+10:00").unwrap();
        SessionListing {
            id: id.to_string(),
            staff: "Alex".to_string(),
            place: place.to_string(),
            start: base + Duration::hours(hour),
            signup: Some(format!("/cart/{id}")),
            availability: String::new(),
        }
    }

    fn ids(sessions: &[Session]) -> Vec<&str> {
        sessions.iter().map(Session::id).collect()
    }

    #[test]
    fn locations_are_unique_in_first_seen_order() {
        let reconciler = Reconciler::new(vec![
            listing("1", "Gym2", 9),
            listing("2", "Gym1", 8),
            listing("3", "Gym2", 7),
            listing("4", "Annex", 6),
        ]);
        assert_eq!(reconciler.locations(), vec!["Gym2", "Gym1", "Annex"]);
    }

    #[test]
    fn sessions_sort_by_place_then_start() {
        let reconciler = Reconciler::new(vec![
            listing("1", "Gym2", 9),
            listing("2", "Gym1", 8),
            listing("3", "Gym2", 7),
            listing("4", "Gym1", 6),
        ]);
        let sessions = reconciler.sessions(&BookedIdSet::default(), &LocationFilter::All);
        assert_eq!(ids(&sessions), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn equal_keys_keep_document_order() {
        let reconciler = Reconciler::new(vec![listing("b", "Gym1", 6), listing("a", "Gym1", 6)]);
        let sessions = reconciler.sessions(&BookedIdSet::default(), &LocationFilter::All);
        assert_eq!(ids(&sessions), vec!["b", "a"]);
    }

    #[test]
    fn filter_restricts_places() {
        let reconciler = Reconciler::new(vec![listing("1", "Gym1", 6), listing("2", "Gym2", 6)]);
        let sessions =
            reconciler.sessions(&BookedIdSet::default(), &LocationFilter::from_names(["Gym2"]));
        assert_eq!(ids(&sessions), vec!["2"]);
    }

    #[test]
    fn booked_sessions_only_lists_booked() {
        let reconciler = Reconciler::new(vec![listing("1", "Gym1", 6), listing("2", "Gym1", 7)]);
        let booked: BookedIdSet = ["2".to_string()].into_iter().collect();
        assert_eq!(ids(&reconciler.booked_sessions(&booked)), vec!["2"]);
    }
}
