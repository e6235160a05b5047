use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::booked::BookedIdSet;

/// A class as listed by the public schedule widget, before it is checked
/// against the account's bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionListing {
    /// Widget class id. Unique within one schedule snapshot.
    pub id: String,
    pub staff: String,
    /// Location name; also the grouping and filter key.
    pub place: String,
    pub start: DateTime<FixedOffset>,
    /// Opaque cart action reference. `None` when the widget offers no signup
    /// button (full classes and classes without a signup pathway look alike).
    pub signup: Option<String>,
    /// Free-text status such as "3 spots left". Empty when unknown.
    pub availability: String,
}

impl SessionListing {
    /// Derive the booking-aware view of this listing.
    #[must_use]
    pub fn reconcile(&self, booked: &BookedIdSet) -> Session {
        Session {
            id: self.id.clone(),
            staff: self.staff.clone(),
            place: self.place.clone(),
            start: self.start,
            signup: self.signup.clone(),
            availability: self.availability.clone(),
            booked: booked.contains(&self.id),
        }
    }
}

/// A listing paired with whether the account is booked into it.
///
/// Only [`SessionListing::reconcile`] constructs these, so `booked` always
/// reflects the [`BookedIdSet`] it was derived from. A new booked-id set
/// means deriving new sessions, never editing old ones.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    id: String,
    staff: String,
    place: String,
    start: DateTime<FixedOffset>,
    signup: Option<String>,
    availability: String,
    booked: bool,
}

impl Session {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn staff(&self) -> &str {
        &self.staff
    }

    #[must_use]
    pub fn place(&self) -> &str {
        &self.place
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    #[must_use]
    pub fn signup(&self) -> Option<&str> {
        self.signup.as_deref()
    }

    #[must_use]
    pub fn availability(&self) -> &str {
        &self.availability
    }

    #[must_use]
    pub const fn booked(&self) -> bool {
        self.booked
    }

    /// Whether the availability text mentions a waitlist (case-insensitive).
    #[must_use]
    pub fn is_waitlist(&self) -> bool {
        self.availability.to_ascii_lowercase().contains("waitlist")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn listing(id: &str) -> SessionListing {
        SessionListing {
            id: id.to_string(),
            staff: "Sam".to_string(),
            place: "Gym1".to_string(),
            start: DateTime::parse_from_rfc3339("2024-05-01T06:00:00+10:00").unwrap(),
            signup: Some(format!("/cart/add/{id}")),
            availability: "Waitlist available".to_string(),
        }
    }

    #[test]
    fn reconcile_marks_booked_ids() {
        let booked: BookedIdSet = ["A".to_string()].into_iter().collect();
        assert!(listing("A").reconcile(&booked).booked());
        assert!(!listing("B").reconcile(&booked).booked());
    }

    #[test]
    fn reconcile_copies_listing_fields() {
        let session = listing("A").reconcile(&BookedIdSet::default());
        assert_eq!(session.id(), "A");
        assert_eq!(session.place(), "Gym1");
        assert_eq!(session.signup(), Some("/cart/add/A"));
        assert_eq!(session.start().to_rfc3339(), "2024-05-01T06:00:00+10:00");
    }

    #[test]
    fn waitlist_detection_ignores_case() {
        let session = listing("A").reconcile(&BookedIdSet::default());
        assert!(session.is_waitlist());

        let mut open = listing("B");
        open.availability = "3 spots left".to_string();
        assert!(!open.reconcile(&BookedIdSet::default()).is_waitlist());
    }

    #[test]
    fn session_serializes_booked_flag() {
        let booked: BookedIdSet = ["A".to_string()].into_iter().collect();
        let json = serde_json::to_value(listing("A").reconcile(&booked)).unwrap();
        assert_eq!(json["booked"], true);
        assert_eq!(json["id"], "A");
    }
}
