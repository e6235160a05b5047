//! # cfcr-booking
//!
//! Turns widget listings plus the account's booked ids into one
//! booking-aware view, and drives the remote cart to book a chosen set.
//!
//! - [`Reconciler`] filters, sorts and marks sessions as booked, recomputing
//!   `booked` on every call so a refreshed [`cfcr_core::BookedIdSet`] is
//!   always reflected.
//! - [`BookingPlan`] is the diff between the requested ids and the current
//!   bookings.
//! - [`BookingWorkflow`] adds each planned session to the cart, then checks
//!   out once, tolerating per-session failures.
//!
//! The remote side is reached through [`CartBackend`].

use async_trait::async_trait;

mod plan;
mod reconciler;
mod workflow;

pub use plan::BookingPlan;
pub use reconciler::Reconciler;
pub use workflow::{BookingReport, BookingWorkflow, CartFailure, CheckoutOutcome};

/// Remote cart operations the workflow needs.
///
/// Both calls are single attempts. The remote cart has no idempotency
/// guarantee, so implementations must not retry on their own.
#[async_trait]
pub trait CartBackend: Send {
    type Error: std::fmt::Display;

    /// Perform the remote action behind an opaque signup reference.
    async fn add_to_cart(&mut self, signup: &str) -> Result<(), Self::Error>;

    /// Commit whatever the remote cart holds.
    async fn checkout(&mut self) -> Result<(), Self::Error>;
}
