//! # cfcr-core
//!
//! Data model shared across the cfcr crates:
//! - [`SessionListing`]: a class as read from the public schedule widget
//! - [`Session`]: a listing reconciled against the account's bookings
//! - [`ScheduleSnapshot`]: availability text keyed by session id
//! - [`BookedIdSet`]: ids the authenticated account is booked into
//! - [`LocationFilter`]: which places a caller wants to see
//!
//! Everything here is a process-scoped value rebuilt from network state on
//! each run. Nothing in this crate performs I/O.

pub mod booked;
pub mod filter;
pub mod schedule;
pub mod session;

pub use booked::BookedIdSet;
pub use filter::LocationFilter;
pub use schedule::ScheduleSnapshot;
pub use session::{Session, SessionListing};
