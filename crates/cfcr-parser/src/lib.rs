//! # cfcr-parser
//!
//! Decodes the raw documents cfcr fetches into typed values:
//! - the schedule widget's JSON envelope and its HTML fragment
//! - the embedded `scheduleData` availability payload ([`schedule_data`])
//! - the session blocks of the widget ([`sessions`])
//! - the booking site's login, booked-schedule and cart pages ([`account_pages`])
//!
//! HTML is read through the tree-sitter HTML grammar (via ast-grep) into a
//! small owned element tree, [`HtmlDocument`]. Parsing never fails; broken
//! markup simply yields fewer elements.

pub mod account_pages;
pub mod dom;
pub mod envelope;
pub mod schedule_data;
pub mod sessions;

mod error;

pub use dom::{Element, HtmlDocument};
pub use envelope::decode_widget_envelope;
pub use error::{ExtractionDegraded, ParseError};
