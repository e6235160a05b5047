//! Table views for the values cfcr prints. Presentation only: sessions are
//! read, never modified.

use cfcr_booking::{BookingPlan, BookingReport, CheckoutOutcome};
use cfcr_core::Session;
use chrono::Datelike;
use serde::Serialize;

use super::TableView;
use super::table::{Cell, GREEN, RED, TableOptions, render_table};

const START_FORMAT: &str = "%d %a, %H:%M%p";
const SESSION_HEADERS: [&str; 6] = ["id", "staff", "place", "start", "availability", "booked"];

impl TableView for [Session] {
    fn render_table(&self, options: TableOptions) -> String {
        if self.is_empty() {
            return String::from("(no sessions)");
        }
        let rows: Vec<Vec<Cell>> = self.iter().map(session_row).collect();
        render_table(&SESSION_HEADERS, &rows, options)
    }
}

fn session_row(session: &Session) -> Vec<Cell> {
    let start = session.start().format(START_FORMAT).to_string();
    if session.booked() {
        return [
            session.id(),
            session.staff(),
            session.place(),
            start.as_str(),
            session.availability(),
            "yes",
        ]
        .into_iter()
        .map(|text| Cell::colored(text, GREEN))
        .collect();
    }

    let availability = if session.is_waitlist() {
        Cell::colored(session.availability(), RED)
    } else {
        Cell::plain(session.availability())
    };
    vec![
        Cell::plain(session.id()),
        Cell::plain(session.staff()),
        Cell::plain(session.place()),
        Cell::colored(start, weekday_color(session)),
        availability,
        Cell::plain(""),
    ]
}

/// Bright palette indexed by weekday, Sunday first.
fn weekday_color(session: &Session) -> u8 {
    let from_sunday = session.start().weekday().num_days_from_sunday();
    90 + u8::try_from(from_sunday).unwrap_or_default()
}

/// Distinct locations, in first-seen order.
#[derive(Serialize)]
#[serde(transparent)]
pub struct Locations(pub Vec<String>);

impl TableView for Locations {
    fn render_table(&self, options: TableOptions) -> String {
        if self.0.is_empty() {
            return String::from("(no locations)");
        }
        let rows: Vec<Vec<Cell>> = self.0.iter().map(|place| vec![Cell::plain(place)]).collect();
        render_table(&["location"], &rows, options)
    }
}

impl TableView for BookingPlan {
    fn render_table(&self, options: TableOptions) -> String {
        let mut out = vec![if self.to_add.is_empty() {
            String::from("Nothing to book.")
        } else {
            format!("Would book {} session(s):", self.to_add.len())
        }];
        if !self.to_add.is_empty() {
            out.push(self.to_add.as_slice().render_table(options));
        }
        push_ids(&mut out, "Already booked", &self.already_booked);
        push_ids(&mut out, "Not on the schedule", &self.unknown);
        out.join("\n")
    }
}

/// Result of `cfcr book`: what happened plus the refreshed booked list.
///
/// `booked` is `None` when the list could not be re-read after the run.
#[derive(Serialize)]
pub struct BookOutcome {
    pub report: BookingReport,
    pub booked: Option<Vec<Session>>,
}

impl TableView for BookOutcome {
    fn render_table(&self, options: TableOptions) -> String {
        let report = &self.report;
        let mut out = Vec::new();
        push_ids(&mut out, "Added to cart", &report.added);
        push_ids(&mut out, "Already booked", &report.already_booked);
        push_ids(&mut out, "Skipped, no signup available", &report.skipped_without_signup);
        push_ids(&mut out, "Not on the schedule", &report.unknown);
        for failure in &report.failed {
            out.push(format!("Failed {}: {}", failure.id, failure.reason));
        }
        out.push(match &report.checkout {
            CheckoutOutcome::Committed => String::from("Checkout: committed"),
            CheckoutOutcome::NotAttempted => String::from("Checkout: not needed"),
            CheckoutOutcome::Failed { reason } => format!("Checkout: FAILED ({reason})"),
        });
        out.push(String::new());
        out.push(String::from("You are currently booked into:"));
        match &self.booked {
            Some(sessions) => out.push(sessions.as_slice().render_table(options)),
            None => out.push(String::from("(booked classes unavailable)")),
        }
        out.join("\n")
    }
}

fn push_ids(out: &mut Vec<String>, label: &str, ids: &[String]) {
    if !ids.is_empty() {
        out.push(format!("{label}: {}", ids.join(", ")));
    }
}
