//! Availability overlay embedded in the widget as a `scheduleData = {...}`
//! script assignment.
//!
//! The payload looks like:
//!
//! ```text
//! scheduleData = {"contents": {"<session id>": {"classAvailability": "<span>3 spots left</span>", ...}}};
//! ```
//!
//! Reading it is best effort. Any failure is logged and produces an empty
//! [`ScheduleSnapshot`]; the session listing itself does not depend on it.

use std::collections::HashMap;

use cfcr_core::ScheduleSnapshot;
use serde::Deserialize;
use serde::de::Error as _;

use crate::dom::HtmlDocument;
use crate::error::ExtractionDegraded;

const MARKER: &str = "scheduleData = ";

/// The payload is expected to sit within this many lines of the marker.
const MAX_PAYLOAD_LINES: usize = 3;

#[derive(Deserialize)]
struct ScheduleData {
    #[serde(default)]
    contents: HashMap<String, ScheduleEntry>,
}

#[derive(Deserialize)]
struct ScheduleEntry {
    #[serde(default, rename = "classAvailability")]
    class_availability: Option<String>,
}

/// Read the availability overlay, degrading to an empty snapshot.
#[must_use]
pub fn extract_snapshot(doc: &HtmlDocument) -> ScheduleSnapshot {
    match try_extract(doc) {
        Ok(snapshot) => {
            tracing::debug!(entries = snapshot.len(), "schedule data extracted");
            snapshot
        }
        Err(reason) => {
            tracing::warn!(%reason, "failed to parse schedule data, continuing without availability");
            ScheduleSnapshot::default()
        }
    }
}

/// Read the availability overlay, reporting why it could not be read.
///
/// # Errors
///
/// Returns [`ExtractionDegraded`] when no script carries the payload or the
/// payload is not valid JSON.
pub fn try_extract(doc: &HtmlDocument) -> Result<ScheduleSnapshot, ExtractionDegraded> {
    let scripts: Vec<String> = doc
        .root()
        .by_tag("script")
        .into_iter()
        .map(crate::dom::Element::raw_text)
        .collect();

    let script = match scripts.iter().find(|body| body.contains(MARKER)) {
        Some(script) => script,
        None if scripts.iter().any(|body| body.contains("availability")) => {
            return Err(ExtractionDegraded::MarkerNotFound);
        }
        None => return Err(ExtractionDegraded::ScriptNotFound),
    };

    let window = payload_window(script).ok_or(ExtractionDegraded::MarkerNotFound)?;
    let data = decode_payload(window)?;

    Ok(data
        .contents
        .into_iter()
        .map(|(id, entry)| {
            let text = entry
                .class_availability
                .map(|fragment| HtmlDocument::parse(&fragment).text_content())
                .unwrap_or_default();
            (id, text)
        })
        .collect())
}

/// Text following the marker, cut off after [`MAX_PAYLOAD_LINES`] lines.
fn payload_window(script: &str) -> Option<&str> {
    let start = script.find(MARKER)? + MARKER.len();
    let rest = &script[start..];
    let end = rest
        .match_indices('\n')
        .nth(MAX_PAYLOAD_LINES - 1)
        .map_or(rest.len(), |(index, _)| index);
    Some(&rest[..end])
}

/// Decode the first JSON value in `window`; trailing `;` or code is ignored.
fn decode_payload(window: &str) -> Result<ScheduleData, serde_json::Error> {
    serde_json::Deserializer::from_str(window)
        .into_iter::<ScheduleData>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("empty schedule payload")))
}
