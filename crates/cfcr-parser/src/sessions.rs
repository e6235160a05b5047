//! Session blocks of the schedule widget.
//!
//! Each class is a `div.bw-session` carrying its id in
//! `data-bw-widget-mbo-class-id`:
//!
//! ```text
//! <div class="bw-session" data-bw-widget-mbo-class-id="101">
//!   <div class="bw-session__time"><time class="hc_starttime" datetime="2024-05-01T06:00">6:00 AM</time></div>
//!   <div class="bw-session__staff">Sam</div>
//!   <div class="bw-session__location">Gym1</div>
//!   <div class="bw-widget__cart_button"><button data-url="https://...">Sign up</button></div>
//! </div>
//! ```

use cfcr_core::{ScheduleSnapshot, SessionListing};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

use crate::dom::{Element, HtmlDocument};

const SESSION_CLASS: &str = "bw-session";
const ID_ATTR: &str = "data-bw-widget-mbo-class-id";

/// Offset-less formats seen in `datetime` attributes, read as local time.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Read every session block in document order, attaching availability text
/// from `snapshot` (empty when the snapshot has no entry).
///
/// Blocks without an id or a readable start time are skipped with a warning.
/// Blocks without a signup button are kept with `signup: None`.
#[must_use]
pub fn extract_sessions(doc: &HtmlDocument, snapshot: &ScheduleSnapshot) -> Vec<SessionListing> {
    doc.root()
        .find_all(|el| el.tag() == "div" && el.has_class(SESSION_CLASS))
        .into_iter()
        .filter_map(|block| read_session(block, snapshot))
        .collect()
}

fn read_session(block: &Element, snapshot: &ScheduleSnapshot) -> Option<SessionListing> {
    let Some(id) = block.attr(ID_ATTR).map(str::trim).filter(|id| !id.is_empty()) else {
        tracing::warn!("session block without a class id, skipping");
        return None;
    };

    let raw_start = block
        .by_class("bw-session__time")
        .into_iter()
        .find_map(|time| time.find_first(|el| el.tag() == "time" && el.has_class("hc_starttime")))
        .and_then(|el| el.attr("datetime"));
    let Some(start) = raw_start.and_then(parse_start) else {
        tracing::warn!(
            id,
            raw_start = raw_start.unwrap_or_default(),
            "session block without a readable start time, skipping"
        );
        return None;
    };

    let signup = block
        .by_class("bw-widget__cart_button")
        .into_iter()
        .find_map(|cart| cart.child_elements().find(|el| el.tag() == "button"))
        .and_then(|button| button.attr("data-url"))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from);

    Some(SessionListing {
        id: id.to_string(),
        staff: first_text(block, "bw-session__staff"),
        place: first_text(block, "bw-session__location"),
        start,
        signup,
        availability: snapshot.availability(id).unwrap_or_default().to_string(),
    })
}

fn first_text(block: &Element, class: &str) -> String {
    block
        .find_first(|el| el.has_class(class))
        .map(Element::text_content)
        .unwrap_or_default()
}

/// Parse a `datetime` attribute: RFC 3339, or an offset-less local time.
#[must_use]
pub fn parse_start(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(start) = DateTime::parse_from_rfc3339(raw) {
        return Some(start);
    }
    NAIVE_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.fixed_offset())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn block(id: &str, start: &str, signup: Option<&str>) -> String {
        let button = signup.map_or_else(String::new, |url| {
            format!(r#"<div class="bw-widget__cart_button"><button data-url="{url}">Sign Up</button></div>"#)
        });
        format!(
            r#"<div class="bw-session" data-bw-widget-mbo-class-id="{id}">
  <div class="bw-session__time"><time class="hc_starttime" datetime="{start}">6:00</time></div>
  <div class="bw-session__staff">
    Sam   Lee
  </div>
  <div class="bw-session__location">Gym1</div>
  {button}
</div>"#
        )
    }

    #[test]
    fn reads_fields_in_document_order() {
        let html = format!(
            "{}{}",
            block("A", "2024-05-01T07:00:00+10:00", Some("/cart/add/A")),
            block("B", "2024-05-01T06:00:00+10:00", None)
        );
        let snapshot: ScheduleSnapshot = [("A".to_string(), "3 spots left".to_string())]
            .into_iter()
            .collect();

        let sessions = extract_sessions(&HtmlDocument::parse(&html), &snapshot);

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "A");
        assert_eq!(sessions[0].staff, "Sam Lee");
        assert_eq!(sessions[0].place, "Gym1");
        assert_eq!(sessions[0].signup.as_deref(), Some("/cart/add/A"));
        assert_eq!(sessions[0].availability, "3 spots left");
        assert_eq!(sessions[1].id, "B");
        assert_eq!(sessions[1].signup, None);
        assert_eq!(sessions[1].availability, "");
    }

    #[test]
    fn skips_blocks_without_id_or_start() {
        let html = format!(
            "{}{}{}",
            block("", "2024-05-01T07:00:00+10:00", None),
            block("C", "tomorrow-ish", None),
            block("D", "2024-05-01T07:00:00+10:00", None)
        );
        let sessions = extract_sessions(&HtmlDocument::parse(&html), &ScheduleSnapshot::default());
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["D"]);
    }

    #[test]
    fn signup_button_must_be_direct_child_of_cart_button() {
        let html = r#"<div class="bw-session" data-bw-widget-mbo-class-id="E">
  <div class="bw-session__time"><time class="hc_starttime" datetime="2024-05-01T07:00:00Z"></time></div>
  <div class="bw-widget__cart_button"><span><button data-url="/nested">x</button></span></div>
</div>"#;
        let sessions = extract_sessions(&HtmlDocument::parse(html), &ScheduleSnapshot::default());
        assert_eq!(sessions[0].signup, None);
    }

    #[rstest]
    #[case("2024-05-01T06:00:00+10:00", "2024-05-01T06:00:00")]
    #[case("2024-05-01T06:00:00Z", "2024-05-01T06:00:00")]
    #[case("2024-05-01T06:00", "2024-05-01T06:00:00")]
    #[case(" 2024-05-01 06:30:15 ", "2024-05-01T06:30:15")]
    fn parse_start_accepts_widget_formats(#[case] raw: &str, #[case] wall_clock: &str) {
        let parsed = parse_start(raw).expect("should parse");
        assert_eq!(
            parsed.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string(),
            wall_clock
        );
    }

    #[test]
    fn parse_start_rejects_garbage() {
        assert_eq!(parse_start("6:00 AM"), None);
        assert_eq!(parse_start(""), None);
    }
}
