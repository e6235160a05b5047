//! Public schedule widget.

use cfcr_core::{ScheduleSnapshot, SessionListing};
use cfcr_parser::{HtmlDocument, decode_widget_envelope, schedule_data, sessions};
use reqwest::Url;

use crate::error::ClientError;
use crate::http::check_response;

/// The widget's HTML fragment, decoded from its JSON envelope.
#[derive(Debug, Clone)]
pub struct WidgetDocument {
    document: HtmlDocument,
}

impl WidgetDocument {
    /// Decode a widget response body (`{"contents": "<html>"}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] when the body is not a widget envelope.
    pub fn from_envelope(body: &str) -> Result<Self, ClientError> {
        let html = decode_widget_envelope(body)?;
        Ok(Self {
            document: HtmlDocument::parse(&html),
        })
    }

    /// Availability overlay; empty when the embedded payload is unreadable.
    #[must_use]
    pub fn snapshot(&self) -> ScheduleSnapshot {
        schedule_data::extract_snapshot(&self.document)
    }

    /// Session listings in document order with availability attached.
    #[must_use]
    pub fn listings(&self) -> Vec<SessionListing> {
        sessions::extract_sessions(&self.document, &self.snapshot())
    }
}

/// Fetches the public schedule widget. No authentication involved.
#[derive(Debug, Clone)]
pub struct WidgetClient {
    http: reqwest::Client,
    url: Url,
}

impl WidgetClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `widget_url` does not parse.
    pub fn new(http: reqwest::Client, widget_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(widget_url).map_err(|e| ClientError::invalid_url(widget_url, e))?;
        Ok(Self { http, url })
    }

    /// Download and decode the widget.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server answers with
    /// a non-success status, or the envelope cannot be decoded.
    pub async fn fetch(&self) -> Result<WidgetDocument, ClientError> {
        tracing::debug!(url = %self.url, "fetching schedule widget");
        let resp = check_response(self.http.get(self.url.clone()).send().await?).await?;
        let body = resp.text().await?;
        WidgetDocument::from_envelope(&body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn envelope_yields_listings_with_availability() {
        let body = r#"{"contents": "<div class=\"bw-session\" data-bw-widget-mbo-class-id=\"9\"><div class=\"bw-session__time\"><time class=\"hc_starttime\" datetime=\"2024-05-01T06:00:00+10:00\"></time></div><div class=\"bw-session__location\">Gym1</div></div><script>scheduleData = {\"contents\": {\"9\": {\"classAvailability\": \"2 spots left\"}}};</script>"}"#;
        let widget = WidgetDocument::from_envelope(body).unwrap();

        let listings = widget.listings();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "9");
        assert_eq!(listings[0].place, "Gym1");
        assert_eq!(listings[0].availability, "2 spots left");
    }

    #[test]
    fn non_envelope_body_is_a_parse_error() {
        let err = WidgetDocument::from_envelope("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn new_rejects_invalid_url() {
        let err = WidgetClient::new(reqwest::Client::new(), "widgets/schedules.json").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }
}
