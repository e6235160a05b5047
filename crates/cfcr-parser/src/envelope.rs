//! The widget endpoint wraps its HTML in `{"contents": "<html>"}`.

use serde::Deserialize;

use crate::error::ParseError;

#[derive(Deserialize)]
struct WidgetEnvelope {
    contents: String,
}

/// Pull the HTML fragment out of a widget response body.
///
/// # Errors
///
/// Returns [`ParseError::Envelope`] if the body is not JSON or has no string
/// `contents` field.
pub fn decode_widget_envelope(body: &str) -> Result<String, ParseError> {
    let envelope: WidgetEnvelope = serde_json::from_str(body)?;
    Ok(envelope.contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_contents_fragment() {
        let body = r#"{"contents": "<div class=\"bw-widget\"></div>", "status": "ok"}"#;
        assert_eq!(
            decode_widget_envelope(body).unwrap(),
            "<div class=\"bw-widget\"></div>"
        );
    }

    #[test]
    fn missing_contents_is_an_error() {
        let err = decode_widget_envelope(r#"{"status": "ok"}"#).unwrap_err();
        assert!(matches!(err, ParseError::Envelope(_)));
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(decode_widget_envelope("<html>maintenance</html>").is_err());
    }
}
