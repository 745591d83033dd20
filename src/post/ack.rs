use quick_xml::Reader;
use quick_xml::events::Event;

/// Severity classification of an OTM transmission acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    /// Parsed, no error or warning markers.
    Ok,
    /// Parsed, carries a warning marker.
    Warning,
    /// Parsed, carries an error marker.
    Error,
    /// Response was not well-formed XML.
    Unknown,
}

/// A classified acknowledgment with a bounded excerpt of the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: AckStatus,
    pub snippet: String,
}

const SNIPPET_LIMIT: usize = 1000;

/// Classify an OTM ack response.
///
/// OTM reports processing problems inside an HTTP 200 body, so the status
/// line alone says nothing. The body is probed for well-formedness, then
/// scanned for the severity markers OTM embeds (`SEVERITY_ERROR`, `ERROR`,
/// `SEVERITY_WARNING`, `WARNING`).
pub fn classify_ack(body: &str) -> Ack {
    let snippet = truncate(body, SNIPPET_LIMIT);
    if !is_well_formed(body) {
        return Ack {
            status: AckStatus::Unknown,
            snippet,
        };
    }
    let status = if body.contains("SEVERITY_ERROR") || body.contains("ERROR") {
        AckStatus::Error
    } else if body.contains("SEVERITY_WARNING") || body.contains("WARNING") {
        AckStatus::Warning
    } else {
        AckStatus::Ok
    };
    Ack { status, snippet }
}

fn is_well_formed(xml: &str) -> bool {
    let mut reader = Reader::from_str(xml);
    let mut saw_element = false;
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return saw_element && depth == 0,
            Ok(Event::Start(_)) => {
                saw_element = true;
                depth += 1;
            }
            Ok(Event::End(_)) => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Ok(Event::Empty(_)) => saw_element = true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

fn truncate(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_ack_is_ok() {
        let ack = classify_ack("<Transmission><Status>PROCESSED</Status></Transmission>");
        assert_eq!(ack.status, AckStatus::Ok);
    }

    #[test]
    fn severity_error_is_error() {
        let ack = classify_ack("<Ack><Severity>SEVERITY_ERROR</Severity></Ack>");
        assert_eq!(ack.status, AckStatus::Error);
    }

    #[test]
    fn warning_marker_is_warning() {
        let ack = classify_ack("<Ack><Severity>SEVERITY_WARNING</Severity></Ack>");
        assert_eq!(ack.status, AckStatus::Warning);
    }

    #[test]
    fn error_outranks_warning() {
        let ack = classify_ack("<Ack>SEVERITY_WARNING then SEVERITY_ERROR</Ack>");
        assert_eq!(ack.status, AckStatus::Error);
    }

    #[test]
    fn malformed_body_is_unknown() {
        let ack = classify_ack("HTTP 502 Bad Gateway <html>");
        assert_eq!(ack.status, AckStatus::Unknown);
    }

    #[test]
    fn snippet_is_bounded() {
        let body = format!("<A>{}</A>", "x".repeat(5000));
        let ack = classify_ack(&body);
        assert!(ack.snippet.len() <= 1000);
    }
}
