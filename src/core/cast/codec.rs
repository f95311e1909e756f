//! asciicast v2 wire format.
//!
//! One JSON header object on the first line, then one JSON array per
//! event: `[seconds_float, code_string, data_string]`. Timestamps are
//! seconds with microsecond precision on the wire, milliseconds in
//! memory; encode/decode round-trips the millisecond values exactly.

use serde_json::Value;

use crate::core::cast::event::{Event, EventCode};
use crate::core::cast::{Cast, Header};
use crate::core::error::{Error, Result};

/// Encode a cast as asciicast v2 text.
///
/// An empty event log encodes to just the header line.
pub fn encode(cast: &Cast) -> Result<String> {
    let mut out = serde_json::to_string(&cast.header)
        .map_err(|e| Error::internal_json(e.to_string(), Some("encode header".to_string())))?;
    out.push('\n');

    for event in &cast.events {
        let seconds = event.time_ms as f64 / 1000.0;
        let line = serde_json::to_string(&(seconds, event.code.as_str(), &event.data))
            .map_err(|e| Error::internal_json(e.to_string(), Some("encode event".to_string())))?;
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

/// Decode asciicast v2 text.
///
/// With `expect_header` set, the first non-empty line must be the header
/// object. Without it, every line is an event and the header keeps its
/// defaults — the first event is never consumed as a header.
pub fn decode(input: &str, expect_header: bool) -> Result<Cast> {
    let mut header = Header::default();
    let mut events = Vec::new();
    let mut saw_header = !expect_header;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !saw_header {
            header = parse_header(line, line_no)?;
            saw_header = true;
            continue;
        }

        events.push(parse_event(line, line_no)?);
    }

    if expect_header && !saw_header {
        return Err(Error::cast_invalid_header(0, ""));
    }

    Ok(Cast::from_parts(header, events))
}

fn parse_header(line: &str, line_no: usize) -> Result<Header> {
    let value: Value = serde_json::from_str(line)
        .map_err(|_| Error::cast_invalid_header(line_no, truncate(line)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| Error::cast_invalid_header(line_no, truncate(line)))?;

    let version = obj
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::cast_invalid_header(line_no, truncate(line)))?;
    if version != 2 {
        return Err(Error::cast_unsupported_version(version));
    }

    Ok(Header {
        version: 2,
        width: dimension(obj.get("width"), 80),
        height: dimension(obj.get("height"), 24),
        timestamp: obj.get("timestamp").and_then(Value::as_i64),
    })
}

fn dimension(value: Option<&Value>, default: u16) -> u16 {
    value
        .and_then(Value::as_u64)
        .and_then(|v| u16::try_from(v).ok())
        .unwrap_or(default)
}

fn parse_event(line: &str, line_no: usize) -> Result<Event> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| Error::cast_invalid_event(line_no, truncate(line), e.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| Error::cast_invalid_event(line_no, truncate(line), "not a JSON array"))?;
    if items.len() < 3 {
        return Err(Error::cast_invalid_event(
            line_no,
            truncate(line),
            "expected [time, code, data]",
        ));
    }

    let seconds = items[0].as_f64().ok_or_else(|| {
        Error::cast_invalid_event(line_no, truncate(line), "timestamp is not a number")
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::cast_invalid_event(
            line_no,
            truncate(line),
            "timestamp out of range",
        ));
    }

    let code_str = items[1].as_str().ok_or_else(|| {
        Error::cast_invalid_event(line_no, truncate(line), "code is not a string")
    })?;
    let code = EventCode::parse(code_str)
        .map_err(|_| Error::cast_invalid_event(line_no, truncate(line), "unknown event code"))?;

    let data = items[2].as_str().ok_or_else(|| {
        Error::cast_invalid_event(line_no, truncate(line), "data is not a string")
    })?;

    Ok(Event {
        time_ms: (seconds * 1000.0).round() as u64,
        code,
        data: data.to_string(),
    })
}

fn truncate(line: &str) -> String {
    line.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cast() -> Cast {
        let mut cast = Cast::new()
            .with_size(100, 30)
            .with_keystroke_delay_ms(75)
            .with_timestamp(1700000000);
        cast.pause(1000);
        cast.keystrokes("ls -l");
        cast.enter();
        cast.print("total 0\r\n");
        cast.pause(3000);
        cast.marker("listing");
        cast
    }

    #[test]
    fn round_trip_preserves_event_log() {
        let cast = sample_cast();
        let encoded = encode(&cast).unwrap();
        let decoded = decode(&encoded, true).unwrap();

        assert_eq!(decoded.header, cast.header);
        assert_eq!(decoded.events, cast.events);
    }

    #[test]
    fn empty_cast_encodes_to_just_the_header_line() {
        let cast = Cast::new();
        let encoded = encode(&cast).unwrap();
        assert_eq!(encoded.lines().count(), 1);
        assert!(encoded.starts_with('{'));

        let decoded = decode(&encoded, true).unwrap();
        assert!(decoded.events.is_empty());
    }

    #[test]
    fn headerless_decode_keeps_first_event() {
        let input = "[0.1, \"o\", \"first\"]\n[0.2, \"o\", \"second\"]\n";
        let cast = decode(input, false).unwrap();
        assert_eq!(cast.events.len(), 2);
        assert_eq!(cast.events[0].data, "first");
        assert_eq!(cast.header.width, 80);
    }

    #[test]
    fn header_line_is_not_an_event() {
        let input = "{\"version\": 2, \"width\": 90, \"height\": 25}\n[1.0, \"o\", \"hi\"]\n";
        let cast = decode(input, true).unwrap();
        assert_eq!(cast.header.width, 90);
        assert_eq!(cast.header.height, 25);
        assert_eq!(cast.events.len(), 1);
    }

    #[test]
    fn decode_resumes_clock_at_last_event() {
        let mut base = decode("[1.5, \"o\", \"a\"]\n", false).unwrap();
        assert_eq!(base.clock_ms(), 1500);

        let mut extra = Cast::new();
        extra.pause(500).print("b");
        base.append(&extra);
        assert_eq!(base.events[1].time_ms, 2000);
    }

    #[test]
    fn microsecond_wire_precision_rounds_to_ms() {
        let cast = decode("[0.123456, \"o\", \"x\"]\n", false).unwrap();
        assert_eq!(cast.events[0].time_ms, 123);
    }

    #[test]
    fn missing_header_is_an_error_when_expected() {
        let err = decode("", true).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::CastInvalidHeader);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let err = decode("{\"version\": 3, \"width\": 80, \"height\": 24}\n", true).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::CastUnsupportedVersion);
    }

    #[test]
    fn malformed_event_lines_are_errors() {
        for bad in [
            "not json",
            "{\"time\": 1}",
            "[1.0, \"o\"]",
            "[\"x\", \"o\", \"data\"]",
            "[1.0, \"z\", \"data\"]",
            "[-1.0, \"o\", \"data\"]",
        ] {
            let input = format!("{}\n", bad);
            assert!(decode(&input, false).is_err(), "accepted: {}", bad);
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "{\"version\": 2, \"width\": 80, \"height\": 24}\n\n[0.5, \"o\", \"x\"]\n\n";
        let cast = decode(input, true).unwrap();
        assert_eq!(cast.events.len(), 1);
    }
}
