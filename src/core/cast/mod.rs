//! Terminal session recorder: a timed event log with asciicast v2 encoding.
//!
//! A [`Cast`] is built by advancing a millisecond clock and appending
//! events at the current time, so the event log is monotonically
//! non-decreasing by construction. [`codec`] handles the wire format:
//! one JSON header object line followed by one JSON array per event.

pub mod codec;
pub mod event;
pub mod play;

pub use codec::{decode, encode};
pub use event::{Event, EventCode};

use serde::Serialize;

/// asciicast v2 header fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub version: u32,
    pub width: u16,
    pub height: u16,
    /// Unix timestamp of the recording start, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: 2,
            width: 80,
            height: 24,
            timestamp: None,
        }
    }
}

/// A recorded terminal session under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub header: Header,
    pub events: Vec<Event>,
    clock_ms: u64,
    keystroke_delay_ms: u64,
}

impl Default for Cast {
    fn default() -> Self {
        Self::new()
    }
}

impl Cast {
    pub fn new() -> Self {
        Self {
            header: Header::default(),
            events: Vec::new(),
            clock_ms: 0,
            keystroke_delay_ms: 100,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.header.width = width;
        self.header.height = height;
        self
    }

    pub fn with_keystroke_delay_ms(mut self, delay_ms: u64) -> Self {
        self.keystroke_delay_ms = delay_ms;
        self
    }

    pub fn with_timestamp(mut self, unix_seconds: i64) -> Self {
        self.header.timestamp = Some(unix_seconds);
        self
    }

    /// Stamp the header with the current wall-clock time.
    pub fn with_timestamp_now(self) -> Self {
        let now = chrono::Utc::now().timestamp();
        self.with_timestamp(now)
    }

    /// Current clock position in milliseconds.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Duration of the session, including any trailing pause.
    pub fn duration_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Advance the clock without emitting an event.
    pub fn pause(&mut self, ms: u64) -> &mut Self {
        self.clock_ms += ms;
        self
    }

    /// Append an event at the current clock position.
    pub fn push(&mut self, code: EventCode, data: impl Into<String>) -> &mut Self {
        self.events.push(Event {
            time_ms: self.clock_ms,
            code,
            data: data.into(),
        });
        self
    }

    /// Emit terminal output at the current clock position.
    pub fn print(&mut self, data: impl Into<String>) -> &mut Self {
        self.push(EventCode::Output, data)
    }

    /// Emit a keyboard input event.
    pub fn input(&mut self, data: impl Into<String>) -> &mut Self {
        self.push(EventCode::Input, data)
    }

    /// Emit a named marker.
    pub fn marker(&mut self, label: impl Into<String>) -> &mut Self {
        self.push(EventCode::Marker, label)
    }

    /// Emit a resize event.
    pub fn resize(&mut self, width: u16, height: u16) -> &mut Self {
        self.push(EventCode::Resize, format!("{}x{}", width, height))
    }

    /// Simulate human typing: one output event per character, each
    /// preceded by the keystroke delay.
    pub fn keystrokes(&mut self, text: &str) -> &mut Self {
        let delay = self.keystroke_delay_ms;
        for ch in text.chars() {
            self.pause(delay);
            self.print(ch.to_string());
        }
        self
    }

    /// Simulate pressing Enter.
    pub fn enter(&mut self) -> &mut Self {
        let delay = self.keystroke_delay_ms;
        self.pause(delay);
        self.print("\r\n")
    }

    /// Concatenate another cast, shifting its events past the current
    /// clock. The receiver's dimensions win.
    pub fn append(&mut self, other: &Cast) -> &mut Self {
        let offset = self.clock_ms;
        for event in &other.events {
            self.events.push(Event {
                time_ms: event.time_ms + offset,
                code: event.code,
                data: event.data.clone(),
            });
        }
        self.clock_ms += other.clock_ms;
        self
    }

    /// Whether event timestamps are monotonically non-decreasing.
    ///
    /// Always true for built casts; decoded streams may violate it.
    pub fn is_monotonic(&self) -> bool {
        self.events.windows(2).all(|w| w[0].time_ms <= w[1].time_ms)
    }

    /// Restore clock state after decoding: the clock resumes at the last
    /// event's timestamp so that `append` continues from there.
    pub(crate) fn from_parts(header: Header, events: Vec<Event>) -> Self {
        let clock_ms = events.last().map(|e| e.time_ms).unwrap_or(0);
        Self {
            header,
            events,
            clock_ms,
            keystroke_delay_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cast_has_default_geometry_and_empty_log() {
        let cast = Cast::new();
        assert_eq!(cast.header.width, 80);
        assert_eq!(cast.header.height, 24);
        assert_eq!(cast.header.version, 2);
        assert!(cast.events.is_empty());
        assert_eq!(cast.duration_ms(), 0);
    }

    #[test]
    fn pause_advances_clock_without_events() {
        let mut cast = Cast::new();
        cast.pause(1500);
        assert_eq!(cast.clock_ms(), 1500);
        assert!(cast.events.is_empty());
    }

    #[test]
    fn keystrokes_emit_one_event_per_char_with_delay() {
        let mut cast = Cast::new().with_keystroke_delay_ms(50);
        cast.keystrokes("ls");
        assert_eq!(cast.events.len(), 2);
        assert_eq!(cast.events[0].time_ms, 50);
        assert_eq!(cast.events[0].data, "l");
        assert_eq!(cast.events[1].time_ms, 100);
        assert_eq!(cast.events[1].data, "s");
        assert!(cast.events.iter().all(|e| e.code == EventCode::Output));
    }

    #[test]
    fn enter_emits_crlf() {
        let mut cast = Cast::new().with_keystroke_delay_ms(10);
        cast.enter();
        assert_eq!(cast.events.last().unwrap().data, "\r\n");
        assert_eq!(cast.clock_ms(), 10);
    }

    #[test]
    fn print_does_not_advance_clock() {
        let mut cast = Cast::new();
        cast.pause(200).print("hello");
        assert_eq!(cast.events[0].time_ms, 200);
        assert_eq!(cast.clock_ms(), 200);
    }

    #[test]
    fn append_shifts_events_by_current_clock() {
        let mut base = Cast::new();
        base.pause(1000).print("first");

        let mut extra = Cast::new();
        extra.pause(500).print("second");

        base.append(&extra);
        assert_eq!(base.events.len(), 2);
        assert_eq!(base.events[1].time_ms, 1500);
        assert_eq!(base.duration_ms(), 1500);
        assert!(base.is_monotonic());
    }

    #[test]
    fn resize_payload_is_cols_x_rows() {
        let mut cast = Cast::new();
        cast.resize(120, 40);
        assert_eq!(cast.events[0].code, EventCode::Resize);
        assert_eq!(cast.events[0].data, "120x40");
    }

    #[test]
    fn built_casts_are_monotonic() {
        let mut cast = Cast::new().with_keystroke_delay_ms(30);
        cast.keystrokes("echo hi");
        cast.enter();
        cast.print("hi\r\n");
        cast.pause(3000);
        cast.marker("done");
        assert!(cast.is_monotonic());
    }
}
