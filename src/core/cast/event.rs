use serde::{Serialize, Serializer};

use crate::core::error::{Error, Result};

/// asciicast v2 event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    /// Data written to the terminal (`"o"`).
    Output,
    /// Data read from the keyboard (`"i"`).
    Input,
    /// A named marker (`"m"`).
    Marker,
    /// A terminal resize (`"r"`), payload `"<cols>x<rows>"`.
    Resize,
}

impl EventCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCode::Output => "o",
            EventCode::Input => "i",
            EventCode::Marker => "m",
            EventCode::Resize => "r",
        }
    }

    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "o" => Ok(EventCode::Output),
            "i" => Ok(EventCode::Input),
            "m" => Ok(EventCode::Marker),
            "r" => Ok(EventCode::Resize),
            other => Err(Error::validation_invalid_argument(
                "code",
                format!("Unknown event code '{}'", other),
                None,
                Some(vec![
                    "o".to_string(),
                    "i".to_string(),
                    "m".to_string(),
                    "r".to_string(),
                ]),
            )),
        }
    }
}

impl Serialize for EventCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One recorded terminal event: millisecond timestamp, code, payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub time_ms: u64,
    pub code: EventCode,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_through_str() {
        for code in [
            EventCode::Output,
            EventCode::Input,
            EventCode::Marker,
            EventCode::Resize,
        ] {
            assert_eq!(EventCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(EventCode::parse("x").is_err());
        assert!(EventCode::parse("").is_err());
    }
}
