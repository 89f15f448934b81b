//! Turning a raw serial line into the payload we post.
//!
//! Lines look like `<lat>,<lng>\r\n`.  Both values are kept as text, exactly as the device sent
//! them, no numeric conversion and no trimming besides the line terminator.
//!

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::ForwardError;

/// What gets form-encoded into the POST body, field order is the body order.
///
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Payload {
    /// Latitude
    pub lat: String,
    /// Longitude
    pub lng: String,
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{lat: {}, lng: {}}}", self.lat, self.lng)
    }
}

/// Strip the trailing run of `\n`/`\r` then split on `,`.
///
pub fn parse(raw: &str) -> Vec<&str> {
    raw.trim_end_matches(|c: char| c == '\n' || c == '\r')
        .split(',')
        .collect()
}

/// Use the first two tokens as latitude and longitude, extra ones are ignored.
///
pub fn build_payload(tokens: &[&str]) -> Result<Payload, ForwardError> {
    match tokens {
        [lat, lng, ..] => Ok(Payload {
            lat: lat.to_string(),
            lng: lng.to_string(),
        }),
        _ => Err(ForwardError::MalformedCoordinate(tokens.join(","))),
    }
}
