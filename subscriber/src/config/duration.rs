// 2022-2024 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::fmt;

use serde::Serialize;
use serde::Serializer;

/// How long to stay subscribed: a finite span in milliseconds or the
/// unbounded sentinel. A finite duration is always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordDuration {
    Unbounded,
    Millis(u64),
}

impl RecordDuration {
    pub fn millis(&self) -> Option<u64> {
        match self {
            Self::Unbounded => None,
            Self::Millis(millis) => Some(*millis),
        }
    }
}

impl fmt::Display for RecordDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Millis(millis) => write!(f, "{millis}ms"),
        }
    }
}

// Wire form consumed by the engine: a millisecond integer or the explicit
// "unbounded" marker.
impl Serialize for RecordDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unbounded => serializer.serialize_str("unbounded"),
            Self::Millis(millis) => serializer.serialize_u64(*millis),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParseError {
    /// The literal does not have the `infinite` or `HH:MM:SS` shape.
    Malformed,
    /// Shaped correctly but zero or negative.
    NotPositive,
}

/// Parses a duration literal: the exact token `infinite`, or `HH:MM:SS`
/// converted to milliseconds. A leading `-` passes the shape check so the
/// value can be rejected with the more specific non-positive rule.
pub(crate) fn parse(text: &str) -> Result<RecordDuration, ParseError> {
    if text == "infinite" {
        return Ok(RecordDuration::Unbounded);
    }
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut parts = body.split(':');
    let hours = component(&mut parts)?;
    let minutes = component(&mut parts)?;
    let seconds = component(&mut parts)?;
    if parts.next().is_some() {
        return Err(ParseError::Malformed);
    }
    let millis = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|m| m.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .ok_or(ParseError::Malformed)?;
    if negative || millis == 0 {
        return Err(ParseError::NotPositive);
    }
    Ok(RecordDuration::Millis(millis))
}

fn component(parts: &mut std::str::Split<'_, char>) -> Result<u64, ParseError> {
    let part = parts.next().ok_or(ParseError::Malformed)?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::Malformed);
    }
    part.parse().map_err(|_| ParseError::Malformed)
}
