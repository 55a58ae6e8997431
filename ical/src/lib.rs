// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Import and export calendar events as iCalendar (RFC 5545) text.
//!
//! Only the VEVENT subset a personal calendar needs is handled: summary,
//! description, location, start and end. Decoding is lenient and never
//! fails on malformed text; encoding is deterministic.
//!
//! ```
//! use mycal_ical::{CalendarEvent, decode, encode};
//!
//! let event = CalendarEvent::new("Standup", 1_704_103_200_000, 1_704_104_100_000);
//! let ics = encode(&[event]).unwrap();
//! let events = decode(&ics);
//! assert_eq!(events[0].title, "Standup");
//! assert_eq!(events[0].start_time, 1_704_103_200_000);
//! ```
//!
//! Encoding fails only when an event's start or end lies outside the years
//! -9999 to 9999, the range a DATE-TIME can be written in:
//!
//! ```
//! use mycal_ical::{CalendarEvent, EncodeError, encode};
//!
//! let event = CalendarEvent::new("Far future", 0, i64::MAX);
//! assert!(matches!(encode(&[event]), Err(EncodeError::TimeOutOfRange { .. })));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::single_match_else, clippy::match_bool)]

pub mod content_line;
pub mod datetime;
mod decoder;
mod diagnostic;
mod encoder;
mod event;
mod keyword;
mod lexer;
pub mod text;
mod unfold;

use std::io::{self, BufRead};

pub use crate::decoder::{DecodeOptions, Decoded, FallbackTime};
pub use crate::diagnostic::{Diagnostic, DiagnosticKind};
pub use crate::encoder::{EncodeError, EncodeOptions, LineEnding, encode};
pub use crate::event::{CalendarEvent, EventId, UNSET_ID};
pub use crate::keyword::PropertyName;

/// Decode all events from iCalendar text, with the default options.
///
/// Malformed input never fails: unparseable lines are skipped, events
/// without a summary are dropped and unparseable dates fall back to the
/// current time. Use [`DecodeOptions::decode`] to learn what was tolerated.
#[must_use]
pub fn decode(src: &str) -> Vec<CalendarEvent> {
    DecodeOptions::default().decode(src).events
}

/// Decode all events from a byte stream, with the default options.
///
/// # Errors
/// Returns an error only if reading from `reader` fails.
pub fn decode_reader<R: BufRead>(reader: R) -> io::Result<Vec<CalendarEvent>> {
    DecodeOptions::default()
        .decode_reader(reader)
        .map(|decoded| decoded.events)
}
