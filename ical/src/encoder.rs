// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Encoding of [`CalendarEvent`]s into an iCalendar document.
//!
//! The output is a single VCALENDAR holding one VEVENT per event. With the
//! default options it is byte-for-byte stable:
//!
//! ```text
//! BEGIN:VCALENDAR
//! VERSION:2.0
//! PRODID:-//My Calendar App//EN
//! BEGIN:VEVENT
//! UID:42@mycalendar
//! SUMMARY:Standup
//! DTSTART:20240101T100000Z
//! DTEND:20240101T101500Z
//! END:VEVENT
//! END:VCALENDAR
//! ```

use std::io::{self, Write};

use jiff::Timestamp;

use crate::datetime::format_utc;
use crate::event::{CalendarEvent, EventId};
use crate::keyword::{KW_VCALENDAR, KW_VEVENT, PropertyName};
use crate::text::escape;

/// Encode events with the default options.
///
/// # Errors
///
/// Returns [`EncodeError::TimeOutOfRange`] if an event's start or end lies
/// outside the years -9999 to 9999.
pub fn encode(events: &[CalendarEvent]) -> Result<String, EncodeError> {
    EncodeOptions::default().write_to_string(events)
}

/// Errors that can occur while encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Writing to the destination failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A start or end time that has no calendar representation.
    #[error("event {id}: {field} {millis} ms is out of the supported time range")]
    TimeOutOfRange {
        /// Identifier of the offending event.
        id: EventId,
        /// `DTSTART` or `DTEND`.
        field: PropertyName,
        /// The raw instant, in milliseconds since the Unix epoch.
        millis: i64,
    },
}

/// Line terminator written after every physical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, as RFC 5545 prescribes.
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub(crate) const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
        }
    }
}

/// Encoding options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodeOptions {
    /// Value of the calendar's `PRODID`.
    ///
    /// Default: `-//My Calendar App//EN`.
    pub product_id: String,

    /// Domain part of each event's `UID`, `<id>@<uid_domain>`.
    ///
    /// Default: `mycalendar`.
    pub uid_domain: String,

    /// Line terminator.
    ///
    /// Default: [`LineEnding::Lf`].
    pub line_ending: LineEnding,

    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `None`.
    pub folding: Option<usize>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            product_id: "-//My Calendar App//EN".to_owned(),
            uid_domain: "mycalendar".to_owned(),
            line_ending: LineEnding::default(),
            folding: None,
        }
    }
}

impl EncodeOptions {
    /// Set the product identifier.
    #[must_use]
    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    /// Set the UID domain.
    #[must_use]
    pub fn uid_domain(mut self, uid_domain: impl Into<String>) -> Self {
        self.uid_domain = uid_domain.into();
        self
    }

    /// Set the line terminator.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Write events as one calendar to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails or an event time is out of range.
    /// Events before the offending one have already been written.
    pub fn write(&self, events: &[CalendarEvent], w: &mut impl Write) -> Result<(), EncodeError> {
        let mut encoder = Encoder::new(w, self);
        encoder.write_calendar(events)?;
        encoder.flush()?;
        Ok(())
    }

    /// Write events as one calendar to a `String`.
    ///
    /// # Errors
    /// Returns an error if an event time is out of range.
    pub fn write_to_string(&self, events: &[CalendarEvent]) -> Result<String, EncodeError> {
        let mut buffer = Vec::new();
        self.write(events, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| EncodeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Writes content lines, folding them as configured.
#[derive(Debug)]
struct Encoder<'a, W: Write> {
    writer: W,
    options: &'a EncodeOptions,
}

impl<'a, W: Write> Encoder<'a, W> {
    fn new(writer: W, options: &'a EncodeOptions) -> Self {
        Self { writer, options }
    }

    fn write_calendar(&mut self, events: &[CalendarEvent]) -> Result<(), EncodeError> {
        self.write_property(PropertyName::Begin, KW_VCALENDAR)?;
        self.write_property(PropertyName::Version, "2.0")?;
        let options = self.options;
        self.write_property(PropertyName::ProdId, &options.product_id)?;
        for event in events {
            self.write_event(event)?;
        }
        self.write_property(PropertyName::End, KW_VCALENDAR)?;
        Ok(())
    }

    fn write_event(&mut self, event: &CalendarEvent) -> Result<(), EncodeError> {
        let start = timestamp(event, PropertyName::DtStart, event.start_time)?;
        let end = timestamp(event, PropertyName::DtEnd, event.end_time)?;

        self.write_property(PropertyName::Begin, KW_VEVENT)?;
        let uid = format!("{}@{}", event.id, self.options.uid_domain);
        self.write_property(PropertyName::Uid, &uid)?;
        self.write_property(PropertyName::Summary, &escape(&event.title))?;
        if let Some(description) = event.description.as_deref().filter(|s| !s.is_empty()) {
            self.write_property(PropertyName::Description, &escape(description))?;
        }
        if let Some(location) = event.location.as_deref().filter(|s| !s.is_empty()) {
            self.write_property(PropertyName::Location, &escape(location))?;
        }
        self.write_property(PropertyName::DtStart, &format_utc(start).to_string())?;
        self.write_property(PropertyName::DtEnd, &format_utc(end).to_string())?;
        self.write_property(PropertyName::End, KW_VEVENT)?;
        Ok(())
    }

    fn write_property(&mut self, name: PropertyName, value: &str) -> io::Result<()> {
        self.write_line(&format!("{name}:{value}"))
    }

    /// Write one content line and its terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let ending = self.options.line_ending.as_bytes();
        let Some(max_len) = self.options.folding else {
            self.writer.write_all(line.as_bytes())?;
            return self.writer.write_all(ending);
        };

        let mut remaining = line;
        let mut available = max_len;
        loop {
            let (head, tail) = remaining.split_at(fold_point(remaining, available));
            self.writer.write_all(head.as_bytes())?;
            if tail.is_empty() {
                break;
            }

            self.writer.write_all(ending)?;
            self.writer.write_all(b" ")?;
            remaining = tail;
            available = max_len.saturating_sub(1); // continuation space
        }
        self.writer.write_all(ending)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn timestamp(
    event: &CalendarEvent,
    field: PropertyName,
    millis: i64,
) -> Result<Timestamp, EncodeError> {
    Timestamp::from_millisecond(millis).map_err(|_| EncodeError::TimeOutOfRange {
        id: event.id,
        field,
        millis,
    })
}

/// Byte offset to fold `line` at, so that at most `max_bytes` come before it.
///
/// Never splits a UTF-8 sequence or a backslash escape. At least one
/// character (or escape) is always taken, even if it exceeds `max_bytes`.
fn fold_point(line: &str, max_bytes: usize) -> usize {
    if line.len() <= max_bytes {
        return line.len();
    }

    let mut cut = 0;
    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        let mut end = i + c.len_utf8();
        if c == '\\'
            && let Some((j, escaped)) = chars.next()
        {
            end = j + escaped.len_utf8();
        }

        if end > max_bytes {
            if cut == 0 {
                cut = end;
            }
            break;
        }
        cut = end;
    }
    cut
}
