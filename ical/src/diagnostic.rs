// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Irregularities the decoder tolerated.
//!
//! Decoding never fails on malformed text. Everything it skipped, discarded
//! or defaulted is reported here instead, for callers that want to tell the
//! user about it.

use std::fmt;

use crate::keyword::PropertyName;

/// One tolerated irregularity, at a 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Physical line the offending logical line started on.
    pub line: usize,

    /// What happened.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// Kinds of tolerated irregularities.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A continuation line with no line before it, dropped.
    OrphanContinuation,

    /// A non-blank line without a colon, skipped.
    MalformedLine,

    /// `BEGIN:VEVENT` inside an event; the unfinished event is discarded.
    NestedEvent {
        /// Line of the discarded event's `BEGIN:VEVENT`.
        discarded: usize,
    },

    /// A sub-component inside an event; its properties still apply to the event.
    NestedComponent {
        /// Component name as written.
        name: String,
    },

    /// `END:VEVENT` outside an event, ignored.
    StrayEnd,

    /// An event without a summary, dropped.
    UntitledEvent,

    /// Input ended inside an event, which is dropped.
    UnterminatedEvent,

    /// A date or date-time that did not parse; the fallback instant was used.
    MalformedDateTime {
        /// `DTSTART` or `DTEND`.
        property: PropertyName,
        /// Raw value.
        value: String,
    },

    /// A `TZID` parameter that was not applied; the value was read as UTC.
    TimeZoneIgnored {
        /// `DTSTART` or `DTEND`.
        property: PropertyName,
        /// Time zone identifier as written.
        tzid: String,
    },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanContinuation => write!(f, "continuation line without a preceding line"),
            Self::MalformedLine => write!(f, "line without a colon"),
            Self::NestedEvent { discarded } => {
                write!(f, "nested VEVENT, discarding the event begun at line {discarded}")
            }
            Self::NestedComponent { name } => write!(f, "{name} inside VEVENT"),
            Self::StrayEnd => write!(f, "END:VEVENT outside an event"),
            Self::UntitledEvent => write!(f, "event without a summary"),
            Self::UnterminatedEvent => write!(f, "event not terminated before end of input"),
            Self::MalformedDateTime { property, value } => {
                write!(f, "invalid {property} value '{value}', using the current time")
            }
            Self::TimeZoneIgnored { property, tzid } => {
                write!(f, "{property} time zone '{tzid}' ignored, reading as UTC")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_line_and_message() {
        let diagnostic = Diagnostic {
            line: 7,
            kind: DiagnosticKind::MalformedDateTime {
                property: PropertyName::DtStart,
                value: "not-a-date".to_owned(),
            },
        };
        assert_eq!(
            diagnostic.to_string(),
            "line 7: invalid DTSTART value 'not-a-date', using the current time"
        );
    }

    #[test]
    fn displays_nested_event() {
        let kind = DiagnosticKind::NestedEvent { discarded: 3 };
        assert_eq!(
            kind.to_string(),
            "nested VEVENT, discarding the event begun at line 3"
        );
    }
}
