// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of VEVENT components into [`CalendarEvent`]s.
//!
//! The decoder is a two-state machine over unfolded content lines: outside
//! an event, or inside one with a draft being filled. A draft becomes an
//! event only at its `END:VEVENT`, and only if it has a non-empty summary.
//! Nothing in the input can make decoding fail; irregularities end up as
//! [`Diagnostic`]s.

use std::io::{self, BufRead};
use std::mem;

use jiff::Timestamp;

use crate::content_line::ContentLine;
use crate::datetime::DateValue;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::event::{CalendarEvent, UNSET_ID};
use crate::keyword::{KW_TZID, KW_VEVENT, PropertyName, is_component};
use crate::text::unescape;
use crate::unfold::{LogicalLine, ReaderLines, Unfold, Unfolded, physical_lines};

/// Instant substituted for a date or date-time that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackTime {
    /// The wall-clock time at the moment the value is read.
    #[default]
    Now,

    /// A fixed instant.
    Fixed(Timestamp),
}

impl FallbackTime {
    fn instant(self) -> Timestamp {
        match self {
            FallbackTime::Now => Timestamp::now(),
            FallbackTime::Fixed(ts) => ts,
        }
    }
}

/// Decoding options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Instant used for malformed DTSTART/DTEND values.
    ///
    /// Default: [`FallbackTime::Now`].
    pub fallback: FallbackTime,
}

impl DecodeOptions {
    /// Set the fallback instant for malformed date values.
    #[must_use]
    pub const fn fallback(mut self, fallback: FallbackTime) -> Self {
        self.fallback = fallback;
        self
    }

    /// Decode all events from iCalendar text.
    #[must_use]
    pub fn decode(&self, src: &str) -> Decoded {
        self.run(physical_lines(src))
    }

    /// Decode all events from a byte stream.
    ///
    /// The stream is read line by line. Invalid UTF-8 is replaced by U+FFFD.
    ///
    /// # Errors
    /// Returns an error if reading from `reader` fails.
    pub fn decode_reader<R: BufRead>(&self, reader: R) -> io::Result<Decoded> {
        let mut error = None;
        let lines = ReaderLines::new(reader).map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                error = Some(e);
                None
            }
        });
        let decoded = self.run(lines);
        match error {
            Some(e) => Err(e),
            None => Ok(decoded),
        }
    }

    fn run<I, S>(&self, lines: I) -> Decoded
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assembler = Assembler::new(*self);
        for unfolded in Unfold::new(lines) {
            match unfolded {
                Unfolded::Line(line) => assembler.line(&line),
                Unfolded::Orphan(number) => {
                    assembler.report(number, DiagnosticKind::OrphanContinuation);
                }
            }
        }
        assembler.finish()
    }
}

/// Result of decoding: the events, plus what was tolerated to get them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Committed events, in source order.
    pub events: Vec<CalendarEvent>,

    /// Tolerated irregularities, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Outside,
    Inside(EventDraft),
}

/// An event between its `BEGIN:VEVENT` and `END:VEVENT`.
#[derive(Debug)]
struct EventDraft {
    begin: usize,
    title: String,
    description: Option<String>,
    location: Option<String>,
    start_time: i64,
    end_time: i64,
}

impl EventDraft {
    fn new(begin: usize) -> Self {
        Self {
            begin,
            title: String::new(),
            description: None,
            location: None,
            start_time: 0,
            end_time: 0,
        }
    }

    fn into_event(self) -> CalendarEvent {
        CalendarEvent {
            id: UNSET_ID,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            is_all_day: false,
            reminder_minutes_before: None,
        }
    }
}

#[derive(Debug)]
struct Assembler {
    options: DecodeOptions,
    state: State,
    decoded: Decoded,
}

impl Assembler {
    fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            state: State::Outside,
            decoded: Decoded::default(),
        }
    }

    fn line(&mut self, line: &LogicalLine) {
        let Some(content) = ContentLine::parse(&line.text) else {
            if !line.text.trim().is_empty() {
                self.report(line.number, DiagnosticKind::MalformedLine);
            }
            return;
        };

        let Ok(name) = content.name.parse::<PropertyName>() else {
            tracing::trace!(line = line.number, name = content.name, "ignoring property");
            return;
        };

        match name {
            PropertyName::Begin if is_component(content.value, KW_VEVENT) => {
                let draft = EventDraft::new(line.number);
                if let State::Inside(discarded) = mem::replace(&mut self.state, State::Inside(draft))
                {
                    let kind = DiagnosticKind::NestedEvent {
                        discarded: discarded.begin,
                    };
                    self.report(line.number, kind);
                }
            }
            PropertyName::End if is_component(content.value, KW_VEVENT) => {
                match mem::take(&mut self.state) {
                    State::Inside(draft) => self.commit(draft),
                    State::Outside => self.report(line.number, DiagnosticKind::StrayEnd),
                }
            }
            PropertyName::Begin => {
                if matches!(self.state, State::Inside(_)) {
                    let kind = DiagnosticKind::NestedComponent {
                        name: content.value.trim().to_owned(),
                    };
                    self.report(line.number, kind);
                }
            }
            _ => self.property(line.number, name, &content),
        }
    }

    fn property(&mut self, number: usize, name: PropertyName, content: &ContentLine<'_>) {
        let State::Inside(draft) = &mut self.state else {
            return;
        };

        match name {
            PropertyName::Summary => draft.title = unescape(content.value).into_owned(),
            PropertyName::Description => {
                draft.description = Some(unescape(content.value).into_owned());
            }
            PropertyName::Location => draft.location = Some(unescape(content.value).into_owned()),
            PropertyName::DtStart | PropertyName::DtEnd => {
                let value = DateValue::parse(content.value);
                let fallback = self.options.fallback;
                let millis = value.resolve(|| fallback.instant()).as_millisecond();
                if name == PropertyName::DtStart {
                    draft.start_time = millis;
                } else {
                    draft.end_time = millis;
                }

                if value.is_malformed() {
                    let kind = DiagnosticKind::MalformedDateTime {
                        property: name,
                        value: content.value.to_owned(),
                    };
                    self.report(number, kind);
                } else if let Some(tzid) = content.parameter(KW_TZID) {
                    let kind = DiagnosticKind::TimeZoneIgnored {
                        property: name,
                        tzid: tzid.values.join(","),
                    };
                    self.report(number, kind);
                }
            }
            PropertyName::Begin
            | PropertyName::End
            | PropertyName::Version
            | PropertyName::ProdId
            | PropertyName::Uid => {}
        }
    }

    fn commit(&mut self, draft: EventDraft) {
        if draft.title.is_empty() {
            self.report(draft.begin, DiagnosticKind::UntitledEvent);
        } else {
            self.decoded.events.push(draft.into_event());
        }
    }

    fn report(&mut self, line: usize, kind: DiagnosticKind) {
        tracing::debug!(line, %kind, "tolerated malformed input");
        self.decoded.diagnostics.push(Diagnostic { line, kind });
    }

    fn finish(mut self) -> Decoded {
        if let State::Inside(draft) = mem::take(&mut self.state) {
            self.report(draft.begin, DiagnosticKind::UnterminatedEvent);
        }
        self.decoded
    }
}
