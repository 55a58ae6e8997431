// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use mycal_ical::CalendarEvent;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{OutputFormat, format_millis_range};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Index,
                EventColumn::TimeRange,
                EventColumn::Title,
                EventColumn::Location,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [CalendarEvent]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [CalendarEvent],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => {
                let rows: Vec<_> = self.events.iter().enumerate().collect();
                write!(f, "{}", Table::new(&self.formatter.columns, &rows))
            }
        }
    }
}

/// Columns of the event table. Rows are events with their position in the input.
#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Index,
    TimeRange,
    Title,
    Location,
}

impl<'e> Column<(usize, &'e CalendarEvent)> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Index => "#",
            EventColumn::TimeRange => "Time Range (UTC)",
            EventColumn::Title => "Title",
            EventColumn::Location => "Location",
        }
        .into()
    }

    fn format<'a>(&self, (index, event): &'a (usize, &'e CalendarEvent)) -> Cow<'a, str> {
        match self {
            EventColumn::Index => (index + 1).to_string().into(),
            EventColumn::TimeRange => format_millis_range(event.start_time, event.end_time).into(),
            EventColumn::Title => one_line(&event.title),
            EventColumn::Location => event.location.as_deref().map_or("".into(), one_line),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

/// Keep table rows on one line.
fn one_line(s: &str) -> Cow<'_, str> {
    if s.contains('\n') {
        s.replace('\n', " ").into()
    } else {
        s.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("Standup", 1_704_103_200_000, 1_704_104_100_000),
            CalendarEvent {
                location: Some("Room\n2".to_owned()),
                ..CalendarEvent::new("Review", 1_704_189_600_000, 1_704_193_200_000)
            },
        ]
    }

    #[test]
    fn test_format_table() {
        colored::control::set_override(false);
        let events = events();
        let out = EventFormatter::new().format(&events).to_string();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#  Time Range (UTC)"));
        assert!(lines[1].starts_with("1  2024-01-01 10:00~10:15"));
        assert!(lines[1].contains("Standup"));
        assert!(lines[2].contains("Review"));
        assert!(lines[2].ends_with("Room 2"));
    }

    #[test]
    fn test_format_json() {
        let events = events();
        let out = EventFormatter::new()
            .with_output_format(OutputFormat::Json)
            .format(&events)
            .to_string();
        let parsed: Vec<CalendarEvent> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_format_empty_table() {
        colored::control::set_override(false);
        let out = EventFormatter::new().format(&[]).to_string();
        assert_eq!(out.lines().count(), 1);
    }
}
