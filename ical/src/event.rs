// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The calendar event record exchanged with the codec.

use jiff::Timestamp;

/// Identifier of an event in the caller's store.
pub type EventId = i64;

/// Identifier carried by decoded events; the store assigns the real one on insertion.
pub const UNSET_ID: EventId = 0;

/// A calendar event as seen at the codec boundary.
///
/// Times are absolute instants in milliseconds since the Unix epoch, whatever
/// encoding the source text used for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarEvent {
    /// Store identifier, [`UNSET_ID`] for decoded events.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: EventId,

    /// Display text, exchanged as `SUMMARY`.
    pub title: String,

    /// Free text, may contain newlines.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,

    /// Free text location.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,

    /// Start instant, milliseconds since the epoch.
    pub start_time: i64,

    /// End instant, milliseconds since the epoch.
    pub end_time: i64,

    /// Never set by decoding; not written by encoding.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_all_day: bool,

    /// Never set by decoding; not written by encoding.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reminder_minutes_before: Option<i32>,
}

impl CalendarEvent {
    /// Create an event with the given title and time range, all else unset.
    #[must_use]
    pub fn new(title: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            title: title.into(),
            start_time,
            end_time,
            ..Self::default()
        }
    }

    /// Start as a [`Timestamp`], `None` if outside jiff's supported range.
    #[must_use]
    pub fn start(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.start_time).ok()
    }

    /// End as a [`Timestamp`], `None` if outside jiff's supported range.
    #[must_use]
    pub fn end(&self) -> Option<Timestamp> {
        Timestamp::from_millisecond(self.end_time).ok()
    }
}
