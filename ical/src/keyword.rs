// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords of the iCalendar subset handled by the codec.

pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";

pub const KW_TZID: &str = "TZID";

/// Property names the codec reads or writes.
///
/// Parsing from a name is ASCII case-insensitive, as property names are in
/// RFC 5545; display always yields the canonical upper-case form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum PropertyName {
    #[strum(serialize = "BEGIN")]
    Begin,
    #[strum(serialize = "END")]
    End,
    #[strum(serialize = "VERSION")]
    Version,
    #[strum(serialize = "PRODID")]
    ProdId,
    #[strum(serialize = "UID")]
    Uid,
    #[strum(serialize = "SUMMARY")]
    Summary,
    #[strum(serialize = "DESCRIPTION")]
    Description,
    #[strum(serialize = "LOCATION")]
    Location,
    #[strum(serialize = "DTSTART")]
    DtStart,
    #[strum(serialize = "DTEND")]
    DtEnd,
}

/// Whether a `BEGIN`/`END` value names the component `name`.
pub(crate) fn is_component(value: &str, name: &str) -> bool {
    value.trim().eq_ignore_ascii_case(name)
}
