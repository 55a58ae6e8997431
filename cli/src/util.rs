// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::Timestamp;
use jiff::tz::TimeZone;

/// The output format for commands
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format, defaults to the configured one")
            .value_parser(value_parser!(OutputFormat))
    }

    /// The format given on the command line, if any.
    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("output-format").copied()
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show more detailed information")
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

/// Format an epoch-millisecond instant as a UTC date and time.
pub fn format_millis(millis: i64) -> String {
    match Timestamp::from_millisecond(millis) {
        Ok(ts) => ts
            .to_zoned(TimeZone::UTC)
            .strftime("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => format!("{millis} ms"),
    }
}

/// Format a time range, collapsing the date when both ends share it.
pub fn format_millis_range(start: i64, end: i64) -> String {
    let (Ok(s), Ok(e)) = (
        Timestamp::from_millisecond(start),
        Timestamp::from_millisecond(end),
    ) else {
        return format!("{}~{}", format_millis(start), format_millis(end));
    };

    let (s, e) = (s.to_zoned(TimeZone::UTC), e.to_zoned(TimeZone::UTC));
    if s.date() == e.date() {
        format!("{}~{}", s.strftime("%Y-%m-%d %H:%M"), e.strftime("%H:%M"))
    } else {
        format!(
            "{}~{}",
            s.strftime("%Y-%m-%d %H:%M"),
            e.strftime("%Y-%m-%d %H:%M")
        )
    }
}
