// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use mycal_ical::{CalendarEvent, EncodeOptions, LineEnding};

use crate::config::{Config, MIN_FOLD_WIDTH};

#[derive(Debug, Clone)]
pub struct CmdEncode {
    /// JSON input file, stdin if `None`
    pub input: Option<PathBuf>,
    /// Output file, stdout if `None`
    pub output: Option<PathBuf>,
    pub crlf: bool,
    pub fold: Option<usize>,
}

impl CmdEncode {
    pub const NAME: &str = "encode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("export")
            .about("Write events as an iCalendar file")
            .long_about(
                "\
Write events as an iCalendar file. The input is a JSON array of events, as printed by \
`mycal decode --output-format json`.",
            )
            .arg(
                arg!([FILE] "The JSON file to read, or - for stdin")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-o --output <OUT> "The .ics file to write, stdout if absent")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--crlf "Terminate lines with CRLF, as RFC 5545 prescribes"))
            .arg(
                arg!(--fold <N> "Fold lines longer than N octets")
                    .value_parser(value_parser!(u16).range(i64::from(MIN_FOLD_WIDTH)..)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            input: matches
                .get_one::<PathBuf>("FILE")
                .filter(|path| path.as_os_str() != "-")
                .cloned(),
            output: matches.get_one("output").cloned(),
            crlf: matches.get_flag("crlf"),
            fold: matches.get_one::<u16>("fold").copied().map(usize::from),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "encoding events...");
        let json = match &self.input {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
            None => io::read_to_string(io::stdin())?,
        };
        let events: Vec<CalendarEvent> =
            serde_json::from_str(&json).map_err(|e| format!("Invalid event list: {e}"))?;

        let ics = self.options(config).write_to_string(&events)?;
        match &self.output {
            Some(path) => {
                tokio::fs::write(path, ics)
                    .await
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                tracing::info!(path = %path.display(), count = events.len(), "events written");
            }
            None => print!("{ics}"),
        }
        Ok(())
    }

    /// Encoding options from the config, overridden by the command line.
    fn options(&self, config: &Config) -> EncodeOptions {
        let mut options = config.codec.clone();
        if self.crlf {
            options = options.line_ending(LineEnding::CrLf);
        }
        if let Some(fold) = self.fold {
            options = options.folding(Some(fold));
        }
        options
    }
}
