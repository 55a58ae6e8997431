// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use mycal_ical::{DecodeOptions, Decoded};

use crate::config::Config;
use crate::event_formatter::EventFormatter;
use crate::util::{OutputFormat, arg_verbose, get_verbose};

#[derive(Debug, Clone)]
pub struct CmdDecode {
    /// Input file, stdin if `None`
    pub input: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub verbose: bool,
}

impl CmdDecode {
    pub const NAME: &str = "decode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("import")
            .about("Read events from an iCalendar file")
            .arg(
                arg!([FILE] "The .ics file to read, or - for stdin")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(OutputFormat::arg())
            .arg(arg_verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let input = matches
            .get_one::<PathBuf>("FILE")
            .filter(|path| path.as_os_str() != "-")
            .cloned();

        Self {
            input,
            output_format: OutputFormat::from(matches),
            verbose: get_verbose(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "decoding events...");
        let options = DecodeOptions::default();
        let decoded = match &self.input {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                options.decode_reader(bytes.as_slice())?
            }
            None => options.decode_reader(io::stdin().lock())?,
        };

        if self.verbose {
            report(&decoded);
        }

        let format = self.output_format.unwrap_or(config.output.format);
        let formatter = EventFormatter::new().with_output_format(format);
        print!("{}", formatter.format(&decoded.events));
        Ok(())
    }
}

fn report(decoded: &Decoded) {
    for diagnostic in &decoded.diagnostics {
        eprintln!("{} {}", "Warning:".yellow(), diagnostic);
    }
    eprintln!(
        "{} event(s) decoded, {} warning(s)",
        decoded.events.len(),
        decoded.diagnostics.len()
    );
}
