// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf, process};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_decode::CmdDecode;
use crate::cmd_encode::CmdEncode;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::config::{APP_NAME, parse_config};

/// Run the mycal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Import and export calendar events as iCalendar files.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $MYCAL_CONFIG, then \
$XDG_CONFIG_HOME/mycal/config.toml on Linux and MacOS, %APPDATA%/mycal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDecode::command())
            .subcommand(CmdEncode::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDecode::NAME, matches)) => Decode(CmdDecode::from(matches)),
            Some((CmdEncode::NAME, matches)) => Encode(CmdEncode::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
            None => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Decode an iCalendar file and print its events
    Decode(CmdDecode),

    /// Encode events as an iCalendar file
    Encode(CmdEncode),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Decode(a) => a.run(&parse_config(config).await?).await,
            Encode(a) => a.run(&parse_config(config).await?).await,
            GenerateCompletion(a) => a.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::OutputFormat;

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["mycal", "-c", "/tmp/config.toml", "decode"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Decode(_)));
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(["mycal"]).is_err());
    }

    #[test]
    fn test_parse_decode() {
        let args = ["mycal", "decode", "cal.ics", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, None);
        match cli.command {
            Commands::Decode(cmd) => {
                assert_eq!(cmd.input, Some(PathBuf::from("cal.ics")));
                assert_eq!(cmd.output_format, Some(OutputFormat::Json));
            }
            _ => panic!("Expected Decode command"),
        }
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from(["mycal", "import"]).unwrap();
        assert!(matches!(cli.command, Commands::Decode(_)));
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from(["mycal", "encode", "-o", "out.ics", "--fold", "75"]).unwrap();
        match cli.command {
            Commands::Encode(cmd) => {
                assert_eq!(cmd.output, Some(PathBuf::from("out.ics")));
                assert_eq!(cmd.fold, Some(75));
            }
            _ => panic!("Expected Encode command"),
        }
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["mycal", "export", "events.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Encode(_)));
    }

    #[test]
    fn test_parse_generate_completion() {
        let cli = Cli::try_parse_from(["mycal", "generate-completion", "zsh"]).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            _ => panic!("Expected GenerateCompletion command"),
        }
    }

    #[test]
    fn test_parse_unknown_output_format() {
        let args = ["mycal", "decode", "--output-format", "xml"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_command_is_valid() {
        Cli::command().debug_assert();
    }
}
