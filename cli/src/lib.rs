// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for the `mycal-ical` codec.

mod cli;
mod cmd_decode;
mod cmd_encode;
mod cmd_generate_completion;
mod config;
mod event_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, OutputConfig};
pub use crate::util::OutputFormat;
