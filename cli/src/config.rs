// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use mycal_ical::EncodeOptions;
use tokio::fs;

use crate::util::OutputFormat;

pub const APP_NAME: &str = "mycal";

const MYCAL_CONFIG_ENV: &str = "MYCAL_CONFIG";

/// Narrowest line, in octets, the encoder may fold to.
pub const MIN_FOLD_WIDTH: u16 = 2;

/// Load the configuration.
///
/// The file is taken from `path`, then `$MYCAL_CONFIG`, then the user's config
/// directory. Only an explicitly named file has to exist; without one the
/// defaults are used.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(MYCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !fs::try_exists(&config).await.unwrap_or(false) {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    tracing::debug!(path = %path.display(), "reading config");
    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e).into())
}

/// Configuration for the mycal application.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Encoding options, the `[codec]` table.
    pub codec: EncodeOptions,

    /// Display options, the `[output]` table.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Format of decoded events on stdout.
    pub format: OutputFormat,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        if let Some(width) = config.codec.folding
            && width < usize::from(MIN_FOLD_WIDTH)
        {
            return Err(format!(
                "Invalid codec.folding: {width}, must be at least {MIN_FOLD_WIDTH}"
            )
            .into());
        }
        Ok(config)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}
