// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Application configuration gathered from multiple sources.
//!
//! Each setting is resolved from the following sources, where later sources
//! override earlier ones:
//!
//!  1. the built-in defaults (see [`Config::default`]),
//!  2. `config.toml` alongside this source file,
//!  3. an extra TOML file named with `--conf-file`,
//!  4. environment variables prefixed `TOKEN_RING_` (for example
//!     `TOKEN_RING_STATIONS=8`),
//!  5. command-line arguments.
//!
//! Every field is an `Option` so that a source which does not mention a
//! setting leaves it untouched.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use token_ring::timing::TurnTiming;

const ENV_PREFIX: &str = "TOKEN_RING_";

#[derive(Parser, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[command(about = "Token ring simulation with randomly requested transmissions")]
pub struct Config {
    /// Number of stations in the ring.
    #[arg(long)]
    pub stations: Option<usize>,

    /// How long the driver runs before shutting the ring down.
    #[arg(long)]
    pub duration_secs: Option<u64>,

    /// Time between requests for a random station to transmit.
    #[arg(long)]
    pub request_interval_ms: Option<u64>,

    /// Time a station holds the token when it has nothing to send.
    #[arg(long)]
    pub dwell_ms: Option<u64>,

    /// Shortest time a transmission takes.
    #[arg(long)]
    pub min_transmit_ms: Option<u64>,

    /// Longest time a transmission takes.
    #[arg(long)]
    pub max_transmit_ms: Option<u64>,

    /// Seed for all random choices. Use 0 for a different run every time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable logging to the console.
    #[arg(long)]
    pub stdout: Option<bool>,

    /// Level of log message to display.
    #[arg(long)]
    pub stdout_level: Option<String>,

    /// Set a regular expression for which entities should have logging level
    /// set to `--stdout-level`. Others will have level set to `Error`.
    #[arg(long)]
    pub stdout_filter_regex: Option<String>,

    /// Write a text log/trace to this file as well. Empty to disable.
    #[arg(short = 'l', long)]
    pub log_file: Option<String>,

    /// Level of log/trace events written to `--log-file`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Show a spinner counting token hand-offs.
    #[arg(long)]
    pub progress: Option<bool>,

    /// Path to additional configuration file
    ///
    /// This additional configuration file must contain TOML, and set values
    /// for fields of this struct.
    #[arg(long)]
    pub conf_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations: Some(5),
            duration_secs: Some(30),
            request_interval_ms: Some(2000),
            dwell_ms: Some(1000),
            min_transmit_ms: Some(1000),
            max_transmit_ms: Some(2000),
            seed: Some(0),
            stdout: Some(true),
            stdout_level: Some("info".to_string()),
            stdout_filter_regex: Some(Default::default()),
            log_file: Some(Default::default()),
            log_level: Some("trace".to_string()),
            progress: Some(false),
            conf_file: Some(Default::default()),
        }
    }
}

impl Config {
    /// Build the configuration from defaults, the static file, the
    /// environment and the process command line.
    pub fn parse_all_sources() -> Result<Self, figment::Error> {
        Self::parse_all_sources_from(std::env::args_os())
    }

    /// As [`Config::parse_all_sources`] with an explicit command line.
    pub fn parse_all_sources_from<I, T>(args: I) -> Result<Self, figment::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let config = Self::figment_to_config()?;
        Ok(Self::clap_merge(config, Self::parse_from(args)))
    }

    /// Apply the TOML file `conf_file` underneath the environment and command
    /// line. An empty path is ignored.
    pub fn parse_extra_conf_file(&mut self, conf_file: &Path) -> Result<(), io::Error> {
        self.parse_extra_conf_file_from(conf_file, std::env::args_os())
    }

    pub fn parse_extra_conf_file_from<I, T>(
        &mut self,
        conf_file: &Path,
        args: I,
    ) -> Result<(), io::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if conf_file.as_os_str().is_empty() {
            return Ok(());
        }

        if conf_file.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is not a file path", conf_file.display()),
            ));
        }

        if !conf_file.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", conf_file.display()),
            ));
        }

        let config = Self::figment_to_config_with_extra_conf_file(conf_file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        self.clap_merge_existing(config, Self::parse_from(args));
        Ok(())
    }

    fn static_conf_file_path() -> PathBuf {
        let mut conf_file = PathBuf::from(file!());
        conf_file.set_extension("toml");
        conf_file
    }

    fn figment_with_defaults() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(Self::static_conf_file_path()))
    }

    fn figment_to_config() -> Result<Self, figment::Error> {
        Self::figment_with_defaults()
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    fn figment_to_config_with_extra_conf_file(conf_file: &Path) -> Result<Self, figment::Error> {
        Self::figment_with_defaults()
            .merge(Toml::file(conf_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    fn clap_merge(mut config: Self, cli: Self) -> Self {
        macro_rules! take_cli {
            ($($field:ident),+) => {
                $(
                    if cli.$field.is_some() {
                        config.$field = cli.$field;
                    }
                )+
            };
        }
        take_cli!(
            stations,
            duration_secs,
            request_interval_ms,
            dwell_ms,
            min_transmit_ms,
            max_transmit_ms,
            seed,
            stdout,
            stdout_level,
            stdout_filter_regex,
            log_file,
            log_level,
            progress,
            conf_file
        );
        config
    }

    // Values already set by an earlier extra file are kept unless this file
    // (or the command line) sets something other than the default.
    fn clap_merge_existing(&mut self, config: Self, cli: Self) {
        let defaults = Self::default();
        macro_rules! merge_existing {
            ($($field:ident),+) => {
                $(
                    if cli.$field.is_some() {
                        self.$field = cli.$field;
                    } else if config.$field != defaults.$field {
                        self.$field = config.$field;
                    }
                )+
            };
        }
        merge_existing!(
            stations,
            duration_secs,
            request_interval_ms,
            dwell_ms,
            min_transmit_ms,
            max_transmit_ms,
            seed,
            stdout,
            stdout_level,
            stdout_filter_regex,
            log_file,
            log_level,
            progress,
            conf_file
        );
    }

    #[must_use]
    pub fn num_stations(&self) -> usize {
        self.stations.unwrap_or_default()
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed.filter(|seed| *seed != 0)
    }

    #[must_use]
    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs.unwrap_or_default())
    }

    #[must_use]
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms.unwrap_or_default())
    }

    #[must_use]
    pub fn turn_timing(&self) -> TurnTiming {
        TurnTiming {
            dwell: Duration::from_millis(self.dwell_ms.unwrap_or_default()),
            min_transmit: Duration::from_millis(self.min_transmit_ms.unwrap_or_default()),
            max_transmit: Duration::from_millis(self.max_transmit_ms.unwrap_or_default()),
            seed: self.seed(),
        }
    }
}
