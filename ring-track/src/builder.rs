// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Library functions to build trackers as defined by the user.

use std::io::BufWriter;
use std::sync::Arc;
use std::{fs, io};

use crate::tracker::{
    EntityManager, MultiTracker, TextTracker, TrackConfigError, stdout_tracker,
};
use crate::{Tracker, Writer};

/// Configuration options for an individual tracker.
pub struct TrackerConfig<'a> {
    /// Enable this tracker.
    pub enable: bool,

    /// Set the level at which this tracker should be enabled.
    pub level: log::Level,

    /// A regular expression to match which entities should have this level
    /// applied.
    pub filter_regex: &'a str,

    /// If required, the name of the file to which the tracker will write.
    ///
    /// The name `-` writes to stdout.
    pub file: Option<&'a str>,
}

impl Default for TrackerConfig<'_> {
    fn default() -> Self {
        Self {
            enable: true,
            level: log::Level::Warn,
            filter_regex: "",
            file: None,
        }
    }
}

/// Configuration options for all tracking.
#[derive(Default)]
pub struct TrackersConfig<'a> {
    /// Configuration for stdout.
    pub stdout: TrackerConfig<'a>,

    /// Configuration for a text log file.
    pub file: TrackerConfig<'a>,
}

/// Build the [`EntityManager`] for a tracker.
///
/// The user can pass a filter regular expression which will set the level only
/// for matching Entities and set all other Entities to only emit errors.
fn build_entity_manager(config: &TrackerConfig) -> Result<EntityManager, TrackConfigError> {
    let default_level = if config.filter_regex.is_empty() {
        config.level
    } else {
        log::Level::Error
    };

    let mut entity_manager = EntityManager::new(default_level);
    if !config.filter_regex.is_empty() {
        entity_manager.add_entity_level_filter(config.filter_regex, config.level)?;
    }
    Ok(entity_manager)
}

/// Create a tracker that prints to stdout
fn build_stdout_tracker(config: &TrackerConfig) -> Result<Tracker, TrackConfigError> {
    Ok(stdout_tracker(build_entity_manager(config)?))
}

/// Same as the stdout tracker (see build_stdout_tracker) except will write to
/// the file named in the config.
fn build_file_tracker(config: &TrackerConfig) -> Result<Tracker, TrackConfigError> {
    let entity_manager = build_entity_manager(config)?;
    let writer: Writer = match config.file {
        None | Some("-") => Box::new(BufWriter::new(io::stdout())),
        Some(file) => {
            let file = fs::File::create(file)
                .map_err(|e| TrackConfigError(format!("Unable to create '{file}': {e}")))?;
            Box::new(BufWriter::new(file))
        }
    };
    Ok(Arc::new(TextTracker::new(entity_manager, writer)))
}

/// Set up stdout/file trackers according to the configuration.
///
/// When no tracker is enabled a stdout tracker that only reports warnings and
/// errors is returned.
pub fn setup_trackers(config: &TrackersConfig) -> Result<Tracker, TrackConfigError> {
    match (config.stdout.enable, config.file.enable) {
        (true, true) => {
            let mut tracker = MultiTracker::default();
            tracker.add_tracker(build_stdout_tracker(&config.stdout)?);
            tracker.add_tracker(build_file_tracker(&config.file)?);
            Ok(Arc::new(tracker))
        }
        (true, false) => build_stdout_tracker(&config.stdout),
        (false, true) => build_file_tracker(&config.file),
        (false, false) => build_stdout_tracker(&TrackerConfig::default()),
    }
}
