// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! This crate provides combined _track_ capabilities for the token ring
//! simulation.
//!
//! _Track_ means the combination of _log_ and _trace_ where:
//!
//!   - _log_ are text-based human-readable messages emitted at various levels
//!     of verbosity (from `Trace` through to `Error`).
//!   - _trace_ provides a standard set of modelling events that can be emitted.
//!     For example, entity creation/destruction or an object (such as the
//!     token) entering/exiting a simulation [`Entity`](crate::entity::Entity).
//!
//! Every station of the ring runs on its own thread, so all [`Tracker`]s are
//! shared as `Arc<dyn Track + Send + Sync>` and serialise their output
//! internally.

// Enable warnings for missing documentation
#![warn(missing_docs)]

use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub use log;

pub mod builder;
pub mod entity;
pub mod id;
pub mod test_helpers;

/// Include the trackers.
pub mod tracker;
pub use id::Id;
pub use tracker::{Track, TrackConfigError, Tracker};

/// A type alias for objects that receive _log_ / _trace_ events.
///
/// The writer must implement Send in order to be shared between threads.
pub type Writer = Box<dyn std::io::Write + Send>;
type SharedWriter = Arc<Mutex<Writer>>;

/// Take a configuration string and convert it to a Level
pub fn str_to_level(lvl: &str) -> Result<log::Level, TrackConfigError> {
    log::Level::from_str(lvl)
        .map_err(|_| TrackConfigError(format!("Unable to parse level string '{lvl}'")))
}

/// Id value which indicates where there is no valid id
pub const NO_ID: Id = Id(0);

/// The root id from which all other ids are derived
pub const ROOT: Id = Id(1);

/// Track an object entering an entity.
#[macro_export]
macro_rules! enter {
    ($entity:expr ; $enter_id:expr) => {
        if $entity
            .tracker
            .is_entity_enabled($entity.id, $crate::log::Level::Trace)
        {
            $entity.tracker.enter($entity.id, $enter_id);
        }
    };
}

/// Track an object exiting an entity.
#[macro_export]
macro_rules! exit {
    ($entity:expr ; $exit_id:expr) => {
        if $entity
            .tracker
            .is_entity_enabled($entity.id, $crate::log::Level::Trace)
        {
            $entity.tracker.exit($entity.id, $exit_id);
        }
    };
}

/// Create a unique id for an object owned by an entity and track the
/// creation.
///
/// The creation event is named `$name` and will be tracked if the entity has
/// trace enabled.
#[macro_export]
macro_rules! create_and_track_id {
    ($entity:expr ; $name:expr) => {{
        let id = $entity.tracker.unique_id();
        if $entity
            .tracker
            .is_entity_enabled($entity.id, $crate::log::Level::Trace)
        {
            $entity.tracker.create($entity.id, id, $name);
        }
        id
    }};
}

/// Add an entity creation event
#[macro_export]
macro_rules! create {
    ($entity:expr) => {{
        if $entity
            .tracker
            .is_entity_enabled($entity.id, $crate::log::Level::Trace)
        {
            let parent_id = match &$entity.parent {
                Some(parent) => parent.id,
                None => $crate::NO_ID,
            };
            $entity
                .tracker
                .create(parent_id, $entity.id, $entity.full_name().as_str());
        }
    }};
}

/// Add an entity destroy event
#[macro_export]
macro_rules! destroy {
    ($entity:expr) => {{
        if $entity
            .tracker
            .is_entity_enabled($entity.id, $crate::log::Level::Trace)
        {
            $entity.tracker.destroy($entity.id);
        }
    }};
}

/// Base macro for log messages of all level.
///
/// The message is only formatted and passed on to the
/// [`Track::log`](crate::Track::log) function if the entity is enabled at the
/// given level.
#[macro_export]
macro_rules! log_base {
    ($entity:expr ; $lvl:expr, $($arg:tt)+) => (
        if $entity.tracker.is_entity_enabled($entity.id, $lvl) {
            $entity.tracker.log($entity.id, $lvl, format_args!($($arg)+));
        }
    );
}

/// The `trace` macro provides a wrapper for [`log_base`] at level
/// `log::Level::Trace`
#[macro_export]
macro_rules! trace {
    ($entity:expr ; $($arg:tt)+) => (
        $crate::log_base!($entity ; $crate::log::Level::Trace, $($arg)+);
    );
}

/// The `debug` macro provides a wrapper for [`log_base`] at level
/// `log::Level::Debug`
#[macro_export]
macro_rules! debug {
    ($entity:expr ; $($arg:tt)+) => (
        $crate::log_base!($entity ; $crate::log::Level::Debug, $($arg)+);
    );
}

/// The `info` macro provides a wrapper for [`log_base`] at level
/// `log::Level::Info`
#[macro_export]
macro_rules! info {
    ($entity:expr ; $($arg:tt)+) => (
        $crate::log_base!($entity ; $crate::log::Level::Info, $($arg)+);
    );
}

/// The `warn` macro provides a wrapper for [`log_base`] at level
/// `log::Level::Warn`
#[macro_export]
macro_rules! warn {
    ($entity:expr ; $($arg:tt)+) => (
        $crate::log_base!($entity ; $crate::log::Level::Warn, $($arg)+);
    );
}

/// The `error` macro provides a wrapper for [`log_base`] at level
/// `log::Level::Error`
#[macro_export]
macro_rules! error {
    ($entity:expr ; $($arg:tt)+) => (
        $crate::log_base!($entity ; $crate::log::Level::Error, $($arg)+);
    );
}
