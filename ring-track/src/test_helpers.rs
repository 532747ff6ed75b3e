// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! This module provides helper functions for testing logging output
//!
//! The aim of this module is to provide commonly-used functions that enable the
//! testing of the output that should appear from logging macros, as well as a
//! standard tracker for tests that just want their output kept on disk.

use std::io::BufWriter;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use regex::Regex;

use crate::tracker::{EntityManager, TextTracker};
use crate::{Id, Track, Tracker, Writer};

/// A tracker that keeps track events.
pub struct TestTracker {
    events: Mutex<Vec<String>>,

    unique_id: AtomicU64,
}

impl TestTracker {
    /// Create a new [`Tracker`](crate::Tracker) for the tests.
    ///
    /// This keeps the track events in memory for checking later.
    #[must_use]
    pub fn new(initial_id: u64) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            unique_id: AtomicU64::new(initial_id),
        }
    }

    fn add_event(&self, event: String) {
        println!("{event}");
        self.events.lock().unwrap().push(event);
    }
}

impl Track for TestTracker {
    fn unique_id(&self) -> Id {
        Id(self.unique_id.fetch_add(1, Ordering::SeqCst))
    }

    fn is_entity_enabled(&self, _id: Id, _level: log::Level) -> bool {
        true
    }

    fn add_entity(&self, _id: Id, _entity_name: &str) {
        // Do nothing
    }

    fn enter(&self, id: Id, item: Id) {
        self.add_event(format!("{id}: {item} entered"));
    }

    fn exit(&self, id: Id, item: Id) {
        self.add_event(format!("{id}: {item} exited"));
    }

    fn create(&self, created_by: Id, id: Id, name: &str) {
        self.add_event(format!("{created_by}: created {id}, {name}"));
    }

    fn destroy(&self, id: Id) {
        self.add_event(format!("{id}: destroyed"));
    }

    fn log(&self, id: Id, level: log::Level, msg: std::fmt::Arguments) {
        self.add_event(format!("{id}:{level}: {msg}"));
    }

    fn shutdown(&self) {
        // Do nothing
    }
}

/// Initialise a [`TestTracker`] for tests
///
/// Returns both the concrete [`TestTracker`] (for checking events) and the
/// same tracker as a [`Tracker`] to pass to entities.
///
/// # Arguments
///
/// * `start_id` - The ID value to be set as the starting value
///
/// # Examples
///
/// ```
/// use ring_track::test_helpers;
///
/// let (test_tracker, tracker) = ring_track::test_init!(10);
/// let _top = ring_track::entity::toplevel(&tracker, "top");
/// test_helpers::check_and_clear(&test_tracker, &["0: created 10, top"]);
/// ```
#[macro_export]
macro_rules! test_init {
    ($start_id:expr) => {{
        let test_tracker = std::sync::Arc::new($crate::test_helpers::TestTracker::new($start_id));
        let tracker: $crate::Tracker = test_tracker.clone();
        (test_tracker, tracker)
    }};
}

/// Check and clear the _trace_ and _log_ output
///
/// This function asserts that the logging output lines seen since the start or
/// the last time this function was called are expected.
///
/// It then also clears both the _trace_ and _log_ output recorded so far.
///
/// # Arguments
///
/// * `tracker`  - A reference to the [`TestTracker`] being used in the test.
/// * `expected` - An array of expected regular expressions that the logging
///   output will be matched against.
pub fn check_and_clear(tracker: &TestTracker, expected: &[&str]) {
    let mut events = tracker.events.lock().unwrap();

    println!("Checking {:?} matches {:?}", expected, *events);

    assert_eq!(expected.len(), events.len());
    for (log_expect, actual) in expected.iter().zip(events.iter()) {
        let re = Regex::new(log_expect).unwrap();
        println!("Checking {log_expect:?} matches {actual:?}");
        assert!(re.is_match(actual));
    }

    events.clear();
}

/// Create a [`Tracker`] that writes all events as text to
/// `traces/<test file name>.log`.
///
/// Pass `file!()` so that each test file gets its own trace.
#[must_use]
pub fn create_tracker(full_filepath: &str) -> Tracker {
    // Place all trace files in one folder
    const FOLDER: &str = "traces";

    let filename_only = Path::new(full_filepath)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("test");

    let writer: Writer = match std::fs::create_dir_all(FOLDER)
        .and_then(|()| std::fs::File::create(format!("{FOLDER}/{filename_only}.log")))
    {
        Ok(file) => Box::new(BufWriter::new(file)),
        Err(_) => Box::new(std::io::sink()),
    };

    let tracker: Tracker = Arc::new(TextTracker::new(
        EntityManager::new(log::Level::Trace),
        writer,
    ));
    tracker
}
