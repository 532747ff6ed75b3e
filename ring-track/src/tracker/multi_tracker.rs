// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Send every event to more than one tracker.
//!
//! This is how a run can print station activity to the console at one level
//! while writing the full token trace to a file at another. Each event only
//! reaches the trackers that have the originating entity enabled at the
//! event's level.

use crate::Id;
use crate::tracker::{EntityManager, Track, Tracker};

/// Fans events out to a list of [`Tracker`]s.
///
/// Ids are allocated here rather than by the individual trackers so that an
/// entity has the same id in every output.
pub struct MultiTracker {
    ids: EntityManager,
    trackers: Vec<Tracker>,
}

impl MultiTracker {
    /// Add a tracker to receive events from now on.
    pub fn add_tracker(&mut self, tracker: Tracker) {
        self.trackers.push(tracker);
    }

    fn enabled_at(&self, id: Id, level: log::Level) -> impl Iterator<Item = &Tracker> {
        self.trackers
            .iter()
            .filter(move |tracker| tracker.is_entity_enabled(id, level))
    }
}

impl Default for MultiTracker {
    fn default() -> Self {
        Self {
            ids: EntityManager::new(log::Level::Error),
            trackers: Vec::new(),
        }
    }
}

impl Track for MultiTracker {
    fn unique_id(&self) -> Id {
        self.ids.unique_id()
    }

    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool {
        self.enabled_at(id, level).next().is_some()
    }

    fn add_entity(&self, id: Id, entity_name: &str) {
        // Every tracker needs to see the name to apply its own filters
        self.trackers
            .iter()
            .for_each(|tracker| tracker.add_entity(id, entity_name));
    }

    fn enter(&self, id: Id, object: Id) {
        self.enabled_at(id, log::Level::Trace)
            .for_each(|tracker| tracker.enter(id, object));
    }

    fn exit(&self, id: Id, object: Id) {
        self.enabled_at(id, log::Level::Trace)
            .for_each(|tracker| tracker.exit(id, object));
    }

    fn create(&self, created_by: Id, id: Id, name: &str) {
        self.enabled_at(created_by, log::Level::Trace)
            .for_each(|tracker| tracker.create(created_by, id, name));
    }

    fn destroy(&self, id: Id) {
        self.enabled_at(id, log::Level::Trace)
            .for_each(|tracker| tracker.destroy(id));
    }

    fn log(&self, id: Id, level: log::Level, msg: std::fmt::Arguments) {
        self.enabled_at(id, level)
            .for_each(|tracker| tracker.log(id, level, msg));
    }

    fn shutdown(&self) {
        self.trackers.iter().for_each(|tracker| tracker.shutdown());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tracker::InMemoryTracker;

    fn in_memory(level: log::Level) -> Arc<InMemoryTracker> {
        Arc::new(InMemoryTracker::new(EntityManager::new(level)))
    }

    #[test]
    fn token_trace_only_reaches_trace_level_output() {
        let console = in_memory(log::Level::Info);
        let trace_file = in_memory(log::Level::Trace);
        let mut multi = MultiTracker::default();
        multi.add_tracker(console.clone());
        multi.add_tracker(trace_file.clone());

        let station = multi.unique_id();
        let token = multi.unique_id();
        assert_ne!(station, token);
        multi.add_entity(station, "top::ring::station0");

        multi.enter(station, token);
        multi.exit(station, token);
        multi.log(station, log::Level::Info, format_args!("token received"));
        multi.log(station, log::Level::Debug, format_args!("dwelling"));

        assert!(console.entered_by(token).is_empty());
        assert_eq!(trace_file.entered_by(token), [station]);
        assert_eq!(trace_file.count_exits(station, token), 1);
        assert_eq!(console.logs_for(station).len(), 1);
        assert_eq!(trace_file.logs_for(station).len(), 2);
        assert_eq!(
            console.id_for_name("top::ring::station0"),
            trace_file.id_for_name("top::ring::station0")
        );
    }

    #[test]
    fn enabled_if_any_output_wants_it() {
        let mut multi = MultiTracker::default();
        assert!(!multi.is_entity_enabled(Id(5), log::Level::Error));

        multi.add_tracker(in_memory(log::Level::Warn));
        assert!(multi.is_entity_enabled(Id(5), log::Level::Warn));
        assert!(!multi.is_entity_enabled(Id(5), log::Level::Info));

        multi.add_tracker(in_memory(log::Level::Debug));
        assert!(multi.is_entity_enabled(Id(5), log::Level::Info));
    }
}
