// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::tracker::{EntityManager, Track};
use crate::{Id, SharedWriter, Writer};

/// A simple text logger to output messages to a Writer.
///
/// Each event is written as a single line so that output from concurrently
/// running stations is never interleaved mid-line.
pub struct TextTracker {
    entity_manager: EntityManager,

    /// Writer to which all _log_ events will be written.
    writer: SharedWriter,
}

impl TextTracker {
    /// Create a new [`TextTracker`] with an [`EntityManager`].
    pub fn new(entity_manager: EntityManager, writer: Writer) -> Self {
        Self {
            entity_manager,
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    fn write_line(&self, line: std::fmt::Arguments) {
        let mut writer = self.writer.lock().unwrap();
        writer.write_fmt(line).unwrap();
        writer.write_all(b"\n").unwrap();
    }
}

/// Implementation for each [`Track`] event
impl Track for TextTracker {
    fn unique_id(&self) -> Id {
        self.entity_manager.unique_id()
    }

    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool {
        self.entity_manager.is_log_enabled_at_level(id, level)
    }

    fn add_entity(&self, id: Id, entity_name: &str) {
        self.entity_manager.add_entity(id, entity_name);
    }

    fn enter(&self, id: Id, object: Id) {
        self.write_line(format_args!("{id}: enter {object}"));
    }

    fn exit(&self, id: Id, object: Id) {
        self.write_line(format_args!("{id}: exit {object}"));
    }

    fn create(&self, created_by: Id, id: Id, name: &str) {
        self.write_line(format_args!("{created_by}: created {id}, {name}"));
    }

    fn destroy(&self, id: Id) {
        self.write_line(format_args!("{id}: destroyed"));
    }

    fn log(&self, id: Id, level: log::Level, msg: std::fmt::Arguments) {
        self.write_line(format_args!("{id}:{level}: {msg}"));
    }

    fn shutdown(&self) {
        self.writer.lock().unwrap().flush().unwrap();
    }
}
