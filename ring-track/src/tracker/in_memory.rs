// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::Id;
use crate::tracker::{EntityManager, Track};

/// A [`Track`] event kept by the [`InMemoryTracker`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `created` was created by the originator.
    Create {
        /// The object that was created.
        created: Id,
    },
    /// The originator was destroyed.
    Destroy,
    /// The originator emitted a log message.
    Log {
        /// Level of the message.
        level: log::Level,
        /// Formatted message text.
        text: String,
    },
    /// An object entered the originator.
    Enter {
        /// The object that entered.
        entered: Id,
    },
    /// An object exited the originator.
    Exit {
        /// The object that exited.
        exited: Id,
    },
}

struct TrackedState {
    /// Events in the order they were received, with their originator.
    events: Vec<(Id, Event)>,
    name_to_id: HashMap<String, Id>,
}

/// A tracker that keeps every event in memory so that it can be queried once
/// a simulation has finished.
pub struct InMemoryTracker {
    entity_manager: EntityManager,
    state: Mutex<TrackedState>,
}

impl InMemoryTracker {
    /// Create a new [`InMemoryTracker`] with an [`EntityManager`].
    pub fn new(entity_manager: EntityManager) -> Self {
        Self {
            entity_manager,
            state: Mutex::new(TrackedState {
                events: Vec::new(),
                name_to_id: HashMap::new(),
            }),
        }
    }

    fn add_event(&self, id: Id, event: Event) {
        self.state.lock().unwrap().events.push((id, event));
    }

    /// Get the [`Id`] for the entity/object with the given full name.
    pub fn id_for_name(&self, name: &str) -> Option<Id> {
        self.state.lock().unwrap().name_to_id.get(name).copied()
    }

    /// Return the entities that `object` entered, in the order it entered
    /// them.
    pub fn entered_by(&self, object: Id) -> Vec<Id> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter_map(|(id, event)| match event {
                Event::Enter { entered } if *entered == object => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Return the number of times `object` exited the entity `id`.
    pub fn count_exits(&self, id: Id, object: Id) -> usize {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|(from, event)| *from == id && *event == Event::Exit { exited: object })
            .count()
    }

    /// Return the log messages emitted by the entity `id`.
    pub fn logs_for(&self, id: Id) -> Vec<(log::Level, String)> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .filter_map(|(from, event)| match event {
                Event::Log { level, text } if *from == id => Some((*level, text.clone())),
                _ => None,
            })
            .collect()
    }
}

/// Implementation each [`Track`] event
impl Track for InMemoryTracker {
    fn unique_id(&self) -> Id {
        self.entity_manager.unique_id()
    }

    fn is_entity_enabled(&self, id: Id, level: log::Level) -> bool {
        self.entity_manager.is_log_enabled_at_level(id, level)
    }

    fn add_entity(&self, id: Id, entity_name: &str) {
        self.entity_manager.add_entity(id, entity_name);
        self.state
            .lock()
            .unwrap()
            .name_to_id
            .insert(entity_name.to_owned(), id);
    }

    fn enter(&self, id: Id, object: Id) {
        self.add_event(id, Event::Enter { entered: object });
    }

    fn exit(&self, id: Id, object: Id) {
        self.add_event(id, Event::Exit { exited: object });
    }

    fn create(&self, created_by: Id, id: Id, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.events.push((created_by, Event::Create { created: id }));
        state.name_to_id.entry(name.to_owned()).or_insert(id);
    }

    fn destroy(&self, id: Id) {
        self.add_event(id, Event::Destroy);
    }

    fn log(&self, id: Id, level: log::Level, msg: std::fmt::Arguments) {
        self.add_event(
            id,
            Event::Log {
                level,
                text: format!("{msg}"),
            },
        );
    }

    fn shutdown(&self) {
        // Nothing buffered
    }
}
