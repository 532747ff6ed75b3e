// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Named nodes of the tracking hierarchy.
//!
//! A ring run is tracked as a tree of entities: the top-level, the ring under
//! it and one entity per station under the ring, giving names such as
//! `top::ring::station2`. The full name is what tracker filter expressions
//! are matched against, and the id is what every log or trace line is
//! attributed to.

use std::fmt;
use std::sync::Arc;

use crate::{Id, Tracker, create, destroy};

/// Separator between the levels of a full name.
const JOIN: &str = "::";

/// A node of the tracking hierarchy.
///
/// Entities are shared between threads (a station's entity is used both by
/// its own thread and by the ring when passing the token), so they are
/// normally held in an `Arc`. Creation and destruction are both traced.
pub struct Entity {
    /// The last part of the name, unique among siblings.
    pub name: String,

    /// The entity this one belongs to. Only the top-level has none.
    pub parent: Option<Arc<Entity>>,

    /// Id allocated by the tracker.
    pub id: Id,

    /// Where this entity's events are sent.
    pub tracker: Tracker,

    full_name: String,
}

impl Entity {
    /// Create an entity called `name` beneath `parent`, sharing its tracker.
    #[must_use]
    pub fn new(parent: &Arc<Entity>, name: &str) -> Self {
        let full_name = format!("{}{JOIN}{name}", parent.full_name);
        let tracker = parent.tracker.clone();
        let id = tracker.unique_id();
        tracker.add_entity(id, &full_name);

        let entity = Self {
            name: name.to_owned(),
            parent: Some(parent.clone()),
            id,
            tracker,
            full_name,
        };
        create!(entity);
        entity
    }

    /// The `::` separated path from the top-level down to this entity.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.full_name.clone()
    }
}

impl Drop for Entity {
    fn drop(&mut self) {
        destroy!(self);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("full_name", &self.full_name)
            .field("id", &self.id)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Create the root of the hierarchy. Every other entity descends from it.
pub fn toplevel(tracker: &Tracker, name: &str) -> Arc<Entity> {
    let id = tracker.unique_id();
    tracker.add_entity(id, name);
    let top = Arc::new(Entity {
        name: name.to_owned(),
        parent: None,
        id,
        tracker: tracker.clone(),
        full_name: name.to_owned(),
    });
    create!(top);
    top
}
