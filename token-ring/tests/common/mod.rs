// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ring_track::entity::{Entity, toplevel};
use ring_track::tracker::{EntityManager, InMemoryTracker};
use ring_track::{Id, Tracker};
use token_ring::ring::Ring;
use token_ring::station::Station;
use token_ring::types::StationState;

/// Create a top-level entity whose events are all kept in memory.
pub fn in_memory_top() -> (Arc<InMemoryTracker>, Arc<Entity>) {
    let in_memory = Arc::new(InMemoryTracker::new(EntityManager::new(
        log::Level::Trace,
    )));
    let tracker: Tracker = in_memory.clone();
    let top = toplevel(&tracker, "top");
    (in_memory, top)
}

/// The station indices the token has entered, in order.
pub fn token_path(tracker: &InMemoryTracker, ring: &Ring) -> Vec<usize> {
    let ids: Vec<Id> = ring.stations().iter().map(|s| s.entity.id).collect();
    tracker
        .entered_by(ring.token())
        .iter()
        .map(|id| ids.iter().position(|s| s == id).unwrap())
        .collect()
}

// Poll until the station reaches the given state, failing after a generous
// timeout rather than hanging the test run.
pub fn wait_for_state(station: &Station, state: StationState) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while station.state() != state {
        assert!(
            Instant::now() < deadline,
            "station{} never reached {state}",
            station.index()
        );
        thread::sleep(Duration::from_millis(1));
    }
}
