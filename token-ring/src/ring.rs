// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The ring coordinator.
//!
//! The [`Ring`] owns the stations and is the only place where the token moves
//! between them. Every hand-off is performed under the ring lock so that it is
//! a single step with respect to other hand-offs and to [`Ring::shutdown`].
//!
//! Locks are always taken ring first, then at most one station at a time.
//!
//! # Example
//!
//! ```rust
//! use token_ring::ring::Ring;
//! use token_ring::test_helpers::start_test;
//! use token_ring::timing::TurnTiming;
//!
//! let top = start_test(file!());
//! let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();
//! ring.start().unwrap();
//! ring.wait_for_handoffs(6);
//! ring.shutdown();
//! ring.await_all_stopped().unwrap();
//! ```

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use ring_track::entity::Entity;
use ring_track::{Id, create_and_track_id, enter, exit, info};

use crate::ring_error;
use crate::station::Station;
use crate::timing::TurnTiming;
use crate::types::{Handoff, RingError, RingResult};

struct RingState {
    current_holder: usize,
    running: bool,
    started: bool,
    num_handoffs: u64,
}

pub struct Ring {
    pub entity: Arc<Entity>,
    token: Id,
    stations: Vec<Arc<Station>>,
    timing: TurnTiming,
    state: Mutex<RingState>,
    handoff_made: Condvar,
    handles: Mutex<Vec<(usize, JoinHandle<()>)>>,
}

impl Ring {
    /// Create a ring of `num_stations` stations with station 0 holding the
    /// token.
    ///
    /// The station threads are not started until [`Ring::start`] is called.
    pub fn build(
        parent: &Arc<Entity>,
        name: &str,
        num_stations: usize,
        timing: TurnTiming,
    ) -> Result<Arc<Self>, RingError> {
        if num_stations < 1 {
            return ring_error!(format!(
                "{name}: a ring needs at least one station, got {num_stations}"
            ));
        }
        timing.validate()?;

        let entity = Arc::new(Entity::new(parent, name));
        let token = create_and_track_id!(entity ; "token");
        let stations: Vec<Arc<Station>> = (0..num_stations)
            .map(|i| Arc::new(Station::new(&entity, i)))
            .collect();

        let first = &stations[0];
        first.grant();
        enter!(first.entity ; token);

        info!(entity ; "built with {} stations", num_stations);
        Ok(Arc::new(Self {
            entity,
            token,
            stations,
            timing,
            state: Mutex::new(RingState {
                current_holder: 0,
                running: true,
                started: false,
                num_handoffs: 0,
            }),
            handoff_made: Condvar::new(),
            handles: Mutex::new(Vec::new()),
        }))
    }

    /// Spawn one thread per station.
    ///
    /// Each thread owns a reference to the ring for as long as it runs.
    pub fn start(self: &Arc<Self>) -> RingResult {
        {
            let mut state = self.state.lock().unwrap();
            if !state.running {
                return ring_error!(format!("{}: cannot start after shutdown", self.entity));
            }
            if state.started {
                return ring_error!(format!("{}: already started", self.entity));
            }
            state.started = true;
        }

        let mut handles = self.handles.lock().unwrap();
        for station in &self.stations {
            let ring = self.clone();
            let station = station.clone();
            let index = station.index();
            let handle = thread::Builder::new()
                .name(format!("station{index}"))
                .spawn(move || station.run(&ring))
                .map_err(|e| {
                    RingError(format!("{}: failed to spawn station{index}: {e}", self.entity))
                })?;
            handles.push((index, handle));
        }
        info!(self.entity ; "started");
        Ok(())
    }

    /// Pass the token from `from` to its successor.
    ///
    /// # Panics
    ///
    /// Panics if the ring is running and `from` does not hold the token.
    pub fn advance_token(&self, from: usize) -> Handoff {
        let mut state = self.state.lock().unwrap();
        if !state.running {
            return Handoff::Halted;
        }
        if state.current_holder != from {
            panic!(
                "{}: station{from} passed the token but station{} holds it",
                self.entity, state.current_holder
            );
        }

        let next = (from + 1) % self.stations.len();
        let current = &self.stations[from];
        current.revoke();
        exit!(current.entity ; self.token);

        let successor = &self.stations[next];
        enter!(successor.entity ; self.token);
        successor.grant();

        state.current_holder = next;
        state.num_handoffs += 1;
        self.handoff_made.notify_all();
        Handoff::Granted(next)
    }

    /// Stop the ring and release every station.
    ///
    /// A station that is part way through a turn finishes it before it
    /// notices.
    ///
    /// # Panics
    ///
    /// Panics if the ring has already been shut down.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.running {
            panic!("{}: shutdown called twice", self.entity);
        }
        state.running = false;
        info!(self.entity ; "shutting down after {} hand-offs", state.num_handoffs);

        for station in &self.stations {
            station.stop();
        }
        self.handoff_made.notify_all();
    }

    /// Block until every station thread has exited.
    ///
    /// Returns an error naming the stations whose threads panicked.
    pub fn await_all_stopped(&self) -> RingResult {
        let handles = std::mem::take(&mut *self.handles.lock().unwrap());
        let panicked: Vec<String> = handles
            .into_iter()
            .filter_map(|(index, handle)| handle.join().err().map(|_| format!("station{index}")))
            .collect();

        if panicked.is_empty() {
            info!(self.entity ; "all stations stopped");
            Ok(())
        } else {
            ring_error!(format!(
                "{}: station threads panicked: {}",
                self.entity,
                panicked.join(", ")
            ))
        }
    }

    pub fn request_transmit(&self, index: usize) -> RingResult {
        match self.stations.get(index) {
            Some(station) => {
                station.request_transmit();
                Ok(())
            }
            None => ring_error!(format!(
                "{}: no station{index} in a ring of {}",
                self.entity,
                self.stations.len()
            )),
        }
    }

    #[must_use]
    pub fn station(&self, index: usize) -> Option<&Arc<Station>> {
        self.stations.get(index)
    }

    #[must_use]
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    #[must_use]
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn timing(&self) -> &TurnTiming {
        &self.timing
    }

    /// The tracking id of the token.
    #[must_use]
    pub fn token(&self) -> Id {
        self.token
    }

    /// Index of the station whose turn it is, or `None` once the ring has been
    /// shut down.
    #[must_use]
    pub fn current_holder(&self) -> Option<usize> {
        let state = self.state.lock().unwrap();
        state.running.then_some(state.current_holder)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().unwrap().running
    }

    #[must_use]
    pub fn num_handoffs(&self) -> u64 {
        self.state.lock().unwrap().num_handoffs
    }

    /// Block until at least `count` hand-offs have been made or the ring has
    /// stopped. Returns the number of hand-offs made so far.
    pub fn wait_for_handoffs(&self, count: u64) -> u64 {
        let state = self.state.lock().unwrap();
        let state = self
            .handoff_made
            .wait_while(state, |s| s.running && s.num_handoffs < count)
            .unwrap();
        state.num_handoffs
    }

    /// Count the stations that currently believe they hold the token.
    ///
    /// Hand-offs are held off while counting so the answer is consistent.
    #[must_use]
    pub fn num_token_holders(&self) -> usize {
        let _state = self.state.lock().unwrap();
        self.stations.iter().filter(|s| s.holds_token()).count()
    }
}
