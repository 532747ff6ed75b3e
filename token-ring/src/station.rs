// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! A station of the ring.
//!
//! Each station runs on its own thread (see [`Ring::start`]) and spends most
//! of its life blocked waiting for the token. Once granted the token it either
//! transmits (if a transmission was requested since its last turn) or dwells
//! for a short time, then asks the [`Ring`] to pass the token on.
//!
//! The station flags are only ever changed while holding the station's own
//! lock. The station never holds its own lock while calling into the ring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use ring_track::entity::Entity;
use ring_track::{debug, info};

use crate::ring::Ring;
use crate::types::{Handoff, StationState};

struct StationFlags {
    holds_token: bool,
    wants_to_transmit: bool,
    active: bool,
    state: StationState,
}

/// What the station decided to do with the token it was woken with.
enum Turn {
    Stop,
    Transmit,
    Dwell,
}

pub struct Station {
    pub entity: Arc<Entity>,
    index: usize,
    flags: Mutex<StationFlags>,
    token_granted: Condvar,
    num_turns: AtomicU64,
    num_transmissions: AtomicU64,
}

impl Station {
    pub(crate) fn new(parent: &Arc<Entity>, index: usize) -> Self {
        Self {
            entity: Arc::new(Entity::new(parent, &format!("station{index}"))),
            index,
            flags: Mutex::new(StationFlags {
                holds_token: false,
                wants_to_transmit: false,
                active: true,
                state: StationState::Idle,
            }),
            token_granted: Condvar::new(),
            num_turns: AtomicU64::new(0),
            num_transmissions: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Mark that this station has data to send the next time it makes a
    /// decision with the token.
    ///
    /// Can be called from any thread at any time. Requests made while a turn
    /// is already transmitting or dwelling are kept for the following turn.
    pub fn request_transmit(&self) {
        let mut flags = self.flags.lock().unwrap();
        if !flags.wants_to_transmit {
            debug!(self.entity ; "transmit requested");
        }
        flags.wants_to_transmit = true;
    }

    #[must_use]
    pub fn holds_token(&self) -> bool {
        self.flags.lock().unwrap().holds_token
    }

    #[must_use]
    pub fn wants_to_transmit(&self) -> bool {
        self.flags.lock().unwrap().wants_to_transmit
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flags.lock().unwrap().active
    }

    #[must_use]
    pub fn state(&self) -> StationState {
        self.flags.lock().unwrap().state
    }

    /// Number of turns completed (with or without a transmission).
    #[must_use]
    pub fn num_turns(&self) -> u64 {
        self.num_turns.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn num_transmissions(&self) -> u64 {
        self.num_transmissions.load(Ordering::SeqCst)
    }

    pub(crate) fn grant(&self) {
        let mut flags = self.flags.lock().unwrap();
        flags.holds_token = true;
        if flags.active {
            flags.state = StationState::HasToken;
        }
        self.token_granted.notify_all();
    }

    pub(crate) fn revoke(&self) {
        let mut flags = self.flags.lock().unwrap();
        flags.holds_token = false;
        if flags.active {
            flags.state = StationState::Idle;
        }
    }

    /// Release the station from waiting for good.
    ///
    /// The token is forced on so that a blocked thread wakes up, and the
    /// cleared `active` flag stops it treating that as a turn.
    pub(crate) fn stop(&self) {
        let mut flags = self.flags.lock().unwrap();
        flags.active = false;
        flags.holds_token = true;
        self.token_granted.notify_all();
    }

    fn await_token(&self) -> Turn {
        let flags = self.flags.lock().unwrap();
        let mut flags = self
            .token_granted
            .wait_while(flags, |f| !f.holds_token)
            .unwrap();

        if !flags.active {
            return Turn::Stop;
        }

        info!(self.entity ; "token received");
        if std::mem::take(&mut flags.wants_to_transmit) {
            flags.state = StationState::Transmitting;
            Turn::Transmit
        } else {
            flags.state = StationState::Dwelling;
            Turn::Dwell
        }
    }

    fn set_stopped(&self) {
        self.flags.lock().unwrap().state = StationState::Stopped;
        info!(self.entity ; "stopped");
    }

    /// The body of the station thread.
    ///
    /// Returns once the ring has been shut down and this station has noticed.
    pub fn run(&self, ring: &Ring) {
        let timing = ring.timing();
        let mut rng = timing.rng_for(self.index);

        loop {
            match self.await_token() {
                Turn::Stop => break,
                Turn::Transmit => {
                    let duration = timing.transmit_time(&mut rng);
                    info!(self.entity ; "transmitting for {}ms", duration.as_millis());
                    thread::sleep(duration);
                    self.num_transmissions.fetch_add(1, Ordering::SeqCst);
                }
                Turn::Dwell => {
                    debug!(self.entity ; "nothing to send, dwelling");
                    thread::sleep(timing.dwell);
                }
            }
            self.num_turns.fetch_add(1, Ordering::SeqCst);

            // Shutdown is only noticed between turns
            if !self.is_active() {
                break;
            }

            // When halted the token has already been forced back on to this
            // station, so the next wait returns straight away.
            if let Handoff::Granted(next) = ring.advance_token(self.index) {
                debug!(self.entity ; "token passed to station{next}");
            }
        }

        self.set_stopped();
    }
}
