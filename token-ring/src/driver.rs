// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Drivers generate the traffic for a ring.
//!
//! A driver only sees the public surface of the [`Ring`]: it can ask stations
//! to transmit and it decides when the ring is shut down.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ring_track::entity::Entity;
use ring_track::{debug, info};

use crate::ring::Ring;
use crate::types::RingResult;

pub trait Drive {
    /// Drive the ring until it should stop. Implementations are expected to
    /// call [`Ring::shutdown`] before returning `Ok`.
    fn drive(&mut self, ring: &Ring) -> RingResult;
}

/// Requests a transmission from a random station every `interval` and shuts
/// the ring down once `duration` has passed.
pub struct RandomDriver {
    pub entity: Arc<Entity>,
    interval: Duration,
    duration: Duration,
    rng: StdRng,
    num_requests: u64,
}

impl RandomDriver {
    #[must_use]
    pub fn new(
        parent: &Arc<Entity>,
        interval: Duration,
        duration: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            entity: Arc::new(Entity::new(parent, "driver")),
            interval,
            duration,
            rng,
            num_requests: 0,
        }
    }

    #[must_use]
    pub fn num_requests(&self) -> u64 {
        self.num_requests
    }
}

impl Drive for RandomDriver {
    fn drive(&mut self, ring: &Ring) -> RingResult {
        let deadline = Instant::now() + self.duration;
        info!(self.entity ; "driving for {}ms", self.duration.as_millis());

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.interval.min(deadline - now));
            if Instant::now() >= deadline {
                break;
            }

            let index = self.rng.gen_range(0..ring.num_stations());
            debug!(self.entity ; "station{index} wants to transmit");
            ring.request_transmit(index)?;
            self.num_requests += 1;
        }

        info!(self.entity ; "time up after {} requests", self.num_requests);
        ring.shutdown();
        Ok(())
    }
}
