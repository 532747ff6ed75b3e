// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! How long a station keeps the token during a turn.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ring_error;
use crate::types::RingResult;

#[derive(Clone, Debug, PartialEq)]
pub struct TurnTiming {
    /// Time the token is held when there is nothing to send.
    pub dwell: Duration,

    /// Shortest transmission.
    pub min_transmit: Duration,

    /// Longest transmission.
    pub max_transmit: Duration,

    /// Seed for the transmission times. Station `i` uses `seed + i` so that
    /// runs can be repeated. Unseeded stations draw from entropy.
    pub seed: Option<u64>,
}

impl Default for TurnTiming {
    fn default() -> Self {
        Self {
            dwell: Duration::from_secs(1),
            min_transmit: Duration::from_secs(1),
            max_transmit: Duration::from_secs(2),
            seed: None,
        }
    }
}

impl TurnTiming {
    /// Timing where no turn waits at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            dwell: Duration::ZERO,
            min_transmit: Duration::ZERO,
            max_transmit: Duration::ZERO,
            seed: None,
        }
    }

    pub fn validate(&self) -> RingResult {
        if self.min_transmit > self.max_transmit {
            return ring_error!(format!(
                "Minimum transmit time {:?} exceeds maximum {:?}",
                self.min_transmit, self.max_transmit
            ));
        }
        Ok(())
    }

    pub(crate) fn rng_for(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }

    pub(crate) fn transmit_time(&self, rng: &mut StdRng) -> Duration {
        if self.min_transmit == self.max_transmit {
            self.min_transmit
        } else {
            rng.gen_range(self.min_transmit..=self.max_transmit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transmit_time_within_bounds() {
        let timing = TurnTiming {
            min_transmit: Duration::from_millis(3),
            max_transmit: Duration::from_millis(9),
            seed: Some(7),
            ..TurnTiming::immediate()
        };
        let mut rng = timing.rng_for(2);
        for _ in 0..100 {
            let t = timing.transmit_time(&mut rng);
            assert!(t >= timing.min_transmit && t <= timing.max_transmit);
        }
    }

    #[test]
    fn seeded_stations_repeat() {
        let timing = TurnTiming {
            seed: Some(42),
            ..TurnTiming::default()
        };
        let first: Vec<Duration> = {
            let mut rng = timing.rng_for(1);
            (0..5).map(|_| timing.transmit_time(&mut rng)).collect()
        };
        let second: Vec<Duration> = {
            let mut rng = timing.rng_for(1);
            (0..5).map(|_| timing.transmit_time(&mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let timing = TurnTiming {
            min_transmit: Duration::from_millis(5),
            max_transmit: Duration::from_millis(4),
            ..TurnTiming::immediate()
        };
        assert!(timing.validate().is_err());
        assert!(TurnTiming::default().validate().is_ok());
    }
}
