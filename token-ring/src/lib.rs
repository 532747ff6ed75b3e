// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

#![doc(test(attr(warn(unused))))]

//! A token ring made of independently running stations.
//!
//! A [ring](crate::ring::Ring) is a fixed cycle of
//! [stations](crate::station::Station), each running on its own thread. A
//! single token circulates around the cycle and only the station holding it
//! may transmit. Each station waits for the token, transmits if it has been
//! asked to (or dwells briefly if not) and then hands the token on to its
//! successor.
//!
//! Requests to transmit come from a [driver](crate::driver), which is also
//! responsible for shutting the ring down. Shutdown is cooperative: a station
//! that is part way through a turn finishes it and then exits.
//!
//! # Simple Application
//!
//! ```rust
//! use std::time::Duration;
//!
//! use token_ring::driver::{Drive, RandomDriver};
//! use token_ring::ring::Ring;
//! use token_ring::test_helpers::start_test;
//! use token_ring::timing::TurnTiming;
//!
//! let top = start_test(file!());
//! let ring = Ring::build(&top, "ring", 4, TurnTiming::immediate()).unwrap();
//! ring.start().unwrap();
//!
//! let mut driver = RandomDriver::new(&top, Duration::from_millis(1), Duration::from_millis(20), Some(1));
//! driver.drive(&ring).unwrap();
//! ring.await_all_stopped().unwrap();
//! assert!(!ring.is_running());
//! ```
//!
//! All activity is reported through [`ring_track`]: stations log as
//! `top::ring::station<i>` and the token is traced entering and exiting each
//! station in turn.

pub mod driver;
pub mod ring;
pub mod station;
pub mod test_helpers;
pub mod timing;
pub mod types;
