// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Run a token ring whose stations are asked to transmit at random.
//!
//! The ring is built with the configured number of stations, each running on
//! its own thread. Every `request_interval_ms` a random station is asked to
//! transmit, and after `duration_secs` the ring is shut down. A summary of the
//! turns and transmissions made by each station is then printed.
//!
//! # Examples
//!
//! Run the default five station ring for thirty seconds:
//! ```txt
//! cargo run --bin sim-token-ring --release
//! ```
//!
//! A faster run with reproducible traffic and a full trace written to disk:
//! ```txt
//! cargo run --bin sim-token-ring --release -- --dwell-ms 10 --min-transmit-ms 10 \
//!     --max-transmit-ms 20 --request-interval-ms 20 --duration-secs 2 --seed 7 \
//!     --log-file trace.log
//! ```
//!
//! Only show the logging of station 3:
//! ```txt
//! cargo run --bin sim-token-ring --release -- --stdout-level debug \
//!     --stdout-filter-regex 'station3'
//! ```
//!
//! See [config](crate::config) for how settings can also come from files and
//! the environment.

pub mod config;
