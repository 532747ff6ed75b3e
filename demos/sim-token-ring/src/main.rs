// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Simulate a token ring driven by random transmit requests.
//!
//! See `lib.rs` for details.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use ring_track::builder::{TrackerConfig, TrackersConfig, setup_trackers};
use ring_track::entity::toplevel;
use ring_track::{Tracker, error, info, str_to_level};
use sim_token_ring::config::Config;
use token_ring::driver::{Drive, RandomDriver};
use token_ring::ring::Ring;
use token_ring::ring_error;
use token_ring::types::RingError;

fn parse_config() -> Result<Config, RingError> {
    let mut config = Config::parse_all_sources().map_err(|e| RingError(e.to_string()))?;
    let extra_conf_file = config.conf_file.clone().unwrap_or_default();
    config
        .parse_extra_conf_file(&extra_conf_file)
        .map_err(|e| RingError(e.to_string()))?;
    Ok(config)
}

fn setup_all_trackers(config: &Config) -> Result<Tracker, RingError> {
    let stdout_level = str_to_level(config.stdout_level.as_deref().unwrap_or("info"))?;
    let log_level = str_to_level(config.log_level.as_deref().unwrap_or("trace"))?;
    let log_file = config.log_file.as_deref().unwrap_or_default();

    let trackers = TrackersConfig {
        stdout: TrackerConfig {
            enable: config.stdout.unwrap_or_default(),
            level: stdout_level,
            filter_regex: config.stdout_filter_regex.as_deref().unwrap_or_default(),
            file: None,
        },
        file: TrackerConfig {
            enable: !log_file.is_empty(),
            level: log_level,
            filter_regex: "",
            file: Some(log_file),
        },
    };
    Ok(setup_trackers(&trackers)?)
}

/// Spawn a thread to display the number of hand-offs made so far.
///
/// The thread exits once the ring has been shut down.
fn start_handoff_spinner(ring: Arc<Ring>, progress_bar: ProgressBar) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut seen = 0;
        while ring.is_running() {
            seen = ring.wait_for_handoffs(seen + 1);
            progress_bar.set_position(seen);
        }
        progress_bar.finish_with_message("ring stopped");
    })
}

fn main() -> Result<(), RingError> {
    let config = parse_config()?;
    let tracker = setup_all_trackers(&config)?;
    let top = toplevel(&tracker, "top");

    let num_stations = config.num_stations();
    let timing = config.turn_timing();
    info!(top ;
        "Ring of {} stations running for {}s, dwell {}ms, transmit {}-{}ms, requests every {}ms",
        num_stations,
        config.run_duration().as_secs(),
        timing.dwell.as_millis(),
        timing.min_transmit.as_millis(),
        timing.max_transmit.as_millis(),
        config.request_interval().as_millis()
    );

    let ring = Ring::build(&top, "ring", num_stations, timing)?;
    ring.start()?;

    let spinner = if config.progress.unwrap_or_default() {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::with_template("{spinner} {pos} hand-offs {msg}")
                .map_err(|e| RingError(e.to_string()))?,
        );
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        Some(start_handoff_spinner(ring.clone(), progress_bar))
    } else {
        None
    };

    let mut driver = RandomDriver::new(
        &top,
        config.request_interval(),
        config.run_duration(),
        config.seed(),
    );
    let driven = driver.drive(&ring);
    if driven.is_err() && ring.is_running() {
        ring.shutdown();
    }
    let stopped = ring.await_all_stopped();

    if let Some(spinner) = spinner {
        if spinner.join().is_err() {
            error!(top ; "Progress display failed");
        }
    }

    driven?;
    stopped?;

    for station in ring.stations() {
        info!(station.entity ;
            "{} turns, {} transmissions",
            station.num_turns(),
            station.num_transmissions()
        );
    }

    let requested = driver.num_requests();
    let transmitted: u64 = ring.stations().iter().map(|s| s.num_transmissions()).sum();
    info!(top ;
        "{} hand-offs, {} requests, {} transmissions",
        ring.num_handoffs(),
        requested,
        transmitted
    );
    tracker.shutdown();

    if transmitted > requested {
        return ring_error!("more transmissions than requests");
    }
    Ok(())
}
