// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::time::Duration;

use token_ring::ring::Ring;
use token_ring::test_helpers::start_test;
use token_ring::timing::TurnTiming;
use token_ring::types::{Handoff, StationState};

mod common;

#[test]
fn shutdown_while_third_station_holds_token() {
    let top = start_test(file!());
    let timing = TurnTiming {
        dwell: Duration::from_millis(500),
        ..TurnTiming::immediate()
    };
    let ring = Ring::build(&top, "ring", 4, timing).unwrap();
    assert_eq!(ring.advance_token(0), Handoff::Granted(1));
    assert_eq!(ring.advance_token(1), Handoff::Granted(2));

    ring.start().unwrap();
    common::wait_for_state(ring.station(2).unwrap(), StationState::Dwelling);
    ring.shutdown();
    ring.await_all_stopped().unwrap();

    // Station 2 finished its turn but could not pass the token on
    assert_eq!(ring.num_handoffs(), 2);
    assert_eq!(ring.current_holder(), None);
    for station in ring.stations() {
        assert_eq!(station.state(), StationState::Stopped);
        assert!(!station.is_active());
    }
    assert_eq!(ring.station(2).unwrap().num_turns(), 1);
    assert_eq!(ring.station(0).unwrap().num_turns(), 0);

    // Every station was released by forcing the token on to it
    assert_eq!(ring.num_token_holders(), 4);
}

#[test]
fn shutdown_releases_blocked_stations() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 5, TurnTiming::default()).unwrap();
    ring.start().unwrap();
    ring.shutdown();
    ring.await_all_stopped().unwrap();

    assert!(!ring.is_running());
    assert!(ring.stations().iter().all(|s| s.state() == StationState::Stopped));
    assert_eq!(ring.num_handoffs(), 0);
}

#[test]
#[should_panic(expected = "shutdown called twice")]
fn double_shutdown_panics() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 2, TurnTiming::immediate()).unwrap();
    ring.shutdown();
    ring.shutdown();
}

#[test]
fn no_handoff_after_shutdown() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();
    ring.shutdown();

    // Not even the previous holder can pass the token on
    assert_eq!(ring.advance_token(0), Handoff::Halted);
    assert_eq!(ring.advance_token(1), Handoff::Halted);
    assert_eq!(ring.num_handoffs(), 0);
    assert_eq!(ring.current_holder(), None);
}

#[test]
fn start_after_shutdown_fails() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 2, TurnTiming::immediate()).unwrap();
    ring.shutdown();
    assert!(ring.start().is_err());
    ring.await_all_stopped().unwrap();
}

#[test]
fn start_twice_fails() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 2, TurnTiming::immediate()).unwrap();
    ring.start().unwrap();
    assert!(ring.start().is_err());
    ring.shutdown();
    ring.await_all_stopped().unwrap();
}

#[test]
fn handoff_waiters_released_by_shutdown() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 2, TurnTiming::default()).unwrap();
    let waiter = {
        let ring = ring.clone();
        std::thread::spawn(move || ring.wait_for_handoffs(1_000_000))
    };
    ring.shutdown();
    assert_eq!(waiter.join().unwrap(), 0);
}
