// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Hand-offs driven directly from the test thread, without starting any
//! station threads.

use std::time::Duration;

use token_ring::ring::Ring;
use token_ring::test_helpers::start_test;
use token_ring::timing::TurnTiming;
use token_ring::types::{Handoff, StationState};

mod common;

#[test]
fn first_station_holds_token() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();

    assert_eq!(ring.num_stations(), 3);
    assert_eq!(ring.current_holder(), Some(0));
    assert_eq!(ring.num_token_holders(), 1);
    assert!(ring.station(0).unwrap().holds_token());
    assert_eq!(ring.station(0).unwrap().state(), StationState::HasToken);
    assert_eq!(ring.station(1).unwrap().state(), StationState::Idle);
    assert!(ring.station(3).is_none());
    assert!(ring.is_running());
}

#[test]
fn token_moves_in_cyclic_order() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();

    assert_eq!(ring.advance_token(0), Handoff::Granted(1));
    assert_eq!(ring.current_holder(), Some(1));
    assert_eq!(ring.advance_token(1), Handoff::Granted(2));
    assert_eq!(ring.advance_token(2), Handoff::Granted(0));
    assert_eq!(ring.current_holder(), Some(0));
    assert_eq!(ring.num_handoffs(), 3);
}

#[test]
fn every_window_visits_each_station_once() {
    let (tracker, top) = common::in_memory_top();
    let num_stations = 5;
    let ring = Ring::build(&top, "ring", num_stations, TurnTiming::immediate()).unwrap();

    let mut holder = 0;
    for _ in 0..(3 * num_stations) {
        match ring.advance_token(holder) {
            Handoff::Granted(next) => holder = next,
            Handoff::Halted => panic!("ring should still be running"),
        }
        assert_eq!(ring.num_token_holders(), 1);
    }

    let path = common::token_path(&tracker, &ring);
    assert_eq!(path.len(), 3 * num_stations + 1);
    for window in path.windows(num_stations) {
        let mut seen = window.to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..num_stations).collect::<Vec<_>>());
    }
    for (i, index) in path.iter().enumerate() {
        assert_eq!(*index, i % num_stations);
    }
}

#[test]
fn token_exits_match_enters() {
    let (tracker, top) = common::in_memory_top();
    let ring = Ring::build(&top, "ring", 2, TurnTiming::immediate()).unwrap();

    assert_eq!(ring.advance_token(0), Handoff::Granted(1));
    assert_eq!(ring.advance_token(1), Handoff::Granted(0));
    assert_eq!(ring.advance_token(0), Handoff::Granted(1));

    let token = ring.token();
    let station0 = ring.station(0).unwrap().entity.id;
    let station1 = ring.station(1).unwrap().entity.id;
    assert_eq!(tracker.count_exits(station0, token), 2);
    assert_eq!(tracker.count_exits(station1, token), 1);
}

#[test]
fn single_station_grants_itself() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 1, TurnTiming::immediate()).unwrap();

    for _ in 0..4 {
        assert_eq!(ring.advance_token(0), Handoff::Granted(0));
        assert_eq!(ring.num_token_holders(), 1);
        assert!(ring.station(0).unwrap().holds_token());
    }
    assert_eq!(ring.num_handoffs(), 4);
}

#[test]
#[should_panic(expected = "holds it")]
fn advance_from_non_holder_panics() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();
    let _ = ring.advance_token(2);
}

#[test]
fn empty_ring_rejected() {
    let top = start_test(file!());
    let err = Ring::build(&top, "ring", 0, TurnTiming::immediate()).err().unwrap();
    assert!(err.to_string().contains("at least one station"));
}

#[test]
fn inverted_timing_rejected() {
    let top = start_test(file!());
    let timing = TurnTiming {
        min_transmit: Duration::from_millis(10),
        max_transmit: Duration::from_millis(1),
        ..TurnTiming::immediate()
    };
    assert!(Ring::build(&top, "ring", 2, timing).is_err());
}

#[test]
fn request_transmit_marks_station() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();

    ring.request_transmit(1).unwrap();
    assert!(ring.station(1).unwrap().wants_to_transmit());
    assert!(!ring.station(0).unwrap().wants_to_transmit());

    // Intent does not move the token
    assert_eq!(ring.current_holder(), Some(0));
    assert!(!ring.station(1).unwrap().holds_token());
}

#[test]
fn request_transmit_out_of_range() {
    let top = start_test(file!());
    let ring = Ring::build(&top, "ring", 3, TurnTiming::immediate()).unwrap();
    assert!(ring.request_transmit(3).is_err());
}
