// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Ensure that all version of each macro can be used

use std::sync::Arc;
use std::thread;

use ring_track::entity::{Entity, toplevel};
use ring_track::{
    Id, create_and_track_id, debug, enter, error, exit, info, test_helpers, test_init, trace, warn,
};

macro_rules! build_with_entity {
    ($name:ident, $macro:ident, $slvl:expr) => (
        #[test]
        fn $name() {
            let (test_tracker, tracker) = test_init!(100);

            let top = toplevel(&tracker, "top");
            test_helpers::check_and_clear(&test_tracker, &["0: created 100, top"]);
            assert_eq!(top.id, Id(100));

            $macro!(top ; "Loc with no args");
            test_helpers::check_and_clear(&test_tracker, &[concat!("100:", $slvl, ": Loc with no args")]);

            $macro!(top ; "Loc with {} argument", 1);
            test_helpers::check_and_clear(&test_tracker, &[concat!("100:", $slvl, ": Loc with 1 argument")]);

            $macro!(top ; "Loc with {}, {} arguments", 1, 1 + 1);
            test_helpers::check_and_clear(&test_tracker, &[concat!("100:", $slvl,": Loc with 1, 2 arguments")]);

            drop(top);
            test_helpers::check_and_clear(&test_tracker, &["100: destroyed"]);
        }
    );
}

build_with_entity!(trace_with_entity, trace, "TRACE");
build_with_entity!(info_with_entity, info, "INFO");
build_with_entity!(debug_with_entity, debug, "DEBUG");
build_with_entity!(warn_with_entity, warn, "WARN");
build_with_entity!(error_with_entity, error, "ERROR");

#[test]
fn create_destroy_hierarchy() {
    let (test_tracker, tracker) = test_init!(10);

    let top = toplevel(&tracker, "top");
    let ring = Arc::new(Entity::new(&top, "ring"));
    test_helpers::check_and_clear(
        &test_tracker,
        &["0: created 10, top", "10: created 11, top::ring"],
    );

    drop(ring);
    test_helpers::check_and_clear(&test_tracker, &["11: destroyed"]);
}

#[test]
fn token_enter_exit() {
    let (test_tracker, tracker) = test_init!(40);

    let top = toplevel(&tracker, "top");
    let token = create_and_track_id!(top ; "token");
    assert_eq!(token, Id(41));
    enter!(top ; token);
    exit!(top ; token);
    test_helpers::check_and_clear(
        &test_tracker,
        &[
            "0: created 40, top",
            "40: created 41, token",
            "40: 41 entered",
            "40: 41 exited",
        ],
    );
}

#[test]
fn log_from_many_threads() {
    let (test_tracker, tracker) = test_init!(1);
    let top = toplevel(&tracker, "top");
    test_helpers::check_and_clear(&test_tracker, &["0: created 1, top"]);

    let stations: Vec<Arc<Entity>> = (0..4)
        .map(|i| Arc::new(Entity::new(&top, &format!("station{i}"))))
        .collect();
    let handles: Vec<_> = stations
        .into_iter()
        .map(|station| {
            thread::spawn(move || {
                info!(station ; "hello");
                station
            })
        })
        .collect();
    let stations: Vec<Arc<Entity>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(stations.len(), 4);

    // Four creates (in order, on this thread) followed by four logs in any order
    let mut expected = vec![
        "1: created 2, top::station0",
        "1: created 3, top::station1",
        "1: created 4, top::station2",
        "1: created 5, top::station3",
    ];
    expected.extend(["[2-5]:INFO: hello"; 4]);
    test_helpers::check_and_clear(&test_tracker, &expected);
}
