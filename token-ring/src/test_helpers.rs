// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::sync::Arc;

use ring_track::entity::{Entity, toplevel};
use ring_track::test_helpers::create_tracker;

#[must_use]
pub fn start_test(full_filepath: &str) -> Arc<Entity> {
    toplevel(&create_tracker(full_filepath), "top")
}
