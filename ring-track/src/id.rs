// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Unique identifiers for tracked entities and objects.

/// Ids that should be unique across the simulation
///
/// Each _log_/_trace_ event within the application is given a unique id to
/// identify its originator. There are two reserved id values:
/// [NO_ID](crate::NO_ID) and [ROOT](crate::ROOT)
#[derive(Copy, Clone, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Id(pub u64);

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
