// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Shared types.

use std::error::Error;
use std::fmt;

use ring_track::TrackConfigError;

#[macro_export]
/// Build a [RingError] from a message that supports `to_string`
macro_rules! ring_error {
    ($msg:expr) => {
        Err($crate::types::RingError($msg.to_string()))
    };
}

/// The `RingError` is what should be returned in the case of an error
#[derive(Debug)]
pub struct RingError(pub String);

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl Error for RingError {}

impl From<TrackConfigError> for RingError {
    fn from(e: TrackConfigError) -> Self {
        RingError(e.0)
    }
}

/// The RingResult is the return type for most ring functions
pub type RingResult = Result<(), RingError>;

/// Outcome of asking the ring to pass the token on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// The token was granted to the station with this index.
    Granted(usize),

    /// The ring has been shut down so the token was not passed on.
    Halted,
}

/// The states a station moves through.
///
/// `Stopped` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StationState {
    #[default]
    Idle,
    HasToken,
    Transmitting,
    Dwelling,
    Stopped,
}

impl fmt::Display for StationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StationState::Idle => write!(f, "Idle"),
            StationState::HasToken => write!(f, "HasToken"),
            StationState::Transmitting => write!(f, "Transmitting"),
            StationState::Dwelling => write!(f, "Dwelling"),
            StationState::Stopped => write!(f, "Stopped"),
        }
    }
}
