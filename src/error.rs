//! Error types
//!
//! None of these are fatal: every error leaves the game state untouched.

use std::path::PathBuf;

/// Rejected attempts to record a throw
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Pin count outside 0..=10
    #[error("malformed pin count: {0} (expected 0..=10)")]
    MalformedPinCount(u8),

    /// More pins than are currently standing in the frame
    #[error("{pins} pins knocked down but only {standing} standing in frame {frame}")]
    ExceedsStanding { pins: u8, standing: u8, frame: u8 },

    /// Game already finished
    #[error("game is already complete")]
    GameComplete,
}

/// Rejected throw requests
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ThrowError {
    /// A throw is already being resolved or a reset is pending
    #[error("cannot throw while {0}")]
    NotReady(&'static str),

    /// No ball on the approach
    #[error("no ball on the approach")]
    NoBall,

    /// Zero-length or non-finite aim vector
    #[error("invalid throw direction")]
    InvalidDirection,

    /// Series finished, nothing left to bowl
    #[error("series is complete")]
    SeriesComplete,
}

/// Settings loading/validation failures
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for `Settings`
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
