//! Error types shared by the event network and the drone synthesizer.

use thiserror::Error;

/// Invalid construction of a network, oscillator, weight curve, or piece.
///
/// These are raised synchronously by the offending constructor and are never
/// recovered from internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("link {source_node} -> {target} must have a positive weight")]
    NonPositiveWeight { source_node: String, target: String },

    #[error("links out of {source_node} would weigh more than {max} in total", max = u32::MAX)]
    WeightOverflow { source_node: String },

    #[error("node '{0}' is already in the network")]
    DuplicateNode(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("node '{0}' has no outgoing links")]
    TerminalNode(String),

    #[error("frequency must be a positive number of Hz, got {0}")]
    InvalidFrequency(f32),

    #[error("sample rate must be a positive number of Hz, got {0}")]
    InvalidSampleRate(f32),

    #[error("repeat factor must be at least 1")]
    InvalidRepeatFactor,

    #[error("a {frequency} Hz table holding {repeat_factor} periods is too long to cache")]
    TableTooLong { frequency: f32, repeat_factor: u32 },

    #[error("invalid weight curve: {0}")]
    InvalidCurve(&'static str),

    #[error("unknown piece '{0}'")]
    UnknownPiece(String),
}

/// A walk that cannot continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    #[error("node '{0}' has no outgoing links; the walk cannot advance")]
    NoOutgoingLinks(String),

    #[error("the network has no current node")]
    NoCurrentNode,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
