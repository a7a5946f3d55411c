//! Error type shared by the curve store, evaluator and persistence helpers.

use thiserror::Error;

use crate::property::PropertyType;

pub type Result<T> = std::result::Result<T, DrivenKeyError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DrivenKeyError {
    #[error("curve needs at least 2 keyframes to evaluate, found {count}")]
    InsufficientKeyframes { count: usize },

    /// A keyframe was read past the end of its driven values. Run
    /// `RepairChannelWidths` before evaluating.
    #[error("keyframe {keyframe} has {len} driven values; channel {channel} is out of range")]
    ChannelOutOfRange {
        keyframe: usize,
        channel: usize,
        len: usize,
    },

    #[error("{0:?} is not a rotation property")]
    NotARotation(PropertyType),

    #[error("{count} driven channels configured, at most {max} allowed")]
    TooManyChannels { count: usize, max: usize },

    #[error("driven key '{key}' has no {field} handle")]
    MissingHandle { key: String, field: &'static str },

    #[error("driven key parse error: {0}")]
    Parse(String),

    #[error("driven key serialize error: {0}")]
    Serialize(String),
}
