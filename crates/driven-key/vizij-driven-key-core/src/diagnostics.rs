//! Authoring diagnostics for a driven key: the checks an inspector shows next to the
//! keyframe list. None of these stop `tick`; they tell the author what to fix, and
//! width mismatches come with a repair action.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::Curve;
use crate::driven_key::ChannelConfig;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Fewer than two keyframes: ticks leave the driven object untouched.
    InsufficientKeyframes { count: usize },
    /// Keyframe width differs from the driven channel count.
    ChannelWidthMismatch {
        keyframe: usize,
        found: usize,
        expected: usize,
    },
    /// Rotation driver keyed beyond the safe range; the driven object may flip or jump.
    DriverOutOfSafeRange { keyframe: usize, value: f32, limit: f32 },
    TooManyChannels { count: usize, max: usize },
    /// Two keyframes share a driver value; the earlier one wins at that value.
    DuplicateDriverValue { first: usize, second: usize, value: f32 },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::DuplicateDriverValue { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// True when `DrivenKey::repair_channel_widths` fixes this diagnostic.
    pub fn is_repairable(&self) -> bool {
        matches!(self, Diagnostic::ChannelWidthMismatch { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::InsufficientKeyframes { count } => {
                write!(f, "{count} keyframe(s); at least 2 are needed to drive anything")
            }
            Diagnostic::ChannelWidthMismatch {
                keyframe,
                found,
                expected,
            } => write!(
                f,
                "keyframe {keyframe} has {found} driven value(s), expected {expected}"
            ),
            Diagnostic::DriverOutOfSafeRange {
                keyframe,
                value,
                limit,
            } => write!(
                f,
                "keyframe {keyframe} driver angle {value} is beyond +/-{limit} degrees; the driven object may flip or jump"
            ),
            Diagnostic::TooManyChannels { count, max } => {
                write!(f, "{count} driven channels configured, at most {max} are used")
            }
            Diagnostic::DuplicateDriverValue {
                first,
                second,
                value,
            } => write!(
                f,
                "keyframes {first} and {second} share driver value {value}; keyframe {first} wins"
            ),
        }
    }
}

/// Run every authoring check over `curve` for the given channel configuration.
/// Keyframe indices refer to the curve's current order.
pub fn inspect(channels: &ChannelConfig, curve: &Curve, config: &Config) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if curve.len() < 2 {
        out.push(Diagnostic::InsufficientKeyframes { count: curve.len() });
    }

    let expected = channels.width();
    if let Some(max) = config.max_driven_channels {
        if expected > max {
            out.push(Diagnostic::TooManyChannels {
                count: expected,
                max,
            });
        }
    }

    for (keyframe, found) in curve.width_mismatches(expected) {
        out.push(Diagnostic::ChannelWidthMismatch {
            keyframe,
            found,
            expected,
        });
    }

    if channels.driver.is_rotation() {
        let limit = config.safe_driver_range_deg;
        for (keyframe, k) in curve.keyframes.iter().enumerate() {
            if k.driver_value < -limit || k.driver_value > limit {
                out.push(Diagnostic::DriverOutOfSafeRange {
                    keyframe,
                    value: k.driver_value,
                    limit,
                });
            }
        }
    }

    // stable sort of indices keeps authored order among equal values
    let mut order: Vec<usize> = (0..curve.len()).collect();
    order.sort_by(|&a, &b| {
        curve.keyframes[a]
            .driver_value
            .total_cmp(&curve.keyframes[b].driver_value)
    });
    for pair in order.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let value = curve.keyframes[first].driver_value;
        if value == curve.keyframes[second].driver_value {
            out.push(Diagnostic::DuplicateDriverValue {
                first,
                second,
                value,
            });
        }
    }

    out
}
