//! Evaluator: map a driver value through a keyframe curve to per-channel driven deltas.
//!
//! Model:
//! - Keyframes are sorted ascending by driver value (stable, in place) on every call.
//! - The first adjacent pair `(a, b)` with `a <= v <= b` brackets the value; each channel
//!   is lerped independently.
//! - Outside the authored range the output is clamped flat to the first or last keyframe.

pub mod functions;

use crate::data::{sort_keyframes, Keyframe};
use crate::error::{DrivenKeyError, Result};
use functions::{copy_channels, lerp_channels, segment_t};

/// Locate the bracketing segment for `v` in sorted `keyframes`.
/// Returns `(i0, i1, t)`; `i0 == i1` means clamped to that keyframe.
fn find_segment(keyframes: &[Keyframe], v: f32) -> (usize, usize, f32) {
    let n = keyframes.len();
    for i in 0..(n - 1) {
        let a = keyframes[i].driver_value;
        let b = keyframes[i + 1].driver_value;
        if v >= a && v <= b {
            return (i, i + 1, segment_t(a, b, v));
        }
    }
    // No bracket: below the range clamps to the first key, anything else (above the
    // range, or NaN) to the last.
    if v < keyframes[0].driver_value {
        (0, 0, 0.0)
    } else {
        (n - 1, n - 1, 0.0)
    }
}

/// Evaluate `width` channels at `driver_value`.
///
/// Sorts `keyframes` in place as a side effect. Fails with `InsufficientKeyframes` below
/// two keyframes and with `ChannelOutOfRange` when a keyframe that is read holds fewer
/// than `width` values.
pub fn evaluate(driver_value: f32, keyframes: &mut [Keyframe], width: usize) -> Result<Vec<f32>> {
    if keyframes.len() < 2 {
        return Err(DrivenKeyError::InsufficientKeyframes {
            count: keyframes.len(),
        });
    }
    sort_keyframes(keyframes);

    let (i0, i1, t) = find_segment(keyframes, driver_value);
    if i0 == i1 {
        copy_channels(keyframes, i0, width)
    } else {
        lerp_channels(keyframes, i0, i1, t, width)
    }
}
