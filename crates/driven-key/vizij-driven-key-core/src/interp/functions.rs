//! Interpolation helpers:
//! - lerp_f32 (scalar)
//! - lerp_channels (per-channel over slices, bounds checked)
//! - segment_t (position of a driver value inside a keyframe segment)

use crate::data::Keyframe;
use crate::error::{DrivenKeyError, Result};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolation factor of `v` in `[a, b]`. A zero-length segment (duplicate driver
/// values) yields 0 so the left keyframe wins.
#[inline]
pub fn segment_t(a: f32, b: f32, v: f32) -> f32 {
    if a == b {
        0.0
    } else {
        (v - a) / (b - a)
    }
}

/// Driven value of `keyframe` at `channel`, or `ChannelOutOfRange`.
#[inline]
pub fn channel_value(keyframes: &[Keyframe], keyframe: usize, channel: usize) -> Result<f32> {
    let values = &keyframes[keyframe].driven_values;
    values
        .get(channel)
        .copied()
        .ok_or(DrivenKeyError::ChannelOutOfRange {
            keyframe,
            channel,
            len: values.len(),
        })
}

/// Lerp the first `width` channels of keyframes `i0` and `i1`.
pub fn lerp_channels(
    keyframes: &[Keyframe],
    i0: usize,
    i1: usize,
    t: f32,
    width: usize,
) -> Result<Vec<f32>> {
    let mut out = Vec::with_capacity(width);
    for ch in 0..width {
        let a = channel_value(keyframes, i0, ch)?;
        let b = channel_value(keyframes, i1, ch)?;
        out.push(lerp_f32(a, b, t));
    }
    Ok(out)
}

/// Copy the first `width` channels of keyframe `i`.
pub fn copy_channels(keyframes: &[Keyframe], i: usize, width: usize) -> Result<Vec<f32>> {
    (0..width)
        .map(|ch| channel_value(keyframes, i, ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_t_handles_zero_length() {
        assert_eq!(segment_t(5.0, 5.0, 5.0), 0.0);
        assert_eq!(segment_t(0.0, 10.0, 2.5), 0.25);
    }

    #[test]
    fn out_of_range_channel_is_an_error() {
        let keys = vec![Keyframe::new(0.0, vec![1.0]), Keyframe::new(1.0, vec![2.0, 3.0])];
        assert_eq!(
            lerp_channels(&keys, 0, 1, 0.5, 2),
            Err(DrivenKeyError::ChannelOutOfRange {
                keyframe: 0,
                channel: 1,
                len: 1
            })
        );
        assert_eq!(copy_channels(&keys, 1, 2), Ok(vec![2.0, 3.0]));
    }
}
