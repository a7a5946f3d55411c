//! Curve store data model: keyframes and the curve that owns them.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// One authored sample: a driver value and the driven values it maps to, one per channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub driver_value: f32,
    /// Channel `i` maps to driven property `i`. `null` in stored data reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub driven_values: Vec<f32>,
}

fn null_as_empty<'de, D>(de: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<f32>>::deserialize(de)?.unwrap_or_default())
}

impl Keyframe {
    pub fn new(driver_value: f32, driven_values: Vec<f32>) -> Self {
        Self {
            driver_value,
            driven_values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.driven_values.len()
    }

    /// Resize to `width` keeping existing values positionally and zero-filling new slots.
    /// Returns true when the keyframe changed.
    pub fn resize_channels(&mut self, width: usize) -> bool {
        if self.driven_values.len() == width {
            return false;
        }
        self.driven_values.resize(width, 0.0);
        true
    }

    /// Zero-fill up to `width` slots. Never drops authored values.
    pub fn pad_channels(&mut self, width: usize) -> bool {
        if self.driven_values.len() >= width {
            return false;
        }
        self.driven_values.resize(width, 0.0);
        true
    }
}

/// Outcome of [`Curve::repair_channel_widths`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub expected_width: usize,
    /// Number of keyframes that were resized.
    pub repaired: usize,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        self.repaired > 0
    }
}

/// Keyframes of a single driven key. Unordered while authoring; sorted ascending by
/// driver value whenever it is evaluated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    pub keyframes: Vec<Keyframe>,
}

impl Curve {
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        Self { keyframes }
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn push(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
    }

    /// Stable ascending sort by driver value. Equal driver values keep their authored
    /// relative order. Ordering is `f32::total_cmp`, so NaN never breaks the sort.
    pub fn sort(&mut self) {
        sort_keyframes(&mut self.keyframes);
    }

    pub fn is_sorted(&self) -> bool {
        self.keyframes
            .windows(2)
            .all(|w| w[0].driver_value.total_cmp(&w[1].driver_value).is_le())
    }

    /// Smallest and largest driver value, or `None` for an empty curve.
    pub fn driver_range(&self) -> Option<(f32, f32)> {
        let mut iter = self.keyframes.iter().map(|k| k.driver_value);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// `(index, found width)` for every keyframe whose width is not `expected`.
    pub fn width_mismatches(&self, expected: usize) -> Vec<(usize, usize)> {
        self.keyframes
            .iter()
            .enumerate()
            .filter(|(_, k)| k.width() != expected)
            .map(|(i, k)| (i, k.width()))
            .collect()
    }

    /// Resize every keyframe to `expected_width` values, copying `min(old, expected)`
    /// entries positionally and zero-filling the rest. Idempotent.
    pub fn repair_channel_widths(&mut self, expected_width: usize) -> RepairReport {
        let mut report = RepairReport {
            expected_width,
            repaired: 0,
        };
        for keyframe in &mut self.keyframes {
            if keyframe.resize_channels(expected_width) {
                report.repaired += 1;
            }
        }
        if report.changed() {
            debug!(
                "repaired {} keyframe(s) to {} driven channel(s)",
                report.repaired, expected_width
            );
        }
        report
    }

    /// Grow keyframes narrower than `expected_width`, zero-filling the new slots. Wider
    /// keyframes keep their extra values.
    pub fn pad_channel_widths(&mut self, expected_width: usize) -> RepairReport {
        let repaired = self
            .keyframes
            .iter_mut()
            .filter_map(|k| k.pad_channels(expected_width).then_some(()))
            .count();
        if repaired > 0 {
            debug!("padded {repaired} keyframe(s) to {expected_width} driven channel(s)");
        }
        RepairReport {
            expected_width,
            repaired,
        }
    }
}

pub(crate) fn sort_keyframes(keyframes: &mut [Keyframe]) {
    // slice::sort_by is stable
    keyframes.sort_by(|a, b| a.driver_value.total_cmp(&b.driver_value));
}
