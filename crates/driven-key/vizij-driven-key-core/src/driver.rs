//! Driver value computation.
//!
//! Positional drivers are a plain delta from the baseline. Rotation drivers are unwrapped:
//! every sample contributes the shortest signed step from the previous sample, and the
//! steps are summed. A driver spinning through several revolutions therefore produces a
//! continuous value (e.g. 720 after two full turns) instead of jumping at the wrap point.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::baseline::Baseline;
use crate::error::{DrivenKeyError, Result};
use crate::property::PropertyType;
use crate::transform::{normalize_degrees, TransformSource};

/// Signed shortest step in degrees from `current` to `target`, in `(-180, 180]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let step = normalize_degrees(target - current);
    if step > 180.0 {
        step - 360.0
    } else {
        step
    }
}

/// Unwrap state for a rotation driver. Lives as long as the owning driven key and is only
/// cleared by an explicit reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleAccumulator {
    pub previous_angle: f32,
    pub accumulated_delta: f32,
    pub initialized: bool,
}

impl AngleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw angle sample (degrees) and return the accumulated delta.
    /// The first sample only seeds the state and yields 0.
    pub fn accumulate(&mut self, raw_angle: f32) -> f32 {
        if !self.initialized {
            self.previous_angle = raw_angle;
            self.initialized = true;
        }
        let step = delta_angle(self.previous_angle, raw_angle);
        self.accumulated_delta += step;
        self.previous_angle = raw_angle;
        self.accumulated_delta
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Map a raw property reading to the scalar fed into the curve.
///
/// - positional `property`: `raw_reading - baseline`, no state touched
/// - rotation `property`: `raw_reading` is fed through `accumulator`
pub fn compute_driver_value(
    raw_reading: f32,
    property: PropertyType,
    baseline: &Baseline,
    accumulator: &mut AngleAccumulator,
) -> f32 {
    if property.is_rotation() {
        accumulator.accumulate(raw_reading)
    } else {
        raw_reading - baseline.driver_value(property)
    }
}

/// Raw Euler angle of a rotation property. Position properties are rejected with
/// `NotARotation`.
pub fn raw_angle(euler_degrees: [f32; 3], property: PropertyType) -> Result<f32> {
    if !property.is_rotation() {
        return Err(DrivenKeyError::NotARotation(property));
    }
    Ok(euler_degrees[property.axis()])
}

/// `raw_angle` for callers that cannot fail: a position property is logged and reads as 0.
pub fn raw_angle_or_zero(euler_degrees: [f32; 3], property: PropertyType) -> f32 {
    raw_angle(euler_degrees, property).unwrap_or_else(|e| {
        warn!("{e}; using 0");
        0.0
    })
}

/// Read the driver from a host transform and compute its driver value.
pub fn sample_driver<S>(
    driver: &S,
    property: PropertyType,
    baseline: &Baseline,
    accumulator: &mut AngleAccumulator,
) -> f32
where
    S: TransformSource + ?Sized,
{
    let raw = property.read(driver.local_position(), driver.local_euler_angles());
    let value = compute_driver_value(raw, property, baseline, accumulator);
    trace!(%property, raw, value, "driver sampled");
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_angle_range() {
        assert_eq!(delta_angle(170.0, -170.0), 20.0);
        assert_eq!(delta_angle(-170.0, 170.0), -20.0);
        assert_eq!(delta_angle(0.0, 180.0), 180.0);
        assert_eq!(delta_angle(180.0, 0.0), 180.0);
        assert_eq!(delta_angle(350.0, 10.0), 20.0);
        assert_eq!(delta_angle(10.0, 10.0), 0.0);
    }

    #[test]
    fn raw_angle_rejects_positions() {
        assert_eq!(
            raw_angle([1.0, 2.0, 3.0], PropertyType::PositionX),
            Err(DrivenKeyError::NotARotation(PropertyType::PositionX))
        );
        assert_eq!(raw_angle([1.0, 2.0, 3.0], PropertyType::RotationY), Ok(2.0));
        assert_eq!(raw_angle_or_zero([1.0, 2.0, 3.0], PropertyType::PositionZ), 0.0);
        assert_eq!(raw_angle_or_zero([1.0, 2.0, 3.0], PropertyType::RotationZ), 3.0);
    }

    #[test]
    fn sample_driver_reads_the_selected_component() {
        use crate::transform::TransformSnapshot;
        let baseline = Baseline {
            driver: TransformSnapshot::new([0.0, 1.0, 0.0], [0.0, 0.0, 0.0]),
            driven: TransformSnapshot::default(),
        };
        let now = TransformSnapshot::new([0.0, 3.5, 0.0], [0.0, 0.0, 350.0]);
        let mut acc = AngleAccumulator::default();
        assert_eq!(
            sample_driver(&now, PropertyType::PositionY, &baseline, &mut acc),
            2.5
        );
        // first rotation sample seeds the accumulator
        assert_eq!(
            sample_driver(&now, PropertyType::RotationZ, &baseline, &mut acc),
            0.0
        );
        let later = TransformSnapshot::new([0.0; 3], [0.0, 0.0, 10.0]);
        assert_eq!(
            sample_driver(&later, PropertyType::RotationZ, &baseline, &mut acc),
            20.0
        );
    }
}
