//! Baseline transforms captured once when a driven key is activated.
//!
//! Driver readings and driven writes are expressed as deltas from this baseline.

use serde::{Deserialize, Serialize};

use crate::property::PropertyType;
use crate::transform::{TransformSnapshot, TransformSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub driver: TransformSnapshot,
    pub driven: TransformSnapshot,
}

impl Baseline {
    pub fn capture<D, T>(driver: &D, driven: &T) -> Self
    where
        D: TransformSource + ?Sized,
        T: TransformSource + ?Sized,
    {
        Self {
            driver: driver.snapshot(),
            driven: driven.snapshot(),
        }
    }

    /// Initial value of a driver property.
    #[inline]
    pub fn driver_value(&self, property: PropertyType) -> f32 {
        self.driver.get(property)
    }

    /// Initial value of a driven property.
    #[inline]
    pub fn driven_value(&self, property: PropertyType) -> f32 {
        self.driven.get(property)
    }
}
