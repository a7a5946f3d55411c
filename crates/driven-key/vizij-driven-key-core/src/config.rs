//! Core configuration for vizij-driven-key-core.

use serde::{Deserialize, Serialize};

/// Channel limit of rigs authored with fixed four-slot driven value arrays.
pub const LEGACY_MAX_DRIVEN_CHANNELS: usize = 4;

/// Configuration shared by a driven key instance or an engine.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rotation drivers authored beyond +/- this many degrees get a diagnostic: the
    /// driven object may visibly flip or jump there.
    pub safe_driver_range_deg: f32,

    /// Optional cap on driven channels. `None` means no limit.
    pub max_driven_channels: Option<usize>,

    /// Zero-pad keyframes narrower than the channel count when an instance is activated.
    pub repair_on_activate: bool,
}

impl Config {
    /// Settings matching rigs authored with the fixed four-channel layout.
    pub fn legacy() -> Self {
        Self {
            max_driven_channels: Some(LEGACY_MAX_DRIVEN_CHANNELS),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            safe_driver_range_deg: 90.0,
            max_driven_channels: None,
            repair_on_activate: true,
        }
    }
}
