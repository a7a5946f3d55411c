//! Persisted driven-key JSON.
//!
//! Shape (camelCase, plain data):
//! ```json
//! {
//!   "name": "jaw",
//!   "driverObject": "JawCtrl", "drivenObject": "Jaw",
//!   "driverProperty": "RotationX",
//!   "drivenProperties": ["RotationX", "PositionY"],
//!   "keyframes": [ { "driverValue": 0, "drivenValues": [0, 0] } ],
//!   "baseline": { "driver": { "position": [..], "eulerAngles": [..] }, "driven": { .. } }
//! }
//! ```
//! Notes:
//! - Rigs authored with the fixed four-slot layout load as-is. Narrow keyframes are padded
//!   when the key is activated; extra slots stay until `repair_channel_widths` is called.
//! - `drivenValues: null` reads as an empty list.
//! - The rotation accumulator is runtime state and never stored.

use serde::{Deserialize, Serialize};

use crate::baseline::Baseline;
use crate::config::Config;
use crate::data::{Curve, Keyframe};
use crate::driven_key::{ChannelConfig, DrivenKey};
use crate::engine::Engine;
use crate::error::{DrivenKeyError, Result};
use crate::ids::DrivenKeyId;
use crate::property::PropertyType;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivenKeyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Host handle of the driver transform (used by `Engine::load`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_object: Option<String>,
    /// Host handle of the driven transform (used by `Engine::load`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driven_object: Option<String>,
    pub driver_property: PropertyType,
    #[serde(default)]
    pub driven_properties: Vec<PropertyType>,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Baseline>,
}

impl DrivenKeyData {
    pub fn channels(&self) -> ChannelConfig {
        ChannelConfig::new(self.driver_property, self.driven_properties.clone())
    }

    /// Build a runtime driven key. Fails when the channel count exceeds
    /// `config.max_driven_channels`.
    pub fn into_driven_key(self, config: Config) -> Result<DrivenKey> {
        if let Some(max) = config.max_driven_channels {
            let count = self.driven_properties.len();
            if count > max {
                return Err(DrivenKeyError::TooManyChannels { count, max });
            }
        }
        let channels = self.channels();
        let mut key = DrivenKey::new(channels, Curve::new(self.keyframes)).with_config(config);
        if let Some(baseline) = self.baseline {
            key = key.with_baseline(baseline);
        }
        Ok(key)
    }

    /// Snapshot a runtime driven key. Handles and name are left empty.
    pub fn from_driven_key(key: &DrivenKey) -> Self {
        Self {
            name: None,
            driver_object: None,
            driven_object: None,
            driver_property: key.channels().driver,
            driven_properties: key.channels().driven.clone(),
            keyframes: key.curve().keyframes.clone(),
            baseline: key.baseline().copied(),
        }
    }
}

/// A rig file: several driven keys sharing one host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub driven_keys: Vec<DrivenKeyData>,
}

/// Parse a single persisted driven key.
pub fn parse_driven_key_json(s: &str) -> Result<DrivenKeyData> {
    serde_json::from_str(s).map_err(|e| DrivenKeyError::Parse(e.to_string()))
}

/// Parse a rig file holding several driven keys.
pub fn parse_rig_json(s: &str) -> Result<RigData> {
    serde_json::from_str(s).map_err(|e| DrivenKeyError::Parse(e.to_string()))
}

/// Serialize a runtime driven key (curve, channels, baseline) to pretty JSON.
pub fn export_driven_key_json(key: &DrivenKey) -> Result<String> {
    serde_json::to_string_pretty(&DrivenKeyData::from_driven_key(key))
        .map_err(|e| DrivenKeyError::Serialize(e.to_string()))
}

/// Handles and runtime key built from one persisted entry, not yet registered.
struct Pending {
    name: String,
    driver: String,
    driven: String,
    key: DrivenKey,
}

fn prepare(data: DrivenKeyData, config: &Config) -> Result<Pending> {
    let name = data.name.clone().unwrap_or_default();
    let driver = data
        .driver_object
        .clone()
        .ok_or_else(|| DrivenKeyError::MissingHandle {
            key: name.clone(),
            field: "driverObject",
        })?;
    let driven = data
        .driven_object
        .clone()
        .ok_or_else(|| DrivenKeyError::MissingHandle {
            key: name.clone(),
            field: "drivenObject",
        })?;
    let key = data.into_driven_key(config.clone())?;
    Ok(Pending {
        name,
        driver,
        driven,
        key,
    })
}

impl Engine {
    /// Register a persisted driven key. Both host handles are required.
    pub fn load(&mut self, data: DrivenKeyData) -> Result<DrivenKeyId> {
        let p = prepare(data, self.config())?;
        Ok(self.add(p.name, p.driver, p.driven, p.key))
    }

    /// Register every driven key of a rig. All or nothing: if any key is invalid the
    /// error is returned and the engine is left unchanged.
    pub fn load_rig(&mut self, rig: RigData) -> Result<Vec<DrivenKeyId>> {
        let pending = rig
            .driven_keys
            .into_iter()
            .map(|data| prepare(data, self.config()))
            .collect::<Result<Vec<_>>>()?;
        Ok(pending
            .into_iter()
            .map(|p| self.add(p.name, p.driver, p.driven, p.key))
            .collect())
    }
}
