//! Vizij Driven Key Core (engine-agnostic)
//!
//! A driven key samples one property of a driver transform every frame and remaps it
//! through a piecewise-linear curve of authored keyframes onto one or more properties of
//! a driven transform. Rotation drivers are unwrapped and accumulated so the curve keeps
//! working across multiple revolutions.
//!
//! Layering:
//! - [`data`] / [`driver`]: the curve store (keyframes, width repair, driver values)
//! - [`interp`]: the evaluator (bracketing, lerp, clamped extrapolation)
//! - [`driven_key`]: one instance (baseline, accumulator, `tick`)
//! - [`engine`]: many instances resolved through a host
//!
//! Hosts plug in through [`TransformSource`]/[`TransformTarget`] (single instance) or
//! [`TransformHost`] (engine).

pub mod baseline;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod driven_key;
pub mod driver;
pub mod engine;
pub mod error;
pub mod ids;
pub mod interp;
pub mod property;
pub mod stored;
pub mod transform;

// Re-exports for consumers (adapters)
pub use baseline::Baseline;
pub use config::Config;
pub use data::{Curve, Keyframe, RepairReport};
pub use diagnostics::{inspect, Diagnostic, Severity};
pub use driven_key::{ChannelConfig, DrivenKey, SkipReason, TickOutcome};
pub use driver::{
    compute_driver_value, delta_angle, raw_angle, raw_angle_or_zero, AngleAccumulator,
};
pub use engine::{Engine, Entry, TickReport, TransformHost};
pub use error::{DrivenKeyError, Result};
pub use ids::{DrivenKeyId, IdAllocator};
pub use interp::evaluate;
pub use property::PropertyType;
pub use stored::{
    export_driven_key_json, parse_driven_key_json, parse_rig_json, DrivenKeyData, RigData,
};
pub use transform::{LocalTransform, TransformSnapshot, TransformSource, TransformTarget};
