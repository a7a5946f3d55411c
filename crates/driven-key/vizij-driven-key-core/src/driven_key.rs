//! DrivenKey: one curve bound to a driver property and a list of driven properties.
//!
//! Lifecycle:
//! - `activate` captures the baseline of the driver and driven transforms (once) and,
//!   per config, pads keyframes narrower than the channel count. Authored values are
//!   never dropped here; `repair_channel_widths` is the explicit full resize.
//! - `tick` runs once per frame: sample driver -> evaluate curve -> write driven values.
//! - `reset` clears baseline and accumulator so the next `activate` recaptures.
//!
//! `tick` never fails. Anything that prevents an update is logged and reported as
//! `TickOutcome::Skipped`, leaving the driven transform untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::baseline::Baseline;
use crate::config::Config;
use crate::data::{Curve, RepairReport};
use crate::diagnostics::{inspect, Diagnostic};
use crate::driver::{sample_driver, AngleAccumulator};
use crate::error::DrivenKeyError;
use crate::interp::evaluate;
use crate::property::PropertyType;
use crate::transform::{TransformSource, TransformTarget};

/// Which property drives the curve and which properties each channel writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub driver: PropertyType,
    /// Channel `i` of every keyframe writes `driven[i]`.
    pub driven: Vec<PropertyType>,
}

impl ChannelConfig {
    pub fn new(driver: PropertyType, driven: impl Into<Vec<PropertyType>>) -> Self {
        Self {
            driver,
            driven: driven.into(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.driven.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    NotActivated,
    InsufficientKeyframes { count: usize },
    /// Driver or driven transform could not be resolved by the host.
    MissingTransform(String),
    Evaluation(DrivenKeyError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotActivated => write!(f, "not activated"),
            SkipReason::InsufficientKeyframes { count } => {
                write!(f, "{count} keyframe(s), need at least 2")
            }
            SkipReason::MissingTransform(handle) => write!(f, "transform '{handle}' not found"),
            SkipReason::Evaluation(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Driven transform updated. `deltas[i]` was added to the baseline of channel `i`.
    Applied { driver_value: f32, deltas: Vec<f32> },
    Skipped(SkipReason),
}

impl TickOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TickOutcome::Applied { .. })
    }
}

#[derive(Clone, Debug)]
pub struct DrivenKey {
    channels: ChannelConfig,
    curve: Curve,
    config: Config,
    baseline: Option<Baseline>,
    accumulator: AngleAccumulator,
    /// Set by `activate`. A stored baseline makes a key activated but not prepared.
    prepared: bool,
    dirty: bool,
}

impl DrivenKey {
    pub fn new(channels: ChannelConfig, curve: Curve) -> Self {
        Self {
            channels,
            curve,
            config: Config::default(),
            baseline: None,
            accumulator: AngleAccumulator::default(),
            prepared: false,
            dirty: false,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Start from a previously persisted baseline instead of capturing one on activation.
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn channels(&self) -> &ChannelConfig {
        &self.channels
    }

    /// Replace the channel configuration. Keyframe widths are not touched; run
    /// `repair_channel_widths` afterwards if the count changed.
    pub fn set_channels(&mut self, channels: ChannelConfig) {
        self.channels = channels;
        self.dirty = true;
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Authoring access to the keyframes. Marks the instance dirty.
    pub fn curve_mut(&mut self) -> &mut Curve {
        self.dirty = true;
        &mut self.curve
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn accumulator(&self) -> &AngleAccumulator {
        &self.accumulator
    }

    pub fn is_activated(&self) -> bool {
        self.baseline.is_some()
    }

    /// True once `activate` has run since construction or the last `reset`.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn clear_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Capture the baseline from the current driver and driven transforms. A baseline that
    /// is already set (captured earlier or loaded from storage) is kept; call `reset` first
    /// to recapture. With `Config::repair_on_activate`, narrow keyframes are zero-padded.
    pub fn activate<D, T>(&mut self, driver: &D, driven: &T)
    where
        D: TransformSource + ?Sized,
        T: TransformSource + ?Sized,
    {
        if self.baseline.is_none() {
            let baseline = Baseline::capture(driver, driven);
            debug!(
                driver = %self.channels.driver,
                channels = self.channels.width(),
                "driven key activated"
            );
            self.baseline = Some(baseline);
        }
        if self.config.repair_on_activate {
            let report = self.curve.pad_channel_widths(self.channels.width());
            if report.changed() {
                self.dirty = true;
            }
        }
        if let Some(max) = self.capped_at() {
            warn!(
                "{} driven channels configured; only the first {max} are applied",
                self.channels.width()
            );
        }
        self.prepared = true;
    }

    /// Forget baseline and accumulated driver angle. The next `activate` starts over.
    pub fn reset(&mut self) {
        self.baseline = None;
        self.accumulator.reset();
        self.prepared = false;
    }

    /// Resize every keyframe to the configured channel count, dropping extra values. Marks
    /// the instance dirty when anything changed.
    pub fn repair_channel_widths(&mut self) -> RepairReport {
        let report = self.curve.repair_channel_widths(self.channels.width());
        if report.changed() {
            self.dirty = true;
        }
        report
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        inspect(&self.channels, &self.curve, &self.config)
    }

    fn capped_at(&self) -> Option<usize> {
        self.config
            .max_driven_channels
            .filter(|max| self.channels.width() > *max)
    }

    /// Channels actually written per tick, honoring `Config::max_driven_channels`.
    fn effective_width(&self) -> usize {
        match self.capped_at() {
            Some(max) => {
                trace!(max, "driven channels capped");
                max
            }
            None => self.channels.width(),
        }
    }

    /// Advance one frame.
    pub fn tick<D, T>(&mut self, driver: &D, driven: &mut T) -> TickOutcome
    where
        D: TransformSource + ?Sized,
        T: TransformTarget + ?Sized,
    {
        let Some(baseline) = self.baseline else {
            warn!("driven key ticked before activation; skipping");
            return TickOutcome::Skipped(SkipReason::NotActivated);
        };
        let count = self.curve.len();
        if count < 2 {
            warn!("driven key has {count} keyframe(s); skipping");
            return TickOutcome::Skipped(SkipReason::InsufficientKeyframes { count });
        }

        let width = self.effective_width();
        let driver_value = sample_driver(
            driver,
            self.channels.driver,
            &baseline,
            &mut self.accumulator,
        );

        let deltas = match evaluate(driver_value, &mut self.curve.keyframes, width) {
            Ok(deltas) => deltas,
            Err(e) => {
                warn!("driven key evaluation failed: {e}; skipping");
                return TickOutcome::Skipped(SkipReason::Evaluation(e));
            }
        };

        let mut out = driven.snapshot();
        let mut wrote_position = false;
        let mut wrote_rotation = false;
        for (property, delta) in self.channels.driven.iter().zip(deltas.iter()) {
            out.set(*property, baseline.driven_value(*property) + delta);
            if property.is_rotation() {
                wrote_rotation = true;
            } else {
                wrote_position = true;
            }
        }
        if wrote_position {
            driven.set_local_position(out.position);
        }
        if wrote_rotation {
            driven.set_local_euler_angles(out.euler_angles);
        }

        TickOutcome::Applied {
            driver_value,
            deltas,
        }
    }
}
