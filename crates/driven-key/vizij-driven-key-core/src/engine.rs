//! Engine: owns many driven keys and ticks them against a host's transforms.
//!
//! Methods:
//! - new, add/create, remove, get/get_mut/find
//! - activate_all (capture baselines), tick (lazy activation, then one update per key)
//!
//! Instances are independent. A key whose transforms cannot be resolved, or whose curve
//! is misconfigured, is skipped with a warning and the remaining keys still update.

use hashbrown::HashMap;
use tracing::warn;

use crate::config::Config;
use crate::data::Curve;
use crate::driven_key::{ChannelConfig, DrivenKey, SkipReason, TickOutcome};
use crate::ids::{DrivenKeyId, IdAllocator};
use crate::transform::{TransformSnapshot, TransformSource, TransformTarget};

/// Host-side lookup of transforms by handle. Adapters implement this and pass it into
/// `Engine::tick`.
pub trait TransformHost {
    type Target: TransformTarget + ?Sized;

    fn transform(&self, handle: &str) -> Option<&Self::Target>;
    fn transform_mut(&mut self, handle: &str) -> Option<&mut Self::Target>;
}

impl<T: TransformTarget> TransformHost for HashMap<String, T> {
    type Target = T;

    fn transform(&self, handle: &str) -> Option<&T> {
        self.get(handle)
    }

    fn transform_mut(&mut self, handle: &str) -> Option<&mut T> {
        self.get_mut(handle)
    }
}

/// A driven key plus the host handles of its driver and driven transforms.
///
/// Id and name are fixed at registration since the engine indexes by both.
#[derive(Debug)]
pub struct Entry {
    id: DrivenKeyId,
    name: String,
    pub driver: String,
    pub driven: String,
    pub enabled: bool,
    pub key: DrivenKey,
}

impl Entry {
    pub fn id(&self) -> DrivenKeyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Per-tick result for every enabled key, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub outcomes: Vec<(DrivenKeyId, TickOutcome)>,
}

impl TickReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_applied()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (DrivenKeyId, &SkipReason)> {
        self.outcomes.iter().filter_map(|(id, o)| match o {
            TickOutcome::Skipped(reason) => Some((*id, reason)),
            TickOutcome::Applied { .. } => None,
        })
    }

    pub fn get(&self, id: DrivenKeyId) -> Option<&TickOutcome> {
        self.outcomes
            .iter()
            .find_map(|(i, o)| if *i == id { Some(o) } else { None })
    }
}

#[derive(Debug, Default)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    entries: Vec<Entry>,
    by_name: HashMap<String, DrivenKeyId>,
}

impl Engine {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register an existing driven key. A later key with the same name shadows the earlier
    /// one for `find`.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        driver: impl Into<String>,
        driven: impl Into<String>,
        key: DrivenKey,
    ) -> DrivenKeyId {
        let id = self.ids.alloc_key();
        let name = name.into();
        if let Some(prev) = self.by_name.insert(name.clone(), id) {
            warn!("driven key name '{name}' reused; {prev:?} is no longer findable by name");
        }
        self.entries.push(Entry {
            id,
            name,
            driver: driver.into(),
            driven: driven.into(),
            enabled: true,
            key,
        });
        id
    }

    /// Build a driven key with the engine's config and register it.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        driver: impl Into<String>,
        driven: impl Into<String>,
        channels: ChannelConfig,
        curve: Curve,
    ) -> DrivenKeyId {
        let key = DrivenKey::new(channels, curve).with_config(self.cfg.clone());
        self.add(name, driver, driven, key)
    }

    pub fn remove(&mut self, id: DrivenKeyId) -> Option<DrivenKey> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(idx);
        if self.by_name.get(&entry.name) == Some(&id) {
            self.by_name.remove(&entry.name);
        }
        Some(entry.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: DrivenKeyId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_mut(&mut self, id: DrivenKeyId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn get(&self, id: DrivenKeyId) -> Option<&DrivenKey> {
        self.entry(id).map(|e| &e.key)
    }

    pub fn get_mut(&mut self, id: DrivenKeyId) -> Option<&mut DrivenKey> {
        self.entry_mut(id).map(|e| &mut e.key)
    }

    pub fn find(&self, name: &str) -> Option<DrivenKeyId> {
        self.by_name.get(name).copied()
    }

    pub fn set_enabled(&mut self, id: DrivenKeyId, enabled: bool) -> bool {
        match self.entry_mut(id) {
            Some(e) => {
                e.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Activate every key that has not been activated since it was added or reset. Keys
    /// loaded with a stored baseline keep it but still get their keyframes padded.
    /// Returns the number of keys activated by this call.
    pub fn activate_all<H: TransformHost + ?Sized>(&mut self, host: &H) -> usize {
        let mut activated = 0;
        for entry in self.entries.iter_mut() {
            if entry.key.is_prepared() {
                continue;
            }
            if activate_entry(entry, host).is_ok() {
                activated += 1;
            }
        }
        activated
    }

    /// Update every enabled key once. Keys not yet activated are activated first.
    pub fn tick<H: TransformHost + ?Sized>(&mut self, host: &mut H) -> TickReport {
        let mut report = TickReport {
            outcomes: Vec::with_capacity(self.entries.len()),
        };
        for entry in self.entries.iter_mut().filter(|e| e.enabled) {
            let outcome = tick_entry(entry, host);
            report.outcomes.push((entry.id, outcome));
        }
        report
    }
}

fn read_snapshot<H: TransformHost + ?Sized>(
    host: &H,
    handle: &str,
    key_name: &str,
) -> Result<TransformSnapshot, SkipReason> {
    match host.transform(handle) {
        Some(t) => Ok(t.snapshot()),
        None => {
            warn!("driven key '{key_name}': transform '{handle}' not found; skipping");
            Err(SkipReason::MissingTransform(handle.to_string()))
        }
    }
}

fn activate_entry<H: TransformHost + ?Sized>(entry: &mut Entry, host: &H) -> Result<(), SkipReason> {
    let driver = read_snapshot(host, &entry.driver, &entry.name)?;
    let driven = read_snapshot(host, &entry.driven, &entry.name)?;
    entry.key.activate(&driver, &driven);
    Ok(())
}

fn tick_entry<H: TransformHost + ?Sized>(entry: &mut Entry, host: &mut H) -> TickOutcome {
    if !entry.key.is_prepared() {
        if let Err(reason) = activate_entry(entry, &*host) {
            return TickOutcome::Skipped(reason);
        }
    }
    // copy the driver first so driver and driven may share a handle
    let driver = match read_snapshot(&*host, &entry.driver, &entry.name) {
        Ok(s) => s,
        Err(reason) => return TickOutcome::Skipped(reason),
    };
    match host.transform_mut(&entry.driven) {
        Some(driven) => entry.key.tick(&driver, driven),
        None => {
            warn!(
                "driven key '{}': transform '{}' not found; skipping",
                entry.name, entry.driven
            );
            TickOutcome::Skipped(SkipReason::MissingTransform(entry.driven.clone()))
        }
    }
}
