//! Named colormap registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::color_ramp::{ColorRamp, DEFAULT_RAMP, GRAYSCALE, JET, PLASMA, VIRIDIS};
use crate::discrete::{self, DiscreteColorMap};
use crate::error::{CortexvisError, Result};
use crate::persistence::{colormap_key, KeyValueStore, MemoryStore};
use crate::value_range::ValueRange;
use glam::Vec3;

/// Names of the ramps registered by [`ColorMapRegistry::new`].
pub const BUILTIN_COLORMAPS: [&str; 4] = ["viridis", "jet", "plasma", "grayscale"];

/// Whether a colormap interpolates or looks values up by range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMapKind {
    Continuous,
    Discrete,
}

/// A registered colormap.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMapEntry {
    Continuous(ColorRamp),
    Discrete(DiscreteColorMap),
}

impl ColorMapEntry {
    pub fn kind(&self) -> ColorMapKind {
        match self {
            Self::Continuous(_) => ColorMapKind::Continuous,
            Self::Discrete(_) => ColorMapKind::Discrete,
        }
    }

    /// Borrowed view of the entry.
    pub fn as_view(&self) -> ColorMapRef<'_> {
        match self {
            Self::Continuous(ramp) => ColorMapRef::Continuous(ramp),
            Self::Discrete(map) => ColorMapRef::Discrete(map),
        }
    }
}

/// A colormap borrowed from the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMapRef<'a> {
    Continuous(&'a ColorRamp),
    Discrete(&'a DiscreteColorMap),
}

impl ColorMapRef<'_> {
    pub fn kind(&self) -> ColorMapKind {
        match self {
            Self::Continuous(_) => ColorMapKind::Continuous,
            Self::Discrete(_) => ColorMapKind::Discrete,
        }
    }

    /// Colors `values` over `range`. Discrete colormaps ignore the range.
    pub fn evaluate(&self, values: &[f32], range: ValueRange) -> Vec<Vec3> {
        match self {
            Self::Continuous(ramp) => ramp.evaluate(values, range.min, range.max),
            Self::Discrete(map) => map.evaluate(values),
        }
    }
}

impl From<ColorRamp> for ColorMapEntry {
    fn from(ramp: ColorRamp) -> Self {
        Self::Continuous(ramp)
    }
}

impl From<DiscreteColorMap> for ColorMapEntry {
    fn from(map: DiscreteColorMap) -> Self {
        Self::Discrete(map)
    }
}

/// Registry mapping colormap names to ramps or discrete colormaps.
///
/// Built-in ramps are registered on construction. Custom discrete
/// colormaps can be registered, persisted to the attached
/// [`KeyValueStore`], restored and unregistered.
pub struct ColorMapRegistry {
    entries: HashMap<String, ColorMapEntry>,
    fallback: ColorRamp,
    store: Box<dyn KeyValueStore>,
}

impl Default for ColorMapRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMapRegistry {
    /// Creates a registry with the built-in ramps and an in-memory store.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Creates a registry with the built-in ramps persisting to `store`.
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
            fallback: ColorRamp::viridis(),
            store,
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        for (name, table) in [
            ("viridis", &VIRIDIS[..]),
            ("jet", &JET[..]),
            ("plasma", &PLASMA[..]),
            ("grayscale", &GRAYSCALE[..]),
        ] {
            self.entries.insert(
                name.to_string(),
                ColorMapEntry::Continuous(ColorRamp::from_table(name, table)),
            );
        }
    }

    /// Registers a colormap under `name`, replacing any previous entry.
    ///
    /// Built-in names can be overwritten; callers should avoid it.
    pub fn register(&mut self, name: impl Into<String>, entry: impl Into<ColorMapEntry>) {
        let name = name.into();
        let entry = entry.into();
        if Self::is_builtin(&name) {
            log::debug!("overwriting built-in colormap '{name}'");
        }
        log::debug!("registered {:?} colormap '{name}'", entry.kind());
        self.entries.insert(name, entry);
    }

    /// Removes a discrete colormap. Continuous entries cannot be removed.
    pub fn unregister(&mut self, name: &str) -> Result<DiscreteColorMap> {
        match self.entries.get(name).map(ColorMapEntry::kind) {
            None => Err(CortexvisError::UnknownColorMap(name.to_string())),
            Some(ColorMapKind::Continuous) => Err(CortexvisError::NotDiscrete(name.to_string())),
            Some(ColorMapKind::Discrete) => match self.entries.remove(name) {
                Some(ColorMapEntry::Discrete(map)) => {
                    log::debug!("unregistered colormap '{name}'");
                    Ok(map)
                }
                _ => Err(CortexvisError::UnknownColorMap(name.to_string())),
            },
        }
    }

    /// Kind of `name`: discrete when registered as such or persisted in the
    /// store, continuous otherwise (unknown names included).
    pub fn resolve_kind(&self, name: &str) -> ColorMapKind {
        match self.entries.get(name) {
            Some(entry) => entry.kind(),
            None if self.store.contains(&colormap_key(name)) => ColorMapKind::Discrete,
            None => ColorMapKind::Continuous,
        }
    }

    /// Looks up a colormap.
    ///
    /// Unknown continuous names fall back to the default ramp with a
    /// warning. A discrete name that is only persisted must be [`load`]ed
    /// first and is reported as unknown.
    ///
    /// [`load`]: Self::load
    pub fn get(&self, name: &str) -> Result<ColorMapRef<'_>> {
        if let Some(entry) = self.entries.get(name) {
            return Ok(entry.as_view());
        }
        match self.resolve_kind(name) {
            ColorMapKind::Discrete => Err(CortexvisError::UnknownColorMap(name.to_string())),
            ColorMapKind::Continuous => {
                log::warn!("colormap '{name}' not found, falling back to {DEFAULT_RAMP}");
                Ok(ColorMapRef::Continuous(&self.fallback))
            }
        }
    }

    /// Looks up a continuous ramp, falling back to the default ramp when
    /// `name` is not a registered ramp.
    pub fn ramp(&self, name: &str) -> &ColorRamp {
        match self.entries.get(name) {
            Some(ColorMapEntry::Continuous(ramp)) => ramp,
            _ => {
                log::warn!("color ramp '{name}' not found, falling back to {DEFAULT_RAMP}");
                &self.fallback
            }
        }
    }

    /// Looks up a discrete colormap.
    pub fn discrete(&self, name: &str) -> Result<&DiscreteColorMap> {
        match self.get(name)? {
            ColorMapRef::Discrete(map) => Ok(map),
            ColorMapRef::Continuous(_) => Err(CortexvisError::NotDiscrete(name.to_string())),
        }
    }

    /// Persists the ranges of a registered discrete colormap.
    pub fn save(&mut self, name: &str) -> Result<()> {
        let blob = self.discrete(name)?.serialize()?;
        self.store.save(&colormap_key(name), &blob)?;
        log::debug!("saved colormap '{name}'");
        Ok(())
    }

    /// Restores a persisted discrete colormap and registers it.
    pub fn load(&mut self, name: &str, background: HexColor) -> Result<&DiscreteColorMap> {
        let blob = self
            .store
            .load(&colormap_key(name))?
            .ok_or_else(|| CortexvisError::UnknownColorMap(name.to_string()))?;
        let ranges = discrete::deserialize(&blob)?;
        let map = DiscreteColorMap::from_finalized(name, ranges, background)?;
        self.register(name, map);
        self.discrete(name)
    }

    /// Whether `name` is registered (persisted-only colormaps excluded).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` is one of the built-in ramps.
    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_COLORMAPS.contains(&name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}
