//! Authoring session for custom discrete colormaps.
//!
//! The editor holds ranges as authored. They are only finalized (sorted and
//! gap-filled) against a scalar domain when previewed or committed. A
//! committed map is persisted finalized, so restoring it through
//! [`ColorMapRegistry::load`] colors the mesh exactly as before.

use cortexvis_core::discrete::{self, Range};
use cortexvis_core::{
    colormap_key, ColorMapRegistry, CortexvisError, DiscreteColorMap, HexColor, Options, Result,
    ValueRange, PREVIEW_SAMPLES,
};
use cortexvis_render::{ColorbarRenderer, PixelBuffer};
use glam::Vec3;

use crate::viewer::{Viewer, Visualization};

/// Name given to a colormap that was never renamed.
pub const DEFAULT_EDITOR_NAME: &str = "custom";

/// Range list being edited, plus the color for uncovered values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColormapEditor {
    name: String,
    ranges: Vec<Range>,
    background: HexColor,
    preview_samples: usize,
}

impl Default for ColormapEditor {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR_NAME)
    }
}

impl ColormapEditor {
    /// Starts an empty session with a gray background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ranges: Vec::new(),
            background: HexColor::GRAY,
            preview_samples: PREVIEW_SAMPLES,
        }
    }

    /// Starts an empty session using the configured background color and
    /// preview resolution.
    pub fn from_options(name: impl Into<String>, options: &Options) -> Self {
        Self::new(name)
            .with_background(options.background_color)
            .with_preview_samples(options.preview_samples)
    }

    #[must_use]
    pub fn with_background(mut self, background: HexColor) -> Self {
        self.background = background;
        self
    }

    /// Sets the number of samples [`preview`](Self::preview) evaluates.
    #[must_use]
    pub fn with_preview_samples(mut self, samples: usize) -> Self {
        self.preview_samples = samples;
        self
    }

    pub fn preview_samples(&self) -> usize {
        self.preview_samples
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Ranges in authoring order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn set_background(&mut self, background: HexColor) {
        self.background = background;
    }

    /// Parses `hex` and sets it as the background color.
    pub fn set_background_hex(&mut self, hex: &str) -> Result<()> {
        self.background = HexColor::parse(hex)?;
        Ok(())
    }

    /// Appends `[min, max] -> hex`. Invalid input leaves the session unchanged.
    pub fn add_range(&mut self, min: f32, max: f32, hex: &str) -> Result<()> {
        let color = HexColor::parse(hex)?;
        self.add_range_color(min, max, color)
    }

    pub fn add_range_color(&mut self, min: f32, max: f32, color: HexColor) -> Result<()> {
        discrete::add_range(&mut self.ranges, min, max, color)
    }

    /// Removes and returns the range at `index`.
    pub fn remove_range(&mut self, index: usize) -> Result<Range> {
        discrete::remove_range(&mut self.ranges, index)
    }

    /// Recolors the range at `index`.
    pub fn set_color(&mut self, index: usize, hex: &str) -> Result<()> {
        let len = self.ranges.len();
        let color = HexColor::parse(hex)?;
        let range = self
            .ranges
            .get_mut(index)
            .ok_or(CortexvisError::IndexOutOfRange { index, len })?;
        range.color = color;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Finalizes the authored ranges over `domain`.
    pub fn build(&self, domain: ValueRange) -> Result<DiscreteColorMap> {
        domain.validate()?;
        DiscreteColorMap::new(self.name.as_str(), &self.ranges, domain, self.background)
    }

    /// Colors of [`preview_samples`](Self::preview_samples) evenly spaced
    /// points of `domain`.
    pub fn preview(&self, domain: ValueRange) -> Result<Vec<Vec3>> {
        self.preview_with(domain, self.preview_samples)
    }

    /// Colors of `sample_count` evenly spaced points of `domain`.
    pub fn preview_with(&self, domain: ValueRange, sample_count: usize) -> Result<Vec<Vec3>> {
        Ok(self.build(domain)?.sample_for_preview(domain, sample_count))
    }

    /// Draws the horizontal preview strip of the session into `target`.
    pub fn render_preview(&self, target: &mut PixelBuffer, domain: ValueRange) -> Result<()> {
        let map = self.build(domain)?;
        ColorbarRenderer::new().render_preview_strip(target, &map, domain);
        Ok(())
    }

    /// Persists the authored ranges under the session name, as a draft.
    ///
    /// Drafts are not gap-filled; [`commit`](Self::commit) overwrites them
    /// with the finalized map.
    pub fn save(&self, registry: &mut ColorMapRegistry) -> Result<()> {
        let blob = discrete::serialize(&self.ranges)?;
        registry.store_mut().save(&colormap_key(&self.name), &blob)?;
        log::debug!("saved {} authored ranges for '{}'", self.ranges.len(), self.name);
        Ok(())
    }

    /// Reopens a persisted colormap for editing.
    pub fn load(registry: &ColorMapRegistry, name: &str, background: HexColor) -> Result<Self> {
        let blob = registry
            .store()
            .load(&colormap_key(name))?
            .ok_or_else(|| CortexvisError::UnknownColorMap(name.to_string()))?;
        Ok(Self {
            ranges: discrete::deserialize(&blob)?,
            background,
            ..Self::new(name)
        })
    }

    /// Finalizes over the active overlay's data range, persists and
    /// registers the result, then shows it on the mesh.
    ///
    /// The finalized ranges are stored, not the authored ones. Nothing is
    /// registered if persisting fails.
    pub fn commit<'v>(&self, viewer: &'v mut Viewer) -> Result<&'v Visualization> {
        let domain = viewer
            .overlay()
            .ok_or(CortexvisError::NoOverlay)?
            .true_range();
        let map = self.build(domain)?;
        let blob = map.serialize()?;

        let registry = viewer.registry_mut();
        registry.store_mut().save(&colormap_key(&self.name), &blob)?;
        log::debug!("saved {} finalized ranges for '{}'", map.ranges().len(), self.name);
        registry.register(self.name.as_str(), map);

        viewer.set_colormap(&self.name)
    }
}
