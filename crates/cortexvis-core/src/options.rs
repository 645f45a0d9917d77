//! Configuration options for cortexvis.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::{CortexvisError, Result};

/// Visualization options shared by the colorbar, histogram and editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Colormap selected for a new overlay.
    pub default_colormap: String,

    /// Number of histogram buckets for continuous colormaps.
    pub histogram_bins: usize,

    /// Number of intervals between continuous colorbar ticks.
    pub colorbar_steps: usize,

    /// Samples in a discrete colormap preview.
    pub preview_samples: usize,

    /// Color of values outside every authored range.
    pub background_color: HexColor,

    /// Decimal places of tick and bucket labels.
    pub label_precision: usize,

    /// Colorbar width in pixels.
    pub colorbar_width: u32,

    /// Colorbar height in pixels.
    pub colorbar_height: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_colormap: "viridis".to_string(),
            histogram_bins: 50,
            colorbar_steps: 10,
            preview_samples: 100,
            background_color: HexColor::GRAY,
            label_precision: 2,
            colorbar_width: 30,
            colorbar_height: 256,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that every count and dimension is usable.
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, what: &str| {
            if ok {
                Ok(())
            } else {
                Err(CortexvisError::validation(format!("invalid option: {what}")))
            }
        };
        check(!self.default_colormap.is_empty(), "default_colormap is empty")?;
        check(self.histogram_bins > 0, "histogram_bins must be positive")?;
        check(self.colorbar_steps > 0, "colorbar_steps must be positive")?;
        check(self.preview_samples > 0, "preview_samples must be positive")?;
        check(self.label_precision <= 10, "label_precision must be at most 10")?;
        check(
            self.colorbar_width > 0 && self.colorbar_height > 0,
            "colorbar dimensions must be positive",
        )
    }

    pub fn with_default_colormap(mut self, name: impl Into<String>) -> Self {
        self.default_colormap = name.into();
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn with_colorbar_steps(mut self, steps: usize) -> Self {
        self.colorbar_steps = steps;
        self
    }

    pub fn with_preview_samples(mut self, samples: usize) -> Self {
        self.preview_samples = samples;
        self
    }

    pub fn with_background_color(mut self, color: HexColor) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_label_precision(mut self, precision: usize) -> Self {
        self.label_precision = precision;
        self
    }

    /// Sets the colorbar size in pixels.
    pub fn with_colorbar_size(mut self, width: u32, height: u32) -> Self {
        self.colorbar_width = width;
        self.colorbar_height = height;
        self
    }
}
