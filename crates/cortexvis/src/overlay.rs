//! Scalar overlays: one value per mesh vertex, colored through a named colormap.

use cortexvis_core::{ColorMapRegistry, CortexvisError, Result, ValueRange};
use glam::Vec3;

/// A per-vertex scalar field with its colormap and displayed range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarOverlay {
    name: String,
    values: Vec<f32>,
    colormap_name: String,
    true_range: ValueRange,
    display_range: ValueRange,
}

impl ScalarOverlay {
    /// Creates an overlay colored with `viridis` over the data range.
    ///
    /// Constant data gets a unit-wide range starting at its value, matching
    /// how ramps treat degenerate ranges.
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Result<Self> {
        let name = name.into();
        let data = ValueRange::from_data(&values).ok_or_else(|| {
            CortexvisError::Validation(format!("overlay '{name}' has no finite values"))
        })?;
        let true_range = if data.min < data.max {
            data
        } else {
            ValueRange {
                min: data.min,
                max: data.min + 1.0,
            }
        };

        Ok(Self {
            name,
            values,
            colormap_name: "viridis".to_string(),
            true_range,
            display_range: true_range,
        })
    }

    /// Sets the colormap (builder form).
    #[must_use]
    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap_name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scalar values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the colormap name.
    pub fn colormap_name(&self) -> &str {
        &self.colormap_name
    }

    /// Sets the colormap name.
    pub fn set_colormap(&mut self, name: impl Into<String>) {
        self.colormap_name = name.into();
    }

    /// Data range the histogram is binned over.
    pub fn true_range(&self) -> ValueRange {
        self.true_range
    }

    /// Range the colormap is stretched over.
    pub fn display_range(&self) -> ValueRange {
        self.display_range
    }

    /// Sets the displayed sub-range; rejected ranges leave it unchanged.
    pub fn set_display_range(&mut self, min: f32, max: f32) -> Result<()> {
        self.display_range = ValueRange::new(min, max)?;
        Ok(())
    }

    /// Displays the full data range again.
    pub fn reset_range(&mut self) {
        self.display_range = self.true_range;
    }

    /// Maps scalar values to colors using the colormap.
    pub fn compute_colors(&self, registry: &ColorMapRegistry) -> Result<Vec<Vec3>> {
        Ok(registry
            .get(&self.colormap_name)?
            .evaluate(&self.values, self.display_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_data_range() {
        let overlay = ScalarOverlay::new("curv", vec![-0.5, 0.0, 1.5]).unwrap();
        assert_eq!(overlay.true_range(), ValueRange { min: -0.5, max: 1.5 });
        assert_eq!(overlay.display_range(), overlay.true_range());
        assert_eq!(overlay.colormap_name(), "viridis");
    }

    #[test]
    fn test_constant_data_gets_unit_range() {
        let overlay = ScalarOverlay::new("mask", vec![3.0; 4]).unwrap();
        assert_eq!(overlay.true_range(), ValueRange { min: 3.0, max: 4.0 });
    }

    #[test]
    fn test_no_finite_values_rejected() {
        assert!(ScalarOverlay::new("empty", vec![]).is_err());
        assert!(ScalarOverlay::new("nan", vec![f32::NAN]).is_err());
    }

    #[test]
    fn test_display_range_validation() {
        let mut overlay = ScalarOverlay::new("curv", vec![0.0, 10.0]).unwrap();
        overlay.set_display_range(2.0, 4.0).unwrap();
        assert!(overlay.set_display_range(5.0, 5.0).is_err());
        assert_eq!(overlay.display_range(), ValueRange { min: 2.0, max: 4.0 });
        overlay.reset_range();
        assert_eq!(overlay.display_range(), ValueRange { min: 0.0, max: 10.0 });
    }

    #[test]
    fn test_compute_colors_uses_display_range() {
        let registry = ColorMapRegistry::new();
        let mut overlay = ScalarOverlay::new("curv", vec![0.0, 5.0, 10.0])
            .unwrap()
            .with_colormap("grayscale");
        overlay.set_display_range(0.0, 5.0).unwrap();
        let colors = overlay.compute_colors(&registry).unwrap();
        assert_eq!(colors, vec![Vec3::ZERO, Vec3::ONE, Vec3::ONE]);
    }
}
