//! The viewer: owns the registry and keeps mesh colors, colorbar and
//! histogram in sync with the active overlay.

use cortexvis_core::{
    ColorMapRegistry, CortexvisError, KeyValueStore, Options, Result, ValueRange,
};
use cortexvis_render::{ColorbarLegend, ColorbarRenderer, Histogram, HistogramBinner, PixelBuffer};
use glam::Vec3;

use crate::editor::ColormapEditor;
use crate::overlay::ScalarOverlay;

/// Everything drawn for the active overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    /// One color per mesh vertex.
    pub vertex_colors: Vec<Vec3>,
    pub colorbar: PixelBuffer,
    pub legend: ColorbarLegend,
    pub histogram: Histogram,
}

/// Composition root for scalar visualization.
pub struct Viewer {
    options: Options,
    registry: ColorMapRegistry,
    colorbar: ColorbarRenderer,
    binner: HistogramBinner,
    overlay: Option<ScalarOverlay>,
    visualization: Option<Visualization>,
}

impl Viewer {
    /// Creates a viewer persisting custom colormaps in memory.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_registry(options, ColorMapRegistry::new())
    }

    /// Creates a viewer persisting custom colormaps to `store`.
    pub fn with_store(options: Options, store: Box<dyn KeyValueStore>) -> Result<Self> {
        Self::with_registry(options, ColorMapRegistry::with_store(store))
    }

    fn with_registry(options: Options, registry: ColorMapRegistry) -> Result<Self> {
        options.validate()?;
        log::info!(
            "cortexvis viewer created (default colormap '{}')",
            options.default_colormap
        );
        Ok(Self {
            colorbar: ColorbarRenderer::from_options(&options),
            binner: HistogramBinner::from_options(&options),
            options,
            registry,
            overlay: None,
            visualization: None,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &ColorMapRegistry {
        &self.registry
    }

    /// Mutable registry access. Call [`refresh`](Self::refresh) afterwards
    /// if the active colormap was changed.
    pub fn registry_mut(&mut self) -> &mut ColorMapRegistry {
        &mut self.registry
    }

    pub fn overlay(&self) -> Option<&ScalarOverlay> {
        self.overlay.as_ref()
    }

    /// The last successfully committed visualization.
    pub fn visualization(&self) -> Option<&Visualization> {
        self.visualization.as_ref()
    }

    /// Starts a colormap authoring session configured from the viewer options.
    pub fn editor(&self, name: impl Into<String>) -> ColormapEditor {
        ColormapEditor::from_options(name, &self.options)
    }

    /// Builds an overlay from raw scalars with the default colormap and shows it.
    pub fn load_scalars(
        &mut self,
        name: impl Into<String>,
        values: Vec<f32>,
        vertex_count: usize,
    ) -> Result<&Visualization> {
        let overlay =
            ScalarOverlay::new(name, values)?.with_colormap(self.options.default_colormap.clone());
        self.set_overlay(overlay, vertex_count)
    }

    /// Replaces the active overlay. The overlay needs one value per vertex.
    pub fn set_overlay(
        &mut self,
        overlay: ScalarOverlay,
        vertex_count: usize,
    ) -> Result<&Visualization> {
        if overlay.len() != vertex_count {
            return Err(CortexvisError::SizeMismatch {
                expected: vertex_count,
                actual: overlay.len(),
            });
        }
        log::debug!(
            "overlay '{}' with {} values, range [{}, {}]",
            overlay.name(),
            overlay.len(),
            overlay.true_range().min,
            overlay.true_range().max
        );
        self.commit(overlay)
    }

    /// Switches the colormap of the active overlay.
    pub fn set_colormap(&mut self, name: &str) -> Result<&Visualization> {
        let mut overlay = self.active()?.clone();
        overlay.set_colormap(name);
        self.commit(overlay)
    }

    /// Stretches the colormap over `[min, max]`.
    pub fn apply_range(&mut self, min: f32, max: f32) -> Result<&Visualization> {
        let mut overlay = self.active()?.clone();
        overlay.set_display_range(min, max)?;
        self.commit(overlay)
    }

    /// Displays the full data range again.
    pub fn reset_range(&mut self) -> Result<&Visualization> {
        let mut overlay = self.active()?.clone();
        overlay.reset_range();
        self.commit(overlay)
    }

    /// Recomputes the visualization for the current overlay.
    pub fn refresh(&mut self) -> Result<&Visualization> {
        let overlay = self.active()?.clone();
        self.commit(overlay)
    }

    fn active(&self) -> Result<&ScalarOverlay> {
        self.overlay.as_ref().ok_or(CortexvisError::NoOverlay)
    }

    /// Renders `overlay` and, only if every step succeeds, makes it current.
    fn commit(&mut self, overlay: ScalarOverlay) -> Result<&Visualization> {
        let visualization = self.render(&overlay)?;
        self.overlay = Some(overlay);
        Ok(&*self.visualization.insert(visualization))
    }

    fn render(&self, overlay: &ScalarOverlay) -> Result<Visualization> {
        let name = overlay.colormap_name();
        let range = overlay.display_range();

        let vertex_colors = overlay.compute_colors(&self.registry)?;

        let mut colorbar =
            PixelBuffer::new(self.options.colorbar_width, self.options.colorbar_height);
        let legend = self
            .colorbar
            .render(&mut colorbar, &self.registry, name, range)?;

        let histogram = self.binner.bin(
            overlay.values(),
            &self.registry,
            name,
            overlay.true_range(),
            range,
        )?;

        Ok(Visualization {
            vertex_colors,
            colorbar,
            legend,
            histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortexvis_core::{ColorMapKind, HexColor};

    fn viewer() -> Viewer {
        Viewer::new(Options::default().with_colorbar_size(2, 20)).unwrap()
    }

    #[test]
    fn test_no_overlay() {
        let mut viewer = viewer();
        assert!(matches!(
            viewer.set_colormap("jet"),
            Err(CortexvisError::NoOverlay)
        ));
        assert!(matches!(viewer.refresh(), Err(CortexvisError::NoOverlay)));
        assert!(viewer.visualization().is_none());
    }

    #[test]
    fn test_size_mismatch() {
        let mut viewer = viewer();
        let overlay = ScalarOverlay::new("thickness", vec![1.0, 2.0]).unwrap();
        let err = viewer.set_overlay(overlay, 3).unwrap_err();
        assert!(matches!(
            err,
            CortexvisError::SizeMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(viewer.overlay().is_none());
    }

    #[test]
    fn test_load_uses_default_colormap() {
        let mut viewer =
            Viewer::new(Options::default().with_default_colormap("grayscale")).unwrap();
        let vis = viewer.load_scalars("curv", vec![0.0, 1.0], 2).unwrap();
        assert_eq!(vis.vertex_colors, vec![Vec3::ZERO, Vec3::ONE]);
        assert_eq!(vis.legend.kind, ColorMapKind::Continuous);
        assert_eq!(vis.histogram.buckets.len(), 50);
        assert_eq!(viewer.overlay().unwrap().colormap_name(), "grayscale");
    }

    #[test]
    fn test_editor_follows_options() {
        let options = Options::default()
            .with_preview_samples(12)
            .with_background_color(HexColor::new(1, 2, 3));
        let viewer = Viewer::new(options).unwrap();
        let editor = viewer.editor("bands");
        assert_eq!(editor.preview_samples(), 12);
        assert_eq!(editor.background(), HexColor::new(1, 2, 3));
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(Viewer::new(Options::default().with_histogram_bins(0)).is_err());
    }

    #[test]
    fn test_failed_range_keeps_previous_state() {
        let mut viewer = viewer();
        viewer.load_scalars("curv", vec![0.0, 5.0, 10.0], 3).unwrap();
        let before = viewer.visualization().cloned();

        assert!(viewer.apply_range(4.0, 4.0).is_err());
        assert_eq!(viewer.visualization().cloned(), before);
        assert_eq!(
            viewer.overlay().unwrap().display_range(),
            ValueRange { min: 0.0, max: 10.0 }
        );
    }
}
