//! cortexvis: scalar overlay coloring for cortical-surface meshes.
//!
//! Scalars (curvature, thickness, labels, ...) are mapped to per-vertex
//! colors through named colormaps, and a colorbar plus a histogram are
//! derived from the same colormap and range so that the legend always
//! agrees with the mesh.
//!
//! # Quick Start
//!
//! ```no_run
//! use cortexvis::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut viewer = Viewer::new(Options::default())?;
//!     viewer.load_scalars("thickness", vec![1.2, 2.5, 3.1, 4.0], 4)?;
//!     viewer.set_colormap("jet")?;
//!     let vis = viewer.apply_range(2.0, 3.5)?;
//!     vis.colorbar.save_png("colorbar.png")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Colormaps
//!
//! - [`ColorRamp`]: continuous gradient; `viridis`, `jet`, `plasma` and
//!   `grayscale` are built in
//! - [`DiscreteColorMap`]: user-authored `[min, max] -> color` ranges,
//!   edited through a [`ColormapEditor`] and persisted in a [`KeyValueStore`]

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod editor;
mod overlay;
mod viewer;

pub use cortexvis_core::{
    colormap_key, discrete, hex_to_rgb01, rgb_to_bytes, Asset, AssetRecord, ColorMapEntry,
    ColorMapKind, ColorMapRef, ColorMapRegistry, ColorRamp, CortexvisError, DiscreteColorMap,
    FileStore, HexColor, KeyValueStore, MemoryStore, Options, Range, Result, ValueRange, Vec3,
    BUILTIN_COLORMAPS, DEFAULT_RAMP, PREVIEW_SAMPLES,
};
pub use cortexvis_render::{
    Bucket, ColorbarLegend, ColorbarRenderer, Histogram, HistogramBinner, PixelBuffer, Tick,
    BACKGROUND_LABEL,
};

pub use editor::{ColormapEditor, DEFAULT_EDITOR_NAME};
pub use overlay::ScalarOverlay;
pub use viewer::{Viewer, Visualization};

/// Installs an `env_logger` logger (controlled by `RUST_LOG`).
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
