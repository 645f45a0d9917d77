//! Legend rendering for cortexvis.
//!
//! This crate re-derives colors for the currently displayed range so the
//! legend stays consistent with the mesh:
//! - [`ColorbarRenderer`] draws gradients or discrete bands into a [`PixelBuffer`]
//! - [`HistogramBinner`] bins scalar data into colored [`Bucket`]s

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod colorbar;
pub mod histogram;
pub mod pixel_buffer;

pub use colorbar::{ColorbarLegend, ColorbarRenderer, Tick, DEFAULT_STEPS};
pub use histogram::{Bucket, Histogram, HistogramBinner, BACKGROUND_LABEL, DEFAULT_BINS};
pub use pixel_buffer::PixelBuffer;
