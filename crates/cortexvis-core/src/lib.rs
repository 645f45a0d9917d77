//! Core of cortexvis.
//!
//! This crate provides the colormap engine used to color scalar overlays on
//! cortical-surface meshes:
//! - [`ColorRamp`] for continuous, interpolated colormaps
//! - [`DiscreteColorMap`] and the [`discrete`] functions for user-authored range colormaps
//! - [`ColorMapRegistry`] for named lookup, persistence and restore
//! - [`Options`] and the error type shared by the other crates

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod color;
pub mod color_ramp;
pub mod discrete;
pub mod error;
pub mod options;
pub mod persistence;
pub mod registry;
pub mod value_range;

pub use asset::{Asset, AssetRecord};
pub use color::{hex_to_rgb01, rgb_to_bytes, HexColor};
pub use color_ramp::{ColorRamp, DEFAULT_RAMP};
pub use discrete::{DiscreteColorMap, Range, PREVIEW_SAMPLES};
pub use error::{CortexvisError, Result};
pub use options::Options;
pub use persistence::{colormap_key, FileStore, KeyValueStore, MemoryStore};
pub use registry::{ColorMapEntry, ColorMapKind, ColorMapRef, ColorMapRegistry, BUILTIN_COLORMAPS};
pub use value_range::ValueRange;

// Re-export glam types for convenience
pub use glam::Vec3;
