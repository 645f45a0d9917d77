//! Histogram binning colored consistently with the active colormap.
//!
//! Bucket populations always follow the true data range; bucket colors
//! follow the range currently displayed on the mesh.

use cortexvis_core::{
    ColorMapKind, ColorMapRegistry, ColorRamp, DiscreteColorMap, Options, Result, ValueRange,
    Vec3,
};

/// Default number of buckets for continuous colormaps.
pub const DEFAULT_BINS: usize = 50;

/// Label of the bucket collecting values outside every discrete range.
pub const BACKGROUND_LABEL: &str = "out of range";

/// A histogram bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Bucket center; `None` for the discrete background bucket.
    pub center: Option<f32>,
    pub count: usize,
    pub color: Vec3,
    pub label: String,
}

/// Buckets for one scalar field and colormap.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub kind: ColorMapKind,
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    /// Number of values that landed in a bucket.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.count).collect()
    }
}

/// Bins scalar values for display.
#[derive(Debug, Clone)]
pub struct HistogramBinner {
    nbins: usize,
    precision: usize,
}

impl Default for HistogramBinner {
    fn default() -> Self {
        Self {
            nbins: DEFAULT_BINS,
            precision: 2,
        }
    }
}

impl HistogramBinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &Options) -> Self {
        Self {
            nbins: options.histogram_bins.max(1),
            precision: options.label_precision,
        }
    }

    /// Sets the number of continuous buckets (at least one).
    pub fn with_bins(mut self, nbins: usize) -> Self {
        self.nbins = nbins.max(1);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Bins `values` for `colormap_name`, dispatching on the registry's kind.
    pub fn bin(
        &self,
        values: &[f32],
        registry: &ColorMapRegistry,
        colormap_name: &str,
        true_range: ValueRange,
        display_range: ValueRange,
    ) -> Result<Histogram> {
        let kind = registry.resolve_kind(colormap_name);
        let buckets = match kind {
            ColorMapKind::Continuous => self.bin_continuous(
                values,
                registry.ramp(colormap_name),
                true_range,
                display_range,
            )?,
            ColorMapKind::Discrete => self.bin_discrete(values, registry.discrete(colormap_name)?),
        };
        Ok(Histogram { kind, buckets })
    }

    /// Equal-width buckets over `true_range`.
    ///
    /// A value maps to `floor((v - min) / width)`; only indices in
    /// `[0, nbins)` are counted, so a value equal to `true_range.max` is
    /// dropped. Non-finite values are dropped too.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn bin_continuous(
        &self,
        values: &[f32],
        ramp: &ColorRamp,
        true_range: ValueRange,
        display_range: ValueRange,
    ) -> Result<Vec<Bucket>> {
        true_range.validate()?;
        display_range.validate()?;

        // f64 keeps `max` landing exactly on index `nbins`.
        let lo = f64::from(true_range.min);
        let span = f64::from(true_range.max) - lo;
        let n = self.nbins as f64;

        let mut counts = vec![0usize; self.nbins];
        for &v in values {
            let index = ((f64::from(v) - lo) * n / span).floor();
            if index >= 0.0 && index < n {
                counts[index as usize] += 1;
            }
        }

        let width = span / n;
        let buckets = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let center = (lo + width * (i as f64 + 0.5)) as f32;
                let color = ramp.evaluate(
                    &[display_range.clamp(center)],
                    display_range.min,
                    display_range.max,
                )[0];
                Bucket {
                    center: Some(center),
                    count,
                    color,
                    label: format!("{center:.prec$}", prec = self.precision),
                }
            })
            .collect();
        Ok(buckets)
    }

    /// One bucket per range of `map`, plus a trailing background bucket.
    pub fn bin_discrete(&self, values: &[f32], map: &DiscreteColorMap) -> Vec<Bucket> {
        let ranges = map.ranges();
        let mut counts = vec![0usize; ranges.len() + 1];
        for &v in values {
            let slot = map.find_range(v).unwrap_or(ranges.len());
            counts[slot] += 1;
        }

        let mut buckets: Vec<Bucket> = ranges
            .iter()
            .zip(&counts)
            .map(|(r, &count)| Bucket {
                center: Some((r.min + r.max) / 2.0),
                count,
                color: r.color.to_rgb01(),
                label: format!(
                    "{min:.prec$}–{max:.prec$}",
                    min = r.min,
                    max = r.max,
                    prec = self.precision
                ),
            })
            .collect();
        buckets.push(Bucket {
            center: None,
            count: counts[ranges.len()],
            color: map.background().to_rgb01(),
            label: BACKGROUND_LABEL.to_string(),
        });
        buckets
    }
}
