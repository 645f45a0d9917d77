//! Colorbar rendering.
//!
//! Continuous colormaps are drawn as a normalized `0..1` sweep from bottom to
//! top and labelled with real values. Discrete colormaps are drawn as one
//! band per range, placed by the range's position inside the value range.

use cortexvis_core::{
    ColorMapKind, ColorMapRegistry, ColorRamp, DiscreteColorMap, Options, Result, ValueRange,
};

use crate::pixel_buffer::PixelBuffer;

/// Default number of intervals between continuous ticks.
pub const DEFAULT_STEPS: usize = 10;

/// A labelled tick along the colorbar.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data value at this tick.
    pub value: f32,
    /// Formatted value.
    pub label: String,
    /// Vertical offset from the top of the bar, in pixels.
    pub position: f32,
}

/// Everything besides pixels that a legend needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarLegend {
    pub kind: ColorMapKind,
    pub range: ValueRange,
    pub ticks: Vec<Tick>,
}

/// Draws colorbars into a [`PixelBuffer`].
#[derive(Debug, Clone)]
pub struct ColorbarRenderer {
    steps: usize,
    precision: usize,
}

impl Default for ColorbarRenderer {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            precision: 2,
        }
    }
}

impl ColorbarRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &Options) -> Self {
        Self {
            steps: options.colorbar_steps.max(1),
            precision: options.label_precision,
        }
    }

    /// Sets the number of tick intervals (at least one).
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps.max(1);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Renders `colormap_name` over `range` into `target`.
    ///
    /// The registry decides between the continuous and the discrete path.
    /// On error `target` is left untouched.
    pub fn render(
        &self,
        target: &mut PixelBuffer,
        registry: &ColorMapRegistry,
        colormap_name: &str,
        range: ValueRange,
    ) -> Result<ColorbarLegend> {
        range.validate()?;
        let kind = registry.resolve_kind(colormap_name);
        log::debug!(
            "colorbar '{colormap_name}' ({kind:?}) over [{}, {}], {}x{}",
            range.min,
            range.max,
            target.width(),
            target.height()
        );
        match kind {
            ColorMapKind::Continuous => {
                Ok(self.render_continuous(target, registry.ramp(colormap_name), range))
            }
            ColorMapKind::Discrete => {
                let map = registry.discrete(colormap_name)?;
                Ok(self.render_discrete(target, map, range))
            }
        }
    }

    /// Fills row `y` (counted from the bottom) with the ramp at `t = y / H`.
    #[allow(clippy::cast_precision_loss)]
    pub fn render_continuous(
        &self,
        target: &mut PixelBuffer,
        ramp: &ColorRamp,
        range: ValueRange,
    ) -> ColorbarLegend {
        let h = target.height();
        for y in 0..h {
            let t = y as f32 / h as f32;
            target.fill_row(h - 1 - y, ramp.sample(t));
        }

        let ticks = (0..=self.steps)
            .map(|i| {
                let frac = i as f32 / self.steps as f32;
                let value = range.max - frac * range.span();
                Tick {
                    value,
                    label: self.format(value),
                    position: frac * h as f32,
                }
            })
            .collect();

        ColorbarLegend {
            kind: ColorMapKind::Continuous,
            range,
            ticks,
        }
    }

    /// Paints one band per range; uncovered rows get the background color.
    ///
    /// Only boundaries inside `range` get a tick.
    pub fn render_discrete(
        &self,
        target: &mut PixelBuffer,
        map: &DiscreteColorMap,
        range: ValueRange,
    ) -> ColorbarLegend {
        let h = target.height();
        target.fill(map.background().to_rgb01());

        // Reverse order so the first matching range ends up on top.
        for r in map.ranges().iter().rev() {
            let start = pixel_row(y_of(r.max, range, h), h);
            let end = pixel_row(y_of(r.min, range, h), h);
            target.fill_rows(start, end, r.color.to_rgb01());
        }

        // Boundaries outside the displayed range would land off the bar.
        let mut seen: Vec<f32> = Vec::new();
        let mut ticks = Vec::new();
        for r in map.ranges() {
            for value in [r.min, r.max] {
                if range.contains(value) && !seen.contains(&value) {
                    seen.push(value);
                    ticks.push(Tick {
                        value,
                        label: self.format(value),
                        position: y_of(value, range, h),
                    });
                }
            }
        }

        ColorbarLegend {
            kind: ColorMapKind::Discrete,
            range,
            ticks,
        }
    }

    /// Horizontal preview strip of a discrete colormap, one lookup per column.
    #[allow(clippy::cast_precision_loss)]
    pub fn render_preview_strip(
        &self,
        target: &mut PixelBuffer,
        map: &DiscreteColorMap,
        domain: ValueRange,
    ) {
        let w = target.width();
        for x in 0..w {
            let t = x as f32 / w as f32;
            target.fill_column(x, map.color_of(domain.min + t * domain.span()));
        }
    }

    fn format(&self, value: f32) -> String {
        format!("{value:.prec$}", prec = self.precision)
    }
}

/// Offset from the top of the bar for value `v`.
#[allow(clippy::cast_precision_loss)]
fn y_of(v: f32, range: ValueRange, height: u32) -> f32 {
    height as f32 * (1.0 - (v - range.min) / range.span())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pixel_row(y: f32, height: u32) -> u32 {
    y.round().clamp(0.0, height as f32) as u32
}
