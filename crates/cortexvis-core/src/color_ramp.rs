//! Continuous color ramps.

use glam::Vec3;

use crate::error::{CortexvisError, Result};

/// Name of the ramp used when a continuous colormap name is unknown.
pub const DEFAULT_RAMP: &str = "viridis";

pub const VIRIDIS: [[f32; 3]; 11] = [
    [0.267, 0.005, 0.329],
    [0.283, 0.141, 0.458],
    [0.254, 0.265, 0.530],
    [0.207, 0.372, 0.553],
    [0.164, 0.471, 0.558],
    [0.128, 0.567, 0.551],
    [0.135, 0.659, 0.518],
    [0.267, 0.749, 0.441],
    [0.478, 0.821, 0.318],
    [0.741, 0.873, 0.150],
    [0.993, 0.906, 0.144],
];

pub const JET: [[f32; 3]; 5] = [
    [0.0, 0.0, 0.5],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
];

pub const PLASMA: [[f32; 3]; 7] = [
    [0.050, 0.030, 0.527],
    [0.292, 0.042, 0.635],
    [0.496, 0.135, 0.615],
    [0.678, 0.282, 0.518],
    [0.838, 0.429, 0.388],
    [0.954, 0.607, 0.208],
    [0.994, 0.789, 0.003],
];

pub const GRAYSCALE: [[f32; 3]; 2] = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

/// A continuous colormap: control points evenly spaced over `[0, 1]`,
/// linearly interpolated in between.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    name: String,
    colors: Vec<Vec3>,
}

impl ColorRamp {
    /// Creates a ramp from at least two control points with channels in `[0, 1]`.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Result<Self> {
        let name = name.into();
        if colors.len() < 2 {
            return Err(CortexvisError::validation(format!(
                "color ramp '{name}' needs at least 2 control points, got {}",
                colors.len()
            )));
        }
        if let Some(bad) = colors
            .iter()
            .find(|c| !c.is_finite() || c.min_element() < 0.0 || c.max_element() > 1.0)
        {
            return Err(CortexvisError::validation(format!(
                "color ramp '{name}' has control point {bad} outside [0, 1]"
            )));
        }
        Ok(Self { name, colors })
    }

    /// Builds one of the constant control-point tables.
    pub(crate) fn from_table(name: &str, table: &[[f32; 3]]) -> Self {
        Self {
            name: name.to_string(),
            colors: table.iter().map(|&c| Vec3::from_array(c)).collect(),
        }
    }

    /// The built-in `viridis` ramp.
    pub fn viridis() -> Self {
        Self::from_table("viridis", &VIRIDIS)
    }

    /// Ramp name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control points, first to last.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Samples the ramp at `t`, clamped to `[0, 1]`. NaN samples the first color.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.colors.len() - 1;
        let scaled = t * last as f32;
        let idx = (scaled.floor() as usize).min(last);
        let next = (idx + 1).min(last);
        let frac = scaled - idx as f32;

        let (a, b) = (self.colors[idx], self.colors[next]);
        (a + (b - a) * frac).clamp(Vec3::ZERO, Vec3::ONE)
    }

    /// Maps every value through the ramp over `[range_min, range_max]`.
    ///
    /// A degenerate range (`range_min == range_max`) is treated as a unit
    /// span starting at `range_min`, so `range_min` itself maps to the first
    /// control point.
    #[allow(clippy::float_cmp)]
    pub fn evaluate(&self, values: &[f32], range_min: f32, range_max: f32) -> Vec<Vec3> {
        let span = range_max - range_min;
        let span = if span == 0.0 { 1.0 } else { span };

        values
            .iter()
            .map(|&v| self.sample((v - range_min) / span))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-6), "{a} != {b}");
    }

    fn jet() -> ColorRamp {
        ColorRamp::from_table("jet", &JET)
    }

    #[test]
    fn test_jet_endpoints_and_midpoint() {
        let ramp = jet();
        assert_close(ramp.evaluate(&[0.0], 0.0, 1.0)[0], Vec3::new(0.0, 0.0, 0.5));
        assert_close(ramp.evaluate(&[1.0], 0.0, 1.0)[0], Vec3::new(1.0, 0.0, 0.0));
        assert_close(ramp.evaluate(&[0.5], 0.0, 1.0)[0], Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_interpolates_between_control_points() {
        let ramp = ColorRamp::from_table("grayscale", &GRAYSCALE);
        let colors = ramp.evaluate(&[2.5, 7.5], 0.0, 10.0);
        assert_close(colors[0], Vec3::splat(0.25));
        assert_close(colors[1], Vec3::splat(0.75));
    }

    #[test]
    fn test_out_of_range_clamps_to_endpoints() {
        let ramp = jet();
        let colors = ramp.evaluate(&[-5.0, 42.0], 0.0, 1.0);
        assert_eq!(colors[0], ramp.colors()[0]);
        assert_eq!(colors[1], ramp.colors()[4]);
    }

    #[test]
    fn test_degenerate_range_uses_unit_span() {
        let ramp = jet();
        let colors = ramp.evaluate(&[3.0, 3.5], 3.0, 3.0);
        assert_eq!(colors[0], Vec3::new(0.0, 0.0, 0.5));
        assert_close(colors[1], Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_nan_maps_to_first_color() {
        let ramp = jet();
        assert_eq!(ramp.sample(f32::NAN), ramp.colors()[0]);
    }

    #[test]
    fn test_new_validates_control_points() {
        assert!(ColorRamp::new("one", vec![Vec3::ONE]).is_err());
        assert!(ColorRamp::new("bright", vec![Vec3::ZERO, Vec3::splat(2.0)]).is_err());
        assert!(ColorRamp::new("ok", vec![Vec3::ZERO, Vec3::ONE]).is_ok());
    }

    proptest! {
        #[test]
        fn prop_samples_stay_in_unit_cube(v in -1.0e3f32..1.0e3, lo in -100.0f32..100.0, width in 0.001f32..100.0) {
            let hi = lo + width;
            for table in [&VIRIDIS[..], &JET[..], &PLASMA[..], &GRAYSCALE[..]] {
                let ramp = ColorRamp::from_table("t", table);
                let c = ramp.evaluate(&[v], lo, hi)[0];
                prop_assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
                if v <= lo {
                    prop_assert_eq!(c, ramp.colors()[0]);
                }
                if v >= hi {
                    prop_assert_eq!(c, *ramp.colors().last().unwrap());
                }
            }
        }
    }
}
