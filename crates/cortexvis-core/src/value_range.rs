//! Scalar value ranges used to normalize data before coloring.

use serde::{Deserialize, Serialize};

use crate::error::{CortexvisError, Result};

/// A closed interval `[min, max]` of scalar values.
///
/// Consuming operations require `min < max`; use [`ValueRange::new`] to get
/// a checked range. A raw range can still be built with struct syntax, e.g.
/// when a degenerate data range has to be carried around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// Creates a validated range (finite bounds, `min < max`).
    pub fn new(min: f32, max: f32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Computes the true data range, skipping non-finite values.
    ///
    /// Returns `None` when there is no finite value. The result may be
    /// degenerate (`min == max`) for constant data.
    pub fn from_data(values: &[f32]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Checks the invariant every consumer relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CortexvisError::validation(format!(
                "value range bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(CortexvisError::validation(format!(
                "value range min must be below max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Width of the range.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether `v` lies in the closed interval.
    pub fn contains(&self, v: f32) -> bool {
        self.min <= v && v <= self.max
    }

    /// Clamps `v` into the interval.
    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_and_degenerate() {
        assert!(ValueRange::new(0.0, 1.0).is_ok());
        assert!(ValueRange::new(1.0, 1.0).is_err());
        assert!(ValueRange::new(2.0, 1.0).is_err());
        assert!(ValueRange::new(f32::NAN, 1.0).is_err());
        assert!(ValueRange::new(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_from_data() {
        let r = ValueRange::from_data(&[3.0, -1.5, f32::NAN, 7.25]).unwrap();
        assert_eq!(r, ValueRange { min: -1.5, max: 7.25 });
        assert!(ValueRange::from_data(&[]).is_none());
        assert!(ValueRange::from_data(&[f32::NAN]).is_none());

        let constant = ValueRange::from_data(&[4.0, 4.0]).unwrap();
        assert!(constant.validate().is_err());
    }

    #[test]
    fn test_contains_is_closed() {
        let r = ValueRange::new(0.0, 5.0).unwrap();
        assert!(r.contains(0.0));
        assert!(r.contains(5.0));
        assert!(!r.contains(5.01));
        assert_eq!(r.clamp(9.0), 5.0);
    }
}
