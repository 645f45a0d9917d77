//! User-authored discrete colormaps.
//!
//! A discrete colormap is an ordered list of `[min, max] -> color` ranges.
//! Lookup is a linear scan where the first containing range wins; values
//! matching no range get the background color. Before a discrete colormap
//! is registered its ranges are [`finalize`]d: sorted by `min` and padded
//! with background-colored ranges so that the scalar domain is fully tiled.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::{CortexvisError, Result};
use crate::value_range::ValueRange;

/// Number of samples in a legend preview.
pub const PREVIEW_SAMPLES: usize = 100;

/// A single `[min, max] -> color` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub color: HexColor,
}

impl Range {
    /// Creates a range, checking that the bounds are finite and `min < max`.
    pub fn new(min: f32, max: f32, color: HexColor) -> Result<Self> {
        let range = Self { min, max, color };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CortexvisError::validation(format!(
                "range bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(CortexvisError::validation(format!(
                "range min must be below max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Closed-interval membership.
    pub fn contains(&self, v: f32) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Appends a validated range. On error `ranges` is left untouched.
pub fn add_range(ranges: &mut Vec<Range>, min: f32, max: f32, color: HexColor) -> Result<()> {
    ranges.push(Range::new(min, max, color)?);
    Ok(())
}

/// Removes the range at `index`.
pub fn remove_range(ranges: &mut Vec<Range>, index: usize) -> Result<Range> {
    if index >= ranges.len() {
        return Err(CortexvisError::IndexOutOfRange {
            index,
            len: ranges.len(),
        });
    }
    Ok(ranges.remove(index))
}

/// Sorts `ranges` by `min` (stable) and fills every gap of
/// `[scalar_min, scalar_max]` with a range colored `background`.
///
/// User ranges are kept as authored, including parts lying outside the
/// scalar domain and overlaps between each other.
pub fn finalize(
    ranges: &[Range],
    scalar_min: f32,
    scalar_max: f32,
    background: HexColor,
) -> Result<Vec<Range>> {
    ValueRange::new(scalar_min, scalar_max)?;
    for range in ranges {
        range.validate()?;
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by(|a, b| a.min.total_cmp(&b.min));

    let mut full = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = scalar_min;
    for range in sorted {
        if range.min > cursor {
            full.push(Range {
                min: cursor,
                max: range.min.min(scalar_max),
                color: background,
            });
        }
        cursor = cursor.max(range.max);
        full.push(range);
    }
    if cursor < scalar_max {
        full.push(Range {
            min: cursor,
            max: scalar_max,
            color: background,
        });
    }

    // Ranges starting past scalar_max would produce empty fills.
    full.retain(|r| r.min < r.max);
    Ok(full)
}

/// Index of the first range containing `v`.
pub fn find_range(ranges: &[Range], v: f32) -> Option<usize> {
    ranges.iter().position(|r| r.contains(v))
}

/// Color of a single value: first containing range, else `background`.
pub fn lookup(ranges: &[Range], background: HexColor, v: f32) -> HexColor {
    find_range(ranges, v).map_or(background, |i| ranges[i].color)
}

/// Colors every value by range membership.
pub fn evaluate(ranges: &[Range], background: HexColor, values: &[f32]) -> Vec<Vec3> {
    values
        .iter()
        .map(|&v| lookup(ranges, background, v).to_rgb01())
        .collect()
}

/// Evaluates `sample_count` evenly spaced points of `[scalar_min, scalar_max]`
/// (both ends included) for legend rendering.
#[allow(clippy::cast_precision_loss)]
pub fn sample_for_preview(
    ranges: &[Range],
    background: HexColor,
    scalar_min: f32,
    scalar_max: f32,
    sample_count: usize,
) -> Vec<Vec3> {
    let points: Vec<f32> = match sample_count {
        0 => Vec::new(),
        1 => vec![scalar_min],
        n => (0..n)
            .map(|i| scalar_min + (i as f32 / (n - 1) as f32) * (scalar_max - scalar_min))
            .collect(),
    };
    evaluate(ranges, background, &points)
}

/// Serializes ranges to `[{"min":..,"max":..,"color":"#rrggbb"}, ...]`.
pub fn serialize(ranges: &[Range]) -> Result<String> {
    Ok(serde_json::to_string(ranges)?)
}

/// Parses and validates a serialized range list.
pub fn deserialize(blob: &str) -> Result<Vec<Range>> {
    let ranges: Vec<Range> = serde_json::from_str(blob)?;
    for range in &ranges {
        range.validate()?;
    }
    Ok(ranges)
}

/// A named, finalized discrete colormap.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColorMap {
    name: String,
    ranges: Vec<Range>,
    background: HexColor,
}

impl DiscreteColorMap {
    /// Finalizes authored ranges over `domain` and wraps them.
    pub fn new(
        name: impl Into<String>,
        authored: &[Range],
        domain: ValueRange,
        background: HexColor,
    ) -> Result<Self> {
        let ranges = finalize(authored, domain.min, domain.max, background)?;
        Ok(Self {
            name: name.into(),
            ranges,
            background,
        })
    }

    /// Wraps ranges that were finalized earlier, e.g. restored from storage.
    ///
    /// Ranges are re-sorted by `min` (stable) so that lookup order matches
    /// [`finalize`] even for hand-edited lists.
    pub fn from_finalized(
        name: impl Into<String>,
        mut ranges: Vec<Range>,
        background: HexColor,
    ) -> Result<Self> {
        for range in &ranges {
            range.validate()?;
        }
        ranges.sort_by(|a, b| a.min.total_cmp(&b.min));
        Ok(Self {
            name: name.into(),
            ranges,
            background,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn find_range(&self, v: f32) -> Option<usize> {
        find_range(&self.ranges, v)
    }

    pub fn color_of(&self, v: f32) -> Vec3 {
        lookup(&self.ranges, self.background, v).to_rgb01()
    }

    pub fn evaluate(&self, values: &[f32]) -> Vec<Vec3> {
        evaluate(&self.ranges, self.background, values)
    }

    pub fn sample_for_preview(&self, domain: ValueRange, sample_count: usize) -> Vec<Vec3> {
        sample_for_preview(
            &self.ranges,
            self.background,
            domain.min,
            domain.max,
            sample_count,
        )
    }

    pub fn serialize(&self) -> Result<String> {
        serialize(&self.ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: HexColor = HexColor::new(255, 0, 0);
    const GREEN: HexColor = HexColor::new(0, 255, 0);
    const BLUE: HexColor = HexColor::new(0, 0, 255);

    fn r(min: f32, max: f32, color: HexColor) -> Range {
        Range { min, max, color }
    }

    #[test]
    fn test_add_range_validates() {
        let mut ranges = Vec::new();
        add_range(&mut ranges, 0.0, 1.0, RED).unwrap();
        assert!(add_range(&mut ranges, 2.0, 2.0, RED).is_err());
        assert!(add_range(&mut ranges, 3.0, 1.0, RED).is_err());
        assert!(add_range(&mut ranges, f32::NAN, 1.0, RED).is_err());
        assert!(add_range(&mut ranges, 0.0, f32::INFINITY, RED).is_err());
        assert_eq!(ranges, vec![r(0.0, 1.0, RED)]);
    }

    #[test]
    fn test_remove_range() {
        let mut ranges = vec![r(0.0, 1.0, RED), r(1.0, 2.0, GREEN)];
        assert_eq!(remove_range(&mut ranges, 0).unwrap(), r(0.0, 1.0, RED));
        assert!(matches!(
            remove_range(&mut ranges, 5),
            Err(CortexvisError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert_eq!(ranges, vec![r(1.0, 2.0, GREEN)]);
    }

    #[test]
    fn test_finalize_fills_trailing_gap() {
        let full = finalize(&[r(0.0, 5.0, RED)], 0.0, 10.0, HexColor::GRAY).unwrap();
        assert_eq!(full, vec![r(0.0, 5.0, RED), r(5.0, 10.0, HexColor::GRAY)]);

        let c = evaluate(&full, HexColor::GRAY, &[7.0])[0];
        assert!(c.abs_diff_eq(Vec3::splat(0.502), 1e-3));
    }

    #[test]
    fn test_finalize_sorts_and_fills_every_gap() {
        let authored = [r(6.0, 8.0, BLUE), r(2.0, 3.0, RED)];
        let full = finalize(&authored, 0.0, 10.0, HexColor::GRAY).unwrap();
        assert_eq!(
            full,
            vec![
                r(0.0, 2.0, HexColor::GRAY),
                r(2.0, 3.0, RED),
                r(3.0, 6.0, HexColor::GRAY),
                r(6.0, 8.0, BLUE),
                r(8.0, 10.0, HexColor::GRAY),
            ]
        );
    }

    #[test]
    fn test_finalize_overlaps_first_sorted_wins() {
        let authored = [r(4.0, 9.0, BLUE), r(1.0, 6.0, RED)];
        let full = finalize(&authored, 0.0, 10.0, HexColor::GRAY).unwrap();
        assert_eq!(lookup(&full, HexColor::GRAY, 5.0), RED);
        assert_eq!(lookup(&full, HexColor::GRAY, 7.0), BLUE);
        assert_eq!(lookup(&full, HexColor::GRAY, 9.5), HexColor::GRAY);
    }

    #[test]
    fn test_finalize_keeps_ranges_outside_domain() {
        let authored = [r(-5.0, -1.0, RED), r(20.0, 30.0, GREEN)];
        let full = finalize(&authored, 0.0, 10.0, HexColor::GRAY).unwrap();
        assert_eq!(
            full,
            vec![
                r(-5.0, -1.0, RED),
                r(0.0, 10.0, HexColor::GRAY),
                r(20.0, 30.0, GREEN),
            ]
        );
    }

    #[test]
    fn test_finalize_rejects_bad_domain() {
        assert!(finalize(&[], 1.0, 1.0, HexColor::GRAY).is_err());
        assert!(finalize(&[], 2.0, 1.0, HexColor::GRAY).is_err());
        assert_eq!(
            finalize(&[], 0.0, 1.0, HexColor::GRAY).unwrap(),
            vec![r(0.0, 1.0, HexColor::GRAY)]
        );
    }

    #[test]
    fn test_evaluate_unmatched_uses_background() {
        let ranges = [r(0.0, 1.0, RED)];
        let colors = evaluate(&ranges, BLUE, &[0.5, 2.0, f32::NAN]);
        assert_eq!(colors, vec![Vec3::X, Vec3::Z, Vec3::Z]);
    }

    #[test]
    fn test_preview_sample_count() {
        let full = finalize(&[r(0.0, 5.0, RED)], 0.0, 10.0, HexColor::GRAY).unwrap();
        let preview = sample_for_preview(&full, HexColor::GRAY, 0.0, 10.0, PREVIEW_SAMPLES);
        assert_eq!(preview.len(), 100);
        assert_eq!(preview[0], Vec3::X);
        assert_eq!(preview[99], HexColor::GRAY.to_rgb01());
        assert_eq!(sample_for_preview(&full, HexColor::GRAY, 0.0, 10.0, 1), vec![Vec3::X]);
        assert!(sample_for_preview(&full, HexColor::GRAY, 0.0, 10.0, 0).is_empty());
    }

    #[test]
    fn test_serialize_format() {
        let json = serialize(&[r(0.0, 5.5, RED)]).unwrap();
        assert_eq!(json, r##"[{"min":0.0,"max":5.5,"color":"#ff0000"}]"##);
        assert_eq!(serialize(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_deserialize_accepts_integers_and_validates() {
        let ranges = deserialize(r##"[{"min":0,"max":5,"color":"#FF0000"}]"##).unwrap();
        assert_eq!(ranges, vec![r(0.0, 5.0, RED)]);
        assert!(matches!(
            deserialize(r##"[{"min":5,"max":0,"color":"#ff0000"}]"##),
            Err(CortexvisError::Validation(_))
        ));
        assert!(matches!(
            deserialize("not json"),
            Err(CortexvisError::JsonError(_))
        ));
    }

    #[test]
    fn test_discrete_colormap_keeps_range_below_domain() {
        let map = DiscreteColorMap::new(
            "lobes",
            &[r(-2.0, 1.0, RED)],
            ValueRange::new(0.0, 4.0).unwrap(),
            HexColor::GRAY,
        )
        .unwrap();
        assert_eq!(map.ranges().len(), 2);
        assert_eq!(map.ranges()[1].min, 1.0);
        assert_eq!(map.color_of(3.0), HexColor::GRAY.to_rgb01());
    }

    #[test]
    fn test_from_finalized_restores_min_order() {
        let map = DiscreteColorMap::from_finalized(
            "restored",
            vec![r(4.0, 9.0, BLUE), r(1.0, 6.0, RED)],
            HexColor::GRAY,
        )
        .unwrap();
        assert_eq!(map.ranges()[0].min, 1.0);
        assert_eq!(map.color_of(5.0), Vec3::X);
    }

    fn arb_color() -> impl Strategy<Value = HexColor> {
        any::<[u8; 3]>().prop_map(HexColor)
    }

    fn arb_range() -> impl Strategy<Value = Range> {
        (-100.0f32..100.0, 0.01f32..50.0, arb_color()).prop_map(|(min, width, color)| Range {
            min,
            max: min + width,
            color,
        })
    }

    proptest! {
        #[test]
        fn prop_finalize_tiles_domain(
            authored in prop::collection::vec(arb_range(), 0..8),
            lo in -50.0f32..50.0,
            width in 0.1f32..100.0,
            probes in prop::collection::vec(0.0f32..=1.0, 1..32),
        ) {
            let hi = lo + width;
            let full = finalize(&authored, lo, hi, HexColor::GRAY).unwrap();
            for p in probes {
                let v = (lo + p * (hi - lo)).clamp(lo, hi);
                prop_assert!(find_range(&full, v).is_some(), "{} not covered by {:?}", v, full);
            }
        }

        #[test]
        fn prop_preview_matches_evaluate(
            authored in prop::collection::vec(arb_range(), 0..8),
            lo in -50.0f32..50.0,
            width in 0.1f32..100.0,
            count in 0usize..200,
        ) {
            let hi = lo + width;
            let full = finalize(&authored, lo, hi, HexColor::GRAY).unwrap();
            let preview = sample_for_preview(&full, HexColor::GRAY, lo, hi, count);
            prop_assert_eq!(preview.len(), count);
            for (i, color) in preview.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let v = if count == 1 { lo } else { lo + (i as f32 / (count - 1) as f32) * (hi - lo) };
                prop_assert_eq!(*color, evaluate(&full, HexColor::GRAY, &[v])[0]);
            }
        }

        #[test]
        fn prop_serialize_round_trip(ranges in prop::collection::vec(arb_range(), 0..10)) {
            let blob = serialize(&ranges).unwrap();
            prop_assert_eq!(deserialize(&blob).unwrap(), ranges);
        }
    }
}
