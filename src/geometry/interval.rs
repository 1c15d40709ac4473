//! Closed one-dimensional intervals
//!
//! Used for the x/y extents of line segments, the paddle's bounce regions and
//! anything else that lives on a single axis.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A closed interval `[low, high]` with `low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    low: f64,
    high: f64,
}

impl Interval {
    /// Build `[low, high]`, rejecting an inverted pair
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if low > high || low.is_nan() || high.is_nan() {
            return Err(Error::InvertedInterval { low, high });
        }
        Ok(Self { low, high })
    }

    /// Smallest interval holding both values, in either order
    pub(crate) fn spanning(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Interval starting at `start` and extending by a signed `width`
    ///
    /// A negative width extends to the left, so this never fails.
    pub fn from_start_and_width(start: f64, width: f64) -> Self {
        Self::spanning(start, start + width)
    }

    /// Interval of `width` centered on `middle`
    pub fn from_middle_and_width(middle: f64, width: f64) -> Result<Self> {
        if width < 0.0 {
            return Err(Error::NegativeWidth(width));
        }
        Ok(Self::from_start_and_width(middle - width / 2.0, width))
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// A representative value inside the interval (its low end)
    #[inline]
    pub fn value(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.high - self.low
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Whether the whole neighborhood `[value - distance, value + distance]` fits
    pub fn contains_neighborhood(&self, value: f64, distance: f64) -> bool {
        self.low <= value - distance && value + distance <= self.high
    }

    /// Overlap of two intervals, `None` when disjoint
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let low = self.low.max(other.low);
        let high = self.high.min(other.high);
        if high < low {
            return None;
        }
        Some(Interval { low, high })
    }

    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.intersection(other).is_some()
    }

    /// Union of two overlapping intervals, `None` when disjoint
    pub fn union(&self, other: &Interval) -> Option<Interval> {
        if !self.intersects(other) {
            return None;
        }
        Some(Interval {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        })
    }

    /// Sub-interval with `spacing` trimmed from both ends
    pub fn shrink(&self, spacing: f64) -> Result<Interval> {
        if 2.0 * spacing > self.length() {
            return Err(Error::SpacingTooLarge {
                spacing,
                length: self.length(),
            });
        }
        Interval::new(self.low + spacing, self.high - spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inverted_interval_is_rejected() {
        assert_eq!(
            Interval::new(2.0, 1.0),
            Err(Error::InvertedInterval { low: 2.0, high: 1.0 })
        );
        assert!(Interval::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_negative_width_swaps() {
        let i = Interval::from_start_and_width(10.0, -4.0);
        assert_eq!(i.low(), 6.0);
        assert_eq!(i.high(), 10.0);
        assert!(Interval::from_middle_and_width(0.0, -1.0).is_err());
        let centered = Interval::from_middle_and_width(0.0, 150.0).unwrap();
        assert_eq!((centered.low(), centered.high()), (-75.0, 75.0));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = Interval::new(0.0, 5.0).unwrap();
        let b = Interval::new(3.0, 8.0).unwrap();
        let c = Interval::new(6.0, 7.0).unwrap();
        assert_eq!(a.intersection(&b), Some(Interval::new(3.0, 5.0).unwrap()));
        assert_eq!(a.union(&b), Some(Interval::new(0.0, 8.0).unwrap()));
        assert_eq!(a.intersection(&c), None);
        assert_eq!(a.union(&c), None);

        // touching endpoints still intersect
        let d = Interval::new(5.0, 9.0).unwrap();
        assert_eq!(a.intersection(&d), Some(Interval::new(5.0, 5.0).unwrap()));
    }

    #[test]
    fn test_neighborhood_and_shrink() {
        let a = Interval::new(0.0, 10.0).unwrap();
        assert!(a.contains_neighborhood(5.0, 5.0));
        assert!(!a.contains_neighborhood(5.0, 5.5));
        assert_eq!(a.shrink(2.0), Interval::new(2.0, 8.0));
        assert!(a.shrink(6.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_interval_is_reflexive(low in -1e6f64..1e6, width in 0.0f64..1e6) {
            let i = Interval::from_start_and_width(low, width);
            prop_assert!(i.contains(i.low()));
            prop_assert!(i.contains(i.high()));
            prop_assert!(i.intersects(&i));
            prop_assert_eq!(i.intersection(&i), Some(i));
        }
    }
}
