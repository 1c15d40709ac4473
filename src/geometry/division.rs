//! Equal partitioning of an interval
//!
//! Spaces sensors, paddle bounce regions and ball spawn positions.

use super::interval::Interval;
use crate::error::{Error, Result};

/// An interval cut into `parts` equal sub-intervals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualDivision {
    interval: Interval,
    parts: usize,
}

impl EqualDivision {
    pub fn new(interval: Interval, parts: usize) -> Result<Self> {
        if parts == 0 || interval.length() <= 0.0 {
            return Err(Error::InvalidDivision {
                parts,
                length: interval.length(),
            });
        }
        Ok(Self { interval, parts })
    }

    /// `[0, width]` in `parts` pieces
    pub fn from_width(width: f64, parts: usize) -> Result<Self> {
        Self::new(Interval::from_start_and_width(0.0, width.max(0.0)), parts)
    }

    /// `amount` parts of width `spacing` centered on `center`
    pub fn from_center_spacing_and_amount(center: f64, spacing: f64, amount: usize) -> Result<Self> {
        let interval = Interval::from_middle_and_width(center, spacing * amount as f64)?;
        Self::new(interval, amount)
    }

    /// `amount` parts of width `spacing` starting at `leftmost`
    pub fn from_leftmost_spacing_and_amount(
        leftmost: f64,
        spacing: f64,
        amount: usize,
    ) -> Result<Self> {
        Self::new(
            Interval::from_start_and_width(leftmost, spacing * amount as f64),
            amount,
        )
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    #[inline]
    pub fn parts(&self) -> usize {
        self.parts
    }

    #[inline]
    pub fn part_length(&self) -> f64 {
        self.interval.length() / self.parts as f64
    }

    /// Index of the part holding `position`, unclamped
    ///
    /// Positions left of the interval give negative indices and positions at
    /// or past its right end give `parts` or more.
    pub fn index_for(&self, position: f64) -> i64 {
        let relative = (position - self.interval.low()) / self.interval.length();
        (relative * self.parts as f64).floor() as i64
    }

    /// `index_for` clamped into `0..parts`
    pub fn clamped_index_for(&self, position: f64) -> usize {
        self.index_for(position).clamp(0, self.parts as i64 - 1) as usize
    }

    pub fn leftmost(&self, index: usize) -> f64 {
        self.interval.low() + self.part_length() * index as f64
    }

    pub fn rightmost(&self, index: usize) -> f64 {
        self.leftmost(index) + self.part_length()
    }

    pub fn middle(&self, index: usize) -> f64 {
        self.leftmost(index) + self.part_length() / 2.0
    }
}
