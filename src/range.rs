//! Closed numeric interval.
//!
//! # Examples
//!
//! ```
//! use u_statfit::Range;
//!
//! let r = Range::new(8.375, 88.5);
//! assert!(r.contains(8.375));
//! assert!(!r.is_inside(8.375));
//!
//! let fence = r.scale(4.0);
//! assert_eq!(fence.min(), -111.8125);
//! assert_eq!(fence.max(), 208.6875);
//! ```

use std::fmt;

/// Longest vector [`Range::sequence`] and [`Range::sequence_by`] will build.
pub const MAX_SEQUENCE_LEN: usize = 1 << 24;

/// A `[min, max]` interval.
///
/// The bounds are stored as given; keeping `min <= max` is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    min: f64,
    max: f64,
}

impl Default for Range {
    /// The unit interval `[0, 1]`.
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Range {
    /// Creates a range with the given bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the range, `max - min`.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns `true` if `min <= value <= max`. Always `false` for `NaN`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns `true` if `min < value < max` (bounds excluded).
    pub fn is_inside(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    /// Returns `true` if `value` is numerically identical to the lower bound.
    pub fn is_min(&self, value: f64) -> bool {
        self.min.total_cmp(&value).is_eq()
    }

    /// Returns `true` if `value` is numerically identical to the upper bound.
    pub fn is_max(&self, value: f64) -> bool {
        self.max.total_cmp(&value).is_eq()
    }

    /// Scales the width by `factor` about the center.
    ///
    /// A factor of 2 doubles the width, extending each bound outward by half
    /// the original size. A factor below 1 shrinks the range.
    pub fn scale(&self, factor: f64) -> Self {
        let half = self.size() * factor / 2.0;
        let center = self.center();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns `count` evenly spaced values from `min` to `max` inclusive.
    ///
    /// `count == 1` yields `[min]`; `count == 0` yields an empty vector, as
    /// does a `count` above [`MAX_SEQUENCE_LEN`] or a range with a
    /// non-finite size.
    pub fn sequence(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ if count > MAX_SEQUENCE_LEN || !self.size().is_finite() => Vec::new(),
            _ => {
                let increment = self.size() / (count - 1) as f64;
                self.steps(count, increment)
            }
        }
    }

    /// Returns values from `min` spaced by `increment`, stopping at `max`.
    ///
    /// Returns an empty vector if `increment` is not strictly positive and
    /// finite, or if the sequence would hold more than [`MAX_SEQUENCE_LEN`]
    /// values (including an unbounded range).
    pub fn sequence_by(&self, increment: f64) -> Vec<f64> {
        if !(increment > 0.0 && increment.is_finite()) {
            return Vec::new();
        }
        let intervals = self.size() / increment;
        // also rejects NaN and +inf
        if !(intervals >= 0.0 && intervals < MAX_SEQUENCE_LEN as f64) {
            return Vec::new();
        }
        match (intervals as usize).checked_add(1) {
            Some(count) => self.steps(count, increment),
            None => Vec::new(),
        }
    }

    fn steps(&self, count: usize, increment: f64) -> Vec<f64> {
        (0..count.min(MAX_SEQUENCE_LEN))
            .map(|i| self.min + i as f64 * increment)
            .collect()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} - {:.6}", self.min, self.max)
    }
}
