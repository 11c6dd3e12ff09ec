//! Thresholds controlling which merges become hypotheses.

use crate::error::{HypothesisError, HypothesisResult};

/// Hypothesis acceptance thresholds.
///
/// A merge is emitted when its edge weight is strictly greater than
/// `min_frontier` and the merged component size lies strictly inside
/// `(min_num_pixels, max_num_pixels)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HypothesisParams {
    /// Exclusive lower bound on hypothesis size.
    pub min_num_pixels: usize,
    /// Exclusive upper bound on hypothesis size.
    pub max_num_pixels: usize,
    /// Merges across boundaries at or below this weight are not emitted.
    pub min_frontier: f32,
}

impl Default for HypothesisParams {
    fn default() -> Self {
        Self {
            min_num_pixels: 0,
            max_num_pixels: usize::MAX,
            min_frontier: 0.0,
        }
    }
}

impl HypothesisParams {
    pub fn new(min_num_pixels: usize, max_num_pixels: usize, min_frontier: f32) -> Self {
        Self {
            min_num_pixels,
            max_num_pixels,
            min_frontier,
        }
    }

    /// Check the size window is non-empty.
    pub fn validate(&self) -> HypothesisResult<()> {
        if self.max_num_pixels <= self.min_num_pixels {
            return Err(HypothesisError::InvalidSizeWindow {
                min: self.min_num_pixels,
                max: self.max_num_pixels,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn accepts_size(&self, size: usize) -> bool {
        size > self.min_num_pixels && size < self.max_num_pixels
    }

    #[inline]
    pub fn crosses_frontier(&self, weight: f32) -> bool {
        weight > self.min_frontier
    }
}
