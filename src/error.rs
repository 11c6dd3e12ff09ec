//! Error types for hypothesis generation.

use thiserror::Error;

/// Result type for hypothesis generation.
pub type HypothesisResult<T> = Result<T, HypothesisError>;

/// Errors that abort a hypothesis generation call.
///
/// All of them are reported before any voxel is visited, except
/// [`HypothesisError::AllocationFailure`] which may surface mid-call. In that
/// case every hypothesis produced so far is dropped.
#[derive(Debug, Error)]
pub enum HypothesisError {
    /// Foreground and frontier volumes have different shapes.
    #[error("shape mismatch: foreground is {foreground:?}, frontier is {frontier:?}")]
    ShapeMismatch {
        /// Foreground shape (depth, height, width).
        foreground: [usize; 3],
        /// Frontier shape (depth, height, width).
        frontier: [usize; 3],
    },

    /// At least one volume dimension is zero.
    #[error("volume has an empty dimension: {shape:?}")]
    EmptyVolume {
        /// Volume shape (depth, height, width).
        shape: [usize; 3],
    },

    /// The accepted size window is empty.
    #[error("invalid size window: max_num_pixels ({max}) must be greater than min_num_pixels ({min})")]
    InvalidSizeWindow {
        /// Exclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// The frontier field holds a NaN value.
    #[error("frontier value at voxel {index} is NaN")]
    NanFrontier {
        /// Flattened voxel index of the first offending value found.
        index: usize,
    },

    /// A working buffer or hypothesis mask could not be allocated.
    #[error("failed to allocate {bytes} bytes for {what}")]
    AllocationFailure {
        /// Which buffer was being allocated.
        what: &'static str,
        /// Requested size in bytes.
        bytes: usize,
    },

    /// A mask buffer did not match its bounding box extent.
    #[error("mask does not fit its bounding box: {0}")]
    MaskShape(#[from] ndarray::ShapeError),
}

impl HypothesisError {
    pub(crate) fn allocation<T>(what: &'static str, len: usize) -> Self {
        Self::AllocationFailure {
            what,
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        }
    }
}
