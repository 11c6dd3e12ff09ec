//! WebAssembly exports for hypothesis generation.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Volumes are passed as flat raster-order buffers (z slowest, x fastest).
//! The foreground treats any non-zero byte as foreground. Results stay on the
//! Rust side behind a [`HypothesisSet`] handle and are read out per index.

use ndarray::{Array3, ArrayView3};
use wasm_bindgen::prelude::*;

use crate::params::HypothesisParams;
use crate::segmentation::{generate_hypotheses, Hypothesis};

/// Hypotheses produced by one generation call.
#[wasm_bindgen]
pub struct HypothesisSet {
    hypotheses: Vec<Hypothesis>,
}

#[wasm_bindgen]
impl HypothesisSet {
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    pub fn num_pixels(&self, index: usize) -> Option<usize> {
        self.hypotheses.get(index).map(|h| h.num_pixels)
    }

    /// `[min_z, min_y, min_x, max_z, max_y, max_x]`
    pub fn bbox(&self, index: usize) -> Option<Vec<u32>> {
        self.hypotheses
            .get(index)
            .map(|h| h.bbox_array().iter().map(|&v| v as u32).collect())
    }

    /// Mask extent `[depth, height, width]`.
    pub fn mask_shape(&self, index: usize) -> Option<Vec<u32>> {
        self.hypotheses.get(index).map(|h| {
            let (d, hh, w) = h.mask.dim();
            vec![d as u32, hh as u32, w as u32]
        })
    }

    /// Flat mask in raster order, 1 = member, 0 = not.
    pub fn mask(&self, index: usize) -> Option<Vec<u8>> {
        self.hypotheses
            .get(index)
            .map(|h| h.mask.iter().map(|&v| v as u8).collect())
    }
}

/// Generate segmentation hypotheses.
///
/// # Arguments
/// * `foreground` - Flat foreground bytes (length = depth * height * width)
/// * `frontier` - Flat frontier values, same length
/// * `depth`, `height`, `width` - Volume shape
/// * `min_num_pixels`, `max_num_pixels` - Exclusive size window
/// * `min_frontier` - Minimum boundary strength for an emitted merge
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn segmentation_hypotheses_wasm(
    foreground: &[u8],
    frontier: &[f32],
    depth: usize,
    height: usize,
    width: usize,
    min_num_pixels: usize,
    max_num_pixels: usize,
    min_frontier: f32,
) -> Result<HypothesisSet, JsError> {
    let shape = (depth, height, width);
    let foreground = Array3::from_shape_vec(shape, foreground.iter().map(|&v| v > 0).collect())
        .map_err(|e| JsError::new(&format!("foreground: {e}")))?;
    let frontier = ArrayView3::from_shape(shape, frontier)
        .map_err(|e| JsError::new(&format!("frontier: {e}")))?;

    let params = HypothesisParams::new(min_num_pixels, max_num_pixels, min_frontier);
    let hypotheses = generate_hypotheses(foreground.view(), frontier, &params)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(HypothesisSet { hypotheses })
}
