//! Top-level hypothesis generation.
//!
//! The volume is scanned once in raster order. Each foreground voxel not yet
//! claimed starts a flood fill; the resulting component goes through the
//! hierarchical watershed. A component that yields no accepted merge is
//! emitted whole, so every foreground component produces at least one
//! hypothesis.

use ndarray::ArrayView3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::HypothesisResult;
use crate::params::HypothesisParams;
use crate::segmentation::flood_fill::{FloodFill, SeenSet};
use crate::segmentation::hypothesis::Hypothesis;
use crate::segmentation::watershed::hierarchical_watershed;
use crate::volume::{FrontierValue, Volume};

/// Generate segmentation hypotheses for a single volume.
///
/// # Arguments
/// * `foreground` - Foreground mask (depth, height, width)
/// * `frontier` - Boundary strength field, same shape as `foreground`
/// * `params` - Size window and minimum frontier
///
/// # Returns
/// Hypotheses in discovery order: components in raster order of their first
/// voxel, merge order within a component.
pub fn generate_hypotheses<T: FrontierValue>(
    foreground: ArrayView3<'_, bool>,
    frontier: ArrayView3<'_, T>,
    params: &HypothesisParams,
) -> HypothesisResult<Vec<Hypothesis>> {
    params.validate()?;
    let volume = Volume::new(foreground, frontier)?;
    let shape = volume.shape();

    let mut seen = SeenSet::new(shape.len())?;
    let mut fill = FloodFill::new();
    let mut hypotheses = Vec::new();
    let mut num_components = 0usize;
    let mut num_fallbacks = 0usize;

    for idx in 0..shape.len() {
        if !volume.is_foreground(idx) || seen.is_seen(idx) {
            continue;
        }

        let mut component = fill.collect(&volume, &mut seen, idx);
        num_components += 1;

        let emitted = hierarchical_watershed(
            &mut hypotheses,
            &component.voxels,
            &mut component.edges,
            params,
            shape,
        )?;

        if emitted == 0 {
            hypotheses.push(Hypothesis::from_voxels_in_box(
                &component.voxels,
                component.bbox,
                shape,
            )?);
            num_fallbacks += 1;
        }

        debug!(
            start = idx,
            voxels = component.len(),
            edges = component.edges.len(),
            emitted,
            fallback = emitted == 0,
            "processed component"
        );
        fill.recycle(component);
    }

    info!(
        shape = ?shape.as_array(),
        components = num_components,
        fallbacks = num_fallbacks,
        hypotheses = hypotheses.len(),
        "generated segmentation hypotheses"
    );

    Ok(hypotheses)
}

/// Generate hypotheses for independent volumes in parallel.
///
/// Each frame is processed as its own [`generate_hypotheses`] call; frames
/// are not linked to each other. The first error aborts the whole batch.
pub fn generate_hypotheses_batch<T: FrontierValue>(
    frames: &[(ArrayView3<'_, bool>, ArrayView3<'_, T>)],
    params: &HypothesisParams,
) -> HypothesisResult<Vec<Vec<Hypothesis>>> {
    params.validate()?;
    frames
        .par_iter()
        .map(|(foreground, frontier)| generate_hypotheses(foreground.view(), frontier.view(), params))
        .collect()
}
