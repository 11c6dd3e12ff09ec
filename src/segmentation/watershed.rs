//! Hierarchical watershed: Kruskal-order merging of one component.
//!
//! Edges are replayed from the weakest boundary to the strongest. Each merge
//! across a boundary stronger than `min_frontier` is a point where the merged
//! region could be an object on its own. The region is measured right after
//! the merge, so the snapshot includes both sides of the crossed boundary.

use tracing::trace;

use crate::error::HypothesisResult;
use crate::params::HypothesisParams;
use crate::segmentation::flood_fill::Edge;
use crate::segmentation::hypothesis::Hypothesis;
use crate::segmentation::union_find::UnionFind;
use crate::volume::VolumeShape;

/// Merge a component's voxels along `edges` and emit accepted regions.
///
/// `edges` is sorted in place (stable, ascending weight). Returns the number
/// of hypotheses appended to `out`; zero when there are no edges or no merge
/// passes both thresholds.
pub fn hierarchical_watershed(
    out: &mut Vec<Hypothesis>,
    voxels: &[usize],
    edges: &mut [Edge],
    params: &HypothesisParams,
    shape: VolumeShape,
) -> HypothesisResult<usize> {
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut uf = UnionFind::with_elements(voxels.iter().copied());
    let mut emitted = 0;

    for edge in edges.iter() {
        if !uf.unite(edge.u, edge.v) || !params.crosses_frontier(edge.weight) {
            continue;
        }

        let size = uf.size(edge.u);
        if !params.accepts_size(size) {
            continue;
        }

        trace!(size, weight = edge.weight, "accepted merge");
        let members = uf.component_members(edge.u);
        if let Some(hypothesis) = Hypothesis::from_voxels(&members, shape)? {
            out.push(hypothesis);
            emitted += 1;
        }
    }

    Ok(emitted)
}
