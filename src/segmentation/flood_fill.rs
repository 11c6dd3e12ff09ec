//! 6-connected flood fill over the foreground mask.
//!
//! Collects one connected component together with its region-adjacency
//! edges. An edge is recorded once per voxel discovery, so the edges of a
//! component always form a spanning tree of it.

use crate::error::{HypothesisError, HypothesisResult};
use crate::volume::{BoundingBox, FrontierValue, Volume};

/// Adjacency between two foreground voxels, weighted by mean frontier value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: f32,
}

/// Volume-sized record of voxels already assigned to a component.
///
/// Marks are never cleared: a voxel belongs to at most one component.
#[derive(Debug)]
pub struct SeenSet {
    seen: Vec<bool>,
}

impl SeenSet {
    pub fn new(len: usize) -> HypothesisResult<Self> {
        let mut seen = Vec::new();
        seen.try_reserve_exact(len)
            .map_err(|_| HypothesisError::allocation::<bool>("seen set", len))?;
        seen.resize(len, false);
        Ok(Self { seen })
    }

    #[inline]
    pub fn is_seen(&self, index: usize) -> bool {
        self.seen[index]
    }

    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.seen[index] = true;
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.seen.iter().filter(|&&s| s).count()
    }
}

/// One flood-filled component: voxels, spanning edges and bounding box.
#[derive(Debug, Clone)]
pub struct Component {
    pub voxels: Vec<usize>,
    pub edges: Vec<Edge>,
    pub bbox: BoundingBox,
}

impl Component {
    pub fn len(&self) -> usize {
        self.voxels.len()
    }
}

/// Reusable traversal buffers, cleared between components.
#[derive(Debug, Default)]
pub struct FloodFill {
    stack: Vec<usize>,
    voxels: Vec<usize>,
    edges: Vec<Edge>,
}

impl FloodFill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the component reachable from `start` without crossing background.
    ///
    /// `start` must be foreground and not yet seen. Every voxel reached is
    /// marked in `seen` as soon as it is pushed, so none is visited twice.
    pub fn collect<T: FrontierValue>(
        &mut self,
        volume: &Volume<'_, '_, T>,
        seen: &mut SeenSet,
        start: usize,
    ) -> Component {
        let shape = volume.shape();
        self.stack.clear();
        self.voxels.clear();
        self.edges.clear();

        let (z, y, x) = shape.coords(start);
        let mut bbox = BoundingBox::from_voxel(z, y, x);

        seen.mark(start);
        self.stack.push(start);

        while let Some(idx) = self.stack.pop() {
            self.voxels.push(idx);
            let (z, y, x) = shape.coords(idx);
            bbox.include(z, y, x);

            for nidx in shape.neighbors(idx) {
                if volume.is_foreground(nidx) && !seen.is_seen(nidx) {
                    seen.mark(nidx);
                    self.stack.push(nidx);
                    let weight = 0.5 * (volume.frontier(idx) + volume.frontier(nidx));
                    self.edges.push(Edge {
                        u: idx,
                        v: nidx,
                        weight: weight as f32,
                    });
                }
            }
        }

        Component {
            voxels: std::mem::take(&mut self.voxels),
            edges: std::mem::take(&mut self.edges),
            bbox,
        }
    }

    /// Hand a finished component's buffers back for reuse.
    pub fn recycle(&mut self, component: Component) {
        self.voxels = component.voxels;
        self.edges = component.edges;
    }
}
