//! Segmentation hypothesis generation.
//!
//! This module turns a foreground mask and a frontier field into competing
//! candidate segmentations:
//! - **Flood fill**: 6-connected components with frontier-weighted edges
//! - **Union-find**: sparse disjoint sets tracking component sizes
//! - **Hierarchical watershed**: Kruskal-order merging that emits regions
//!   at every strong-enough boundary crossing
//! - **Hypothesis**: tight bounding box and local mask per candidate

pub mod flood_fill;
pub mod generator;
pub mod hypothesis;
pub mod union_find;
pub mod watershed;

pub use generator::{generate_hypotheses, generate_hypotheses_batch};
pub use hypothesis::Hypothesis;
pub use union_find::UnionFind;
pub use watershed::hierarchical_watershed;
