//! Segmentation hypothesis records.
//!
//! A hypothesis stores a dense boolean mask cropped tightly to its bounding
//! box. Hypotheses may overlap: they are competing alternatives for the same
//! region, left for a downstream tracker to choose between.

use ndarray::Array3;

use crate::error::{HypothesisError, HypothesisResult};
use crate::volume::{BoundingBox, VolumeShape};

/// One candidate segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    /// Mask local to `bbox`, shape = bbox extent
    pub mask: Array3<bool>,
    pub bbox: BoundingBox,
    pub num_pixels: usize,
    /// Box origin, same as (bbox.min_z, bbox.min_y, bbox.min_x)
    pub z: usize,
    pub y: usize,
    pub x: usize,
}

impl Hypothesis {
    /// Build from voxel indices, computing the bounding box.
    ///
    /// Returns `None` for an empty voxel set.
    pub fn from_voxels(voxels: &[usize], shape: VolumeShape) -> HypothesisResult<Option<Self>> {
        match BoundingBox::from_indices(voxels, shape) {
            Some(bbox) => Self::from_voxels_in_box(voxels, bbox, shape).map(Some),
            None => Ok(None),
        }
    }

    /// Build from voxel indices and a box known to contain all of them.
    pub fn from_voxels_in_box(
        voxels: &[usize],
        bbox: BoundingBox,
        shape: VolumeShape,
    ) -> HypothesisResult<Self> {
        let extent = bbox.extent();
        let len = extent.0 * extent.1 * extent.2;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| HypothesisError::allocation::<bool>("hypothesis mask", len))?;
        data.resize(len, false);

        let mut mask = Array3::from_shape_vec(extent, data)?;

        for &idx in voxels {
            let (z, y, x) = shape.coords(idx);
            mask[[z - bbox.min_z, y - bbox.min_y, x - bbox.min_x]] = true;
        }

        let (z, y, x) = bbox.origin();
        Ok(Self {
            mask,
            bbox,
            num_pixels: voxels.len(),
            z,
            y,
            x,
        })
    }

    /// `[min_z, min_y, min_x, max_z, max_y, max_x]`
    pub fn bbox_array(&self) -> [usize; 6] {
        self.bbox.as_array()
    }

    /// Translate the mask back to flattened indices of the source volume.
    pub fn voxel_indices(&self, shape: VolumeShape) -> Vec<usize> {
        self.mask
            .indexed_iter()
            .filter(|&(_, &set)| set)
            .map(|((dz, dy, dx), _)| shape.index(self.z + dz, self.y + dy, self.x + dx))
            .collect()
    }

    pub fn contains(&self, z: usize, y: usize, x: usize) -> bool {
        self.bbox.contains(z, y, x) && self.mask[[z - self.z, y - self.y, x - self.x]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_is_cropped_to_box() {
        let shape = VolumeShape::new(5, 5, 5);
        let voxels = vec![shape.index(1, 2, 3), shape.index(2, 2, 3), shape.index(2, 3, 4)];

        let hypothesis = Hypothesis::from_voxels(&voxels, shape).unwrap().unwrap();

        assert_eq!(hypothesis.bbox_array(), [1, 2, 3, 2, 3, 4]);
        assert_eq!(hypothesis.mask.dim(), (2, 2, 2));
        assert_eq!(hypothesis.num_pixels, 3);
        assert_eq!((hypothesis.z, hypothesis.y, hypothesis.x), (1, 2, 3));
        assert_eq!(hypothesis.mask.iter().filter(|&&v| v).count(), 3);
        assert!(hypothesis.mask[[0, 0, 0]]);
        assert!(hypothesis.mask[[1, 1, 1]]);
        assert!(!hypothesis.mask[[0, 1, 1]]);
        assert!(hypothesis.contains(2, 3, 4));
        assert!(!hypothesis.contains(1, 3, 4));
        assert!(!hypothesis.contains(0, 0, 0));
    }

    #[test]
    fn test_voxel_indices_roundtrip() {
        let shape = VolumeShape::new(3, 4, 5);
        let mut voxels = vec![shape.index(0, 3, 4), shape.index(2, 0, 0), shape.index(1, 1, 1)];

        let hypothesis = Hypothesis::from_voxels(&voxels, shape).unwrap().unwrap();

        voxels.sort_unstable();
        assert_eq!(hypothesis.voxel_indices(shape), voxels);
        assert_eq!(hypothesis.mask.dim(), (3, 4, 5));
    }

    #[test]
    fn test_precomputed_box() {
        let shape = VolumeShape::new(1, 1, 4);
        let bbox = BoundingBox::from_indices(&[1, 2], shape).unwrap();

        let hypothesis = Hypothesis::from_voxels_in_box(&[2, 1], bbox, shape).unwrap();

        assert_eq!(hypothesis.mask.dim(), (1, 1, 2));
        assert!(hypothesis.mask.iter().all(|&v| v));
        assert_eq!(hypothesis.x, 1);
    }

    #[test]
    fn test_empty_voxels() {
        let shape = VolumeShape::new(2, 2, 2);
        assert!(Hypothesis::from_voxels(&[], shape).unwrap().is_none());
    }
}
