//! Volume geometry: flattened voxel indexing and bounding boxes.
//!
//! Every voxel is addressed by a flattened index in raster order
//! (z slowest, x fastest):
//!
//! | Field | Formula |
//! |-------|---------|
//! | index | `z * H * W + y * W + x` |
//! | z | `index / (H * W)` |
//! | y | `(index % (H * W)) / W` |
//! | x | `index % W` |

use ndarray::ArrayView3;
use rayon::prelude::*;

use crate::error::{HypothesisError, HypothesisResult};

/// Element type accepted for the frontier field.
pub trait FrontierValue: Copy + Into<f64> + Send + Sync {}

impl<T: Copy + Into<f64> + Send + Sync> FrontierValue for T {}

/// Borrowed foreground mask and frontier field of identical shape.
///
/// The two fields may come from buffers with different lifetimes.
#[derive(Debug, Clone, Copy)]
pub struct Volume<'f, 'c, T> {
    foreground: ArrayView3<'f, bool>,
    frontier: ArrayView3<'c, T>,
    shape: VolumeShape,
}

impl<'f, 'c, T: FrontierValue> Volume<'f, 'c, T> {
    /// Pair the two fields, checking shapes and rejecting NaN frontier values.
    ///
    /// Infinite frontier values are accepted; they order after every finite
    /// weight.
    pub fn new(foreground: ArrayView3<'f, bool>, frontier: ArrayView3<'c, T>) -> HypothesisResult<Self> {
        let shape = VolumeShape::from_dim(foreground.dim());
        let frontier_shape = VolumeShape::from_dim(frontier.dim());
        if shape != frontier_shape {
            return Err(HypothesisError::ShapeMismatch {
                foreground: shape.as_array(),
                frontier: frontier_shape.as_array(),
            });
        }
        if shape.is_empty() {
            return Err(HypothesisError::EmptyVolume {
                shape: shape.as_array(),
            });
        }
        if let Some(index) = first_nan(&frontier) {
            return Err(HypothesisError::NanFrontier { index });
        }

        Ok(Self {
            foreground,
            frontier,
            shape,
        })
    }

    #[inline]
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    #[inline]
    pub fn is_foreground(&self, index: usize) -> bool {
        let (z, y, x) = self.shape.coords(index);
        self.foreground[[z, y, x]]
    }

    #[inline]
    pub fn frontier(&self, index: usize) -> f64 {
        let (z, y, x) = self.shape.coords(index);
        self.frontier[[z, y, x]].into()
    }
}

/// Raster index of the first NaN frontier value.
fn first_nan<T: FrontierValue>(frontier: &ArrayView3<'_, T>) -> Option<usize> {
    match frontier.as_slice() {
        Some(values) => values.par_iter().position_first(|&v| is_nan(v)),
        None => frontier.iter().position(|&v| is_nan(v)),
    }
}

#[inline]
fn is_nan<T: FrontierValue>(value: T) -> bool {
    let value: f64 = value.into();
    value.is_nan()
}

/// Face-neighbor offsets (dz, dy, dx) for 6-connectivity.
const NEIGHBOR_OFFSETS: [(isize, isize, isize); 6] = [
    (0, 0, 1),
    (0, 1, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 0, -1),
    (-1, 0, 0),
];

/// Shape of a 3D volume (depth, height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeShape {
    pub depth: usize,
    pub height: usize,
    pub width: usize,
}

impl VolumeShape {
    pub fn new(depth: usize, height: usize, width: usize) -> Self {
        Self { depth, height, width }
    }

    /// Build from an ndarray `dim()` tuple.
    pub fn from_dim((depth, height, width): (usize, usize, usize)) -> Self {
        Self::new(depth, height, width)
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.depth * self.height * self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.depth, self.height, self.width]
    }

    /// Flatten (z, y, x) into a voxel index.
    #[inline]
    pub fn index(&self, z: usize, y: usize, x: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    /// Decode a voxel index into (z, y, x).
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let plane = self.height * self.width;
        (index / plane, (index % plane) / self.width, index % self.width)
    }

    /// In-bounds 6-connected neighbors of a voxel.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (z, y, x) = self.coords(index);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dz, dy, dx)| {
            let nz = z.checked_add_signed(dz).filter(|&v| v < self.depth)?;
            let ny = y.checked_add_signed(dy).filter(|&v| v < self.height)?;
            let nx = x.checked_add_signed(dx).filter(|&v| v < self.width)?;
            Some(self.index(nz, ny, nx))
        })
    }
}

/// Inclusive axis-aligned bounding box in volume coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_z: usize,
    pub min_y: usize,
    pub min_x: usize,
    pub max_z: usize,
    pub max_y: usize,
    pub max_x: usize,
}

impl BoundingBox {
    /// Box covering a single voxel.
    pub fn from_voxel(z: usize, y: usize, x: usize) -> Self {
        Self {
            min_z: z,
            min_y: y,
            min_x: x,
            max_z: z,
            max_y: y,
            max_x: x,
        }
    }

    /// Tight box around a set of voxel indices, `None` if the set is empty.
    pub fn from_indices(indices: &[usize], shape: VolumeShape) -> Option<Self> {
        let (&first, rest) = indices.split_first()?;
        let (z, y, x) = shape.coords(first);
        let mut bbox = Self::from_voxel(z, y, x);
        for &idx in rest {
            let (z, y, x) = shape.coords(idx);
            bbox.include(z, y, x);
        }
        Some(bbox)
    }

    /// Grow the box to contain (z, y, x).
    #[inline]
    pub fn include(&mut self, z: usize, y: usize, x: usize) {
        self.min_z = self.min_z.min(z);
        self.min_y = self.min_y.min(y);
        self.min_x = self.min_x.min(x);
        self.max_z = self.max_z.max(z);
        self.max_y = self.max_y.max(y);
        self.max_x = self.max_x.max(x);
    }

    pub fn contains(&self, z: usize, y: usize, x: usize) -> bool {
        (self.min_z..=self.max_z).contains(&z)
            && (self.min_y..=self.max_y).contains(&y)
            && (self.min_x..=self.max_x).contains(&x)
    }

    /// Extent (depth, height, width) of the box.
    pub fn extent(&self) -> (usize, usize, usize) {
        (
            self.max_z - self.min_z + 1,
            self.max_y - self.min_y + 1,
            self.max_x - self.min_x + 1,
        )
    }

    /// Origin (min_z, min_y, min_x).
    pub fn origin(&self) -> (usize, usize, usize) {
        (self.min_z, self.min_y, self.min_x)
    }

    /// `[min_z, min_y, min_x, max_z, max_y, max_x]`
    pub fn as_array(&self) -> [usize; 6] {
        [
            self.min_z, self.min_y, self.min_x, self.max_z, self.max_y, self.max_x,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array3};

    #[test]
    fn test_volume_rejects_shape_mismatch() {
        let fg = Array3::<bool>::from_elem((2, 2, 2), true);
        let frontier = Array3::<f32>::zeros((2, 2, 3));
        match Volume::new(fg.view(), frontier.view()) {
            Err(HypothesisError::ShapeMismatch { foreground, frontier }) => {
                assert_eq!(foreground, [2, 2, 2]);
                assert_eq!(frontier, [2, 2, 3]);
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_volume_rejects_empty() {
        let fg = Array3::<bool>::from_elem((0, 2, 2), true);
        let frontier = Array3::<f32>::zeros((0, 2, 2));
        assert!(matches!(
            Volume::new(fg.view(), frontier.view()),
            Err(HypothesisError::EmptyVolume { .. })
        ));
    }

    #[test]
    fn test_volume_rejects_nan_frontier() {
        let fg = Array3::<bool>::from_elem((2, 2, 2), true);
        let mut frontier = Array3::<f32>::zeros((2, 2, 2));
        frontier[[0, 1, 0]] = f32::INFINITY;
        frontier[[1, 0, 1]] = f32::NAN;
        frontier[[1, 1, 1]] = f32::NAN;
        match Volume::new(fg.view(), frontier.view()) {
            Err(HypothesisError::NanFrontier { index }) => assert_eq!(index, 5),
            other => panic!("expected NaN frontier, got {other:?}"),
        }
    }

    #[test]
    fn test_volume_accepts_infinite_frontier() {
        let fg = Array3::<bool>::from_elem((1, 1, 3), true);
        let mut frontier = Array3::<f32>::zeros((1, 1, 3));
        frontier[[0, 0, 1]] = f32::INFINITY;
        frontier[[0, 0, 2]] = f32::NEG_INFINITY;
        let volume = Volume::new(fg.view(), frontier.view()).unwrap();
        assert_eq!(volume.frontier(1), f64::INFINITY);
    }

    #[test]
    fn test_volume_fields_with_distinct_lifetimes() {
        let fg = Array3::<bool>::from_elem((1, 2, 2), true);
        let shape = {
            let frontier = vec![0.5f32; 4];
            let view = ArrayView3::from_shape((1, 2, 2), frontier.as_slice()).unwrap();
            Volume::new(fg.view(), view).unwrap().shape()
        };
        assert_eq!(shape.as_array(), [1, 2, 2]);
    }

    #[test]
    fn test_volume_strided_view() {
        let fg = Array3::<bool>::from_elem((2, 2, 4), true);
        let mut frontier = Array3::<f64>::zeros((2, 2, 4));
        frontier[[0, 1, 2]] = 3.0;
        let fg_view = fg.slice(s![.., .., ..;2]);
        let frontier_view = frontier.slice(s![.., .., ..;2]);
        let volume = Volume::new(fg_view, frontier_view).unwrap();
        let shape = volume.shape();
        assert_eq!(shape.as_array(), [2, 2, 2]);
        assert_eq!(volume.frontier(shape.index(0, 1, 1)), 3.0);
        assert!(volume.is_foreground(shape.index(1, 1, 1)));
    }

    #[test]
    fn test_integer_frontier() {
        let fg = Array3::<bool>::from_elem((1, 1, 2), true);
        let frontier = Array3::<u8>::from_elem((1, 1, 2), 200);
        let volume = Volume::new(fg.view(), frontier.view()).unwrap();
        assert_eq!(volume.frontier(1), 200.0);
    }

    #[test]
    fn test_index_roundtrip_corners() {
        let shape = VolumeShape::new(3, 4, 5);
        assert_eq!(shape.len(), 60);
        assert_eq!(shape.index(0, 0, 0), 0);
        assert_eq!(shape.index(2, 3, 4), 59);
        assert_eq!(shape.coords(59), (2, 3, 4));
        assert_eq!(shape.coords(shape.index(1, 2, 3)), (1, 2, 3));
    }

    #[test]
    fn test_neighbors_interior_and_corner() {
        let shape = VolumeShape::new(3, 3, 3);
        let center = shape.index(1, 1, 1);
        let mut n: Vec<usize> = shape.neighbors(center).collect();
        n.sort_unstable();
        assert_eq!(n, vec![4, 10, 12, 14, 16, 22]);

        // Corner only has three face neighbors
        assert_eq!(shape.neighbors(0).count(), 3);
    }

    #[test]
    fn test_neighbors_flat_volume() {
        let shape = VolumeShape::new(1, 1, 3);
        let n: Vec<usize> = shape.neighbors(1).collect();
        assert_eq!(n, vec![2, 0]);
    }

    #[test]
    fn test_bbox_from_indices() {
        let shape = VolumeShape::new(4, 4, 4);
        let indices = [shape.index(1, 2, 3), shape.index(3, 0, 1)];
        let bbox = BoundingBox::from_indices(&indices, shape).unwrap();
        assert_eq!(bbox.as_array(), [1, 0, 1, 3, 2, 3]);
        assert_eq!(bbox.extent(), (3, 3, 3));
        assert!(bbox.contains(2, 1, 2));
        assert!(!bbox.contains(0, 1, 2));
        assert!(BoundingBox::from_indices(&[], shape).is_none());
    }
}
