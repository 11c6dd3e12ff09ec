//! Segmentation hypothesis generation for multi-hypothesis tracking.
//!
//! Given a binary foreground volume and a frontier (boundary strength) field,
//! every 6-connected foreground component is split into a hierarchy of
//! candidate segmentations by merging regions along increasingly strong
//! boundaries. Candidates whose defining merge crossed `min_frontier` and
//! whose size falls inside `(min_num_pixels, max_num_pixels)` are returned;
//! a component with no such candidate is returned whole.
//!
//! ## Volume Format
//! Both inputs are 3D arrays with shape (depth, height, width):
//! - **Foreground**: `bool`
//! - **Frontier**: any numeric type convertible to `f64` (`f32`, `f64`, `u8`, `u16`, ...)
//!
//! 2D images are handled as volumes with depth 1.
//!
//! ## Results
//! Each [`Hypothesis`] carries a boolean mask cropped to its bounding box,
//! the box itself `(min_z, min_y, min_x, max_z, max_y, max_x)`, the voxel
//! count and the box origin. Hypotheses may overlap.

pub mod error;
pub mod params;
pub mod segmentation;
pub mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{HypothesisError, HypothesisResult};
pub use params::HypothesisParams;
pub use segmentation::{generate_hypotheses, generate_hypotheses_batch, Hypothesis, UnionFind};
pub use volume::{BoundingBox, VolumeShape};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray1, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyMemoryError, PyValueError};
    use pyo3::prelude::*;

    use crate::error::HypothesisError;
    use crate::params::HypothesisParams;
    use crate::segmentation::{generate_hypotheses, Hypothesis};
    use crate::volume::FrontierValue;

    impl From<HypothesisError> for PyErr {
        fn from(err: HypothesisError) -> PyErr {
            match err {
                HypothesisError::AllocationFailure { .. } => PyMemoryError::new_err(err.to_string()),
                _ => PyValueError::new_err(err.to_string()),
            }
        }
    }

    // ========================================================================
    // Segment
    // ========================================================================

    /// One segmentation hypothesis.
    ///
    /// `mask` is cropped to `bbox`; `z`, `y`, `x` repeat the box origin.
    #[pyclass(name = "Segment", module = "seg_hypotheses", frozen)]
    pub struct PySegment {
        inner: Hypothesis,
    }

    #[pymethods]
    impl PySegment {
        #[getter]
        fn mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<bool>> {
            self.inner.mask.clone().into_pyarray(py)
        }

        /// `[min_z, min_y, min_x, max_z, max_y, max_x]`
        #[getter]
        fn bbox<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
            let bbox: Vec<i64> = self.inner.bbox_array().iter().map(|&v| v as i64).collect();
            bbox.into_pyarray(py)
        }

        #[getter]
        fn num_pixels(&self) -> usize {
            self.inner.num_pixels
        }

        #[getter]
        fn z(&self) -> usize {
            self.inner.z
        }

        #[getter]
        fn y(&self) -> usize {
            self.inner.y
        }

        #[getter]
        fn x(&self) -> usize {
            self.inner.x
        }

        fn __repr__(&self) -> String {
            format!(
                "Segment(num_pixels={}, bbox={:?})",
                self.inner.num_pixels,
                self.inner.bbox_array()
            )
        }
    }

    fn compute<T: FrontierValue + numpy::Element>(
        py: Python<'_>,
        foreground: PyReadonlyArray3<'_, bool>,
        frontier: PyReadonlyArray3<'_, T>,
        params: HypothesisParams,
    ) -> PyResult<Vec<PySegment>> {
        let foreground = foreground.as_array();
        let frontier = frontier.as_array();
        let hypotheses = py.allow_threads(|| generate_hypotheses(foreground, frontier, &params))?;
        Ok(hypotheses
            .into_iter()
            .map(|inner| PySegment { inner })
            .collect())
    }

    // ========================================================================
    // Hypothesis Generation
    // ========================================================================

    /// Compute segmentation hypotheses from a foreground mask and an f32 frontier map.
    ///
    /// # Arguments
    /// * `foreground` - Boolean volume (depth, height, width)
    /// * `frontier` - Boundary strength, same shape
    /// * `min_num_pixels` - Exclusive lower size bound
    /// * `max_num_pixels` - Exclusive upper size bound
    /// * `min_frontier` - Merges at or below this boundary strength are not emitted
    #[pyfunction]
    #[pyo3(signature = (foreground, frontier, min_num_pixels=0, max_num_pixels=usize::MAX, min_frontier=0.0))]
    pub fn compute_segmentation_hypotheses<'py>(
        py: Python<'py>,
        foreground: PyReadonlyArray3<'py, bool>,
        frontier: PyReadonlyArray3<'py, f32>,
        min_num_pixels: usize,
        max_num_pixels: usize,
        min_frontier: f32,
    ) -> PyResult<Vec<PySegment>> {
        let params = HypothesisParams::new(min_num_pixels, max_num_pixels, min_frontier);
        compute(py, foreground, frontier, params)
    }

    /// Compute segmentation hypotheses from a foreground mask and an f64 frontier map.
    #[pyfunction]
    #[pyo3(signature = (foreground, frontier, min_num_pixels=0, max_num_pixels=usize::MAX, min_frontier=0.0))]
    pub fn compute_segmentation_hypotheses_f64<'py>(
        py: Python<'py>,
        foreground: PyReadonlyArray3<'py, bool>,
        frontier: PyReadonlyArray3<'py, f64>,
        min_num_pixels: usize,
        max_num_pixels: usize,
        min_frontier: f32,
    ) -> PyResult<Vec<PySegment>> {
        let params = HypothesisParams::new(min_num_pixels, max_num_pixels, min_frontier);
        compute(py, foreground, frontier, params)
    }

    /// Segmentation hypothesis extension module
    #[pymodule]
    pub fn seg_hypotheses(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PySegment>()?;
        m.add_function(wrap_pyfunction!(compute_segmentation_hypotheses, m)?)?;
        m.add_function(wrap_pyfunction!(compute_segmentation_hypotheses_f64, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::seg_hypotheses;
