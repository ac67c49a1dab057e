//! Python bindings for the faceboxes post-processor.
//!
//! Takes raw detector tensors as numpy `float32` arrays and returns face
//! detections in original-image pixels.

use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use faceboxes::{
    Detection as RustDetection, DetectionPipeline, FaceBoxesError, ImageSize,
    PipelineConfig as RustPipelineConfig, ResizePolicy, Variance,
};

/// Convert a FaceBoxesError to a Python exception.
fn to_py_err(err: FaceBoxesError) -> PyErr {
    match err {
        FaceBoxesError::ImageIo { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Checks that a 2D array has `cols` columns.
fn check_cols(array: &PyReadonlyArray2<'_, f32>, cols: usize, name: &str) -> PyResult<()> {
    let shape = array.shape();
    if shape[1] != cols {
        return Err(PyValueError::new_err(format!(
            "{name} must have shape (N, {cols}), got ({}, {})",
            shape[0], shape[1]
        )));
    }
    Ok(())
}

/// Face detection in original-image pixels.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    /// Confidence score.
    #[pyo3(get)]
    pub score: f32,
    /// Left edge.
    #[pyo3(get)]
    pub x: i32,
    /// Top edge.
    #[pyo3(get)]
    pub y: i32,
    /// Box width.
    #[pyo3(get)]
    pub width: i32,
    /// Box height.
    #[pyo3(get)]
    pub height: i32,
}

#[pymethods]
impl Detection {
    /// Class label, always "face".
    #[getter]
    fn label(&self) -> &'static str {
        faceboxes::FACE_LABEL
    }

    /// Returns `(label, score, x, y, width, height)`.
    fn to_tuple(&self) -> (&'static str, f32, i32, i32, i32, i32) {
        (
            faceboxes::FACE_LABEL,
            self.score,
            self.x,
            self.y,
            self.width,
            self.height,
        )
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(label='face', score={:.4}, x={}, y={}, width={}, height={})",
            self.score, self.x, self.y, self.width, self.height
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            score: d.score,
            x: d.x,
            y: d.y,
            width: d.width,
            height: d.height,
        }
    }
}

/// Thresholds, caps, and variances for post-processing.
#[pyclass]
#[derive(Clone)]
pub struct PipelineConfig {
    inner: RustPipelineConfig,
}

#[pymethods]
impl PipelineConfig {
    /// Create a new PipelineConfig.
    ///
    /// Args:
    ///     confidence_threshold: Keep scores strictly above this (default: 0.6)
    ///     iou_threshold: Suppress overlaps above this IoU (default: 0.3)
    ///     top_k: Candidates kept before NMS (default: 5000)
    ///     keep_top_k: Detections returned (default: 750)
    ///     variance: (center, size) offset variances (default: (0.1, 0.2))
    ///     parallel: Decode and suppress on multiple threads (default: False)
    #[new]
    #[pyo3(signature = (
        confidence_threshold = 0.6,
        iou_threshold = 0.3,
        top_k = 5000,
        keep_top_k = 750,
        variance = (0.1, 0.2),
        parallel = false
    ))]
    fn new(
        confidence_threshold: f32,
        iou_threshold: f32,
        top_k: usize,
        keep_top_k: usize,
        variance: (f32, f32),
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustPipelineConfig {
            confidence_threshold,
            iou_threshold,
            top_k,
            keep_top_k,
            variance: Variance {
                center: variance.0,
                size: variance.1,
            },
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "PipelineConfig(confidence_threshold={}, iou_threshold={}, top_k={}, keep_top_k={}, variance=({}, {}), parallel={})",
            self.inner.confidence_threshold,
            self.inner.iou_threshold,
            self.inner.top_k,
            self.inner.keep_top_k,
            self.inner.variance.center,
            self.inner.variance.size,
            if self.inner.parallel { "True" } else { "False" }
        )
    }
}

/// Post-process raw detector output into face detections.
///
/// Args:
///     anchors: (N, 4) float32 array of normalized (cx, cy, w, h) priors
///     offsets: (N, 4) float32 array of regression offsets
///     scores: (N,) float32 array of face confidences
///     resized_width: Width of the image fed to the network
///     resized_height: Height of the image fed to the network
///     scale: Factor used to resize the original image
///     config: PipelineConfig (default: PipelineConfig())
///
/// Returns:
///     (list of Detection, scale)
#[pyfunction]
#[pyo3(signature = (anchors, offsets, scores, resized_width, resized_height, scale, config = None))]
#[allow(clippy::too_many_arguments)]
fn detect(
    anchors: PyReadonlyArray2<'_, f32>,
    offsets: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    resized_width: usize,
    resized_height: usize,
    scale: f64,
    config: Option<PipelineConfig>,
) -> PyResult<(Vec<Detection>, f64)> {
    check_cols(&anchors, 4, "anchors")?;
    check_cols(&offsets, 4, "offsets")?;

    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let pipeline = DetectionPipeline::new().with_config(cfg);
    let result = pipeline
        .detect_flat(
            anchors.as_slice()?,
            offsets.as_slice()?,
            scores.as_slice()?,
            ImageSize::new(resized_width, resized_height),
            scale,
        )
        .map_err(to_py_err)?;

    let detections = result.detections.into_iter().map(Detection::from).collect();
    Ok((detections, result.scale))
}

/// Resize factor for an image of the given size.
///
/// Images whose shorter side exceeds `target_min_side` are shrunk so that side
/// matches it; smaller images keep scale 1.0.
#[pyfunction]
#[pyo3(signature = (height, width, target_min_side = 600.0))]
fn scale_for(height: usize, width: usize, target_min_side: f64) -> PyResult<f64> {
    let policy = ResizePolicy { target_min_side };
    policy.validate().map_err(to_py_err)?;
    Ok(policy.scale_for(height, width))
}

/// Python module for faceboxes post-processing.
#[pymodule]
fn _faceboxes(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<PipelineConfig>()?;
    m.add_function(wrap_pyfunction!(detect, m)?)?;
    m.add_function(wrap_pyfunction!(scale_for, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
