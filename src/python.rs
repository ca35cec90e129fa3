//! Python bindings, enabled with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyList;

use crate::common_types::{euclidean_distance, Point};
use crate::config::GroupingParams;
use crate::error::KdTreeError;
use crate::knn::kd_tree::KdTree;

impl From<KdTreeError> for PyErr {
    fn from(err: KdTreeError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Calculates the Euclidean distance between two vectors of f64.
#[pyfunction]
#[pyo3(name = "euclidean_distance")]
fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    if a.len() != b.len() {
        return Err(PyValueError::new_err("Input vectors must have the same length."));
    }
    Ok(euclidean_distance(&a, &b))
}

#[pyclass(name = "SpatialIndex")]
struct PySpatialIndex {
    tree: KdTree<f64, i64>,
}

#[pymethods]
impl PySpatialIndex {
    /// Builds the index from `(label, coordinates)` tuples.
    #[new]
    fn new(observations: &Bound<'_, PyList>) -> PyResult<Self> {
        let mut points = Vec::with_capacity(observations.len());
        for item_py in observations {
            let (label, coordinates): (i64, Vec<f64>) = item_py.extract()?;
            points.push(Point::new(coordinates, label));
        }
        let tree = KdTree::try_build(points)?;
        Ok(PySpatialIndex { tree })
    }

    /// Returns `(label, coordinates)` for each neighbor, closest first.
    #[pyo3(signature = (
        coordinates,
        max_distance = GroupingParams::DEFAULT_MAX_DISTANCE,
        max_observations_in_grouping = GroupingParams::DEFAULT_MAX_OBSERVATIONS
    ))]
    fn create_grouping(
        &self,
        coordinates: Vec<f64>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> PyResult<Vec<(Option<i64>, Vec<f64>)>> {
        GroupingParams::new(max_distance, max_observations_in_grouping).validate()?;
        let query = self.checked_query(coordinates)?;
        Ok(self
            .tree
            .create_ranked_grouping(&query, max_distance, max_observations_in_grouping)
            .into_iter()
            .map(|n| (n.point.label, n.point.coordinates.clone()))
            .collect())
    }

    #[pyo3(signature = (
        coordinates,
        max_distance = GroupingParams::DEFAULT_MAX_DISTANCE,
        max_observations_in_grouping = GroupingParams::DEFAULT_MAX_OBSERVATIONS
    ))]
    fn predict_class(
        &self,
        coordinates: Vec<f64>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> PyResult<Option<i64>> {
        GroupingParams::new(max_distance, max_observations_in_grouping).validate()?;
        let query = self.checked_query(coordinates)?;
        Ok(self.tree.predict_class(&query, max_distance, max_observations_in_grouping))
    }

    fn __len__(&self) -> usize {
        self.tree.len()
    }
}

impl PySpatialIndex {
    fn checked_query(&self, coordinates: Vec<f64>) -> Result<Point<f64, i64>, KdTreeError> {
        if let Some(expected) = self.tree.dimensions() {
            if coordinates.len() != expected {
                return Err(KdTreeError::DimensionMismatch { expected, found: coordinates.len() });
            }
        }
        Ok(Point::query(coordinates))
    }
}

/// The name of this function must match the `lib.name` in `Cargo.toml`.
#[pymodule]
fn kd_grouping(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_class::<PySpatialIndex>()?;
    Ok(())
}
