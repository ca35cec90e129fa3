//! This module contains the point type shared by the index, the voting helpers and the bindings.

use num_traits::{AsPrimitive, Float};

/// Represents a single labeled point in feature space.
///
/// - `F`: The type of the coordinates (e.g., `f64`, `f32`).
/// - `L`: The type of the label (e.g., `i64`, `String`, an enum).
///
/// Query points usually carry no label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<F, L> {
    pub label: Option<L>,
    pub coordinates: Vec<F>,
}

impl<F, L> Point<F, L> {
    pub fn new(coordinates: Vec<F>, label: L) -> Self {
        Point { label: Some(label), coordinates }
    }

    /// An unlabeled point, used to query an index.
    pub fn query(coordinates: Vec<F>) -> Self {
        Point { label: None, coordinates }
    }

    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }
}

impl<F, L> Point<F, L>
where
    F: Float + AsPrimitive<f64>,
{
    /// Euclidean distance over matched coordinate pairs.
    ///
    /// # Panics
    /// Panics if the two points have different dimensionality.
    pub fn distance(&self, other: &Point<F, L>) -> f64 {
        assert_eq!(
            self.coordinates.len(),
            other.coordinates.len(),
            "Cannot compute distance between points of different dimensionality."
        );
        euclidean_distance(&self.coordinates, &other.coordinates)
    }
}

/// Calculates the Euclidean distance between two coordinate slices.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: Float + AsPrimitive<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let diff: f64 = (x - y).as_();
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic;

    #[test]
    fn test_distance_3_4_5() {
        let a: Point<f64, i32> = Point::new(vec![0.0, 0.0], 1);
        let b: Point<f64, i32> = Point::query(vec![3.0, 4.0]);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_f32_coordinates() {
        let a: Point<f32, &str> = Point::new(vec![1.0, 2.0, 3.0], "a");
        let b: Point<f32, &str> = Point::new(vec![4.0, 5.0, 6.0], "b");
        assert!((a.distance(&b) - 27.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a: Point<f64, i32> = Point::new(vec![-1.5, 2.25, 7.0], 0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_query_point_has_no_label() {
        let q: Point<f64, i32> = Point::query(vec![1.0]);
        assert!(q.label().is_none());
        assert_eq!(q.dimensions(), 1);
    }

    #[test]
    fn test_distance_panics_on_dimension_mismatch() {
        let a: Point<f64, i32> = Point::new(vec![1.0, 2.0], 0);
        let b: Point<f64, i32> = Point::query(vec![1.0]);
        let result = panic::catch_unwind(|| a.distance(&b));
        assert!(result.is_err(), "distance should panic on mismatched dimensionality");
    }
}
