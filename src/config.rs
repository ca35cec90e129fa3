//! Query parameters shared by grouping and classification.

use crate::error::{KdTreeError, Result};

/// Bounds applied to a single grouping query.
///
/// `max_distance` is a hard radius cutoff and `max_observations_in_grouping`
/// caps how many neighbors are kept. Either one being non-positive makes the
/// query degenerate: it returns no neighbors without touching the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupingParams {
    pub max_distance: f64,
    pub max_observations_in_grouping: usize,
}

impl GroupingParams {
    pub const DEFAULT_MAX_DISTANCE: f64 = 1.5;
    pub const DEFAULT_MAX_OBSERVATIONS: usize = 20;

    pub fn new(max_distance: f64, max_observations_in_grouping: usize) -> Self {
        GroupingParams { max_distance, max_observations_in_grouping }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_max_observations(mut self, max_observations_in_grouping: usize) -> Self {
        self.max_observations_in_grouping = max_observations_in_grouping;
        self
    }

    /// True when the query can never admit a neighbor.
    pub fn is_degenerate(&self) -> bool {
        // `!(x > 0)` also treats NaN as degenerate.
        !(self.max_distance > 0.0) || self.max_observations_in_grouping < 1
    }

    /// Rejects values that are not just degenerate but meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_distance.is_nan() {
            return Err(KdTreeError::InvalidParameter(
                "max_distance must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GroupingParams {
    fn default() -> Self {
        GroupingParams::new(Self::DEFAULT_MAX_DISTANCE, Self::DEFAULT_MAX_OBSERVATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GroupingParams::default();
        assert_eq!(params.max_distance, 1.5);
        assert_eq!(params.max_observations_in_grouping, 20);
        assert!(!params.is_degenerate());
    }

    #[test]
    fn test_degenerate_values() {
        assert!(GroupingParams::new(0.0, 5).is_degenerate());
        assert!(GroupingParams::new(-1.0, 5).is_degenerate());
        assert!(GroupingParams::new(1.0, 0).is_degenerate());
        assert!(GroupingParams::new(f64::NAN, 5).is_degenerate());
        assert!(!GroupingParams::new(f64::INFINITY, 1).is_degenerate());
    }

    #[test]
    fn test_builder_setters() {
        let params = GroupingParams::default().with_max_distance(3.0).with_max_observations(2);
        assert_eq!(params, GroupingParams::new(3.0, 2));
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(GroupingParams::new(f64::NAN, 1).validate().is_err());
        assert!(GroupingParams::new(-2.0, 0).validate().is_ok());
    }
}
