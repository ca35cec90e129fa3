//! This module contains the k-d tree: construction by recursive median splits and the
//! bounded, distance-pruned grouping search.

use log::{debug, trace, warn};
use num_traits::float::TotalOrder;
use num_traits::{AsPrimitive, Float};

use super::heap_utils::BoundedNeighborSet;
use super::majority_label;
use crate::common_types::Point;
use crate::config::GroupingParams;
use crate::error::{KdTreeError, Result};

/// A neighbor returned by a ranked grouping: the point and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, F, L> {
    pub distance: f64,
    pub point: &'a Point<F, L>,
}

#[derive(Debug)]
pub struct KdTree<F, L> {
    root: Option<Box<TreeNode<F, L>>>,
    len: usize,
}

/// A node owns its pivot and both subtrees.
///
/// Points in `left` have `coordinates[split_axis]` at or below the pivot's,
/// points in `right` are at or above it. Only points sharing the pivot's split
/// value can sit on either side.
#[derive(Debug)]
pub struct TreeNode<F, L> {
    pivot: Point<F, L>,
    split_axis: usize,
    /// The left child of this node.
    left: Option<Box<TreeNode<F, L>>>,
    /// The right child of this node.
    right: Option<Box<TreeNode<F, L>>>,
}

impl<F, L> TreeNode<F, L> {
    pub fn pivot(&self) -> &Point<F, L> {
        &self.pivot
    }

    pub fn split_axis(&self) -> usize {
        self.split_axis
    }

    pub fn left(&self) -> Option<&TreeNode<F, L>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode<F, L>> {
        self.right.as_deref()
    }

    fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.depth());
        let right = self.right.as_ref().map_or(0, |n| n.depth());
        1 + left.max(right)
    }
}

impl<F, L> KdTree<F, L> {
    pub fn root(&self) -> Option<&TreeNode<F, L>> {
        self.root.as_deref()
    }

    /// Number of points stored, one per node.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Dimensionality of the indexed points, `None` for an empty tree.
    pub fn dimensions(&self) -> Option<usize> {
        self.root.as_ref().map(|node| node.pivot.dimensions())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.depth())
    }
}

impl<F, L> KdTree<F, L>
where
    F: Float + AsPrimitive<f64> + TotalOrder,
{
    /// Builds a tree from `points`, consuming them.
    ///
    /// All points are expected to share the dimensionality of the first one;
    /// use [`KdTree::try_build`] to have that checked up front. An empty input
    /// yields an empty tree.
    pub fn build(points: Vec<Point<F, L>>) -> Self {
        let len = points.len();
        let k_dimensions = match points.first() {
            Some(p) => p.dimensions(),
            None => return KdTree { root: None, len: 0 },
        };

        if k_dimensions == 0 {
            warn!("Cannot split {} zero-dimensional points, building an empty tree.", len);
            return KdTree { root: None, len: 0 };
        }

        let root = Self::build_recursive(points, k_dimensions, 0);
        let tree = KdTree { root, len };
        debug!(
            "Built k-d tree with {} points in {} dimensions, depth {}.",
            len,
            k_dimensions,
            tree.depth()
        );
        tree
    }

    /// Like [`KdTree::build`], but rejects zero-dimensional, inconsistent or NaN input.
    pub fn try_build(points: Vec<Point<F, L>>) -> Result<Self> {
        if let Some(first) = points.first() {
            let expected = first.dimensions();
            if expected == 0 {
                return Err(KdTreeError::ZeroDimensional);
            }
            if let Some((index, p)) = points
                .iter()
                .enumerate()
                .find(|(_, p)| p.dimensions() != expected)
            {
                return Err(KdTreeError::InconsistentDimensions {
                    index,
                    expected,
                    found: p.dimensions(),
                });
            }
            if let Some(index) = points.iter().position(|p| p.coordinates.iter().any(|c| c.is_nan())) {
                return Err(KdTreeError::NanCoordinate { index });
            }
        }
        Ok(Self::build(points))
    }

    fn build_recursive(
        mut points: Vec<Point<F, L>>, // Takes ownership
        k_dimensions: usize,
        depth: usize,
    ) -> Option<Box<TreeNode<F, L>>> {
        if points.is_empty() {
            return None;
        }

        let split_axis = depth % k_dimensions;
        // total_cmp keeps the sort well defined when a coordinate is NaN.
        points.sort_by(|a, b| a.coordinates[split_axis].total_cmp(&b.coordinates[split_axis]));

        // Exact lower median, so depth stays logarithmic even when many points
        // share a split value.
        let median_idx = points.len() / 2;

        let right_points = points.split_off(median_idx + 1);
        let pivot = points.pop()?;
        let left_points = points;

        let left = Self::build_recursive(left_points, k_dimensions, depth + 1);
        let right = Self::build_recursive(right_points, k_dimensions, depth + 1);

        Some(Box::new(TreeNode { pivot, split_axis, left, right }))
    }

    /// Collects up to `max_observations_in_grouping` of the points closest to
    /// `query` that lie within `max_distance` of it.
    ///
    /// The result is in no particular order. A non-positive radius or a zero
    /// capacity returns an empty grouping without searching.
    ///
    /// # Panics
    /// Panics if `query` does not have the dimensionality of the indexed points.
    pub fn create_grouping(
        &self,
        query: &Point<F, L>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> Vec<&Point<F, L>> {
        match self.search(query, max_distance, max_observations_in_grouping) {
            Some(best) => best.into_items(),
            None => Vec::new(),
        }
    }

    /// Same search as [`KdTree::create_grouping`], returned closest first with distances.
    pub fn create_ranked_grouping(
        &self,
        query: &Point<F, L>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> Vec<Neighbor<'_, F, L>> {
        match self.search(query, max_distance, max_observations_in_grouping) {
            Some(best) => best
                .into_sorted_vec()
                .into_iter()
                .map(|(distance, point)| Neighbor { distance, point })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Checked [`KdTree::create_grouping`]: a query of the wrong dimensionality
    /// or a NaN radius is reported instead of panicking or silently ignored.
    pub fn try_create_grouping(
        &self,
        query: &Point<F, L>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> Result<Vec<&Point<F, L>>> {
        GroupingParams::new(max_distance, max_observations_in_grouping).validate()?;
        if let Some(expected) = self.dimensions() {
            if query.dimensions() != expected {
                return Err(KdTreeError::DimensionMismatch {
                    expected,
                    found: query.dimensions(),
                });
            }
        }
        Ok(self.create_grouping(query, max_distance, max_observations_in_grouping))
    }

    pub fn group_with(&self, query: &Point<F, L>, params: &GroupingParams) -> Vec<&Point<F, L>> {
        self.create_grouping(query, params.max_distance, params.max_observations_in_grouping)
    }

    fn search(
        &self,
        query: &Point<F, L>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> Option<BoundedNeighborSet<&Point<F, L>>> {
        if GroupingParams::new(max_distance, max_observations_in_grouping).is_degenerate() {
            return None;
        }
        let root = self.root.as_deref()?;

        let mut best = BoundedNeighborSet::new(max_observations_in_grouping);
        Self::search_recursive(root, query, max_distance, &mut best);
        Some(best)
    }

    /// Recursive helper for the grouping search.
    fn search_recursive<'a>(
        node: &'a TreeNode<F, L>,
        query: &Point<F, L>,
        max_distance: f64,
        best: &mut BoundedNeighborSet<&'a Point<F, L>>,
    ) {
        // The pivot itself is a candidate.
        let distance = node.pivot.distance(query);
        if distance <= max_distance {
            best.offer(distance, &node.pivot);
        }

        let axis = node.split_axis;
        let pivot_coord = node.pivot.coordinates[axis];
        let query_coord = query.coordinates[axis];

        // Strictly below the pivot descends left; ties go right.
        let (chosen, unchosen) = if query_coord < pivot_coord {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = chosen {
            Self::search_recursive(child, query, max_distance, best);
        }

        let Some(child) = unchosen else {
            return;
        };

        // Closest any point across the splitting hyperplane can be.
        let region_distance: f64 = (query_coord - pivot_coord).abs().as_();
        let worth_checking = !best.is_full()
            || best
                .farthest_distance()
                .is_some_and(|farthest| region_distance <= farthest);

        if worth_checking {
            Self::search_recursive(child, query, max_distance, best);
        } else {
            trace!(
                "Pruned subtree on axis {} (region distance {:.4}).",
                axis,
                region_distance
            );
        }
    }
}

impl<F, L> KdTree<F, L>
where
    F: Float + AsPrimitive<f64> + TotalOrder,
    L: Clone + Eq + std::hash::Hash,
{
    /// Majority label among the grouping for `query`, `None` if no labeled
    /// point falls inside the grouping.
    ///
    /// Count ties go to the label whose nearest supporting point is closest.
    pub fn predict_class(
        &self,
        query: &Point<F, L>,
        max_distance: f64,
        max_observations_in_grouping: usize,
    ) -> Option<L> {
        let neighbors = self.create_ranked_grouping(query, max_distance, max_observations_in_grouping);
        majority_label(neighbors.iter().map(|n| n.point)).cloned()
    }

    pub fn predict_with(&self, query: &Point<F, L>, params: &GroupingParams) -> Option<L> {
        self.predict_class(query, params.max_distance, params.max_observations_in_grouping)
    }
}
