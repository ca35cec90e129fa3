//! A median-split k-d tree over labeled points, answering bounded neighbor
//! groupings and majority-vote classification.
//!
//! ```
//! use kd_grouping::{KdTree, Point};
//!
//! let tree = KdTree::build(vec![
//!     Point::new(vec![0.0, 0.0], 0),
//!     Point::new(vec![10.0, 0.0], 1),
//!     Point::new(vec![0.0, 10.0], 0),
//!     Point::new(vec![1.0, 1.0], 1),
//! ]);
//! let query = Point::query(vec![0.5, 0.5]);
//! assert_eq!(tree.create_grouping(&query, 2.0, 2).len(), 2);
//! ```

pub mod common_types;
pub mod config;
pub mod error;
pub mod knn;

#[cfg(feature = "python")]
mod python;

pub use common_types::{euclidean_distance, Point};
pub use config::GroupingParams;
pub use error::{KdTreeError, Result};
pub use knn::heap_utils::BoundedNeighborSet;
pub use knn::kd_tree::{KdTree, Neighbor, TreeNode};
pub use knn::{brute_force_grouping, majority_label};

/// The glossary name for the tree.
pub type SpatialIndex<F, L> = KdTree<F, L>;
