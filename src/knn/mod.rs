// Declare kd_tree.rs and heap_utils.rs as submodules of the `knn` module (defined by this mod.rs file)
pub mod kd_tree;
pub mod heap_utils;

use std::collections::HashMap;
use std::hash::Hash;

use num_traits::{AsPrimitive, Float};

use crate::common_types::Point;
use crate::config::GroupingParams;
use heap_utils::BoundedNeighborSet;

/// Picks the most frequent label among `neighbors`.
///
/// Neighbors are expected closest first. When several labels share the
/// highest count, the one whose closest supporting neighbor comes first wins.
/// Unlabeled neighbors do not vote. Returns `None` if nobody voted.
pub fn majority_label<'a, F, L, I>(neighbors: I) -> Option<&'a L>
where
    F: 'a,
    L: 'a + Eq + Hash,
    I: IntoIterator<Item = &'a Point<F, L>>,
{
    // label -> (votes, rank of its first appearance)
    let mut label_counts: HashMap<&L, (usize, usize)> = HashMap::new();
    for (rank, label) in neighbors.into_iter().filter_map(|p| p.label.as_ref()).enumerate() {
        label_counts.entry(label).or_insert((0, rank)).0 += 1;
    }

    label_counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            // Higher count wins, then the earlier first appearance.
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(label, _)| label)
}

/// Linear-scan grouping with the same admission rules as the tree search.
///
/// Every point is a candidate, offered in slice order. Serves as the
/// reference the tree is checked against and as the benchmark baseline.
/// Returns neighbors closest first, paired with their distances.
pub fn brute_force_grouping<'a, F, L>(
    points: &'a [Point<F, L>],
    query: &Point<F, L>,
    max_distance: f64,
    max_observations_in_grouping: usize,
) -> Vec<(f64, &'a Point<F, L>)>
where
    F: Float + AsPrimitive<f64>,
{
    if GroupingParams::new(max_distance, max_observations_in_grouping).is_degenerate() {
        return Vec::new();
    }

    let mut best = BoundedNeighborSet::new(max_observations_in_grouping);
    for point in points {
        let distance = point.distance(query);
        if distance <= max_distance {
            best.offer(distance, point);
        }
    }
    best.into_sorted_vec()
}
