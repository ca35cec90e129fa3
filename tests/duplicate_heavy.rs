use kd_grouping::{KdTree, Point};

type Pt = Point<f64, u32>;

const N: u32 = 100_000;

fn balanced_depth(n: usize) -> usize {
    n.ilog2() as usize + 1
}

#[test]
fn identical_points_build_a_balanced_tree() {
    let points: Vec<Pt> = (0..N).map(|i| Point::new(vec![1.0, 1.0], i)).collect();
    let tree = KdTree::build(points);
    assert_eq!(tree.len(), N as usize);
    assert!(tree.depth() <= balanced_depth(N as usize), "depth {}", tree.depth());

    let grouping = tree.create_grouping(&Point::query(vec![1.0, 1.0]), 1.0, 20);
    assert_eq!(grouping.len(), 20);
    assert!(grouping.iter().all(|p| p.coordinates == vec![1.0, 1.0]));
}

#[test]
fn binary_feature_with_constant_column() {
    // One binary feature next to a constant-zero column.
    let points: Vec<Pt> = (0..N).map(|i| Point::new(vec![(i % 2) as f64, 0.0], i % 2)).collect();
    let tree = KdTree::build(points);
    assert_eq!(tree.len(), N as usize);
    assert!(tree.depth() <= balanced_depth(N as usize), "depth {}", tree.depth());

    let query = Point::query(vec![0.9, 0.0]);
    let grouping = tree.create_grouping(&query, 0.5, 15);
    assert_eq!(grouping.len(), 15);
    assert!(grouping.iter().all(|p| p.label == Some(1)));
    assert_eq!(tree.predict_class(&query, 0.5, 15), Some(1));
}

#[test]
fn one_dimensional_low_cardinality() {
    let points: Vec<Pt> = (0..N).map(|i| Point::new(vec![(i % 3) as f64], i)).collect();
    let tree = KdTree::try_build(points).unwrap();
    assert!(tree.depth() <= balanced_depth(N as usize), "depth {}", tree.depth());

    // Every point is within reach: nothing can be pruned, so all of them are visited.
    let grouping = tree.create_grouping(&Point::query(vec![1.0]), 5.0, N as usize);
    assert_eq!(grouping.len(), N as usize);
}
