//! This module contains the bounded best-k structure used while a grouping query runs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use ordered_float::OrderedFloat; // For using f64 in BinaryHeap

/// Represents an element in the BoundedNeighborSet heap, pairing a distance with data.
#[derive(Debug)]
pub struct HeapElement<P> {
    pub distance: OrderedFloat<f64>, // Max-heap stores by distance
    pub data: P,
}

impl<P> PartialEq for HeapElement<P> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}
impl<P> Eq for HeapElement<P> {}

impl<P> PartialOrd for HeapElement<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for HeapElement<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // The farthest kept neighbor sits at the top of the max-heap.
        self.distance.cmp(&other.distance)
    }
}

/// Keeps at most `capacity` of the closest items offered so far.
///
/// Once full, a candidate replaces the farthest kept item only when it is
/// strictly closer. A candidate at exactly the farthest distance is turned
/// away, so among equidistant items the one offered first stays.
#[derive(Debug)]
pub struct BoundedNeighborSet<P> {
    capacity: usize,
    heap: BinaryHeap<HeapElement<P>>,
}

impl<P> BoundedNeighborSet<P> {
    // Upper bound on the up-front allocation; larger sets grow on demand.
    const MAX_PREALLOCATED: usize = 1024;

    pub fn new(capacity: usize) -> Self {
        BoundedNeighborSet {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(Self::MAX_PREALLOCATED)),
        }
    }

    /// Offers a candidate and returns whether it was kept.
    pub fn offer(&mut self, distance: f64, item: P) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let element = HeapElement { distance: OrderedFloat(distance), data: item };
        if self.heap.len() < self.capacity {
            self.heap.push(element);
            return true;
        }
        match self.heap.peek_mut() {
            Some(mut farthest) if element.distance < farthest.distance => {
                // Overwriting through PeekMut re-sifts on drop: one O(log k) pass.
                *farthest = element;
                true
            }
            _ => false,
        }
    }

    /// Distance of the farthest item currently kept, `None` while empty.
    pub fn farthest_distance(&self) -> Option<f64> {
        self.heap.peek().map(|heap_elem| heap_elem.distance.0)
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Returns the current number of neighbors stored.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Kept items paired with their distances, closest first.
    pub fn into_sorted_vec(self) -> Vec<(f64, P)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|elem| (elem.distance.0, elem.data))
            .collect()
    }

    /// Kept items in no particular order.
    pub fn into_items(self) -> Vec<P> {
        self.heap.into_vec().into_iter().map(|elem| elem.data).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::BoundedNeighborSet;

    #[test]
    fn test_bounded_set_keeps_closest() {
        let mut k_best = BoundedNeighborSet::new(3); // Keep 3 best (smallest distance)

        assert!(k_best.offer(10.0, "P10"));
        assert!(k_best.offer(5.0, "P5"));
        assert!(!k_best.is_full());
        assert!(k_best.offer(12.0, "P12"));

        assert_eq!(k_best.len(), 3);
        assert!(k_best.is_full());
        assert_eq!(k_best.farthest_distance(), Some(12.0));

        // 4.0 beats the farthest (12.0), which gets evicted.
        assert!(k_best.offer(4.0, "P4"));
        assert_eq!(k_best.len(), 3);
        assert_eq!(k_best.farthest_distance(), Some(10.0));

        assert!(!k_best.offer(15.0, "P15"));
        assert_eq!(k_best.farthest_distance(), Some(10.0));

        let sorted: Vec<_> = k_best.into_sorted_vec().into_iter().map(|(_, p)| p).collect();
        assert_eq!(sorted, vec!["P4", "P5", "P10"]);
    }

    #[test]
    fn test_tie_with_farthest_is_rejected_when_full() {
        let mut k_best = BoundedNeighborSet::new(2);
        k_best.offer(1.0, "first");
        k_best.offer(2.0, "second");
        assert!(!k_best.offer(2.0, "late_tie"));

        let mut items = k_best.into_items();
        items.sort();
        assert_eq!(items, vec!["first", "second"]);
    }

    #[test]
    fn test_ties_admitted_while_not_full() {
        let mut k_best = BoundedNeighborSet::new(3);
        assert!(k_best.offer(1.0, 'a'));
        assert!(k_best.offer(1.0, 'b'));
        assert_eq!(k_best.len(), 2);
        assert_eq!(k_best.farthest_distance(), Some(1.0));
    }

    #[test]
    fn test_zero_capacity_admits_nothing() {
        let mut k_best = BoundedNeighborSet::new(0);
        assert!(!k_best.offer(0.0, ()));
        assert!(k_best.is_empty());
        assert!(k_best.is_full());
        assert_eq!(k_best.farthest_distance(), None);
    }
}
