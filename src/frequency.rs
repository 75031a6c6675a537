//! Hop-length frequency partitions and the observed frequency of a path.
//!
//! A frequency partition records, for each cyclic hop length, how many edges
//! of a Hamiltonian path must realize that length. The tuple form mirrors the
//! 1-indexed convention used throughout the cyclic-labeling literature: slot
//! `h - 1` holds the count for hop length `h`.

use std::fmt;

use crate::metric::cyclic_distance;

/// Required (or observed) occurrence count per cyclic hop length.
///
/// Stored densely in tuple form: `counts[h - 1]` is the count for hop length
/// `h`. Trailing zero slots are stripped on construction so equality ignores
/// them; interior zero slots are preserved because the increment evolution
/// policy cycles over slots, not over nonzero entries.
///
/// # Example
/// ```
/// use hopfreq::frequency::FrequencyPartition;
///
/// let fp = FrequencyPartition::from_counts([2, 0, 1]);
/// assert_eq!(fp.count(1), 2);
/// assert_eq!(fp.count(2), 0);
/// assert_eq!(fp.count(3), 1);
/// assert_eq!(fp.edge_count(), 3);
/// assert_eq!(fp.vertex_count(), 4);
/// assert_eq!(fp.to_string(), "(2, 0, 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyPartition {
    counts: Vec<usize>,
}

impl FrequencyPartition {
    /// Creates an empty partition with no required hops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a partition from tuple form, where position `i` holds the count
    /// for hop length `i + 1`. Trailing zero slots are dropped.
    pub fn from_counts(counts: impl Into<Vec<usize>>) -> Self {
        let mut counts = counts.into();
        while counts.last() == Some(&0) {
            counts.pop();
        }
        FrequencyPartition { counts }
    }

    /// Required occurrences of hop length `hop` (zero when absent).
    pub fn count(&self, hop: usize) -> usize {
        if hop == 0 {
            return 0;
        }
        self.counts.get(hop - 1).copied().unwrap_or(0)
    }

    /// Number of slots in tuple form, which is also the largest hop length
    /// with a (possibly interior-zero) slot.
    pub fn slots(&self) -> usize {
        self.counts.len()
    }

    /// True when no hop length has a slot.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of edges the partition accounts for.
    pub fn edge_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Vertex count of a Hamiltonian path realizing this partition
    /// (one more than the edge count).
    pub fn vertex_count(&self) -> usize {
        self.edge_count() + 1
    }

    /// Iterates `(hop, count)` pairs with nonzero count, ascending by hop.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| (i + 1, count))
    }

    /// Largest hop length with a nonzero count, or zero for an empty partition.
    pub fn max_hop(&self) -> usize {
        self.iter().map(|(hop, _)| hop).max().unwrap_or(0)
    }

    /// Flattens the partition into one entry per required occurrence,
    /// ascending by hop length.
    pub fn hop_multiset(&self) -> Vec<usize> {
        let mut multiset = Vec::with_capacity(self.edge_count());
        for (hop, count) in self.iter() {
            multiset.extend(std::iter::repeat(hop).take(count));
        }
        multiset
    }

    /// L1 distance between two partitions: the sum over all hop lengths of
    /// the absolute difference of their counts.
    pub fn l1_distance(&self, other: &FrequencyPartition) -> usize {
        let slots = self.counts.len().max(other.counts.len());
        (1..=slots)
            .map(|hop| self.count(hop).abs_diff(other.count(hop)))
            .sum()
    }

    /// Increments the count in tuple slot `slot` (hop length `slot + 1`).
    /// Used by the increment evolution policy.
    ///
    /// # Panics
    /// Panics if `slot` is out of range.
    pub fn increment_slot(&mut self, slot: usize) {
        assert!(slot < self.counts.len(), "slot out of range");
        self.counts[slot] += 1;
    }

    /// Appends a brand-new hop length with count one and returns it.
    /// Used by the append evolution policy.
    pub fn push_unit(&mut self) -> usize {
        self.counts.push(1);
        self.counts.len()
    }
}

impl fmt::Display for FrequencyPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, count) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, ")")
    }
}

/// Computes the observed hop-length frequency of `path` on a `p`-cycle.
///
/// Returns `None` unless `path` is a genuine permutation of `0..p` with at
/// least two vertices. A partial, duplicated, or out-of-range path is never
/// comparable against a target partition, so no partial result is produced.
///
/// # Example
/// ```
/// use hopfreq::frequency::{observed_frequency, FrequencyPartition};
///
/// let freq = observed_frequency(&[0, 4, 1, 2, 3], 5).unwrap();
/// assert_eq!(freq, FrequencyPartition::from_counts([3, 1]));
///
/// // Not a permutation of 0..4: vertex 2 repeats.
/// assert!(observed_frequency(&[0, 2, 2, 1], 4).is_none());
/// ```
pub fn observed_frequency(path: &[usize], p: usize) -> Option<FrequencyPartition> {
    if path.len() < 2 || path.len() != p {
        return None;
    }
    let mut seen = vec![false; p];
    for &vertex in path {
        if vertex >= p || seen[vertex] {
            return None;
        }
        seen[vertex] = true;
    }

    // Distinct vertices keep every hop in 1..=p/2.
    let mut counts = vec![0usize; p / 2];
    for pair in path.windows(2) {
        let hop = cyclic_distance(pair[0], pair[1], p);
        counts[hop - 1] += 1;
    }
    Some(FrequencyPartition::from_counts(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeros_ignored() {
        let a = FrequencyPartition::from_counts([1, 2, 0, 0]);
        let b = FrequencyPartition::from_counts([1, 2]);
        assert_eq!(a, b);
        assert_eq!(a.slots(), 2);
    }

    #[test]
    fn test_interior_zeros_kept() {
        let fp = FrequencyPartition::from_counts([2, 0, 1]);
        assert_eq!(fp.slots(), 3);
        assert_eq!(fp.iter().collect::<Vec<_>>(), vec![(1, 2), (3, 1)]);
        assert_eq!(fp.max_hop(), 3);
    }

    #[test]
    fn test_hop_multiset() {
        let fp = FrequencyPartition::from_counts([2, 0, 1]);
        assert_eq!(fp.hop_multiset(), vec![1, 1, 3]);
        assert!(FrequencyPartition::new().hop_multiset().is_empty());
    }

    #[test]
    fn test_l1_distance() {
        let a = FrequencyPartition::from_counts([2, 1]);
        let b = FrequencyPartition::from_counts([1, 1, 1]);
        assert_eq!(a.l1_distance(&b), 2);
        assert_eq!(b.l1_distance(&a), 2);
        assert_eq!(a.l1_distance(&a), 0);
    }

    #[test]
    fn test_evolution_helpers() {
        let mut fp = FrequencyPartition::from_counts([1, 1]);
        fp.increment_slot(0);
        assert_eq!(fp, FrequencyPartition::from_counts([2, 1]));
        assert_eq!(fp.push_unit(), 3);
        assert_eq!(fp, FrequencyPartition::from_counts([2, 1, 1]));
    }

    #[test]
    fn test_observed_simple_path() {
        let freq = observed_frequency(&[0, 1, 2, 3], 4).unwrap();
        assert_eq!(freq, FrequencyPartition::from_counts([3]));
    }

    #[test]
    fn test_observed_counts_wrap_distance() {
        // Edge (0, 3) on a 4-cycle has distance 1, not 3.
        let freq = observed_frequency(&[1, 2, 3, 0], 4).unwrap();
        assert_eq!(freq, FrequencyPartition::from_counts([3]));
    }

    #[test]
    fn test_observed_rejects_non_permutations() {
        assert!(observed_frequency(&[0], 1).is_none());
        assert!(observed_frequency(&[0, 1], 3).is_none());
        assert!(observed_frequency(&[0, 1, 1], 3).is_none());
        assert!(observed_frequency(&[0, 1, 5], 3).is_none());
        assert!(observed_frequency(&[0, 1, 2, 2], 3).is_none());
    }

    #[test]
    fn test_observed_invariant_under_rotation_and_mirror() {
        let p = 7;
        let path = vec![0, 2, 4, 6, 1, 3, 5];
        let base = observed_frequency(&path, p).unwrap();

        for shift in 0..p {
            let rotated: Vec<usize> = path.iter().map(|&v| (v + shift) % p).collect();
            assert_eq!(observed_frequency(&rotated, p).unwrap(), base);

            let mirrored: Vec<usize> = rotated.iter().map(|&v| (p - v) % p).collect();
            assert_eq!(observed_frequency(&mirrored, p).unwrap(), base);
        }

        let reversed: Vec<usize> = path.iter().rev().copied().collect();
        assert_eq!(observed_frequency(&reversed, p).unwrap(), base);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrequencyPartition::from_counts([3, 1]).to_string(), "(3, 1)");
        assert_eq!(FrequencyPartition::new().to_string(), "()");
    }
}
