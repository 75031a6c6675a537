//! One-vertex insertion heuristics for extending a known valid path.
//!
//! Both strategies try to grow a path of `p - 1` vertices into one of `p`
//! vertices realizing a new target partition, by splicing the next unused
//! vertex (`p - 1`) into one of the `p` gap positions. They are cheap
//! single-pass scans; when neither finds an exact realization the caller
//! falls back to the exhaustive search in [`crate::backtrack`].

use std::time::{Duration, Instant};

use crate::frequency::{observed_frequency, FrequencyPartition};

/// Number of best-scored candidates inspected by [`greedy_insert`].
pub const DEFAULT_TOP_K: usize = 3;

/// Outcome of a single insertion attempt.
#[derive(Debug, Clone)]
pub struct Insertion {
    /// The extended path, when some gap position realized the target exactly.
    pub path: Option<Vec<usize>>,
    /// Wall-clock time spent scanning candidate positions.
    pub elapsed: Duration,
}

impl Insertion {
    fn miss(started: Instant) -> Self {
        Insertion {
            path: None,
            elapsed: started.elapsed(),
        }
    }

    fn hit(path: Vec<usize>, started: Instant) -> Self {
        Insertion {
            path: Some(path),
            elapsed: started.elapsed(),
        }
    }
}

/// Tries every gap position in ascending order and returns the first
/// extension whose observed frequency equals `target` exactly.
///
/// Position 0 places the new vertex before the first path vertex, position
/// `base.len()` after the last. The new vertex is `p - 1`; if it already
/// occurs in `base` the attempt fails immediately.
///
/// # Example
/// ```
/// use hopfreq::frequency::FrequencyPartition;
/// use hopfreq::insertion::exact_insert;
///
/// // Every gap of [0, 1] accepts vertex 2 on a 3-cycle; the lowest wins.
/// let target = FrequencyPartition::from_counts([2]);
/// let attempt = exact_insert(&[0, 1], &target, 3);
/// assert_eq!(attempt.path, Some(vec![2, 0, 1]));
/// ```
pub fn exact_insert(base: &[usize], target: &FrequencyPartition, p: usize) -> Insertion {
    let started = Instant::now();
    if p == 0 {
        return Insertion::miss(started);
    }
    let new_vertex = p - 1;
    if base.contains(&new_vertex) {
        return Insertion::miss(started);
    }

    for pos in 0..=base.len() {
        let candidate = splice(base, pos, new_vertex);
        if observed_frequency(&candidate, p).as_ref() == Some(target) {
            return Insertion::hit(candidate, started);
        }
    }
    Insertion::miss(started)
}

/// Scores every gap position by the L1 distance between the extension's
/// observed frequency and `target`, then checks the `top_k` best-scored
/// candidates for an exact (zero-score) realization.
///
/// The sort is stable, so among equal scores the lowest gap position is
/// inspected first. In the staged pipeline this runs only after
/// [`exact_insert`] has failed, where a zero score should not occur; the
/// orchestrator surfaces one as an inconsistency rather than trusting it
/// silently.
pub fn greedy_insert(
    base: &[usize],
    target: &FrequencyPartition,
    p: usize,
    top_k: usize,
) -> Insertion {
    let started = Instant::now();
    if p == 0 {
        return Insertion::miss(started);
    }
    let new_vertex = p - 1;
    if base.contains(&new_vertex) {
        return Insertion::miss(started);
    }

    let mut candidates: Vec<(usize, Vec<usize>)> = Vec::with_capacity(base.len() + 1);
    for pos in 0..=base.len() {
        let candidate = splice(base, pos, new_vertex);
        let Some(freq) = observed_frequency(&candidate, p) else {
            continue;
        };
        candidates.push((freq.l1_distance(target), candidate));
    }
    candidates.sort_by_key(|(score, _)| *score);

    for (score, candidate) in candidates.into_iter().take(top_k) {
        if score == 0 {
            return Insertion::hit(candidate, started);
        }
    }
    Insertion::miss(started)
}

fn splice(base: &[usize], pos: usize, vertex: usize) -> Vec<usize> {
    let mut extended = Vec::with_capacity(base.len() + 1);
    extended.extend_from_slice(&base[..pos]);
    extended.push(vertex);
    extended.extend_from_slice(&base[pos..]);
    extended
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(counts: &[usize]) -> FrequencyPartition {
        FrequencyPartition::from_counts(counts.to_vec())
    }

    #[test]
    fn test_exact_prefers_lowest_gap_position() {
        // Every position yields two hops of length 1 on the 3-cycle.
        let attempt = exact_insert(&[0, 1], &fp(&[2]), 3);
        assert_eq!(attempt.path, Some(vec![2, 0, 1]));
    }

    #[test]
    fn test_exact_finds_interior_gap() {
        // Inserting 4 between 0 and 1 yields hops {1: 3, 2: 1} on the 5-cycle.
        let attempt = exact_insert(&[0, 1, 2, 3], &fp(&[3, 1]), 5);
        assert_eq!(attempt.path, Some(vec![0, 4, 1, 2, 3]));
    }

    #[test]
    fn test_exact_misses_unreachable_target() {
        // No single insertion into [0, 1, 2, 3] realizes {1: 1, 2: 3} on p=5.
        let attempt = exact_insert(&[0, 1, 2, 3], &fp(&[1, 3]), 5);
        assert!(attempt.path.is_none());
    }

    #[test]
    fn test_exact_rejects_present_vertex() {
        let attempt = exact_insert(&[0, 2, 1], &fp(&[2]), 3);
        assert!(attempt.path.is_none());
    }

    #[test]
    fn test_greedy_zero_score_match() {
        let attempt = greedy_insert(&[0, 1], &fp(&[2]), 3, DEFAULT_TOP_K);
        assert_eq!(attempt.path, Some(vec![2, 0, 1]));
    }

    #[test]
    fn test_greedy_rejects_nonzero_scores() {
        let attempt = greedy_insert(&[0, 1, 2, 3], &fp(&[1, 3]), 5, DEFAULT_TOP_K);
        assert!(attempt.path.is_none());
    }

    #[test]
    fn test_greedy_zero_score_outside_top_k() {
        // With top_k = 0 no candidate is inspected at all.
        let attempt = greedy_insert(&[0, 1], &fp(&[2]), 3, 0);
        assert!(attempt.path.is_none());
    }

    #[test]
    fn test_mismatched_base_length_never_matches() {
        // A base that is not one vertex short of p cannot produce a
        // comparable extension, so both heuristics miss.
        let target = fp(&[3, 1]);
        assert!(exact_insert(&[0, 1], &target, 5).path.is_none());
        assert!(greedy_insert(&[0, 1], &target, 5, DEFAULT_TOP_K)
            .path
            .is_none());
    }
}
