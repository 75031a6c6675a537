//! Divisor-based necessary condition for realizing a frequency partition.
//!
//! Hops whose length is a multiple of a divisor `d` of `p` stay inside one
//! residue class modulo `d`. A Hamiltonian path on `p` vertices must leave
//! each of the `d` classes often enough to cover all of them, so at most
//! `p - d` of its edges can use such hops. Passing the check does not
//! guarantee a realizing path exists; it is a cheap filter run before any
//! construction attempt.

use crate::frequency::FrequencyPartition;

/// Verdict of the divisor condition, carrying the first violation found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Every divisor of `p` satisfies the bound.
    Feasible,
    /// The hops that are multiples of `divisor` total `count > p - divisor`.
    Infeasible {
        /// Smallest divisor of `p` whose bound is violated.
        divisor: usize,
        /// Observed total count of hops that are multiples of that divisor.
        count: usize,
    },
}

impl Feasibility {
    /// True when no divisor bound is violated.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Checks the divisor condition for `partition` at vertex count `p`.
///
/// Divisors are scanned ascending, 1 and `p` included, and the first
/// violation is reported for diagnostics. The check is a pure function of
/// its inputs and costs O(p · number-of-divisors(p)).
///
/// # Example
/// ```
/// use hopfreq::feasibility::{check, Feasibility};
/// use hopfreq::frequency::FrequencyPartition;
///
/// // Three hops of length 2 on a 4-cycle collapse onto the even vertices.
/// let fp = FrequencyPartition::from_counts([0, 3]);
/// assert_eq!(check(&fp, 4), Feasibility::Infeasible { divisor: 2, count: 3 });
///
/// let fp = FrequencyPartition::from_counts([2, 1]);
/// assert!(check(&fp, 4).is_feasible());
/// ```
pub fn check(partition: &FrequencyPartition, p: usize) -> Feasibility {
    for divisor in 1..=p {
        if p % divisor != 0 {
            continue;
        }
        let count: usize = partition
            .iter()
            .filter(|(hop, _)| hop % divisor == 0)
            .map(|(_, count)| count)
            .sum();
        if count > p - divisor {
            return Feasibility::Infeasible { divisor, count };
        }
    }
    Feasibility::Feasible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(counts: &[usize]) -> FrequencyPartition {
        FrequencyPartition::from_counts(counts.to_vec())
    }

    #[test]
    fn test_boundary_count_passes() {
        // Hop 2 appears exactly p - d = 2 times for divisor 2: at the limit.
        assert!(check(&fp(&[1, 2]), 4).is_feasible());
        // All p - 1 hops counted under divisor 1: also at the limit.
        assert!(check(&fp(&[3]), 4).is_feasible());
    }

    #[test]
    fn test_over_limit_reports_divisor_and_count() {
        assert_eq!(
            check(&fp(&[0, 3]), 4),
            Feasibility::Infeasible {
                divisor: 2,
                count: 3
            }
        );
    }

    #[test]
    fn test_divisor_one_rejects_excess_edges() {
        // Four hops on a 4-cycle exceed the p - 1 = 3 edges of any path.
        assert_eq!(
            check(&fp(&[4]), 4),
            Feasibility::Infeasible {
                divisor: 1,
                count: 4
            }
        );
    }

    #[test]
    fn test_prime_cycle_only_constrained_by_one() {
        // 5 is prime: only divisors 1 and 5 apply, and no hop is a multiple
        // of 5, so any partition with at most 4 hops passes.
        assert!(check(&fp(&[2, 2]), 5).is_feasible());
        assert!(check(&fp(&[0, 4]), 5).is_feasible());
    }

    #[test]
    fn test_pure_and_repeatable() {
        let partition = fp(&[0, 3]);
        let first = check(&partition, 4);
        let second = check(&partition, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_partition_feasible() {
        assert!(check(&FrequencyPartition::new(), 1).is_feasible());
    }
}
