//! Exhaustive depth-first construction of a path realizing a frequency
//! partition from scratch.
//!
//! The search owns a remaining hop multiset and extends a prefix one edge at
//! a time, branching once per *distinct* remaining hop length. Duplicate
//! occurrences of a hop are interchangeable, so enumerating them separately
//! would only re-explore isomorphic subtrees. The prefix is fixed to start
//! at vertex 0; rotational symmetry of the cycle guarantees this excludes no
//! solution class.

use std::time::{Duration, Instant};

use crate::frequency::FrequencyPartition;

/// Result of one exhaustive search invocation.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// A path realizing the target exactly, or `None` when the tree is
    /// exhausted without one.
    pub path: Option<Vec<usize>>,
    /// Candidate vertices rejected because they were already on the path.
    pub backtracks: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// True when a realizing path was found.
    pub fn succeeded(&self) -> bool {
        self.path.is_some()
    }
}

/// Search state owned by a single invocation and threaded through the
/// recursion. Nothing here is shared across concurrent searches.
struct SearchState {
    p: usize,
    path: Vec<usize>,
    visited: Vec<bool>,
    /// `remaining[h - 1]` = unused occurrences of hop length `h`.
    remaining: Vec<usize>,
    remaining_total: usize,
    backtracks: u64,
}

/// Searches for a Hamiltonian path on the `p`-cycle whose hop-length
/// frequency equals `target` exactly.
///
/// The first realizing path found is returned; no further alternatives are
/// explored once one exists. Hop lengths greater than `p / 2` are not cyclic
/// distances on a `p`-cycle, so a target containing one fails without
/// searching; admitting it would let the walk wrap modulo `p` and produce a
/// path whose observed frequency differs from the target.
///
/// # Example
/// ```
/// use hopfreq::backtrack::search;
/// use hopfreq::frequency::{observed_frequency, FrequencyPartition};
///
/// let target = FrequencyPartition::from_counts([1, 3]);
/// let outcome = search(&target, 5);
/// let path = outcome.path.unwrap();
/// assert_eq!(observed_frequency(&path, 5), Some(target));
/// ```
pub fn search(target: &FrequencyPartition, p: usize) -> SearchOutcome {
    let started = Instant::now();
    if p == 0 || target.max_hop() * 2 > p {
        return SearchOutcome {
            path: None,
            backtracks: 0,
            elapsed: started.elapsed(),
        };
    }

    let mut remaining = vec![0usize; target.slots()];
    for (hop, count) in target.iter() {
        remaining[hop - 1] = count;
    }
    let remaining_total = target.edge_count();

    let mut path = Vec::with_capacity(p);
    path.push(0);
    let mut visited = vec![false; p];
    visited[0] = true;

    let mut state = SearchState {
        p,
        path,
        visited,
        remaining,
        remaining_total,
        backtracks: 0,
    };

    let found = extend(&mut state);
    SearchOutcome {
        path: if found { Some(state.path) } else { None },
        backtracks: state.backtracks,
        elapsed: started.elapsed(),
    }
}

/// Tries to grow the prefix by one edge. Returns `true` as soon as a full
/// path with an empty multiset is reached; the `true` propagates through
/// every pending frame, abandoning all remaining branches.
fn extend(state: &mut SearchState) -> bool {
    if state.path.len() == state.p {
        // Full prefix with leftover hops is a dead branch, not a solution.
        return state.remaining_total == 0;
    }

    let current = state.path[state.path.len() - 1];

    for hop in 1..=state.remaining.len() {
        if state.remaining[hop - 1] == 0 {
            continue;
        }
        state.remaining[hop - 1] -= 1;
        state.remaining_total -= 1;

        let forward = (current + hop) % state.p;
        let backward = (current + state.p - hop) % state.p;
        // Both directions coincide when hop is exactly half the cycle.
        let directions = if forward == backward { 1 } else { 2 };

        for next in [forward, backward].into_iter().take(directions) {
            if state.visited[next] {
                state.backtracks += 1;
                continue;
            }
            state.visited[next] = true;
            state.path.push(next);
            if extend(state) {
                return true;
            }
            state.path.pop();
            state.visited[next] = false;
        }

        state.remaining[hop - 1] += 1;
        state.remaining_total += 1;
    }
    false
}
