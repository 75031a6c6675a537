//! Iterated growth of a valid path as its target partition evolves.
//!
//! Each iteration evolves the frequency partition by one edge, filters the
//! evolved target through the divisor condition, and then runs the three
//! construction stages in strict order: exact insertion, scored insertion,
//! exhaustive backtracking. The first stage to succeed supplies the base
//! path for the next iteration; a failed or skipped iteration leaves the
//! base untouched and its evolved partition is discarded, never retried.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::backtrack;
use crate::error::{Error, Result};
use crate::feasibility::{self, Feasibility};
use crate::frequency::{observed_frequency, FrequencyPartition};
use crate::insertion::{self, DEFAULT_TOP_K};

/// Upper bound on the iteration budget a single run may request.
pub const MAX_ITERATIONS: usize = 50;

/// How the target partition evolves between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Cyclically increment one existing tuple slot per iteration.
    Increment,
    /// Append a brand-new hop length with count one, while the target cycle
    /// still has unused distinct hop lengths.
    Append,
}

/// Construction stage that produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Exact-match insertion of the new vertex.
    ReuseInsert,
    /// Best-of-top-k scored insertion.
    GreedyInsert,
    /// Exhaustive backtracking search from scratch.
    Backtrack,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::ReuseInsert => "reuse-insert",
            Method::GreedyInsert => "greedy-insert",
            Method::Backtrack => "backtrack",
        };
        f.write_str(name)
    }
}

/// How a single growth iteration resolved.
///
/// Everything except [`Outcome::Extended`] is a normal negative result of a
/// search problem, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A construction stage realized the evolved partition.
    Extended(Method),
    /// The evolved partition failed the divisor condition; no construction
    /// was attempted.
    Infeasible {
        /// Violating divisor of the target vertex count.
        divisor: usize,
        /// Count of hops that are multiples of that divisor.
        count: usize,
    },
    /// All three construction stages failed on a feasible partition.
    Exhausted,
    /// Append-mode had no unused distinct hop length left for the target
    /// cycle; the iteration was skipped before any check ran.
    HopLimitReached {
        /// Maximum number of distinct hop lengths on the target cycle.
        max_distinct: usize,
    },
}

/// One iteration's outcome as handed to the record sink.
#[derive(Debug, Clone)]
pub struct GrowthRecord {
    /// Iteration index, 1-based.
    pub iteration: usize,
    /// Target vertex count of this iteration.
    pub p: usize,
    /// Base partition the iteration started from.
    pub previous: FrequencyPartition,
    /// Evolved target partition (the attempted one, on a skip).
    pub evolved: FrequencyPartition,
    /// How the iteration resolved.
    pub outcome: Outcome,
    /// The realizing path, when one was constructed.
    pub path: Option<Vec<usize>>,
    /// Candidate vertices rejected by the backtracking stage.
    pub backtracks: u64,
    /// Total wall-clock time of all construction stages attempted.
    pub elapsed: Duration,
}

impl GrowthRecord {
    /// True when this iteration extended the base path.
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Extended(_))
    }

    /// The construction stage that succeeded, if any.
    pub fn method(&self) -> Option<Method> {
        match self.outcome {
            Outcome::Extended(method) => Some(method),
            _ => None,
        }
    }

    /// Whether the divisor condition passed, or `None` when the iteration
    /// was skipped before the check ran.
    pub fn feasibility_passed(&self) -> Option<bool> {
        match self.outcome {
            Outcome::Extended(_) | Outcome::Exhausted => Some(true),
            Outcome::Infeasible { .. } => Some(false),
            Outcome::HopLimitReached { .. } => None,
        }
    }
}

/// Receives one record per iteration. The sink owns any persistence or
/// presentation format; the growth loop only hands over structured records.
pub trait RecordSink {
    /// Called once per iteration, in order.
    fn record(&mut self, record: &GrowthRecord);
}

/// Sink that drops every record, for callers that only want the returned
/// record list.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn record(&mut self, _record: &GrowthRecord) {}
}

/// Configuration for a growth run.
#[derive(Debug, Clone)]
pub struct GrowthConfig {
    /// Evolution policy applied to the partition each iteration.
    pub policy: GrowthPolicy,
    /// Number of growth iterations to attempt (1 to [`MAX_ITERATIONS`]).
    pub iterations: usize,
    /// Candidates inspected by the scored-insertion stage.
    pub top_k: usize,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        GrowthConfig {
            policy: GrowthPolicy::Append,
            iterations: 10,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Grows `initial_path` one vertex per iteration as the target partition
/// evolves, reporting every iteration to `sink` and returning the full
/// record sequence.
///
/// The initial pair must be consistent: the path a permutation of `0..len`
/// with at least two vertices, and the partition accounting for exactly
/// `len - 1` edges. Violations fail fast before any iteration runs.
///
/// # Example
/// ```
/// use hopfreq::frequency::FrequencyPartition;
/// use hopfreq::growth::{grow, DiscardSink, GrowthConfig, GrowthPolicy, Method};
///
/// let initial = FrequencyPartition::from_counts([1]);
/// let config = GrowthConfig {
///     policy: GrowthPolicy::Increment,
///     iterations: 1,
///     ..GrowthConfig::default()
/// };
/// let records = grow(&[0, 1], &initial, &config, &mut DiscardSink).unwrap();
/// assert_eq!(records[0].method(), Some(Method::ReuseInsert));
/// assert_eq!(records[0].path, Some(vec![2, 0, 1]));
/// ```
pub fn grow(
    initial_path: &[usize],
    initial_partition: &FrequencyPartition,
    config: &GrowthConfig,
    sink: &mut dyn RecordSink,
) -> Result<Vec<GrowthRecord>> {
    validate_initial(initial_path, initial_partition)?;
    if config.iterations == 0 || config.iterations > MAX_ITERATIONS {
        return Err(Error::invalid_input(format!(
            "iteration budget must be between 1 and {MAX_ITERATIONS}"
        )));
    }
    if config.top_k == 0 {
        return Err(Error::invalid_input("top_k must be at least 1"));
    }

    let mut base_path = initial_path.to_vec();
    let mut base_partition = initial_partition.clone();
    let mut records = Vec::with_capacity(config.iterations);

    for iteration in 1..=config.iterations {
        let previous = base_partition.clone();
        let p_prev = base_path.len();

        let mut evolved = base_partition.clone();
        match config.policy {
            GrowthPolicy::Increment => {
                let slot = (iteration - 1) % evolved.slots();
                evolved.increment_slot(slot);
            }
            GrowthPolicy::Append => {
                let max_distinct = (p_prev + 1) / 2;
                if evolved.slots() + 1 > max_distinct {
                    evolved.push_unit();
                    info!(
                        "iteration {iteration}: skipped, appending hop would exceed \
                         {max_distinct} distinct hop lengths for p={}",
                        p_prev + 1
                    );
                    let record = GrowthRecord {
                        iteration,
                        p: p_prev + 1,
                        previous,
                        evolved,
                        outcome: Outcome::HopLimitReached { max_distinct },
                        path: None,
                        backtracks: 0,
                        elapsed: Duration::ZERO,
                    };
                    sink.record(&record);
                    records.push(record);
                    continue;
                }
                evolved.push_unit();
            }
        }

        let p_curr = evolved.edge_count() + 1;
        info!("iteration {iteration}: p={p_curr}, target {evolved}");

        if let Feasibility::Infeasible { divisor, count } = feasibility::check(&evolved, p_curr) {
            info!(
                "iteration {iteration}: divisor condition failed at d={divisor}, \
                 count {count} > {}",
                p_curr - divisor
            );
            let record = GrowthRecord {
                iteration,
                p: p_curr,
                previous,
                evolved,
                outcome: Outcome::Infeasible { divisor, count },
                path: None,
                backtracks: 0,
                elapsed: Duration::ZERO,
            };
            sink.record(&record);
            records.push(record);
            continue;
        }

        let (outcome, path, backtracks, elapsed) =
            construct(&base_path, &evolved, p_curr, config.top_k, iteration);

        if let Some(found) = &path {
            debug_assert_eq!(observed_frequency(found, p_curr).as_ref(), Some(&evolved));
            base_path = found.clone();
            base_partition = evolved.clone();
        }

        let record = GrowthRecord {
            iteration,
            p: p_curr,
            previous,
            evolved,
            outcome,
            path,
            backtracks,
            elapsed,
        };
        sink.record(&record);
        records.push(record);
    }

    Ok(records)
}

/// Runs the three construction stages in strict order; the first success
/// wins and no later stage runs.
fn construct(
    base: &[usize],
    target: &FrequencyPartition,
    p: usize,
    top_k: usize,
    iteration: usize,
) -> (Outcome, Option<Vec<usize>>, u64, Duration) {
    let mut elapsed = Duration::ZERO;

    let attempt = insertion::exact_insert(base, target, p);
    elapsed += attempt.elapsed;
    if let Some(path) = attempt.path {
        info!("iteration {iteration}: reuse-insert succeeded");
        return (Outcome::Extended(Method::ReuseInsert), Some(path), 0, elapsed);
    }

    debug!("iteration {iteration}: reuse-insert failed, trying greedy-insert");
    let attempt = insertion::greedy_insert(base, target, p, top_k);
    elapsed += attempt.elapsed;
    if let Some(path) = attempt.path {
        // A zero-score candidate is an exact match, which the exact stage
        // just failed to find; the scan orders disagree somewhere.
        warn!("iteration {iteration}: greedy-insert found an exact match that reuse-insert missed");
        return (Outcome::Extended(Method::GreedyInsert), Some(path), 0, elapsed);
    }

    debug!("iteration {iteration}: greedy-insert failed, falling back to backtracking");
    let outcome = backtrack::search(target, p);
    elapsed += outcome.elapsed;
    match outcome.path {
        Some(path) => {
            info!(
                "iteration {iteration}: backtracking succeeded after {} rejected candidates",
                outcome.backtracks
            );
            (
                Outcome::Extended(Method::Backtrack),
                Some(path),
                outcome.backtracks,
                elapsed,
            )
        }
        None => {
            info!("iteration {iteration}: all construction stages failed");
            (Outcome::Exhausted, None, outcome.backtracks, elapsed)
        }
    }
}

fn validate_initial(path: &[usize], partition: &FrequencyPartition) -> Result<()> {
    if path.len() < 2 {
        return Err(Error::invalid_input(
            "initial path must have at least 2 vertices",
        ));
    }
    let p = path.len();
    let mut seen = vec![false; p];
    for &vertex in path {
        if vertex >= p {
            return Err(Error::invalid_input(format!(
                "vertex {vertex} is out of range for a path of {p} vertices"
            )));
        }
        if seen[vertex] {
            return Err(Error::invalid_input(format!(
                "vertex {vertex} occurs more than once in the initial path"
            )));
        }
        seen[vertex] = true;
    }
    let path_edges = p - 1;
    let partition_edges = partition.edge_count();
    if path_edges != partition_edges {
        return Err(Error::EdgeCountMismatch {
            path_edges,
            partition_edges,
        });
    }
    Ok(())
}
