// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Random Tour Sampling
//!
//! Draws uniform random tours until the monitor terminates the run,
//! scoring each against the original matrix and recording improving ones.
//! Tours are rooted at city 0 — a cycle's score is rotation-invariant, so
//! sampling only the `(N-1)!` rooted permutations loses nothing and makes
//! the sample space match the coverage accounting exactly.
//!
//! On small instances every rooted permutation is remembered in a hash
//! set, duplicates are re-drawn instead of re-scored, and draining the
//! whole space turns the sampler into an exhaustive enumerator: the run
//! then ends with a genuine optimality (or infeasibility) proof. Above
//! [`DEDUP_PERMUTATION_CAP`] the set would dominate memory, so duplicates
//! are accepted; at those sizes a collision is vanishingly unlikely.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use std::time::Instant;
use waypoint_model::{
    index::{CityIndex, cities},
    matrix::CostMatrix,
    tour::{Tour, score_tour},
};
use waypoint_search::{
    coverage::CutTree,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::SolutionStats,
};

/// Largest rooted-permutation count for which sampled tours are
/// deduplicated. `(N-1)!` fits under this cap for `N <= 10`.
pub const DEDUP_PERMUTATION_CAP: u64 = 1_000_000;

/// Returns `(num_cities - 1)!` if it fits under the dedup cap.
fn rooted_permutations(num_cities: usize) -> Option<u64> {
    let mut total: u64 = 1;
    for k in 1..num_cities as u64 {
        total = total.checked_mul(k)?;
        if total > DEDUP_PERMUTATION_CAP {
            return None;
        }
    }
    Some(total)
}

/// Uniform random tour sampler.
///
/// Shuffling dominates the loop, so the generator is a non-cryptographic
/// `SmallRng`; statistical uniformity is all sampling needs.
#[derive(Debug, Clone)]
pub struct RandomConstructor {
    rng: SmallRng,
}

impl RandomConstructor {
    /// Creates a sampler with an operating-system-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a sampler with a fixed seed. Deterministic; meant for
    /// tests and reproducible benchmark runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Samples tours until the monitor terminates the run or, on small
    /// instances, until every rooted permutation has been scored.
    pub fn solve<T, S>(&mut self, matrix: &CostMatrix<T>, monitor: &mut S) -> SolverOutcome<T>
    where
        T: SolverFloat,
        S: SearchMonitor<T>,
    {
        monitor.on_enter_search(matrix);

        let num_cities = matrix.num_cities();
        let start_time = Instant::now();
        let mut cut_tree = CutTree::new(num_cities);
        let mut records: Vec<SolutionStats<T>> = Vec::new();
        let mut nodes_expanded: u64 = 0;
        let mut nodes_pruned: u64 = 0;

        if num_cities <= 1 {
            records.push(SolutionStats::placeholder(start_time.elapsed()));
            monitor.on_exit_search();
            return SolverOutcome::new(
                SolverResult::Infeasible,
                TerminationReason::InfeasibilityProven,
                records,
            );
        }

        let total = rooted_permutations(num_cities);
        let mut seen: FxHashSet<Vec<CityIndex>> = FxHashSet::default();

        // path[0] stays the root city; only the suffix is shuffled.
        let mut path: Vec<CityIndex> = cities(num_cities).collect();

        let reason = loop {
            monitor.on_step();
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                break TerminationReason::Aborted(reason);
            }

            path[1..].shuffle(&mut self.rng);

            if total.is_some() && !seen.insert(path[1..].to_vec()) {
                // Already scored this tour; draw again.
                continue;
            }

            nodes_expanded += 1;
            cut_tree.cut_leaf();

            let tour = Tour::from_cities(path.clone());
            let score = score_tour(&tour, matrix);

            let improves = score.is_finite()
                && match records.last() {
                    Some(record) => score < record.score,
                    None => true,
                };
            if improves {
                let record = SolutionStats {
                    tour,
                    score,
                    elapsed: start_time.elapsed(),
                    max_frontier_size: 1,
                    nodes_expanded,
                    nodes_pruned,
                    leaves_covered: cut_tree.leaves_covered(),
                    fraction_covered: cut_tree.fraction_covered(),
                };
                monitor.on_solution_found(&record);
                records.push(record);
            } else {
                nodes_pruned += 1;
            }

            if let Some(total) = total {
                if seen.len() as u64 == total {
                    break match records.last() {
                        Some(_) => TerminationReason::OptimalityProven,
                        None => TerminationReason::InfeasibilityProven,
                    };
                }
            }
        };

        monitor.on_exit_search();

        let result = match (&reason, records.last().cloned()) {
            (TerminationReason::OptimalityProven, Some(best)) => SolverResult::Optimal(best),
            (_, Some(best)) => SolverResult::Feasible(best),
            (TerminationReason::InfeasibilityProven, None) => SolverResult::Infeasible,
            (_, None) => SolverResult::Unknown,
        };
        if records.is_empty() {
            records.push(SolutionStats::placeholder(start_time.elapsed()));
        }
        SolverOutcome::new(result, reason, records)
    }
}

impl Default for RandomConstructor {
    fn default() -> Self {
        Self::new()
    }
}
