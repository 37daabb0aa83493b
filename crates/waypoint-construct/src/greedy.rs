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

//! # Greedy Nearest-Neighbor Construction
//!
//! Builds one tour per possible start city: from the current city, always
//! move to the cheapest unvisited neighbor (smallest index on ties), then
//! close the cycle back to the start. Each completed walk is scored against
//! the original matrix; improving finite tours are recorded.
//!
//! Greedy walks can dead-end on sparse matrices (no finite edge to any
//! unvisited city) and the closing edge can be missing, so a pass over all
//! start cities may produce nothing. That is not a proof of anything — the
//! run ends with `WorkExhausted` and the caller decides what to do next.
//!
//! This constructor doubles as the incumbent seeder for branch-and-bound:
//! run it under a short time budget and feed `best()` into `solve_seeded`.

use fixedbitset::FixedBitSet;
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

/// Nearest-neighbor tour constructor. Stateless; one instance can run any
/// number of instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyConstructor;

impl GreedyConstructor {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Runs one nearest-neighbor walk per start city and returns the
    /// anytime trace of improving tours.
    pub fn solve<T, S>(&mut self, matrix: &CostMatrix<T>, monitor: &mut S) -> SolverOutcome<T>
    where
        T: SolverFloat,
        S: SearchMonitor<T>,
    {
        let session = GreedySession {
            matrix,
            monitor,
            cut_tree: CutTree::new(matrix.num_cities()),
            records: Vec::new(),
            nodes_expanded: 0,
            nodes_pruned: 0,
            start_time: Instant::now(),
        };
        session.run()
    }
}

struct GreedySession<'a, T, S>
where
    T: SolverFloat,
    S: SearchMonitor<T>,
{
    matrix: &'a CostMatrix<T>,
    monitor: &'a mut S,
    cut_tree: CutTree,
    records: Vec<SolutionStats<T>>,
    nodes_expanded: u64,
    nodes_pruned: u64,
    start_time: Instant,
}

impl<'a, T, S> GreedySession<'a, T, S>
where
    T: SolverFloat,
    S: SearchMonitor<T>,
{
    fn run(mut self) -> SolverOutcome<T> {
        self.monitor.on_enter_search(self.matrix);

        let num_cities = self.matrix.num_cities();
        if num_cities <= 1 {
            self.records
                .push(SolutionStats::placeholder(self.start_time.elapsed()));
            self.monitor.on_exit_search();
            return SolverOutcome::new(
                SolverResult::Infeasible,
                TerminationReason::InfeasibilityProven,
                self.records,
            );
        }

        for start in cities(num_cities) {
            self.monitor.on_step();
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                return self.finalize_aborted(reason);
            }

            if let Some(tour) = self.walk_from(start) {
                self.complete_walk(tour);
            }
        }

        self.finalize_exhausted()
    }

    /// One nearest-neighbor walk. Returns `None` if the walk dead-ends
    /// before visiting every city.
    fn walk_from(&mut self, start: CityIndex) -> Option<Tour> {
        let num_cities = self.matrix.num_cities();
        let mut tour = Tour::new();
        tour.push(start);
        let mut visited = FixedBitSet::with_capacity(num_cities);
        visited.insert(start.get());
        let mut current = start;

        for _ in 1..num_cities {
            let mut best: Option<(CityIndex, T)> = None;
            for city in cities(num_cities) {
                if visited.contains(city.get()) {
                    continue;
                }
                let edge = self.matrix.cost(current, city);
                if !edge.is_finite() {
                    continue;
                }
                match best {
                    Some((_, cost)) if cost <= edge => {}
                    _ => best = Some((city, edge)),
                }
            }

            let Some((next, _)) = best else {
                // Dead end: no finite edge to any unvisited city.
                self.nodes_pruned += 1;
                return None;
            };

            visited.insert(next.get());
            tour.push(next);
            self.nodes_expanded += 1;
            current = next;
        }

        Some(tour)
    }

    /// Scores a completed walk and records it if it improves on the best
    /// tour found so far.
    fn complete_walk(&mut self, tour: Tour) {
        self.cut_tree.cut_leaf();
        let score = score_tour(&tour, self.matrix);
        if !score.is_finite() {
            // The closing edge was missing.
            self.nodes_pruned += 1;
            return;
        }

        let improves = match self.records.last() {
            Some(record) => score < record.score,
            None => true,
        };
        if improves {
            self.emit_record(tour, score);
        }
    }

    fn emit_record(&mut self, tour: Tour, score: T) {
        let record = SolutionStats {
            tour,
            score,
            elapsed: self.start_time.elapsed(),
            max_frontier_size: 1,
            nodes_expanded: self.nodes_expanded,
            nodes_pruned: self.nodes_pruned,
            leaves_covered: self.cut_tree.leaves_covered(),
            fraction_covered: self.cut_tree.fraction_covered(),
        };
        self.monitor.on_solution_found(&record);
        self.records.push(record);
    }

    fn finalize_exhausted(mut self) -> SolverOutcome<T> {
        self.monitor.on_exit_search();
        match self.records.last().cloned() {
            Some(best) => SolverOutcome::new(
                SolverResult::Feasible(best),
                TerminationReason::WorkExhausted,
                self.records,
            ),
            None => {
                self.records
                    .push(SolutionStats::placeholder(self.start_time.elapsed()));
                SolverOutcome::new(
                    SolverResult::Unknown,
                    TerminationReason::WorkExhausted,
                    self.records,
                )
            }
        }
    }

    fn finalize_aborted(mut self, reason: String) -> SolverOutcome<T> {
        self.monitor.on_exit_search();
        match self.records.last().cloned() {
            Some(best) => SolverOutcome::new(
                SolverResult::Feasible(best),
                TerminationReason::Aborted(reason),
                self.records,
            ),
            None => {
                self.records
                    .push(SolutionStats::placeholder(self.start_time.elapsed()));
                SolverOutcome::new(
                    SolverResult::Unknown,
                    TerminationReason::Aborted(reason),
                    self.records,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use waypoint_search::monitor::{no_op::NoOperationMonitor, time_limit::TimeLimitMonitor};

    const INF: f64 = f64::INFINITY;

    fn symmetric_matrix() -> CostMatrix<f64> {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 3.0, 5.0],
            vec![2.0, 0.0, 2.0, 3.0],
            vec![3.0, 2.0, 0.0, 4.0],
            vec![5.0, 3.0, 4.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_greedy_finds_a_feasible_tour() {
        let matrix = symmetric_matrix();
        let mut constructor = GreedyConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = constructor.solve(&matrix, &mut monitor);

        assert!(outcome.is_feasible());
        assert_eq!(outcome.reason, TerminationReason::WorkExhausted);
        let best = outcome.best().unwrap();
        assert!(best.tour.is_complete(4));
        assert_eq!(best.score, score_tour(&best.tour, &matrix));
        // Greedy from city 0: 0 -> 1 (2) -> 2 (2) -> 3 (4) -> close (5) = 13.
        // Some start city may do better, but nothing beats the optimum.
        assert!(best.score >= 12.0);
        assert!(best.score <= 13.0);
    }

    #[test]
    fn test_greedy_prefers_smallest_index_on_ties() {
        // From city 0, edges to 1 and 2 both cost 2.
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 2.0, 9.0],
            vec![9.0, 0.0, 1.0, 1.0],
            vec![1.0, 9.0, 0.0, 1.0],
            vec![1.0, 1.0, 9.0, 0.0],
        ])
        .unwrap();
        let mut constructor = GreedyConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = constructor.solve(&matrix, &mut monitor);

        // The first recorded walk starts at city 0 and picks city 1.
        let first = &outcome.records[0];
        assert_eq!(first.tour.cities()[0], CityIndex::new(0));
        assert_eq!(first.tour.cities()[1], CityIndex::new(1));
    }

    #[test]
    fn test_greedy_records_are_strictly_improving() {
        // Start city 0 dead-ends into an expensive closing edge; later
        // start cities find cheaper cycles.
        let matrix = CostMatrix::from_rows(vec![
            vec![INF, 1.0, 50.0, 50.0],
            vec![50.0, INF, 1.0, 50.0],
            vec![50.0, 50.0, INF, 1.0],
            vec![1.0, 50.0, 50.0, INF],
        ])
        .unwrap();
        let mut constructor = GreedyConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = constructor.solve(&matrix, &mut monitor);

        assert!(outcome.has_solution());
        for pair in outcome.records.windows(2) {
            assert!(pair[1].score < pair[0].score);
        }
    }

    #[test]
    fn test_greedy_on_infeasible_matrix_returns_placeholder() {
        let matrix =
            CostMatrix::from_rows(vec![vec![INF; 4], vec![INF; 4], vec![INF; 4], vec![INF; 4]])
                .unwrap();
        let mut constructor = GreedyConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = constructor.solve(&matrix, &mut monitor);

        assert_eq!(outcome.result, SolverResult::Unknown);
        assert_eq!(outcome.reason, TerminationReason::WorkExhausted);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].is_placeholder());
    }

    #[test]
    fn test_greedy_degenerate_instances_are_infeasible() {
        for rows in [Vec::new(), vec![vec![INF]]] {
            let matrix = CostMatrix::from_rows(rows).unwrap();
            let mut constructor = GreedyConstructor::new();
            let mut monitor = NoOperationMonitor::new();
            let outcome = constructor.solve(&matrix, &mut monitor);

            assert!(outcome.is_infeasible());
            assert!(outcome.records[0].is_placeholder());
        }
    }

    #[test]
    fn test_greedy_respects_expired_time_limit() {
        let matrix = symmetric_matrix();
        let mut constructor = GreedyConstructor::new();
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let outcome = constructor.solve(&matrix, &mut monitor);

        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
        assert!(!outcome.has_solution());
    }
}
