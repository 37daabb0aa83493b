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

//! # Exhaustive Depth-First Enumeration
//!
//! Walks every tour rooted at city 0 with an explicit stack and no
//! bounding: the only children ever skipped are those reached over a
//! missing edge. Useful as the ground-truth baseline the bounded
//! strategies are measured against — when it runs to completion its best
//! tour is optimal by enumeration, not by proof machinery.
//!
//! The matrix is never copied or mutated; partial path costs are carried
//! on the stack and the closing edge is added at the leaves.

use fixedbitset::FixedBitSet;
use std::time::Instant;
use waypoint_model::{
    index::{CityIndex, ROOT_CITY, cities},
    matrix::CostMatrix,
    tour::Tour,
};
use waypoint_search::{
    coverage::CutTree,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::SolutionStats,
};

/// One partial path on the depth-first stack.
#[derive(Clone, Debug)]
struct PathNode<T> {
    path: Vec<CityIndex>,
    visited: FixedBitSet,
    cost: T,
}

/// Exhaustive depth-first tour enumerator. Stateless between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstConstructor;

impl DepthFirstConstructor {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Enumerates every reachable tour, recording each improvement.
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
        let mut max_frontier_size: usize = 0;

        if num_cities <= 1 {
            records.push(SolutionStats::placeholder(start_time.elapsed()));
            monitor.on_exit_search();
            return SolverOutcome::new(
                SolverResult::Infeasible,
                TerminationReason::InfeasibilityProven,
                records,
            );
        }

        let mut root_visited = FixedBitSet::with_capacity(num_cities);
        root_visited.insert(ROOT_CITY.get());
        let mut stack = vec![PathNode {
            path: vec![ROOT_CITY],
            visited: root_visited,
            cost: T::zero(),
        }];
        max_frontier_size = max_frontier_size.max(stack.len());

        let reason = loop {
            let Some(node) = stack.pop() else {
                break match records.last() {
                    Some(_) => TerminationReason::OptimalityProven,
                    None => TerminationReason::InfeasibilityProven,
                };
            };

            monitor.on_step();
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                break TerminationReason::Aborted(reason);
            }

            if node.path.len() == num_cities {
                cut_tree.cut_leaf();
                let closing = matrix.cost(node.path[node.path.len() - 1], ROOT_CITY);
                if !closing.is_finite() {
                    nodes_pruned += 1;
                    continue;
                }
                let score = node.cost + closing;
                let improves = match records.last() {
                    Some(record) => score < record.score,
                    None => true,
                };
                if improves {
                    let record = SolutionStats {
                        tour: Tour::from_cities(node.path),
                        score,
                        elapsed: start_time.elapsed(),
                        max_frontier_size,
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
                continue;
            }

            nodes_expanded += 1;
            let last = node.path[node.path.len() - 1];
            for city in cities(num_cities) {
                if node.visited.contains(city.get()) {
                    continue;
                }
                let edge = matrix.cost(last, city);
                if !edge.is_finite() {
                    // The whole subtree below a missing edge is unreachable.
                    nodes_pruned += 1;
                    cut_tree.cut(node.path.len() + 1);
                    continue;
                }

                let mut child_path = Vec::with_capacity(node.path.len() + 1);
                child_path.extend_from_slice(&node.path);
                child_path.push(city);
                let mut child_visited = node.visited.clone();
                child_visited.insert(city.get());

                stack.push(PathNode {
                    path: child_path,
                    visited: child_visited,
                    cost: node.cost + edge,
                });
            }
            max_frontier_size = max_frontier_size.max(stack.len());
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;
    use waypoint_model::tour::score_tour;
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

    fn random_matrix(num_cities: usize, seed: u64) -> CostMatrix<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows: Vec<Vec<f64>> = (0..num_cities)
            .map(|_| {
                (0..num_cities)
                    .map(|_| rng.gen_range(1..100) as f64)
                    .collect()
            })
            .collect();
        CostMatrix::from_rows(rows).unwrap()
    }

    fn brute_force_optimum(matrix: &CostMatrix<f64>) -> f64 {
        fn permute(
            matrix: &CostMatrix<f64>,
            path: &mut Vec<usize>,
            used: &mut Vec<bool>,
            best: &mut f64,
        ) {
            let n = matrix.num_cities();
            if path.len() == n {
                let tour = Tour::from_raw(path.iter().copied());
                let score = score_tour(&tour, matrix);
                if score < *best {
                    *best = score;
                }
                return;
            }
            for city in 1..n {
                if !used[city] {
                    used[city] = true;
                    path.push(city);
                    permute(matrix, path, used, best);
                    path.pop();
                    used[city] = false;
                }
            }
        }

        let n = matrix.num_cities();
        let mut best = f64::INFINITY;
        let mut used = vec![false; n];
        used[0] = true;
        permute(matrix, &mut vec![0], &mut used, &mut best);
        best
    }

    #[test]
    fn test_enumeration_finds_the_optimum() {
        let matrix = symmetric_matrix();
        let mut dfs = DepthFirstConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = dfs.solve(&matrix, &mut monitor);

        assert!(outcome.is_optimal());
        assert_eq!(outcome.reason, TerminationReason::OptimalityProven);
        let best = outcome.best().unwrap();
        assert_eq!(best.score, 12.0);
        let order: Vec<usize> = best.tour.iter().map(|c| c.get()).collect();
        assert!(order == [0, 1, 3, 2] || order == [0, 2, 3, 1]);
    }

    #[test]
    fn test_enumeration_matches_brute_force() {
        for num_cities in 4..=7 {
            let matrix = random_matrix(num_cities, 42);
            let mut dfs = DepthFirstConstructor::new();
            let mut monitor = NoOperationMonitor::new();
            let outcome = dfs.solve(&matrix, &mut monitor);
            assert_eq!(
                outcome.best().unwrap().score,
                brute_force_optimum(&matrix),
                "mismatch for {num_cities} cities"
            );
        }
    }

    #[test]
    fn test_infeasible_matrix_is_proven_infeasible() {
        let matrix =
            CostMatrix::from_rows(vec![vec![INF; 4], vec![INF; 4], vec![INF; 4], vec![INF; 4]])
                .unwrap();
        let mut dfs = DepthFirstConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = dfs.solve(&matrix, &mut monitor);

        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason, TerminationReason::InfeasibilityProven);
        assert!(outcome.records[0].is_placeholder());
    }

    #[test]
    fn test_degenerate_instances_are_infeasible() {
        for rows in [Vec::new(), vec![vec![INF]]] {
            let matrix = CostMatrix::from_rows(rows).unwrap();
            let mut dfs = DepthFirstConstructor::new();
            let mut monitor = NoOperationMonitor::new();
            let outcome = dfs.solve(&matrix, &mut monitor);
            assert!(outcome.is_infeasible());
        }
    }

    #[test]
    fn test_expired_time_limit_aborts() {
        let matrix = symmetric_matrix();
        let mut dfs = DepthFirstConstructor::new();
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        let outcome = dfs.solve(&matrix, &mut monitor);

        assert!(matches!(outcome.reason, TerminationReason::Aborted(_)));
        assert!(!outcome.has_solution());
    }

    #[test]
    fn test_statistics_are_populated() {
        let matrix = symmetric_matrix();
        let mut dfs = DepthFirstConstructor::new();
        let mut monitor = NoOperationMonitor::new();
        let outcome = dfs.solve(&matrix, &mut monitor);

        let best = outcome.best().unwrap();
        assert!(best.nodes_expanded > 0);
        assert!(best.max_frontier_size >= 3);
        assert!(best.fraction_covered > 0.0);
        assert!(best.fraction_covered <= 1.0);
    }
}
