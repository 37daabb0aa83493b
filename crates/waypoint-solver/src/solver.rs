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

//! # Seed-Then-Search Orchestration
//!
//! The one entry point the benchmark harness uses. A `WaypointSolver`
//! takes a `SolverConfig`, assembles the monitor stack (time limit,
//! optional progress logging), and dispatches to the configured strategy.
//!
//! For the branch-and-bound strategies a greedy nearest-neighbor pass runs
//! first under its own short sub-budget; its best tour seeds the incumbent
//! so pruning bites from the very first expansion. The seeding timer is
//! independent of the main budget. If greedy finds nothing, the search
//! simply starts with an open incumbent.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use waypoint_model::matrix::CostMatrix;
//! use waypoint_solver::config::{SolverConfig, Strategy};
//! use waypoint_solver::solver::WaypointSolver;
//!
//! let matrix = CostMatrix::from_rows(vec![
//!     vec![0.0, 2.0, 3.0, 5.0],
//!     vec![2.0, 0.0, 2.0, 3.0],
//!     vec![3.0, 2.0, 0.0, 4.0],
//!     vec![5.0, 3.0, 4.0, 0.0],
//! ])
//! .unwrap();
//!
//! let config = SolverConfig::new()
//!     .with_strategy(Strategy::BnbBestFirst)
//!     .with_time_limit(Duration::from_secs(10));
//! let mut solver = WaypointSolver::new(config);
//!
//! let outcome = solver.solve(&matrix);
//! assert!(outcome.is_optimal());
//! ```

use crate::config::{SolverConfig, Strategy};
use waypoint_bnb::bnb::BnbSolver;
use waypoint_bnb::frontier::{BestFirstFrontier, DepthFirstFrontier, Frontier};
use waypoint_construct::{
    dfs::DepthFirstConstructor, greedy::GreedyConstructor, random::RandomConstructor,
};
use waypoint_model::{matrix::CostMatrix, tour::Tour};
use waypoint_search::{
    monitor::{composite::CompositeMonitor, log::LogMonitor, time_limit::TimeLimitMonitor},
    num::SolverFloat,
    result::SolverOutcome,
};

/// High-level solver facade: one configuration, one `solve` call.
#[derive(Debug, Clone, Default)]
pub struct WaypointSolver {
    config: SolverConfig,
}

impl WaypointSolver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the instance with the configured strategy and budgets.
    pub fn solve<T>(&mut self, matrix: &CostMatrix<T>) -> SolverOutcome<T>
    where
        T: SolverFloat + 'static,
    {
        let mut monitor = self.build_monitor::<T>();

        match self.config.strategy() {
            Strategy::Greedy => GreedyConstructor::new().solve(matrix, &mut monitor),
            Strategy::Random => {
                let mut sampler = match self.config.rng_seed() {
                    Some(seed) => RandomConstructor::seeded(seed),
                    None => RandomConstructor::new(),
                };
                sampler.solve(matrix, &mut monitor)
            }
            Strategy::DepthFirst => DepthFirstConstructor::new().solve(matrix, &mut monitor),
            Strategy::BnbDepthFirst => {
                let seed = self.seed_incumbent(matrix);
                let mut solver = BnbSolver::new(DepthFirstFrontier::new());
                solver.solve_seeded(matrix, &mut monitor, seed)
            }
            Strategy::BnbBestFirst => {
                let seed = self.seed_incumbent(matrix);
                let mut solver = BnbSolver::new(BestFirstFrontier::new());
                solver.solve_seeded(matrix, &mut monitor, seed)
            }
        }
    }

    /// Solves with a caller-supplied frontier, bypassing the strategy
    /// field. The seeding pass still honors the configuration.
    pub fn solve_with_frontier<T, F>(
        &mut self,
        matrix: &CostMatrix<T>,
        frontier: F,
    ) -> SolverOutcome<T>
    where
        T: SolverFloat + 'static,
        F: Frontier<T>,
    {
        let mut monitor = self.build_monitor::<T>();
        let seed = self.seed_incumbent(matrix);
        let mut solver = BnbSolver::new(frontier);
        solver.solve_seeded(matrix, &mut monitor, seed)
    }

    /// Runs the greedy seeding pass under its own sub-budget and returns
    /// the best tour found, if any.
    fn seed_incumbent<T>(&self, matrix: &CostMatrix<T>) -> Option<(Tour, T)>
    where
        T: SolverFloat,
    {
        if !self.config.seed_incumbent() {
            return None;
        }

        let mut monitor = CompositeMonitor::<T>::new();
        if let Some(budget) = self.config.effective_seed_time_limit() {
            monitor.add_monitor(TimeLimitMonitor::new(budget));
        }

        let outcome = GreedyConstructor::new().solve(matrix, &mut monitor);
        outcome
            .best()
            .map(|record| (record.tour.clone(), record.score))
    }

    /// Assembles the monitor stack for the main search.
    fn build_monitor<T>(&self) -> CompositeMonitor<'static, T>
    where
        T: SolverFloat + 'static,
    {
        let mut monitor = CompositeMonitor::new();
        if let Some(limit) = self.config.time_limit() {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if self.config.log_progress() {
            monitor.add_monitor(LogMonitor::default());
        }
        monitor
    }
}
