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

//! # Progress Log Monitor
//!
//! Prints a fixed-width progress table to stdout: a heartbeat line at most
//! once per `log_interval` (gated additionally by a step bitmask so the
//! clock is not read on every pop), and one line per improving solution.
//! Purely observational; its `search_command` never terminates the search.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    stats::SolutionStats,
};
use std::time::{Duration, Instant};
use waypoint_model::matrix::CostMatrix;

#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: SolverFloat,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    best_score: Option<T>,
    nodes_expanded: u64,
    nodes_pruned: u64,
    fraction_covered: f64,
}

impl<T> LogMonitor<T>
where
    T: SolverFloat,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            best_score: None,
            nodes_expanded: 0,
            nodes_pruned: 0,
            fraction_covered: 0.0,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<14} | {:<14} | {:<14} | {:<10}",
            "Elapsed", "Steps", "Best Score", "Expanded", "Pruned", "Coverage"
        );
        println!("{}", "-".repeat(89));
    }

    #[inline(always)]
    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_score_str = if let Some(score) = &self.best_score {
            format!("{}", score)
        } else {
            "Inf".to_string()
        };

        let elapsed_field = format!("{:.1}s", elapsed);
        let coverage_field = format!("{:.4}%", self.fraction_covered * 100.0);

        println!(
            "{:<9} | {:<14} | {:<14} | {:<14} | {:<14} | {:<10}",
            elapsed_field,
            self.steps,
            best_score_str,
            self.nodes_expanded,
            self.nodes_pruned,
            coverage_field
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &CostMatrix<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.best_score = None; // Reset
        self.nodes_expanded = 0;
        self.nodes_pruned = 0;
        self.fraction_covered = 0.0;
        self.print_header();
    }

    fn on_exit_search(&mut self) {
        println!("{}", "-".repeat(89));
        println!("Search finished.");
    }

    fn on_solution_found(&mut self, record: &SolutionStats<T>) {
        self.best_score = Some(record.score);
        self.nodes_expanded = record.nodes_expanded;
        self.nodes_pruned = record.nodes_pruned;
        self.fraction_covered = record.fraction_covered;
        self.log_line();
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line();
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
