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

//! # Time Limit Monitor
//!
//! A lightweight monitor that enforces a wall-clock time budget on the search.
//! It checks elapsed time (optionally gated by a bitmask-based step filter)
//! and requests termination once the configured `Duration` has been exceeded.
//!
//! ## Motivation
//!
//! The benchmark contract is anytime behavior: a strategy must hand back its
//! best tour so far the moment the budget runs out, never an error. This
//! monitor is how every strategy observes the budget.
//!
//! ## Highlights
//!
//! - `TimeLimitMonitor<T>` stores a `time_limit`, `start_time`, and `steps` counter.
//! - Bitmask-driven clock checks: `(steps & clock_check_mask) == 0` triggers a check.
//!   The default mask (`0x0`) checks on every step — one step here is a whole
//!   frontier pop including an O(N²) matrix reduction, so the clock read is
//!   already amortized. `with_clock_check_mask` throttles it further for
//!   cheap-step strategies like random sampling.
//! - `on_step()` uses `wrapping_add` to increment steps at minimal cost.
//! - `search_command()` returns `Terminate("time limit reached")` once elapsed time
//!   exceeds the limit at a check point; otherwise `Continue`.
//!
//! ## Usage
//!
//! ```rust
//! use waypoint_search::monitor::time_limit::TimeLimitMonitor;
//! use waypoint_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::<f64>::new(Duration::from_secs(5));
//! // In the search loop:
//! mon.on_step(); // once per pop
//! match mon.search_command() {
//!     SearchCommand::Continue => { /* keep searching */ }
//!     SearchCommand::Terminate(reason) => { /* stop: reason */ }
//! }
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    num::SolverFloat,
    stats::SolutionStats,
};
use waypoint_model::matrix::CostMatrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    clock_check_mask: u64,
    steps: u64,
    time_limit: std::time::Duration,
    start_time: std::time::Instant,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask: check the clock on every step. A step is a frontier
    /// pop with a full matrix reduction behind it, so the `Instant::now()`
    /// call is noise by comparison.
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x0;

    #[inline]
    pub fn new(time_limit: std::time::Duration) -> Self {
        Self {
            clock_check_mask: Self::DEFAULT_STEP_CLOCK_CHECK_MASK,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: std::time::Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: std::time::Instant::now(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured budget.
    #[inline]
    pub fn time_limit(&self) -> std::time::Duration {
        self.time_limit
    }

    /// Returns the time elapsed since the search entered.
    #[inline]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &CostMatrix<T>) {
        self.start_time = std::time::Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _record: &SolutionStats<T>) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::search_monitor::SearchCommand;
    use std::time::{Duration, Instant};

    type FloatType = f64;

    fn new_monitor_with_limit(ms: u64) -> TimeLimitMonitor<FloatType> {
        TimeLimitMonitor::<FloatType>::new(Duration::from_millis(ms))
    }

    #[test]
    fn test_default_mask_checks_every_step() {
        assert_eq!(
            TimeLimitMonitor::<FloatType>::DEFAULT_STEP_CLOCK_CHECK_MASK,
            0x0
        );
    }

    #[test]
    fn test_search_command_terminates_after_time_limit() {
        let mut mon = new_monitor_with_limit(10);
        // Make elapsed exceed limit by setting start_time sufficiently in the past.
        mon.start_time = Instant::now() - Duration::from_millis(50);

        mon.steps = 12345; // default mask 0 checks regardless of step count
        match mon.search_command() {
            SearchCommand::Terminate(msg) => {
                assert!(msg.contains("time limit"), "unexpected message: {msg}");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_search_command_continues_before_time_limit() {
        let mut mon = new_monitor_with_limit(1000);
        mon.start_time = Instant::now();
        mon.steps = 0;

        match mon.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_mask_skips_checks_even_if_time_exceeded() {
        let mut mon =
            TimeLimitMonitor::<FloatType>::with_clock_check_mask(Duration::from_millis(1), 0x3FFF);
        mon.start_time = Instant::now() - Duration::from_millis(50);

        // Low bits set: the clock check is skipped entirely.
        mon.steps = 1; // 1 & 0x3FFF != 0
        match mon.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }

        // Low bits clear: the check runs and terminates.
        mon.steps = 0x4000;
        match mon.search_command() {
            SearchCommand::Terminate(_) => {}
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_on_step_increments_steps_wrapping() {
        let mut mon = new_monitor_with_limit(1000);
        let before = mon.steps;
        mon.on_step();
        assert_eq!(mon.steps, before.wrapping_add(1));

        // Simulate near-overflow boundary
        mon.steps = u64::MAX;
        mon.on_step();
        assert_eq!(mon.steps, 0); // wrapping_add semantics
    }

    #[test]
    fn test_on_enter_search_resets_clock_and_steps() {
        let mut mon = new_monitor_with_limit(1000);
        mon.steps = 99;
        mon.start_time = Instant::now() - Duration::from_secs(60);

        let matrix = CostMatrix::<FloatType>::from_rows(Vec::new()).unwrap();
        mon.on_enter_search(&matrix);
        assert_eq!(mon.steps, 0);
        assert!(mon.elapsed() < Duration::from_secs(10), "clock not reset");
    }

    #[test]
    fn test_new_initializes_with_zero_steps_and_recent_start() {
        let mon = new_monitor_with_limit(1000);
        assert_eq!(mon.steps, 0);
        assert!(
            mon.start_time.elapsed() < Duration::from_secs(10),
            "start_time seems too old"
        );
    }
}
