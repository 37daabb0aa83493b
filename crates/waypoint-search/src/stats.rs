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

//! # Per-Improvement Solution Records
//!
//! Every strategy emits a `SolutionStats<T>` record each time it finds a
//! tour strictly better than its previous best. The sequence of records is
//! the anytime trace of a run: scores decrease monotonically, elapsed times
//! increase, and the last record is the final answer. Benchmark harnesses
//! compare strategies by these traces rather than by the end state alone.
//!
//! A record snapshots the search counters at the moment of improvement
//! (nodes expanded and pruned, peak frontier size) together with the
//! coverage figures taken from the `CutTree`.

use crate::num::SolverFloat;
use std::time::Duration;
use waypoint_model::tour::Tour;

/// A snapshot of the search taken when an improving tour was found.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionStats<T>
where
    T: SolverFloat,
{
    /// The improving tour itself.
    pub tour: Tour,
    /// The tour's score against the original matrix; `+∞` for the
    /// placeholder record of a run that never found a finite tour.
    pub score: T,
    /// Wall-clock time from the start of the run to this improvement.
    pub elapsed: Duration,
    /// Largest frontier size observed so far.
    pub max_frontier_size: usize,
    /// Nodes expanded so far.
    pub nodes_expanded: u64,
    /// Nodes pruned so far.
    pub nodes_pruned: u64,
    /// Leaves accounted for so far (explored or pruned away), as `f64`
    /// since leaf counts overflow integers for modest instance sizes.
    pub leaves_covered: f64,
    /// `leaves_covered` over the total leaf count, clamped to `[0, 1]`.
    pub fraction_covered: f64,
}

impl<T> SolutionStats<T>
where
    T: SolverFloat,
{
    /// Creates a placeholder record for a run that produced no tour at
    /// all (degenerate instance or infeasible matrix).
    pub fn placeholder(elapsed: Duration) -> Self {
        Self {
            tour: Tour::new(),
            score: T::infinity(),
            elapsed,
            max_frontier_size: 0,
            nodes_expanded: 0,
            nodes_pruned: 0,
            leaves_covered: 0.0,
            fraction_covered: 0.0,
        }
    }

    /// Returns `true` if this record carries no usable tour.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.score.is_infinite()
    }
}

impl<T> std::fmt::Display for SolutionStats<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Record:")?;
        writeln!(f, "  Tour: {}", self.tour)?;
        writeln!(f, "  Score: {}", self.score)?;
        writeln!(f, "  Elapsed (secs): {:.3}", self.elapsed.as_secs_f64())?;
        writeln!(f, "  Max Frontier Size: {}", self.max_frontier_size)?;
        writeln!(f, "  Nodes Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes Pruned: {}", self.nodes_pruned)?;
        writeln!(f, "  Leaves Covered: {:.4e}", self.leaves_covered)?;
        writeln!(f, "  Fraction Covered: {:.6}", self.fraction_covered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_infinite_score_and_empty_tour() {
        let record = SolutionStats::<f64>::placeholder(Duration::from_millis(5));
        assert!(record.is_placeholder());
        assert!(record.tour.is_empty());
        assert_eq!(record.nodes_expanded, 0);
        assert_eq!(record.fraction_covered, 0.0);
    }

    #[test]
    fn test_finite_record_is_not_placeholder() {
        let record = SolutionStats::<f64> {
            tour: Tour::from_raw([0, 1, 2]),
            score: 42.0,
            elapsed: Duration::from_secs(1),
            max_frontier_size: 7,
            nodes_expanded: 10,
            nodes_pruned: 3,
            leaves_covered: 2.0,
            fraction_covered: 1.0,
        };
        assert!(!record.is_placeholder());
    }

    #[test]
    fn test_display_formats_all_fields() {
        let record = SolutionStats::<f64> {
            tour: Tour::from_raw([0, 2, 1]),
            score: 12.0,
            elapsed: Duration::from_millis(1500),
            max_frontier_size: 4,
            nodes_expanded: 9,
            nodes_pruned: 2,
            leaves_covered: 6.0,
            fraction_covered: 1.0,
        };
        let text = format!("{}", record);
        assert!(text.contains("Tour[0 -> 2 -> 1]"));
        assert!(text.contains("Score: 12"));
        assert!(text.contains("Nodes Expanded: 9"));
        assert!(text.contains("Fraction Covered: 1.000000"));
    }
}
