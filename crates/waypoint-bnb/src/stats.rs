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

use std::time::Duration;

/// Statistics collected during a branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbStatistics {
    /// Total nodes popped and expanded (complete nodes excluded).
    pub nodes_expanded: u64,
    /// Children (and stale pops) discarded because their bound could not
    /// beat the incumbent.
    pub nodes_pruned: u64,
    /// Complete tours reached (improving or not).
    pub tours_completed: u64,
    /// Improving tours installed as the incumbent.
    pub solutions_found: u64,
    /// Largest frontier size observed.
    pub max_frontier_size: usize,
    /// Total time spent in the search loop.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_node_pruned(&mut self) {
        self.nodes_pruned = self.nodes_pruned.saturating_add(1);
    }

    #[inline]
    pub fn on_tour_completed(&mut self) {
        self.tours_completed = self.tours_completed.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: usize) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Waypoint-BnB Statistics:")?;
        writeln!(f, "  Nodes expanded:     {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes pruned:       {}", self.nodes_pruned)?;
        writeln!(f, "  Tours completed:    {}", self.tours_completed)?;
        writeln!(f, "  Solutions found:    {}", self.solutions_found)?;
        writeln!(f, "  Max frontier size:  {}", self.max_frontier_size)?;
        writeln!(f, "  Total time:         {:.2?}", self.time_total)?;
        Ok(())
    }
}
