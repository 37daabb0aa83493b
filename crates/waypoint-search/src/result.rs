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

use crate::{num::SolverFloat, stats::SolutionStats};

#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult<T>
where
    T: SolverFloat,
{
    /// We have proven that no complete tour exists.
    Infeasible,
    /// We have found a tour and proven its optimality (the frontier was
    /// exhausted without finding anything better).
    Optimal(SolutionStats<T>),
    /// We have found a tour, but the run stopped before proving it optimal.
    Feasible(SolutionStats<T>),
    /// The solver terminated without finding a tour and
    /// without proving infeasibility.
    Unknown,
}

impl<T> SolverResult<T>
where
    T: SolverFloat,
{
    /// Returns the best record, if the result carries one.
    #[inline]
    pub fn best(&self) -> Option<&SolutionStats<T>> {
        match self {
            SolverResult::Optimal(record) | SolverResult::Feasible(record) => Some(record),
            _ => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(record) => {
                write!(f, "Optimal(score={})", record.score)
            }
            SolverResult::Feasible(record) => {
                write!(f, "Feasible(score={})", record.score)
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a tour.
    OptimalityProven,
    /// The solver proved that no complete tour exists.
    InfeasibilityProven,
    /// The strategy finished all the work it was ever going to do without
    /// establishing a proof (constructive heuristics end this way).
    WorkExhausted,
    /// The solver aborted due to a search limit (time, usually).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::WorkExhausted => write!(f, "Work Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", *reason),
        }
    }
}

/// The full outcome of a run: the final verdict, why the run ended, and
/// the anytime trace of improving records (placeholder included for runs
/// that never found a finite tour).
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome<T>
where
    T: SolverFloat,
{
    pub result: SolverResult<T>,
    pub reason: TerminationReason,
    pub records: Vec<SolutionStats<T>>,
}

impl<T> SolverOutcome<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        reason: TerminationReason,
        records: Vec<SolutionStats<T>>,
    ) -> Self {
        Self {
            result,
            reason,
            records,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    /// Returns the best record of the run, if any finite tour was found.
    #[inline]
    pub fn best(&self) -> Option<&SolutionStats<T>> {
        self.result.best()
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Outcome:")?;
        writeln!(f, "  Result: {}", self.result)?;
        writeln!(f, "  Reason: {}", self.reason)?;
        write!(f, "  Improvements: {}", self.records.len())
    }
}
