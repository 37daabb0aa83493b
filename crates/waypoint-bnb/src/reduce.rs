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

//! # Reduced-Cost-Matrix Lower Bound
//!
//! Row/column reduction of a cost matrix. Every tour must leave every city
//! exactly once, so the minimum of each row is a cost every tour pays no
//! matter what; the same holds per column for arrivals. Subtracting those
//! minima and summing them yields an admissible lower bound on any tour
//! consistent with the matrix, while preserving the relative cost of every
//! edge.
//!
//! Two invariants the search relies on:
//!
//! - The subtraction only ever touches finite entries, so `∞ − ∞` cannot
//!   occur and "no edge" markers survive reduction untouched.
//! - Reduction is idempotent: a second pass finds a zero in every finite
//!   row and column and contributes nothing.
//!
//! Rows and columns that are entirely `+∞` (a fully-restricted city)
//! contribute zero rather than poisoning the bound.

use waypoint_model::{index::cities, matrix::CostMatrix};
use waypoint_search::num::SolverFloat;

/// Reduces the matrix in place and returns the lower-bound contribution.
pub fn reduce_in_place<T>(matrix: &mut CostMatrix<T>) -> T
where
    T: SolverFloat,
{
    let mut contribution = T::zero();

    // Row pass: everyone departs every city once.
    for from in cities(matrix.num_cities()) {
        let row = matrix.row_mut(from);
        let smallest = row.iter().copied().fold(T::infinity(), T::min);
        if smallest.is_finite() && smallest > T::zero() {
            for entry in row.iter_mut() {
                if entry.is_finite() {
                    *entry = *entry - smallest;
                }
            }
        }
        if smallest.is_finite() {
            contribution = contribution + smallest;
        }
    }

    // Column pass: everyone arrives at every city once.
    for to in cities(matrix.num_cities()) {
        let smallest = matrix.column(to).fold(T::infinity(), T::min);
        if smallest.is_finite() && smallest > T::zero() {
            for from in cities(matrix.num_cities()) {
                let entry = matrix.cost(from, to);
                if entry.is_finite() {
                    matrix.set_cost(from, to, entry - smallest);
                }
            }
        }
        if smallest.is_finite() {
            contribution = contribution + smallest;
        }
    }

    contribution
}

/// Reduces a copy of the matrix, returning the copy and the lower-bound
/// contribution. The input is left untouched.
#[inline]
pub fn reduce<T>(matrix: &CostMatrix<T>) -> (CostMatrix<T>, T)
where
    T: SolverFloat,
{
    let mut reduced = matrix.clone();
    let contribution = reduce_in_place(&mut reduced);
    (reduced, contribution)
}
