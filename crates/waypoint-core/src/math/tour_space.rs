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

//! # Tour Search-Space Accounting (Log Space)
//!
//! Represents the size of the Hamiltonian-cycle search space for an
//! `n`-city instance. With the start city fixed, the tree of partial tours
//! has `(n-1)!` leaves — a number that overflows every primitive integer
//! type for modest `n` (already at `n = 22` for `u64`). This module
//! therefore stores all counts in **logarithmic space** (base 10) and only
//! materializes them as `f64` on demand.
//!
//! The main consumer is coverage reporting: a pruned prefix of length `k`
//! eliminates `(n-k)!` leaves, and summing those in log space yields the
//! fraction of the full permutation space covered without ever forming the
//! (astronomically large) counts themselves.

/// Returns `log10(a + b)` given `a` and `b` in log10 space.
///
/// Factors out the larger term: `10^max * (1 + 10^(min-max))`.
#[inline]
pub fn log10_add(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    let min = a.min(b);
    max + (1.0 + 10.0_f64.powf(min - max)).log10()
}

/// Returns `log10(k!)`.
#[inline]
pub fn log10_factorial(k: usize) -> f64 {
    (2..=k).map(|i| (i as f64).log10()).sum()
}

/// The search space of complete tours over a fixed number of cities.
///
/// The root city is fixed, so the space has `(n-1)!` leaves for `n >= 2`
/// and none at all for `n <= 1` (no Hamiltonian cycle exists).
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct TourSpace {
    num_cities: usize,
    /// `log10((n-1)!)`; meaningless when `num_cities <= 1`.
    log_leaves: f64,
}

impl TourSpace {
    /// Calculates the tour space for the given number of cities.
    pub fn new(num_cities: usize) -> Self {
        let log_leaves = if num_cities >= 2 {
            log10_factorial(num_cities - 1)
        } else {
            0.0
        };
        Self {
            num_cities,
            log_leaves,
        }
    }

    /// Returns the number of cities this space was built for.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns `true` if the space contains no complete tour at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_cities <= 1
    }

    /// Returns `log10` of the total leaf count, or `None` for degenerate
    /// instances without any complete tour.
    #[inline]
    pub fn log10_leaf_count(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.log_leaves)
        }
    }

    /// Returns the total leaf count as `f64`.
    ///
    /// May be `f64::INFINITY` for very large instances; callers that need
    /// exact arithmetic should stay in log space.
    #[inline]
    pub fn leaf_count(&self) -> f64 {
        match self.log10_leaf_count() {
            Some(log) => 10.0_f64.powf(log),
            None => 0.0,
        }
    }

    /// Returns `log10` of the number of leaves below a partial tour of
    /// `prefix_len` cities (the root city included), or `None` if the
    /// prefix length is out of range or the space is degenerate.
    ///
    /// A prefix of length `k` leaves `n - k` cities to place, so its
    /// subtree holds `(n-k)!` leaves; a full-length prefix is one leaf.
    #[inline]
    pub fn log10_leaves_below(&self, prefix_len: usize) -> Option<f64> {
        if self.is_empty() || prefix_len == 0 || prefix_len > self.num_cities {
            return None;
        }
        Some(log10_factorial(self.num_cities - prefix_len))
    }
}

impl std::fmt::Display for TourSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "TourSpace(empty)");
        }
        let exponent = self.log_leaves.floor();
        let mantissa = 10.0_f64.powf(self.log_leaves - exponent);
        write!(
            f,
            "TourSpace({} cities, {:.2} × 10^{} leaves)",
            self.num_cities, mantissa, exponent as u64
        )
    }
}
