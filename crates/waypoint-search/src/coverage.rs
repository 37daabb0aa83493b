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

//! # Search-Space Coverage Tracking
//!
//! `CutTree` accounts for the share of the permutation space a strategy has
//! dealt with, either by visiting leaves or by pruning whole subtrees. Each
//! `cut(prefix_len)` call credits the `(n - prefix_len)!` leaves below a
//! partial tour of `prefix_len` cities; a full-length cut credits a single
//! leaf. Branch-and-bound prunes disjoint subtrees (each node's city set is
//! unique along any root path), so straight summation never double-counts.
//!
//! All arithmetic happens in log10 space via `TourSpace` — leaf counts
//! overflow `u64` already at 22 cities. The reported fraction is clamped to
//! `[0, 1]` to absorb floating-point drift near full coverage.

use waypoint_core::math::tour_space::{TourSpace, log10_add};

/// Tracks how many leaves of the tour search tree have been covered.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CutTree {
    space: TourSpace,
    /// `log10` of the covered leaf count; `None` until the first cut.
    log_covered: Option<f64>,
}

impl CutTree {
    /// Creates an empty coverage tracker for an `num_cities`-city instance.
    pub fn new(num_cities: usize) -> Self {
        Self {
            space: TourSpace::new(num_cities),
            log_covered: None,
        }
    }

    /// Returns the underlying tour space.
    #[inline]
    pub fn space(&self) -> &TourSpace {
        &self.space
    }

    /// Credits the subtree below a partial tour of `prefix_len` cities.
    ///
    /// Out-of-range prefixes and degenerate spaces are ignored; there is
    /// nothing below them to account for.
    pub fn cut(&mut self, prefix_len: usize) {
        let Some(log_below) = self.space.log10_leaves_below(prefix_len) else {
            return;
        };
        self.log_covered = Some(match self.log_covered {
            Some(log_covered) => log10_add(log_covered, log_below),
            None => log_below,
        });
    }

    /// Credits a single leaf (one complete tour).
    #[inline]
    pub fn cut_leaf(&mut self) {
        self.cut(self.space.num_cities());
    }

    /// Returns `log10` of the covered leaf count, or `None` if nothing
    /// has been covered yet.
    #[inline]
    pub fn log10_leaves_covered(&self) -> Option<f64> {
        self.log_covered
    }

    /// Returns the covered leaf count as `f64`.
    #[inline]
    pub fn leaves_covered(&self) -> f64 {
        match self.log_covered {
            Some(log) => 10.0_f64.powf(log),
            None => 0.0,
        }
    }

    /// Returns the covered fraction of the full leaf count, clamped to
    /// `[0, 1]`. Degenerate spaces report 0.
    pub fn fraction_covered(&self) -> f64 {
        let (Some(log_covered), Some(log_total)) =
            (self.log_covered, self.space.log10_leaf_count())
        else {
            return 0.0;
        };
        10.0_f64.powf(log_covered - log_total).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for CutTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CutTree({} cities, {:.4}% covered)",
            self.space.num_cities(),
            self.fraction_covered() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_covers_nothing() {
        let tree = CutTree::new(6);
        assert_eq!(tree.log10_leaves_covered(), None);
        assert_eq!(tree.leaves_covered(), 0.0);
        assert_eq!(tree.fraction_covered(), 0.0);
    }

    #[test]
    fn test_cut_accounts_factorial_leaves() {
        // 5 cities: prefix of 3 leaves 2! = 2 leaves below it.
        let mut tree = CutTree::new(5);
        tree.cut(3);
        assert!((tree.leaves_covered() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cuts_accumulate() {
        // 5 cities, 4! = 24 leaves total. Prefix of 2 covers 3! = 6.
        let mut tree = CutTree::new(5);
        tree.cut(2);
        tree.cut(2);
        assert!((tree.leaves_covered() - 12.0).abs() < 1e-9);
        assert!((tree.fraction_covered() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cut_leaf_credits_exactly_one() {
        let mut tree = CutTree::new(5);
        tree.cut_leaf();
        tree.cut_leaf();
        tree.cut_leaf();
        assert!((tree.leaves_covered() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_coverage_reaches_one() {
        // 4 cities, 3! = 6 leaves. Three prefix-2 subtrees cover 2 leaves
        // each, which is the whole space.
        let mut tree = CutTree::new(4);
        for _ in 0..3 {
            tree.cut(2);
        }
        assert!((tree.fraction_covered() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fraction_is_clamped() {
        let mut tree = CutTree::new(4);
        for _ in 0..10 {
            tree.cut(2); // deliberately over-credits
        }
        assert_eq!(tree.fraction_covered(), 1.0);
    }

    #[test]
    fn test_degenerate_space_ignores_cuts() {
        let mut tree = CutTree::new(1);
        tree.cut(1);
        tree.cut_leaf();
        assert_eq!(tree.leaves_covered(), 0.0);
        assert_eq!(tree.fraction_covered(), 0.0);
    }

    #[test]
    fn test_out_of_range_cuts_are_ignored() {
        let mut tree = CutTree::new(4);
        tree.cut(0);
        tree.cut(5);
        assert_eq!(tree.log10_leaves_covered(), None);
    }

    #[test]
    fn test_large_instance_stays_in_log_space() {
        let mut tree = CutTree::new(100);
        tree.cut(2);
        let log = tree.log10_leaves_covered().unwrap();
        assert!(log.is_finite());
        assert!(tree.fraction_covered() > 0.0);
        assert!(tree.fraction_covered() < 1.0);
    }
}
