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

//! # Incumbent (Best Solution So Far)
//!
//! The incumbent is the best complete tour found so far and the value every
//! pruning decision compares against. It starts at `+∞` (or at a seed tour's
//! score when one is supplied) and only ever improves: `try_install` admits
//! strictly better finite scores and rejects everything else, which is what
//! makes the emitted record sequence strictly decreasing.
//!
//! The search is single-threaded by design, so this is a plain value passed
//! through the session rather than shared state.

use waypoint_model::tour::Tour;
use waypoint_search::num::SolverFloat;

/// The best tour found so far and its score.
#[derive(Clone, PartialEq, Debug)]
pub struct Incumbent<T>
where
    T: SolverFloat,
{
    score: T,
    tour: Option<Tour>,
}

impl<T> Incumbent<T>
where
    T: SolverFloat,
{
    /// Creates an empty incumbent with score `+∞`.
    #[inline]
    pub fn new() -> Self {
        Self {
            score: T::infinity(),
            tour: None,
        }
    }

    /// Creates an incumbent pre-seeded with a known tour.
    ///
    /// A non-finite seed score is treated as "no seed".
    pub fn seeded(tour: Tour, score: T) -> Self {
        if score.is_finite() {
            Self {
                score,
                tour: Some(tour),
            }
        } else {
            Self::new()
        }
    }

    /// Returns the incumbent score (`+∞` if no tour has been found).
    #[inline]
    pub fn score(&self) -> T {
        self.score
    }

    /// Returns the incumbent tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    /// Returns `true` if a tour has been installed.
    #[inline]
    pub fn has_tour(&self) -> bool {
        self.tour.is_some()
    }

    /// Installs the candidate if it is finite and strictly better than
    /// the current score. Returns `true` on installation.
    pub fn try_install(&mut self, tour: Tour, score: T) -> bool {
        if score.is_finite() && score < self.score {
            self.score = score;
            self.tour = Some(tour);
            return true;
        }
        false
    }
}

impl<T> Default for Incumbent<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for Incumbent<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.tour {
            Some(tour) => write!(f, "Incumbent(score: {}, {})", self.score, tour),
            None => write!(f, "Incumbent(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_incumbent_is_empty_and_infinite() {
        let incumbent = Incumbent::<f64>::new();
        assert!(incumbent.score().is_infinite());
        assert!(!incumbent.has_tour());
    }

    #[test]
    fn test_try_install_accepts_strictly_better() {
        let mut incumbent = Incumbent::<f64>::new();
        assert!(incumbent.try_install(Tour::from_raw([0, 1, 2]), 30.0));
        assert_eq!(incumbent.score(), 30.0);

        assert!(incumbent.try_install(Tour::from_raw([0, 2, 1]), 20.0));
        assert_eq!(incumbent.score(), 20.0);
        assert_eq!(incumbent.tour().unwrap(), &Tour::from_raw([0, 2, 1]));
    }

    #[test]
    fn test_try_install_rejects_equal_and_worse() {
        let mut incumbent = Incumbent::<f64>::seeded(Tour::from_raw([0, 1, 2]), 20.0);
        assert!(!incumbent.try_install(Tour::from_raw([0, 2, 1]), 20.0));
        assert!(!incumbent.try_install(Tour::from_raw([0, 2, 1]), 25.0));
        assert_eq!(incumbent.tour().unwrap(), &Tour::from_raw([0, 1, 2]));
    }

    #[test]
    fn test_try_install_rejects_infinite_scores() {
        let mut incumbent = Incumbent::<f64>::new();
        assert!(!incumbent.try_install(Tour::from_raw([0, 1]), f64::INFINITY));
        assert!(!incumbent.has_tour());
    }

    #[test]
    fn test_infinite_seed_is_ignored() {
        let incumbent = Incumbent::<f64>::seeded(Tour::from_raw([0, 1]), f64::INFINITY);
        assert!(!incumbent.has_tour());
        assert!(incumbent.score().is_infinite());
    }
}
