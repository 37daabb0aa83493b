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

//! # Tours and Tour Scoring
//!
//! A `Tour` is an ordered sequence of distinct cities. It represents the
//! cycle `c0 -> c1 -> ... -> ck -> c0`; the closing edge back to the first
//! city is implicit and always included when scoring.
//!
//! `score_tour` evaluates a tour against the *original* cost matrix. Any
//! missing edge along the cycle (including the closing edge) makes the
//! whole tour infeasible, which scoring reports as `+∞` rather than as an
//! error — infeasibility is an ordinary outcome in this domain.

use crate::{index::CityIndex, matrix::CostMatrix};
use num_traits::Float;

/// An ordered sequence of distinct city indices, interpreted as a cycle.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Tour {
    cities: Vec<CityIndex>,
}

impl Tour {
    /// Creates an empty tour.
    #[inline]
    pub fn new() -> Self {
        Self { cities: Vec::new() }
    }

    /// Creates a tour from a sequence of city indices.
    #[inline]
    pub fn from_cities(cities: Vec<CityIndex>) -> Self {
        Self { cities }
    }

    /// Creates a tour from raw `usize` indices. Test and driver convenience.
    #[inline]
    pub fn from_raw<I>(cities: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            cities: cities.into_iter().map(CityIndex::new).collect(),
        }
    }

    /// Returns the number of cities in the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the tour contains no cities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the cities as a slice.
    #[inline]
    pub fn cities(&self) -> &[CityIndex] {
        &self.cities
    }

    /// Returns the first city, if any.
    #[inline]
    pub fn first(&self) -> Option<CityIndex> {
        self.cities.first().copied()
    }

    /// Returns the last city, if any.
    #[inline]
    pub fn last(&self) -> Option<CityIndex> {
        self.cities.last().copied()
    }

    /// Appends a city to the tour.
    #[inline]
    pub fn push(&mut self, city: CityIndex) {
        self.cities.push(city);
    }

    /// Returns an iterator over the cities.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CityIndex> {
        self.cities.iter()
    }

    /// Returns `true` if the tour visits every city of an `n`-city
    /// instance exactly once.
    pub fn is_complete(&self, num_cities: usize) -> bool {
        if self.cities.len() != num_cities || num_cities == 0 {
            return false;
        }
        let mut seen = vec![false; num_cities];
        for city in &self.cities {
            if city.get() >= num_cities || seen[city.get()] {
                return false;
            }
            seen[city.get()] = true;
        }
        true
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tour[")?;
        for (i, city) in self.cities.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(f, "]")
    }
}

/// Scores a tour against a cost matrix.
///
/// Sums the directed edge costs along the tour, including the closing edge
/// from the last city back to the first. Returns `+∞` if the tour is empty,
/// a single city, or traverses any missing edge. Extended-real addition
/// makes the infeasible case fall out naturally: one `+∞` edge poisons the
/// whole sum.
pub fn score_tour<T>(tour: &Tour, matrix: &CostMatrix<T>) -> T
where
    T: Float,
{
    if tour.len() < 2 {
        return T::infinity();
    }

    let mut total = T::zero();
    for pair in tour.cities().windows(2) {
        total = total + matrix.cost(pair[0], pair[1]);
    }

    // Closing edge back to the start city. `len() >= 2` guarantees both.
    let first = tour.cities()[0];
    let last = tour.cities()[tour.len() - 1];
    total + matrix.cost(last, first)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    fn square_matrix() -> CostMatrix<f64> {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 3.0, 5.0],
            vec![2.0, 0.0, 2.0, 3.0],
            vec![3.0, 2.0, 0.0, 4.0],
            vec![5.0, 3.0, 4.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_score_includes_closing_edge() {
        let m = square_matrix();
        // Edges: (0,1)=2, (1,3)=3, (3,2)=4, closing (2,0)=3 -> 12.
        let tour = Tour::from_raw([0, 1, 3, 2]);
        assert_eq!(score_tour(&tour, &m), 12.0);
    }

    #[test]
    fn test_missing_edge_scores_infinite() {
        let mut m = square_matrix();
        m.set_cost(CityIndex::new(3), CityIndex::new(2), INF);
        let tour = Tour::from_raw([0, 1, 3, 2]);
        assert!(score_tour(&tour, &m).is_infinite());
    }

    #[test]
    fn test_missing_closing_edge_scores_infinite() {
        let mut m = square_matrix();
        m.set_cost(CityIndex::new(2), CityIndex::new(0), INF);
        let tour = Tour::from_raw([0, 1, 3, 2]);
        assert!(score_tour(&tour, &m).is_infinite());
    }

    #[test]
    fn test_degenerate_tours_score_infinite() {
        let m = square_matrix();
        assert!(score_tour(&Tour::new(), &m).is_infinite());
        assert!(score_tour(&Tour::from_raw([0]), &m).is_infinite());
    }

    #[test]
    fn test_two_city_tour_uses_both_directions() {
        let m = square_matrix();
        let tour = Tour::from_raw([0, 1]);
        // (0,1) + (1,0) = 2 + 2
        assert_eq!(score_tour(&tour, &m), 4.0);
    }

    #[test]
    fn test_is_complete_detects_permutations() {
        assert!(Tour::from_raw([0, 2, 1, 3]).is_complete(4));
        assert!(!Tour::from_raw([0, 2, 1]).is_complete(4));
        assert!(!Tour::from_raw([0, 2, 2, 3]).is_complete(4));
        assert!(!Tour::from_raw([0, 2, 1, 4]).is_complete(4));
        assert!(!Tour::new().is_complete(0));
    }

    #[test]
    fn test_display_renders_city_sequence() {
        let tour = Tour::from_raw([0, 2, 1]);
        assert_eq!(format!("{}", tour), "Tour[0 -> 2 -> 1]");
    }
}
