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

//! # Search Nodes
//!
//! A `SearchNode` is one partial tour in the branch-and-bound tree: the
//! ordered path of cities fixed so far, a visited-set for O(1) membership
//! checks, the node's own restricted-and-reduced matrix snapshot, and the
//! admissible lower bound on any completion of the path.
//!
//! Every node owns its matrix outright. Expansion clones the parent's
//! matrix per child and restricts the copy (departed row, arrived column,
//! immediate back-edge), so no node's matrix is ever observed by another —
//! value semantics instead of aliasing.

use crate::reduce::reduce_in_place;
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use waypoint_model::{
    index::{CityIndex, ROOT_CITY, cities},
    matrix::CostMatrix,
    tour::Tour,
};
use waypoint_search::num::SolverFloat;

/// How many children a node buffer holds before spilling to the heap.
pub const INLINE_CHILDREN: usize = 8;

/// A partial tour with its restricted matrix snapshot and lower bound.
#[derive(Clone, PartialEq, Debug)]
pub struct SearchNode<T>
where
    T: SolverFloat,
{
    path: Vec<CityIndex>,
    visited: FixedBitSet,
    matrix: CostMatrix<T>,
    lower_bound: T,
}

impl<T> SearchNode<T>
where
    T: SolverFloat,
{
    /// Creates the root node: the fixed start city, a reduced copy of the
    /// input matrix, and the root reduction's contribution as the bound.
    ///
    /// # Panics
    ///
    /// In debug builds, panics for an empty matrix; the engine handles
    /// degenerate instances before building a root.
    pub fn root(matrix: &CostMatrix<T>) -> Self {
        debug_assert!(
            matrix.num_cities() > 0,
            "called `SearchNode::root` with an empty cost matrix"
        );

        let mut reduced = matrix.clone();
        let lower_bound = reduce_in_place(&mut reduced);

        let mut visited = FixedBitSet::with_capacity(matrix.num_cities());
        visited.insert(ROOT_CITY.get());

        Self {
            path: vec![ROOT_CITY],
            visited,
            matrix: reduced,
            lower_bound,
        }
    }

    /// Returns the number of cities fixed so far.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Returns the fixed path, root city first.
    #[inline]
    pub fn path(&self) -> &[CityIndex] {
        &self.path
    }

    /// Returns the most recently fixed city.
    #[inline]
    pub fn last_city(&self) -> CityIndex {
        // The path always contains at least the root city.
        self.path[self.path.len() - 1]
    }

    /// Returns the admissible lower bound on any completion of the path.
    #[inline]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    /// Returns the node's restricted matrix snapshot.
    #[inline]
    pub fn matrix(&self) -> &CostMatrix<T> {
        &self.matrix
    }

    /// Returns `true` if the given city is already part of the path.
    #[inline]
    pub fn is_visited(&self, city: CityIndex) -> bool {
        self.visited.contains(city.get())
    }

    /// Returns `true` if every city has been fixed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.path.len() == self.matrix.num_cities()
    }

    /// Converts the node's path into a tour.
    #[inline]
    pub fn to_tour(&self) -> Tour {
        Tour::from_cities(self.path.clone())
    }

    /// Expands the node into one child per unvisited city, in ascending
    /// city-index order.
    ///
    /// Each child restricts its own matrix copy (no further departures
    /// from the parent's last city, no other arrivals at the child's
    /// city, no immediate 2-city sub-cycle back to the parent) and
    /// re-reduces it. The child bound is the parent bound plus the move
    /// cost plus the reduction extra; an infinite move cost makes the
    /// child's bound infinite, which the engine prunes against any
    /// incumbent.
    pub fn expand(&self) -> SmallVec<[SearchNode<T>; INLINE_CHILDREN]> {
        let last = self.last_city();
        let mut children = SmallVec::new();

        for city in cities(self.matrix.num_cities()) {
            if self.is_visited(city) {
                continue;
            }

            let move_cost = self.matrix.cost(last, city);

            let mut child_matrix = self.matrix.clone();
            child_matrix.forbid_departures(last);
            child_matrix.forbid_arrivals(city);
            child_matrix.set_cost(city, last, T::infinity());
            let extra = reduce_in_place(&mut child_matrix);

            let mut child_path = Vec::with_capacity(self.path.len() + 1);
            child_path.extend_from_slice(&self.path);
            child_path.push(city);

            let mut child_visited = self.visited.clone();
            child_visited.insert(city.get());

            children.push(SearchNode {
                path: child_path,
                visited: child_visited,
                matrix: child_matrix,
                lower_bound: self.lower_bound + move_cost + extra,
            });
        }

        children
    }
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, last: {}, lower_bound: {})",
            self.depth(),
            self.last_city(),
            self.lower_bound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn dense_matrix() -> CostMatrix<f64> {
        CostMatrix::from_rows(vec![
            vec![INF, 7.0, 9.0, INF],
            vec![8.0, INF, 10.0, 5.0],
            vec![6.0, 4.0, INF, 3.0],
            vec![INF, 2.0, 1.0, INF],
        ])
        .unwrap()
    }

    fn symmetric_matrix() -> CostMatrix<f64> {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 3.0, 5.0],
            vec![2.0, 0.0, 2.0, 3.0],
            vec![3.0, 2.0, 0.0, 4.0],
            vec![5.0, 3.0, 4.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_root_reduces_matrix_and_sets_bound() {
        let root = SearchNode::root(&dense_matrix());
        assert_eq!(root.lower_bound(), 19.0);
        assert_eq!(root.depth(), 1);
        assert_eq!(root.last_city(), ROOT_CITY);
        assert!(root.is_visited(ROOT_CITY));
        assert!(!root.is_visited(ci(1)));
        assert!(!root.is_complete());
        // Spot-check the reduced snapshot.
        assert_eq!(root.matrix().cost(ci(0), ci(1)), 0.0);
        assert_eq!(root.matrix().cost(ci(1), ci(2)), 5.0);
    }

    #[test]
    fn test_expand_creates_one_child_per_unvisited_city() {
        let root = SearchNode::root(&symmetric_matrix());
        let children = root.expand();
        assert_eq!(children.len(), 3);

        // Ascending city-index order, each path extends the root's.
        for (child, expected_city) in children.iter().zip([ci(1), ci(2), ci(3)]) {
            assert_eq!(child.path(), &[ROOT_CITY, expected_city]);
            assert_eq!(child.depth(), 2);
            assert!(child.is_visited(expected_city));
        }
    }

    #[test]
    fn test_child_bounds_are_monotone() {
        let root = SearchNode::root(&symmetric_matrix());
        for child in root.expand() {
            assert!(
                child.lower_bound() >= root.lower_bound(),
                "child bound {} fell below parent bound {}",
                child.lower_bound(),
                root.lower_bound()
            );
            for grandchild in child.expand() {
                assert!(grandchild.lower_bound() >= child.lower_bound());
            }
        }
    }

    #[test]
    fn test_child_matrix_restrictions() {
        let root = SearchNode::root(&symmetric_matrix());
        let children = root.expand();
        let child = &children[0]; // moved to city 1

        // Departed row and arrived column are fully poisoned.
        for to in cities(4) {
            assert!(child.matrix().cost(ci(0), to).is_infinite());
        }
        for from in cities(4) {
            assert!(child.matrix().cost(from, ci(1)).is_infinite());
        }
        // The immediate back-edge 1 -> 0 is forbidden.
        assert!(child.matrix().cost(ci(1), ci(0)).is_infinite());
    }

    #[test]
    fn test_infinite_move_cost_yields_infinite_child_bound() {
        let root = SearchNode::root(&dense_matrix());
        let children = root.expand();
        // 0 -> 3 has no edge in the input.
        let blocked = children
            .iter()
            .find(|child| child.last_city() == ci(3))
            .unwrap();
        assert!(blocked.lower_bound().is_infinite());
    }

    #[test]
    fn test_completion_after_n_minus_one_expansions() {
        let root = SearchNode::root(&symmetric_matrix());
        let mut node = root;
        while !node.is_complete() {
            let children = node.expand();
            assert!(!children.is_empty());
            node = children.into_iter().next().unwrap();
        }
        assert_eq!(node.depth(), 4);
        assert!(node.to_tour().is_complete(4));
    }
}
