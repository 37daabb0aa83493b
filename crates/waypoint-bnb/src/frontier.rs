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

//! # Frontier Orderings
//!
//! The frontier holds every pending `SearchNode`. Which node comes back
//! first is the only difference between the two branch-and-bound variants:
//!
//! - `DepthFirstFrontier`: a plain LIFO stack. Dives one branch to
//!   completion before backtracking; low memory, finds complete tours
//!   quickly, no score needed.
//! - `BestFirstFrontier`: a binary heap popping the lowest score
//!   `lower_bound - 2 * depth`. The depth bias favors closer-to-complete
//!   nodes among similar bounds, so the incumbent improves earlier and
//!   pruning bites sooner. Ties go to the deeper node, then to insertion
//!   order.
//!
//! Expansion, pruning and completion are identical across orderings; the
//! engine is generic over this trait.

use crate::node::SearchNode;
use std::collections::BinaryHeap;
use waypoint_search::num::SolverFloat;

/// The store of pending search nodes.
pub trait Frontier<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str;
    fn push(&mut self, node: SearchNode<T>);
    fn pop(&mut self) -> Option<SearchNode<T>>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// LIFO stack frontier: depth-first traversal.
#[derive(Clone, Debug, Default)]
pub struct DepthFirstFrontier<T>
where
    T: SolverFloat,
{
    entries: Vec<SearchNode<T>>,
}

impl<T> DepthFirstFrontier<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }
}

impl<T> Frontier<T> for DepthFirstFrontier<T>
where
    T: SolverFloat,
{
    #[inline]
    fn name(&self) -> &str {
        "DepthFirstFrontier"
    }

    #[inline]
    fn push(&mut self, node: SearchNode<T>) {
        self.entries.push(node);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<T>> {
        self.entries.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A heap entry carrying the precomputed score and the tie-break fields.
#[derive(Clone, Debug)]
struct ScoredEntry<T>
where
    T: SolverFloat,
{
    score: T,
    depth: usize,
    seq: u64,
    node: SearchNode<T>,
}

impl<T> PartialEq for ScoredEntry<T>
where
    T: SolverFloat,
{
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T> Eq for ScoredEntry<T> where T: SolverFloat {}

impl<T> PartialOrd for ScoredEntry<T>
where
    T: SolverFloat,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScoredEntry<T>
where
    T: SolverFloat,
{
    /// `BinaryHeap` is a max-heap, so "greater" means "popped first":
    /// lower score wins, then greater depth, then earlier insertion.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Scores are never NaN: bounds are sums of non-negative values
        // and +∞, and ∞ − ∞ is impossible by construction.
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority-queue frontier: best-first traversal with a depth bias.
#[derive(Clone, Debug, Default)]
pub struct BestFirstFrontier<T>
where
    T: SolverFloat,
{
    heap: BinaryHeap<ScoredEntry<T>>,
    next_seq: u64,
}

impl<T> BestFirstFrontier<T>
where
    T: SolverFloat,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// The ascending traversal score: `lower_bound - 2 * depth`.
    #[inline]
    fn score_of(node: &SearchNode<T>) -> T {
        let depth = T::from_usize(node.depth()).unwrap_or_else(T::zero);
        node.lower_bound() - (depth + depth)
    }
}

impl<T> Frontier<T> for BestFirstFrontier<T>
where
    T: SolverFloat,
{
    #[inline]
    fn name(&self) -> &str {
        "BestFirstFrontier"
    }

    #[inline]
    fn push(&mut self, node: SearchNode<T>) {
        let entry = ScoredEntry {
            score: Self::score_of(&node),
            depth: node.depth(),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    #[inline]
    fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop().map(|entry| entry.node)
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_model::matrix::CostMatrix;

    fn node_at_depth(extra_hops: usize) -> SearchNode<f64> {
        // Walks a cheap chain matrix to build a node at depth 1 + extra_hops.
        let matrix = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, 0.0, 1.0, 2.0, 3.0],
            vec![2.0, 1.0, 0.0, 1.0, 2.0],
            vec![3.0, 2.0, 1.0, 0.0, 1.0],
            vec![4.0, 3.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();
        let mut node = SearchNode::root(&matrix);
        for _ in 0..extra_hops {
            node = node.expand().into_iter().next().unwrap();
        }
        node
    }

    #[test]
    fn test_depth_first_is_lifo() {
        let mut frontier = DepthFirstFrontier::new();
        let first = node_at_depth(0);
        let second = node_at_depth(1);
        frontier.push(first.clone());
        frontier.push(second.clone());

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().unwrap(), second);
        assert_eq!(frontier.pop().unwrap(), first);
        assert!(frontier.pop().is_none());
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_best_first_pops_lowest_score() {
        // A deeper node with the same bound has a lower score and must
        // come out first.
        let shallow = node_at_depth(0);
        let deep = node_at_depth(2);

        let mut frontier = BestFirstFrontier::new();
        frontier.push(shallow.clone());
        frontier.push(deep.clone());

        let first = frontier.pop().unwrap();
        assert_eq!(first.depth(), deep.depth(), "expected the deeper node first");
    }

    #[test]
    fn test_best_first_prefers_lower_bound_at_equal_depth() {
        let matrix_cheap = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        let matrix_pricey = CostMatrix::from_rows(vec![
            vec![0.0, 9.0, 9.0],
            vec![9.0, 0.0, 9.0],
            vec![9.0, 9.0, 0.0],
        ])
        .unwrap();

        let cheap = SearchNode::root(&matrix_cheap);
        let pricey = SearchNode::root(&matrix_pricey);
        assert!(cheap.lower_bound() < pricey.lower_bound());

        let mut frontier = BestFirstFrontier::new();
        frontier.push(pricey.clone());
        frontier.push(cheap.clone());
        assert_eq!(frontier.pop().unwrap(), cheap);
        assert_eq!(frontier.pop().unwrap(), pricey);
    }

    #[test]
    fn test_best_first_ties_break_by_insertion_order() {
        let node = node_at_depth(0);
        let mut frontier = BestFirstFrontier::new();
        frontier.push(node.clone());
        frontier.push(node.clone());

        // Identical score and depth: the first push wins.
        let entry_first = frontier.heap.pop().unwrap();
        let entry_second = frontier.heap.pop().unwrap();
        assert!(entry_first.seq < entry_second.seq);
    }

    #[test]
    fn test_clear_empties_frontier() {
        let mut frontier = BestFirstFrontier::new();
        frontier.push(node_at_depth(0));
        frontier.push(node_at_depth(1));
        frontier.clear();
        assert!(frontier.is_empty());
        assert!(frontier.pop().is_none());
    }
}
