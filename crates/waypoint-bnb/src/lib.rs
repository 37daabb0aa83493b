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

//! Waypoint‑BnB: branch‑and‑bound for the travelling salesman problem
//!
//! High‑level crate that implements an anytime, modular BnB solver over
//! cost matrices. The solver separates frontier ordering, bounding,
//! monitoring, and incumbent handling so you can swap exploration
//! strategies without touching core search logic.
//!
//! Core flow
//! - Provide a `waypoint_model::matrix::CostMatrix<T>`.
//! - Choose a `frontier::Frontier` (depth‑first stack or best‑first heap).
//! - Optionally seed the incumbent with a known tour and attach monitors.
//! - Run `bnb::BnbSolver`; the outcome carries every improving solution
//!   found along the way, a termination reason, and search statistics.
//!
//! Design highlights
//! - Separation of concerns: frontiers order exploration; reduction prices
//!   nodes with admissible bounds; monitors observe/control; outcomes
//!   carry the full anytime trace.
//! - Value semantics in the tree: every node owns its restricted matrix
//!   snapshot, so expansion never aliases state between siblings.
//! - Deterministic given a deterministic frontier.
//!
//! Assumptions and guarantees
//! - Lower bounds come from row/column reduction and are admissible (no
//!   overestimation); pruning logic relies on this for optimality proofs.
//! - Tours are always scored against the original, unreduced matrix.
//! - Cut-tree coverage accounting stays exact because pruned subtrees are
//!   pairwise disjoint.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `frontier`: frontier orderings (depth‑first, best‑first).
//! - `incumbent`: best-known tour and the strict-improvement rule.
//! - `node`: search nodes, expansion, and child bounding.
//! - `reduce`: reduced-cost-matrix lower bounds.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod frontier;
pub mod incumbent;
pub mod node;
pub mod reduce;
pub mod stats;
