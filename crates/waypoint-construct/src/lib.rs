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

//! Waypoint‑Construct: constructive tour strategies
//!
//! Three baseline strategies that bracket branch‑and‑bound in the
//! benchmark harness, all sharing the `SearchMonitor` contract and the
//! `SolverOutcome` reporting surface:
//!
//! - `greedy`: nearest‑neighbor walks from every start city. Fast, no
//!   proof; also the incumbent seeder for branch‑and‑bound.
//! - `random`: uniform rooted-permutation sampling. Anytime; exhaustive
//!   (with proof) on small instances thanks to deduplication.
//! - `dfs`: exhaustive depth‑first enumeration with no bounding. The
//!   ground-truth baseline, exponential by construction.

pub mod dfs;
pub mod greedy;
pub mod random;
