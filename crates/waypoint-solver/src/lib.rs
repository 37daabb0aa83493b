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

//! # Waypoint Solver
//!
//! High-level orchestration for the TSP benchmark harness. This crate
//! owns run configuration, assembles the monitor stack, seeds the
//! incumbent with a greedy pass, and dispatches to the configured search
//! strategy.
//!
//! ## Modules
//!
//! - `config`: strategy selection and the two time budgets (main search,
//!   greedy seeding).
//! - `solver`: the `WaypointSolver` facade with the single `solve` entry
//!   point returning a `SolverOutcome`.
//!
//! ## Motivation
//!
//! The strategies live in separate crates and share only the monitor and
//! outcome contracts. Benchmarking them fairly means running each under
//! identical budgets and reporting surfaces; this crate is that common
//! harness.
//!
//! See `solver` for detailed APIs and examples.

pub mod config;
pub mod solver;
