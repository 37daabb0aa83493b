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

//! Waypoint-Model: problem data for asymmetric TSP solving
//!
//! This crate holds the immutable inputs and value objects shared by every
//! Waypoint strategy:
//!
//! - `index::CityIndex`: a phantom-typed city index.
//! - `matrix::CostMatrix<T>`: an N×N directed edge-cost matrix over the
//!   extended reals, with `+∞` as the "no edge" sentinel and a forced
//!   infinite diagonal (no self-loops).
//! - `tour::Tour` and `tour::score_tour`: an ordered city sequence and the
//!   directed-cycle scoring function (closing edge included).
//!
//! Everything here is plain data: construction validates shape once, and
//! solvers treat the matrix as read-only afterwards.

pub mod index;
pub mod matrix;
pub mod tour;
