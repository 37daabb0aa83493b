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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for search and solver components. `SolverFloat`
//! collects the floating-point capabilities the solver needs into a single
//! trait alias, simplifying generic signatures across crates.
//!
//! ## Motivation
//!
//! Edge costs live in the extended reals: finite values are traversable
//! edges and `+∞` means "no edge". IEEE floats carry that sentinel natively
//! (`T::infinity()`), and `num_traits::Float` gives us the classification
//! predicates (`is_finite`, `is_infinite`) the reduction and scoring code
//! leans on. Keeping the solver generic over the float width lets callers
//! trade precision for memory on large instances (`f32` halves the per-node
//! matrix footprint).
//!
//! ## Highlights
//!
//! - Requires `Float + FromPrimitive` for numeric fundamentals.
//! - `Debug + Display` for diagnostics and progress logging.
//! - `Send + Sync` so matrices and results can cross thread boundaries.
//!
//! The usual instantiations are `f64` (default) and `f32`.

use num_traits::{Float, FromPrimitive};

/// A trait alias for numeric types that can be used in the solver.
/// Edge costs, lower bounds and tour scores are all values of this type,
/// with `T::infinity()` serving as the "no edge" / "no tour" sentinel.
pub trait SolverFloat:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> SolverFloat for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
