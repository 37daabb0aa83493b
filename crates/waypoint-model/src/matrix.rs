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

//! # Directed Edge-Cost Matrix
//!
//! `CostMatrix<T>` stores the directed edge costs of an asymmetric TSP
//! instance as a flat `Vec<T>` in row-major order. Costs live in the
//! extended reals: a finite non-negative value is a traversable edge, and
//! `+∞` (the float infinity itself, no wrapper type) means "no edge". The
//! diagonal is forced to `+∞` at construction — a tour never visits a city
//! twice, so self-loop costs are meaningless and would only confuse row
//! reduction.
//!
//! Shape is validated once at construction (`MatrixError` on malformed
//! input); afterwards the matrix never resizes. Search code clones the
//! matrix per node and restricts its own copy by overwriting entries with
//! `+∞`; finite entries are only ever decreased by reduction, never read
//! back as "no edge" by accident, because reduction subtracts exclusively
//! from finite values.

use crate::index::CityIndex;
use num_traits::Float;

#[inline(always)]
fn flatten_index(num_cities: usize, from: CityIndex, to: CityIndex) -> usize {
    from.get() * num_cities + to.get()
}

/// Errors raised while constructing a `CostMatrix` from raw input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatrixError {
    /// A row's length differs from the number of rows.
    NotSquare {
        row: usize,
        row_len: usize,
        expected: usize,
    },
    /// The flat buffer's length is not `num_cities * num_cities`.
    SizeMismatch { len: usize, expected: usize },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare {
                row,
                row_len,
                expected,
            } => write!(
                f,
                "cost matrix is not square: row {} has {} entries, expected {}",
                row, row_len, expected
            ),
            MatrixError::SizeMismatch { len, expected } => write!(
                f,
                "cost buffer has {} entries, expected {}",
                len, expected
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// An N×N matrix of directed edge costs over the extended reals.
///
/// `costs[from * n + to]` is the cost of travelling `from -> to`;
/// `T::infinity()` encodes a missing edge. The diagonal is always `+∞`.
#[derive(Clone, PartialEq, Debug)]
pub struct CostMatrix<T>
where
    T: Float,
{
    num_cities: usize,
    costs: Vec<T>,
}

impl<T> CostMatrix<T>
where
    T: Float,
{
    /// Builds a matrix from nested rows, validating squareness.
    ///
    /// Diagonal entries in the input are ignored and overwritten with `+∞`.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let num_cities = rows.len();
        let mut costs = Vec::with_capacity(num_cities * num_cities);

        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != num_cities {
                return Err(MatrixError::NotSquare {
                    row,
                    row_len: entries.len(),
                    expected: num_cities,
                });
            }
            costs.extend_from_slice(entries);
        }

        let mut matrix = Self { num_cities, costs };
        matrix.forbid_self_loops();
        Ok(matrix)
    }

    /// Builds a matrix from a flat row-major buffer, validating its length.
    ///
    /// Diagonal entries in the input are ignored and overwritten with `+∞`.
    pub fn from_flat(num_cities: usize, costs: Vec<T>) -> Result<Self, MatrixError> {
        let expected = num_cities * num_cities;
        if costs.len() != expected {
            return Err(MatrixError::SizeMismatch {
                len: costs.len(),
                expected,
            });
        }

        let mut matrix = Self { num_cities, costs };
        matrix.forbid_self_loops();
        Ok(matrix)
    }

    /// Returns the number of cities (the matrix dimension).
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline(always)]
    pub fn cost(&self, from: CityIndex, to: CityIndex) -> T {
        debug_assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrix::cost` with index out of bounds: the dimension is {} but the indices are ({}, {})",
            self.num_cities,
            from.get(),
            to.get()
        );
        self.costs[flatten_index(self.num_cities, from, to)]
    }

    /// Overwrites the cost of the directed edge `from -> to`.
    #[inline(always)]
    pub fn set_cost(&mut self, from: CityIndex, to: CityIndex, cost: T) {
        debug_assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrix::set_cost` with index out of bounds: the dimension is {} but the indices are ({}, {})",
            self.num_cities,
            from.get(),
            to.get()
        );
        self.costs[flatten_index(self.num_cities, from, to)] = cost;
    }

    /// Returns `true` if a traversable (finite) edge `from -> to` exists.
    #[inline(always)]
    pub fn has_edge(&self, from: CityIndex, to: CityIndex) -> bool {
        self.cost(from, to).is_finite()
    }

    /// Sets every entry in the given row to `+∞` (no more departures
    /// from `from`).
    #[inline]
    pub fn forbid_departures(&mut self, from: CityIndex) {
        let start = from.get() * self.num_cities;
        for entry in &mut self.costs[start..start + self.num_cities] {
            *entry = T::infinity();
        }
    }

    /// Sets every entry in the given column to `+∞` (no more arrivals
    /// at `to`).
    #[inline]
    pub fn forbid_arrivals(&mut self, to: CityIndex) {
        let mut offset = to.get();
        for _ in 0..self.num_cities {
            self.costs[offset] = T::infinity();
            offset += self.num_cities;
        }
    }

    /// Overwrites the diagonal with `+∞`.
    #[inline]
    pub fn forbid_self_loops(&mut self) {
        for city in 0..self.num_cities {
            self.costs[city * self.num_cities + city] = T::infinity();
        }
    }

    /// Returns the given row as a slice.
    #[inline]
    pub fn row(&self, from: CityIndex) -> &[T] {
        let start = from.get() * self.num_cities;
        &self.costs[start..start + self.num_cities]
    }

    /// Returns the given row as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, from: CityIndex) -> &mut [T] {
        let start = from.get() * self.num_cities;
        &mut self.costs[start..start + self.num_cities]
    }

    /// Returns an iterator over the entries of the given column.
    #[inline]
    pub fn column(&self, to: CityIndex) -> impl Iterator<Item = T> + '_ {
        self.costs
            .iter()
            .skip(to.get())
            .step_by(self.num_cities.max(1))
            .copied()
    }

    /// Returns the total heap memory held by the cost buffer in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.costs.capacity() * core::mem::size_of::<T>()
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CostMatrix({} cities)", self.num_cities)?;
        for from in 0..self.num_cities {
            for to in 0..self.num_cities {
                let cost = self.costs[from * self.num_cities + to];
                if cost.is_finite() {
                    write!(f, "{:>8} ", cost)?;
                } else {
                    write!(f, "{:>8} ", "inf")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
