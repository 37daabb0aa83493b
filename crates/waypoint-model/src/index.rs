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

use waypoint_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for city indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CityIndexTag;

impl TypedIndexTag for CityIndexTag {
    const NAME: &'static str = "CityIndex";
}

/// A typed index for cities.
pub type CityIndex = TypedIndex<CityIndexTag>;

/// The fixed root city every tour starts from.
pub const ROOT_CITY: CityIndex = CityIndex::new(0);

/// Returns an iterator over all city indices of an `num_cities`-city
/// instance, in ascending order.
#[inline]
pub fn cities(num_cities: usize) -> impl Iterator<Item = CityIndex> {
    (0..num_cities).map(CityIndex::new)
}
