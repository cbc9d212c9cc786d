// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module defines the `ResourcePolicy` trait: the safety bound that
//! keeps a pseudo-polynomial algorithm from eating the machine alive.

/// The dynamic program underlying every solver of this crate runs in time
/// and space proportional to `(nb_items + 1) * (capacity + 1)`. That effort
/// is polynomial in the *magnitude* of the capacity, which the caller types
/// in -- so an innocent looking instance can demand terabytes of table. A
/// `ResourcePolicy` is consulted by every solver before it allocates
/// anything; when the policy refuses the cell count, the solve fails with
/// `Error::ResourceExhaustion` instead of being allowed to run unbounded.
pub trait ResourcePolicy {
    /// Returns true iff an instance whose decision table comprises `cells`
    /// cells is acceptable to solve on this machine.
    fn admits(&self, cells: usize) -> bool;
}
