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

//! This module defines the `Solver` trait.

use crate::{Completion, Error, Solution};

/// This is the solver abstraction. It is implemented by any structure that
/// carries out the exact resolution of a knapsack instance -- currently the
/// full table dynamic program, its row-wise (space saving) sibling and the
/// banded parallel variant.
///
/// A solver is a pure computation: it performs no i/o, holds no state that
/// outlives it, and is deterministic for a given instance. In particular,
/// when several selections reach the optimal value, every implementation
/// resolves the tie the same documented way: an item whose inclusion does
/// not *strictly* improve the objective stays out of the sack.
pub trait Solver {
    /// This method orders the solver to search for the selection of maximal
    /// value among all those that fit within the capacity. On success, it
    /// returns a [`Completion`] carrying the optimal value along with the
    /// effort that was spent proving it.
    ///
    /// Because the empty selection is always feasible, there is no such
    /// thing as an unsatisfiable instance: an instance with no item, a zero
    /// capacity, or items that are all too heavy simply completes with a
    /// best value of zero. The only failure mode is a *refusal to start*:
    /// [`Error::ResourceExhaustion`] when the decision table would exceed
    /// the safety bound of the configured resource policy.
    fn maximize(&mut self) -> Result<Completion, Error>;
    /// This method returns the value of the objective function for the best
    /// solution that has been found. It returns `None` as long as `maximize`
    /// has not successfully completed.
    fn best_value(&self) -> Option<isize>;
    /// This method returns the best solution to the instance: the selected
    /// items along with their total weight and value. It returns `None` as
    /// long as `maximize` has not successfully completed.
    fn best_solution(&self) -> Option<Solution>;
}
