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

//! This module defines the most basic data types that are used throughout all
//! the code of our library. These are also the types your client code is
//! likely to work with.

// ----------------------------------------------------------------------------
// --- ITEM ID ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type identifies one item of the problem instance at hand. Each item
/// is identified with its position in the instance: an integer ranging from
/// 0 until `instance.nb_items()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(pub usize);
impl ItemId {
    #[inline]
    /// This function returns the id (numeric value) of the item.
    ///
    /// # Examples:
    /// ```
    /// # use knapdp::ItemId;
    /// assert_eq!(0, ItemId(0).id());
    /// assert_eq!(1, ItemId(1).id());
    /// assert_eq!(2, ItemId(2).id());
    /// assert_eq!(3, ItemId(3).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- SOLUTION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The solution to an instance of the knapsack problem: the subset of items
/// that was packed into the sack, along with the weight and the value of the
/// subset. A solution is produced fresh by every solve, it has no lifecycle
/// of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The identifiers of the selected items, in ascending order
    pub items: Vec<ItemId>,
    /// The total weight of the selection. This is guaranteed to not exceed
    /// the capacity of the instance that was solved
    pub total_weight: usize,
    /// The total value of the selection. This is guaranteed to be maximal
    /// among all the selections that fit within the capacity
    pub total_value: isize,
}

impl Solution {
    /// An empty selection: the solution to any instance with no item or no
    /// capacity (and the one feasible selection of every instance).
    pub fn empty() -> Self {
        Solution { items: vec![], total_weight: 0, total_value: 0 }
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a complete maximization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The value of the best solution: the maximum of the objective function
    pub best_value: isize,
    /// The number of table cells that were evaluated to prove that optimum
    pub explored: usize,
}

// ----------------------------------------------------------------------------
// --- ERRORS -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This enumeration groups the kind of errors that might pop up when building
/// or solving an instance. Invalid inputs are reported to the caller before
/// any computation begins, they are never silently corrected. None of these
/// errors is ever retried internally: the computation is deterministic, so a
/// retry would only reproduce the failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The weight and value vectors do not describe the same items
    #[error("mismatched inputs: {nb_weights} weights for {nb_values} values")]
    MismatchedLengths { nb_weights: usize, nb_values: usize },
    /// The capacity of the sack was negative
    #[error("negative capacity ({0})")]
    NegativeCapacity(isize),
    /// Some item was given a negative weight
    #[error("negative weight ({weight}) for item {item}")]
    NegativeWeight { item: usize, weight: isize },
    /// Some item was given a negative value
    #[error("negative value ({value}) for item {item}")]
    NegativeValue { item: usize, value: isize },
    /// Two items of the instance file carry the exact same weight and value
    #[error("items {first} and {second} are identical, change one of them")]
    DuplicateItem { first: usize, second: usize },
    /// The instance file contains fractional numbers and no scale factor was
    /// supplied to bring them back to integers
    #[error("fractional number ({0}) in instance, supply a scale factor to make it integral")]
    Fractional(f64),
    /// The supplied scale factor does not make every number of the instance
    /// file integral
    #[error("scale factor {scale} does not make {number} integral")]
    ScaleTooCoarse { scale: u32, number: f64 },
    /// The decision table of the instance would exceed the configured safety
    /// bound. This is reported upfront rather than letting the computation
    /// run away with unbounded memory and time
    #[error("instance requires {cells} table cells but the policy admits {budget} at most")]
    ResourceExhaustion { cells: usize, budget: usize },
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The instance file was not properly formatted
    #[error("ill formed instance: {0}")]
    Json(#[from] serde_json::Error),
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_solution {
    use crate::Solution;

    #[test]
    fn empty_solution_has_no_weight_and_no_value() {
        let empty = Solution::empty();
        assert!(empty.items.is_empty());
        assert_eq!(0, empty.total_weight);
        assert_eq!(0, empty.total_value);
    }
}
