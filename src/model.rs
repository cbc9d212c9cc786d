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

//! This module defines the problem instance: the one piece of data every
//! solver of this crate operates on.

use crate::{Error, ItemId};

/// An instance of the binary knapsack problem: an ordered sequence of items
/// (a weight and a profit each) together with the capacity of the sack.
/// An instance is immutable once it has been built; this is what makes it
/// safe to share between the workers of the parallel solver without any
/// synchronization.
///
/// The constructor is the single validation point of the crate: it refuses
/// mismatched weight/profit vectors as well as any negative weight, profit
/// or capacity. Hence the unsigned types below: once an `Instance` exists,
/// no solver needs to worry about the sanity of its numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// The capacity of the sack: the maximum total weight of a selection
    capacity: usize,
    /// The weight of each item
    weight: Vec<usize>,
    /// The profit earned by packing each item
    profit: Vec<isize>,
}

impl Instance {
    /// Validates the given weights, profits and capacity and builds an
    /// immutable instance out of them. The weights and profits are given
    /// as signed integers on purpose: the negative cases must be *representable*
    /// so that they can be rejected loudly rather than wrapped around silently.
    pub fn new(weight: Vec<isize>, profit: Vec<isize>, capacity: isize) -> Result<Self, Error> {
        if weight.len() != profit.len() {
            return Err(Error::MismatchedLengths {
                nb_weights: weight.len(),
                nb_values: profit.len(),
            });
        }
        if capacity < 0 {
            return Err(Error::NegativeCapacity(capacity));
        }
        if let Some(item) = weight.iter().position(|w| *w < 0) {
            return Err(Error::NegativeWeight { item, weight: weight[item] });
        }
        if let Some(item) = profit.iter().position(|p| *p < 0) {
            return Err(Error::NegativeValue { item, value: profit[item] });
        }

        Ok(Instance {
            capacity: capacity as usize,
            weight: weight.iter().map(|w| *w as usize).collect(),
            profit,
        })
    }

    /// The number of items one may consider packing.
    pub fn nb_items(&self) -> usize {
        self.profit.len()
    }
    /// The maximum total weight of a selection.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// The weight of the given item.
    pub fn weight(&self, item: ItemId) -> usize {
        self.weight[item.id()]
    }
    /// The profit earned by packing the given item.
    pub fn profit(&self, item: ItemId) -> isize {
        self.profit[item.id()]
    }

    /// The number of cells of the decision table for this instance; that is,
    /// the effort required to solve it exactly. The computation saturates
    /// rather than wrapping around: an instance so large that the count does
    /// not even fit in a machine word must be caught by the resource policy,
    /// not silently made small again.
    pub fn table_cells(&self) -> usize {
        self.nb_items()
            .saturating_add(1)
            .saturating_mul(self.capacity.saturating_add(1))
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
