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

//! This module provides the implementation of the resource policies that can
//! be used to tune the behavior of the knapsack solvers.

use crate::{Error, Instance, ResourcePolicy};

/// The number of table cells a solver agrees to evaluate unless told
/// otherwise. One hundred million cells is less than a gigabyte of table
/// and about a second of work on commodity hardware.
pub const DEFAULT_CELL_BUDGET: usize = 100_000_000;

/// A policy that admits every instance, however large. Opting for this one
/// means the caller takes the tractability of its instances upon itself.
#[derive(Debug, Default, Copy, Clone)]
pub struct Unbounded;
impl ResourcePolicy for Unbounded {
    fn admits(&self, _cells: usize) -> bool {
        true
    }
}

/// _This is the default resource policy._ It admits an instance iff its
/// decision table holds no more than the given number of cells.
///
/// # Example
/// ```
/// # use knapdp::*;
/// let instance = Instance::new(vec![10, 20, 30], vec![60, 100, 120], 50).unwrap();
/// let policy = CellBudget::new(1_000);
/// let mut solver = TableSolver::new(&instance, &policy);
/// let outcome = solver.maximize().unwrap(); // 4 * 51 cells fit easily
/// assert_eq!(220, outcome.best_value);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct CellBudget {
    budget: usize,
}
impl CellBudget {
    pub fn new(budget: usize) -> Self {
        CellBudget { budget }
    }
    pub fn budget(&self) -> usize {
        self.budget
    }
}
impl Default for CellBudget {
    fn default() -> Self {
        CellBudget { budget: DEFAULT_CELL_BUDGET }
    }
}
impl ResourcePolicy for CellBudget {
    fn admits(&self, cells: usize) -> bool {
        cells <= self.budget
    }
}

/// Checks the given instance against the given policy. This is the one gate
/// every solver goes through before allocating its table; on success it
/// returns the cell count so the solver can report the effort it spent.
pub fn check_resources(
    instance: &Instance,
    policy: &dyn ResourcePolicy,
) -> Result<usize, Error> {
    let cells = instance.table_cells();
    if policy.admits(cells) {
        Ok(cells)
    } else {
        let budget = largest_admitted(policy);
        Err(Error::ResourceExhaustion { cells, budget })
    }
}

/// The largest cell count the policy admits, used to phrase the error
/// report. A plain binary search: policies are monotone in practice.
fn largest_admitted(policy: &dyn ResourcePolicy) -> usize {
    let (mut lo, mut hi) = (0_usize, usize::MAX);
    while lo < hi {
        let mid = lo + (hi - lo) / 2 + 1;
        if policy.admits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
