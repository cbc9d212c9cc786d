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

//! This module provides the implementation of the full table solver. That is
//! the textbook dynamic program for the binary knapsack: it materializes the
//! complete decision table, which makes the reconstruction of the optimal
//! selection a simple backward walk.
//!
//! This is the implementation you will want to use by default: it is the
//! simplest of the lot and the decision table it keeps around is also what
//! the reconstruction feeds on, so nothing is computed twice. Reach for the
//! row-wise sibling when memory is the binding constraint.

use crate::{
    check_resources, Completion, Error, Instance, ItemId, ResourcePolicy, Solution, Solver,
};

/// This is the structure implementing the full table knapsack solver.
///
/// # Example Usage
/// ```
/// # use knapdp::*;
/// // 1. Create an instance of the knapsack problem
/// let instance = Instance::new(
///     vec![10,  20,  30],
///     vec![60, 100, 120],
///     50,
/// ).unwrap();
///
/// // 2. Decide how much effort you are willing to spend on it
/// let policy = CellBudget::default();
///
/// // 3. Instantiate the solver and maximize your objective function
/// let mut solver = TableSolver::new(&instance, &policy);
/// let outcome = solver.maximize().unwrap();
///
/// // 4. Do whatever you like with the optimal solution.
/// assert_eq!(220, outcome.best_value);
/// let solution = solver.best_solution().unwrap();
/// assert_eq!(vec![ItemId(1), ItemId(2)], solution.items);
/// ```
pub struct TableSolver<'a> {
    /// A reference to the instance being solved
    instance: &'a Instance,
    /// The safety bound deciding whether this instance is tractable at all
    policy: &'a (dyn ResourcePolicy),
    /// If set, this keeps the info about the best solution found so far.
    best_sol: Option<Solution>,
}

impl<'a> TableSolver<'a> {
    pub fn new(instance: &'a Instance, policy: &'a (dyn ResourcePolicy)) -> Self {
        TableSolver {
            instance,
            policy,
            best_sol: None,
        }
    }

    /// Fills the decision table. The entry `table[i][c]` holds the maximum
    /// value achievable using the first `i` items within a weight budget of
    /// `c`; row 0 is all zeros (no item, no value) and the optimum of the
    /// whole instance sits in the bottom right cell.
    ///
    /// When packing item `i` brings no *strict* improvement over leaving it
    /// out, the transition keeps the leave-it-out value. This is the pinned
    /// tie-breaking rule of the crate: among equally good selections, the
    /// one that omits the latest considered item wins.
    fn develop_table(&self) -> Vec<Vec<isize>> {
        let instance = self.instance;
        let capacity = instance.capacity();

        let mut table = Vec::with_capacity(instance.nb_items() + 1);
        table.push(vec![0; capacity + 1]);

        for i in 0..instance.nb_items() {
            let weight = instance.weight(ItemId(i));
            let profit = instance.profit(ItemId(i));
            let prev = &table[i];

            let mut row = Vec::with_capacity(capacity + 1);
            for budget in 0..=capacity {
                let leave_out = prev[budget];
                let packed = if weight <= budget {
                    prev[budget - weight] + profit
                } else {
                    isize::MIN
                };
                row.push(if packed > leave_out { packed } else { leave_out });
            }
            table.push(row);
        }
        table
    }

    /// Walks the table backward from the bottom right cell to recover the
    /// optimal selection: whenever the value changes between row `i` and row
    /// `i - 1`, item `i - 1` was packed and the budget shrinks by its weight.
    fn reconstruct(instance: &Instance, table: &[Vec<isize>]) -> Solution {
        let mut items = vec![];
        let mut total_weight = 0;
        let mut budget = instance.capacity();

        for i in (1..=instance.nb_items()).rev() {
            if table[i][budget] != table[i - 1][budget] {
                let item = ItemId(i - 1);
                items.push(item);
                total_weight += instance.weight(item);
                budget -= instance.weight(item);
            }
        }
        items.reverse();

        Solution {
            items,
            total_weight,
            total_value: table[instance.nb_items()][instance.capacity()],
        }
    }
}

impl Solver for TableSolver<'_> {
    fn maximize(&mut self) -> Result<Completion, Error> {
        let explored = check_resources(self.instance, self.policy)?;

        let table = self.develop_table();
        let solution = Self::reconstruct(self.instance, &table);
        let best_value = solution.total_value;
        self.best_sol = Some(solution);

        Ok(Completion { best_value, explored })
    }

    fn best_value(&self) -> Option<isize> {
        self.best_sol.as_ref().map(|sol| sol.total_value)
    }

    fn best_solution(&self) -> Option<Solution> {
        self.best_sol.clone()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_table_solver {
    use crate::*;

    fn solve(weight: Vec<isize>, profit: Vec<isize>, capacity: isize) -> Solution {
        let instance = Instance::new(weight, profit, capacity).unwrap();
        let policy = CellBudget::default();
        let mut solver = TableSolver::new(&instance, &policy);
        solver.maximize().unwrap();
        solver.best_solution().unwrap()
    }

    #[test]
    fn nothing_is_known_before_maximize() {
        let instance = Instance::new(vec![2], vec![3], 5).unwrap();
        let policy = Unbounded;
        let solver = TableSolver::new(&instance, &policy);
        assert_eq!(None, solver.best_value());
        assert_eq!(None, solver.best_solution());
    }

    #[test]
    fn the_textbook_instance() {
        let solution = solve(vec![2, 3, 4, 5], vec![3, 4, 5, 6], 5);
        assert_eq!(7, solution.total_value);
        assert_eq!(5, solution.total_weight);
        assert_eq!(vec![ItemId(0), ItemId(1)], solution.items);
    }

    #[test]
    fn no_items_means_an_empty_selection() {
        let solution = solve(vec![], vec![], 10);
        assert_eq!(Solution::empty(), solution);
    }

    #[test]
    fn no_capacity_means_an_empty_selection() {
        let solution = solve(vec![2, 3], vec![30, 40], 0);
        assert_eq!(Solution::empty(), solution);
    }

    #[test]
    fn an_item_too_heavy_for_the_sack_is_never_packed() {
        let solution = solve(vec![10], vec![5], 5);
        assert_eq!(Solution::empty(), solution);
    }

    #[test]
    fn a_weightless_item_is_packed_whenever_it_pays() {
        let solution = solve(vec![0, 4], vec![3, 10], 4);
        assert_eq!(13, solution.total_value);
        assert_eq!(4, solution.total_weight);
        assert_eq!(vec![ItemId(0), ItemId(1)], solution.items);
    }

    #[test]
    fn a_weightless_worthless_item_stays_out() {
        let solution = solve(vec![0, 1], vec![0, 1], 1);
        assert_eq!(vec![ItemId(1)], solution.items);
    }

    #[test]
    fn ties_are_broken_by_omission() {
        // both items alone reach the optimum; the first considered one wins
        // because packing the second brings no strict improvement
        let solution = solve(vec![2, 2], vec![5, 5], 2);
        assert_eq!(5, solution.total_value);
        assert_eq!(vec![ItemId(0)], solution.items);
    }

    #[test]
    fn the_budget_is_enforced_before_any_work_happens() {
        let instance = Instance::new(vec![1; 9], vec![1; 9], 99).unwrap();
        let policy = CellBudget::new(100); // 10 * 100 cells needed
        let mut solver = TableSolver::new(&instance, &policy);
        assert!(matches!(
            solver.maximize(),
            Err(Error::ResourceExhaustion { cells: 1000, budget: 100 })
        ));
        assert_eq!(None, solver.best_solution());
    }

    #[test]
    fn the_completion_reports_the_explored_cells() {
        let instance = Instance::new(vec![2, 3], vec![3, 4], 5).unwrap();
        let policy = Unbounded;
        let mut solver = TableSolver::new(&instance, &policy);
        let completion = solver.maximize().unwrap();
        assert_eq!(Completion { best_value: 7, explored: 18 }, completion);
    }
}
