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

//! This module provides the implementation of the row-wise knapsack solver:
//! the space saving variant of the dynamic program. Instead of keeping the
//! complete value table around, it repeatedly overwrites one single row --
//! sweeping the budgets in decreasing order so that every cell still reads
//! the values of the previous item row.
//!
//! Dropping the table would normally forfeit the ability to reconstruct the
//! selected subset, so this solver maintains a parallel bookkeeping: one bit
//! per table cell, set iff packing the item *strictly* improved on leaving
//! it out at that budget. A full row of values costs 64 bits a cell; a row
//! of decisions costs one. The backward walk then reads bits instead of
//! comparing rows, and yields the exact same selection as the full table
//! solver does.

use bit_vec::BitVec;

use crate::{
    check_resources, Completion, Error, Instance, ItemId, ResourcePolicy, Solution, Solver,
};

/// This is the structure implementing the row-wise knapsack solver. It is
/// strictly equivalent to [`crate::TableSolver`] -- same optimum, same
/// selection, same refusal of over-budget instances -- and spends roughly a
/// sixty-fourth of its memory. Prefer it for instances whose value table is
/// too large to keep, yet whose bit table is not.
pub struct RowWiseSolver<'a> {
    /// A reference to the instance being solved
    instance: &'a Instance,
    /// The safety bound deciding whether this instance is tractable at all
    policy: &'a (dyn ResourcePolicy),
    /// If set, this keeps the info about the best solution found so far.
    best_sol: Option<Solution>,
}

impl<'a> RowWiseSolver<'a> {
    pub fn new(instance: &'a Instance, policy: &'a (dyn ResourcePolicy)) -> Self {
        RowWiseSolver {
            instance,
            policy,
            best_sol: None,
        }
    }

    /// Runs the value recurrence over a single reusable row and records one
    /// decision bit row per item. Returns the optimal value along with the
    /// decision bits.
    ///
    /// The in-place update is sound because the budgets are swept in
    /// *decreasing* order: when cell `budget` is computed, the lower cell
    /// `budget - weight` has not been overwritten yet and still holds the
    /// value of the previous item row.
    fn develop_rows(&self) -> (isize, Vec<BitVec>) {
        let instance = self.instance;
        let capacity = instance.capacity();

        let mut row = vec![0_isize; capacity + 1];
        let mut packed = Vec::with_capacity(instance.nb_items());

        for i in 0..instance.nb_items() {
            let weight = instance.weight(ItemId(i));
            let profit = instance.profit(ItemId(i));
            let mut bits = BitVec::from_elem(capacity + 1, false);

            for budget in (weight..=capacity).rev() {
                let candidate = row[budget - weight] + profit;
                if candidate > row[budget] {
                    row[budget] = candidate;
                    bits.set(budget, true);
                }
            }
            packed.push(bits);
        }
        (row[capacity], packed)
    }

    /// Recovers the optimal selection from the decision bits: walking the
    /// items backward, a set bit at the current budget means the item was
    /// packed and the budget shrinks by its weight.
    fn reconstruct(instance: &Instance, best_value: isize, packed: &[BitVec]) -> Solution {
        let mut items = vec![];
        let mut total_weight = 0;
        let mut budget = instance.capacity();

        for i in (0..instance.nb_items()).rev() {
            if packed[i][budget] {
                let item = ItemId(i);
                items.push(item);
                total_weight += instance.weight(item);
                budget -= instance.weight(item);
            }
        }
        items.reverse();

        Solution {
            items,
            total_weight,
            total_value: best_value,
        }
    }
}

impl Solver for RowWiseSolver<'_> {
    fn maximize(&mut self) -> Result<Completion, Error> {
        let explored = check_resources(self.instance, self.policy)?;

        let (best_value, packed) = self.develop_rows();
        self.best_sol = Some(Self::reconstruct(self.instance, best_value, &packed));

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
mod test_rowwise_solver {
    use crate::*;

    fn solve(weight: Vec<isize>, profit: Vec<isize>, capacity: isize) -> Solution {
        let instance = Instance::new(weight, profit, capacity).unwrap();
        let policy = CellBudget::default();
        let mut solver = RowWiseSolver::new(&instance, &policy);
        solver.maximize().unwrap();
        solver.best_solution().unwrap()
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
        assert_eq!(Solution::empty(), solve(vec![], vec![], 10));
    }

    #[test]
    fn no_capacity_means_an_empty_selection() {
        assert_eq!(Solution::empty(), solve(vec![2, 3], vec![30, 40], 0));
    }

    #[test]
    fn an_item_too_heavy_for_the_sack_is_never_packed() {
        assert_eq!(Solution::empty(), solve(vec![10], vec![5], 5));
    }

    #[test]
    fn ties_are_broken_by_omission_like_the_table_solver_does() {
        let solution = solve(vec![2, 2], vec![5, 5], 2);
        assert_eq!(5, solution.total_value);
        assert_eq!(vec![ItemId(0)], solution.items);
    }

    #[test]
    fn the_budget_is_enforced_before_any_work_happens() {
        let instance = Instance::new(vec![1; 9], vec![1; 9], 99).unwrap();
        let policy = CellBudget::new(100);
        let mut solver = RowWiseSolver::new(&instance, &policy);
        assert!(matches!(
            solver.maximize(),
            Err(Error::ResourceExhaustion { cells: 1000, budget: 100 })
        ));
    }

    #[test]
    fn same_selection_as_the_full_table_on_a_crafted_tie_heavy_instance() {
        let weight = vec![1, 1, 2, 2, 3, 3];
        let profit = vec![2, 2, 4, 4, 6, 6];

        for capacity in 0..=14 {
            let instance =
                Instance::new(weight.clone(), profit.clone(), capacity).unwrap();
            let policy = Unbounded;

            let mut table = TableSolver::new(&instance, &policy);
            let mut rowwise = RowWiseSolver::new(&instance, &policy);
            table.maximize().unwrap();
            rowwise.maximize().unwrap();

            assert_eq!(table.best_solution(), rowwise.best_solution());
        }
    }
}
