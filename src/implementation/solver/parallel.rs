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

//! This module provides the implementation of a parallel knapsack solver.
//! That is a solver that will fill the decision table using as many threads
//! as requested. By default, it uses as many threads as the number of
//! hardware threads available on the machine.
//!
//! The parallelization exploits the one structural property of the dynamic
//! program: a table row depends on the previous row only. Every row is thus
//! partitioned into contiguous budget bands -- one worker per band -- and
//! the workers synchronize once per item row, when the last band of the row
//! is deposited. This is a performance option, never a correctness matter:
//! the tie-breaking rule lives in the transition itself, so the solution is
//! the same whatever the number of workers.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::{
    check_resources, Completion, Error, Instance, ItemId, ResourcePolicy, Solution, Solver,
};

/// The shared data that may only be manipulated within critical sections
struct Critical {
    /// The bands of the row under construction, one slot per worker. A band
    /// stays `None` until its owner deposits it.
    bands: Vec<Option<Vec<isize>>>,
    /// The number of bands already deposited for the row under construction.
    ///
    /// # Note
    /// This counter is what lets the last depositing worker recognize
    /// itself: that worker seals the row and wakes everyone else up, so it
    /// needs careful management to guarantee that no row is sealed twice
    /// and that no worker sleeps forever.
    arrived: usize,
    /// All the rows sealed so far. `rows[i][c]` holds the maximum value
    /// achievable using the first `i` items within a weight budget of `c`;
    /// a row is only ever pushed complete, hence workers read the previous
    /// row without any further locking (the `Arc` is cloned out of the
    /// critical section).
    rows: Vec<Arc<Vec<isize>>>,
}

/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park the workers that finished a row early.
struct Shared<'a> {
    /// A reference to the instance being solved
    instance: &'a Instance,
    /// The number of bands each row is partitioned into
    nb_bands: usize,
    /// This is the shared state data which can only be accessed within
    /// critical sections. Therefore, it is protected by a mutex which
    /// prevents concurrent reads/writes.
    critical: Mutex<Critical>,
    /// This is the monitor on which workers wait between the moment they
    /// have deposited their band of a row and the moment the last band of
    /// that row is deposited. The corollary, is that the worker sealing a
    /// row must wake up all parked workers.
    monitor: Condvar,
}

/// This is the structure implementing a multi-threaded knapsack solver.
///
/// # Example Usage
/// ```
/// # use knapdp::*;
/// let instance = Instance::new(
///     vec![10,  20,  30],
///     vec![60, 100, 120],
///     50,
/// ).unwrap();
/// let policy = CellBudget::default();
///
/// let mut solver = ParallelSolver::new(&instance, &policy)
///     .with_nb_threads(4);
/// let outcome = solver.maximize().unwrap();
///
/// assert_eq!(220, outcome.best_value);
/// assert_eq!(vec![ItemId(1), ItemId(2)], solver.best_solution().unwrap().items);
/// ```
pub struct ParallelSolver<'a> {
    /// A reference to the instance being solved
    instance: &'a Instance,
    /// The safety bound deciding whether this instance is tractable at all
    policy: &'a (dyn ResourcePolicy),
    /// This is a configuration parameter that tunes the number of threads
    /// that will be spawned to fill the table. By default, this number
    /// amounts to the number of hardware threads available on the machine.
    nb_threads: usize,
    /// If set, this keeps the info about the best solution found so far.
    best_sol: Option<Solution>,
}

impl<'a> ParallelSolver<'a> {
    pub fn new(instance: &'a Instance, policy: &'a (dyn ResourcePolicy)) -> Self {
        Self::custom(instance, policy, num_cpus::get())
    }
    pub fn custom(
        instance: &'a Instance,
        policy: &'a (dyn ResourcePolicy),
        nb_threads: usize,
    ) -> Self {
        ParallelSolver {
            instance,
            policy,
            nb_threads: nb_threads.max(1),
            best_sol: None,
        }
    }
    /// Sets the number of threads used by the solver
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads.max(1);
        self
    }

    /// The half open range of budgets owned by the given worker. The
    /// `capacity + 1` budgets are spread as evenly as possible: the first
    /// `(capacity + 1) % nb_bands` bands get one extra cell.
    fn band_bounds(shared: &Shared, band: usize) -> (usize, usize) {
        let cells = shared.instance.capacity() + 1;
        let base = cells / shared.nb_bands;
        let extra = cells % shared.nb_bands;

        let lo = band * base + band.min(extra);
        let hi = lo + base + usize::from(band < extra);
        (lo, hi)
    }

    /// Fetches the previous row from the shared state, parking the calling
    /// worker until that row has been sealed. The `Arc` is cloned so the
    /// actual number crunching happens without holding the lock.
    fn fetch_row(shared: &Shared, row: usize) -> Arc<Vec<isize>> {
        let mut critical = shared.critical.lock();
        while critical.rows.len() <= row {
            shared.monitor.wait(&mut critical);
        }
        Arc::clone(&critical.rows[row])
    }

    /// Computes one band of the row for item `i`: the plain knapsack
    /// transition, restricted to the budgets this worker owns. Reads from
    /// `prev` may land in any band; that is fine since the previous row is
    /// complete and frozen.
    fn develop_band(instance: &Instance, prev: &[isize], i: usize, lo: usize, hi: usize) -> Vec<isize> {
        let weight = instance.weight(ItemId(i));
        let profit = instance.profit(ItemId(i));

        let mut band = Vec::with_capacity(hi - lo);
        for budget in lo..hi {
            let leave_out = prev[budget];
            let packed = if weight <= budget {
                prev[budget - weight] + profit
            } else {
                isize::MIN
            };
            band.push(if packed > leave_out { packed } else { leave_out });
        }
        band
    }

    /// Deposits the band a worker just computed. The last band to arrive
    /// seals the row: the bands are stitched back together in budget order,
    /// the complete row is published and every parked worker is woken up.
    fn deposit_band(shared: &Shared, band_id: usize, band: Vec<isize>) {
        let mut critical = shared.critical.lock();
        critical.bands[band_id] = Some(band);
        critical.arrived += 1;

        if critical.arrived == shared.nb_bands {
            let mut row = Vec::with_capacity(shared.instance.capacity() + 1);
            for slot in critical.bands.iter_mut() {
                row.append(&mut slot.take().unwrap_or_default());
            }
            critical.rows.push(Arc::new(row));
            critical.arrived = 0;
            shared.monitor.notify_all();
        }
    }

    /// The long running loop of one worker: for every item row, wait for
    /// the previous row, fill the owned band, deposit it. The deposit of
    /// the last band is what releases everyone into the next row, so the
    /// synchronization happens exactly once per item row.
    fn work(shared: &Shared, band_id: usize) {
        let instance = shared.instance;
        let (lo, hi) = Self::band_bounds(shared, band_id);

        for i in 0..instance.nb_items() {
            let prev = Self::fetch_row(shared, i);
            let band = Self::develop_band(instance, &prev, i, lo, hi);
            Self::deposit_band(shared, band_id, band);
        }
    }

    /// Walks the sealed rows backward to recover the optimal selection,
    /// exactly like the full table solver does.
    fn reconstruct(instance: &Instance, rows: &[Arc<Vec<isize>>]) -> Solution {
        let mut items = vec![];
        let mut total_weight = 0;
        let mut budget = instance.capacity();

        for i in (1..=instance.nb_items()).rev() {
            if rows[i][budget] != rows[i - 1][budget] {
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
            total_value: rows[instance.nb_items()][instance.capacity()],
        }
    }
}

impl Solver for ParallelSolver<'_> {
    /// Spawns one worker per band (never more workers than there are cells
    /// in a row) and lets them fill the table row after row. The scope join
    /// guarantees every row is sealed when the reconstruction starts.
    fn maximize(&mut self) -> Result<Completion, Error> {
        let explored = check_resources(self.instance, self.policy)?;

        let capacity = self.instance.capacity();
        let nb_bands = self.nb_threads.min(capacity + 1);
        let shared = Shared {
            instance: self.instance,
            nb_bands,
            monitor: Condvar::new(),
            critical: Mutex::new(Critical {
                bands: vec![None; nb_bands],
                arrived: 0,
                rows: vec![Arc::new(vec![0; capacity + 1])],
            }),
        };

        std::thread::scope(|s| {
            for band_id in 0..nb_bands {
                let shared = &shared;
                s.spawn(move || Self::work(shared, band_id));
            }
        });

        let critical = shared.critical.lock();
        let solution = Self::reconstruct(self.instance, &critical.rows);
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
mod test_parallel_solver {
    use crate::*;

    fn solve_with_threads(
        weight: Vec<isize>,
        profit: Vec<isize>,
        capacity: isize,
        nb_threads: usize,
    ) -> Solution {
        let instance = Instance::new(weight, profit, capacity).unwrap();
        let policy = CellBudget::default();
        let mut solver = ParallelSolver::custom(&instance, &policy, nb_threads);
        solver.maximize().unwrap();
        solver.best_solution().unwrap()
    }

    #[test]
    fn the_textbook_instance_with_one_worker() {
        let solution = solve_with_threads(vec![2, 3, 4, 5], vec![3, 4, 5, 6], 5, 1);
        assert_eq!(7, solution.total_value);
        assert_eq!(vec![ItemId(0), ItemId(1)], solution.items);
    }

    #[test]
    fn the_textbook_instance_with_many_workers() {
        let solution = solve_with_threads(vec![2, 3, 4, 5], vec![3, 4, 5, 6], 5, 4);
        assert_eq!(7, solution.total_value);
        assert_eq!(5, solution.total_weight);
        assert_eq!(vec![ItemId(0), ItemId(1)], solution.items);
    }

    #[test]
    fn more_workers_than_budgets_is_fine() {
        // 3 budgets for 16 requested threads: the band count is clamped
        let solution = solve_with_threads(vec![1, 2], vec![10, 10], 2, 16);
        assert_eq!(10, solution.total_value);
        assert_eq!(vec![ItemId(0)], solution.items);
    }

    #[test]
    fn no_items_means_an_empty_selection() {
        assert_eq!(Solution::empty(), solve_with_threads(vec![], vec![], 10, 4));
    }

    #[test]
    fn no_capacity_means_an_empty_selection() {
        let solution = solve_with_threads(vec![2, 3], vec![30, 40], 0, 4);
        assert_eq!(Solution::empty(), solution);
    }

    #[test]
    fn the_budget_is_enforced_before_any_thread_spawns() {
        let instance = Instance::new(vec![1; 9], vec![1; 9], 99).unwrap();
        let policy = CellBudget::new(100);
        let mut solver = ParallelSolver::custom(&instance, &policy, 4);
        assert!(matches!(
            solver.maximize(),
            Err(Error::ResourceExhaustion { cells: 1000, budget: 100 })
        ));
    }

    #[test]
    fn the_solution_does_not_depend_on_the_number_of_workers() {
        let weight = vec![23, 31, 29, 44, 53, 38, 63, 85, 89, 82];
        let profit = vec![92, 57, 49, 68, 60, 43, 67, 84, 87, 72];

        let instance = Instance::new(weight, profit, 165).unwrap();
        let policy = Unbounded;

        let mut reference = TableSolver::new(&instance, &policy);
        reference.maximize().unwrap();
        let reference = reference.best_solution();

        for nb_threads in [1, 2, 3, 5, 8, 200] {
            let mut solver = ParallelSolver::custom(&instance, &policy, nb_threads);
            solver.maximize().unwrap();
            assert_eq!(reference, solver.best_solution());
        }
    }
}
