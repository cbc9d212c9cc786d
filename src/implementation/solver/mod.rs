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

//! This module provides the solver implementations.

mod table;
mod rowwise;
mod parallel;

pub use table::*;
pub use rowwise::*;
pub use parallel::*;

use derive_builder::Builder;

use crate::{Error, Instance, ResourcePolicy, Solution, Solver, CellBudget, Unbounded, DEFAULT_CELL_BUDGET};

/// A type alias to emphasize that this is the solver that should be used by
/// default.
pub type DefaultSolver<'a> = TableSolver<'a>;

/// The algorithm used to fill (and walk back) the decision table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Full table in memory; the default
    #[default]
    Table,
    /// One value row plus one decision bit per cell
    RowWise,
    /// Full table, rows filled by a team of workers
    Parallel,
}

/// The knobs of a one-call solve: which algorithm, how many workers, and how
/// large a table one agrees to pay for. The defaults match what the bare
/// [`solve`] function does.
///
/// # Example
/// ```
/// # use knapdp::*;
/// let options = SolveOptionsBuilder::default()
///     .algorithm(Algorithm::Parallel)
///     .nb_threads(4_usize)
///     .build()
///     .unwrap();
///
/// let instance = Instance::new(vec![10, 20, 30], vec![60, 100, 120], 50).unwrap();
/// let solution = solve_with(&instance, &options).unwrap();
/// assert_eq!(220, solution.total_value);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct SolveOptions {
    /// The algorithm used to explore the decision table
    #[builder(default)]
    pub algorithm: Algorithm,
    /// The number of concurrent workers (parallel algorithm only)
    #[builder(default = "num_cpus::get()")]
    pub nb_threads: usize,
    /// The maximum number of table cells one agrees to evaluate; `None`
    /// waives the safety bound altogether
    #[builder(default = "Some(DEFAULT_CELL_BUDGET)")]
    pub cell_budget: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            algorithm: Algorithm::Table,
            nb_threads: num_cpus::get(),
            cell_budget: Some(DEFAULT_CELL_BUDGET),
        }
    }
}

/// An utility function to return the resource policy encoded in the options:
/// either a bounded budget or no safety bound at all.
fn policy(cell_budget: Option<usize>) -> Box<dyn ResourcePolicy> {
    if let Some(budget) = cell_budget {
        Box::new(CellBudget::new(budget))
    } else {
        Box::new(Unbounded)
    }
}

/// Runs the given solver to completion and hands back its solution.
fn run(mut solver: impl Solver) -> Result<Solution, Error> {
    solver.maximize()?;
    // a successful maximize always leaves a solution behind
    Ok(solver.best_solution().unwrap_or_else(Solution::empty))
}

/// Solves the given instance with the given options. This is the one-call
/// entry point a user interface or a script is expected to use; the solver
/// structures themselves remain available for callers that want to keep the
/// solver around or inspect the completion.
pub fn solve_with(instance: &Instance, options: &SolveOptions) -> Result<Solution, Error> {
    let policy = policy(options.cell_budget);
    let policy = policy.as_ref();

    match options.algorithm {
        Algorithm::Table => run(TableSolver::new(instance, policy)),
        Algorithm::RowWise => run(RowWiseSolver::new(instance, policy)),
        Algorithm::Parallel => {
            run(ParallelSolver::custom(instance, policy, options.nb_threads))
        }
    }
}

/// Solves the given instance with the default options: full table algorithm
/// under the default cell budget.
pub fn solve(instance: &Instance) -> Result<Solution, Error> {
    solve_with(instance, &SolveOptions::default())
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solve {
    use crate::*;

    fn instance() -> Instance {
        Instance::new(vec![2, 3, 4, 5], vec![3, 4, 5, 6], 5).unwrap()
    }

    #[test]
    fn the_default_options_solve_exactly() {
        let solution = solve(&instance()).unwrap();
        assert_eq!(7, solution.total_value);
        assert_eq!(vec![ItemId(0), ItemId(1)], solution.items);
    }

    #[test]
    fn every_algorithm_returns_the_same_solution() {
        let instance = instance();
        let reference = solve(&instance).unwrap();

        for algorithm in [Algorithm::Table, Algorithm::RowWise, Algorithm::Parallel] {
            let options = SolveOptionsBuilder::default()
                .algorithm(algorithm)
                .build()
                .unwrap();
            assert_eq!(reference, solve_with(&instance, &options).unwrap());
        }
    }

    #[test]
    fn the_cell_budget_of_the_options_is_honored() {
        let options = SolveOptionsBuilder::default()
            .cell_budget(Some(10_usize))
            .build()
            .unwrap();
        let result = solve_with(&instance(), &options);
        assert!(matches!(result, Err(Error::ResourceExhaustion { .. })));
    }

    #[test]
    fn a_waived_budget_admits_any_instance() {
        let options = SolveOptionsBuilder::default()
            .cell_budget(None)
            .build()
            .unwrap();
        let solution = solve_with(&instance(), &options).unwrap();
        assert_eq!(7, solution.total_value);
    }
}
