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

//! # KNAPDP
//! KNAPDP is an exact solver for the binary (0/1) knapsack problem: given a
//! set of items -- each with a weight and a value -- and the capacity of a
//! sack, it returns the subset of items whose total value is maximal among
//! all the subsets whose total weight fits within the capacity.
//!
//! The optimization is carried out with the classical dynamic program over
//! a table indexed by (number of considered items, remaining budget). That
//! algorithm is exact and runs in pseudo-polynomial time: the effort grows
//! with the *numeric* magnitude of the capacity, not with the number of bits
//! used to write it down. This is why every solver of this crate consults a
//! [`ResourcePolicy`] before allocating anything, and refuses upfront the
//! instances whose table would blow past the configured budget.
//!
//! Three interchangeable implementations of the [`Solver`] abstraction are
//! provided:
//!
//! * [`TableSolver`] keeps the full decision table in memory. It is the
//!   default and the implementation of choice whenever the table fits.
//! * [`RowWiseSolver`] keeps a single row of the table plus one bit per
//!   cell to remember the decisions. Same optimum, same selection, roughly
//!   a sixty-fourth of the memory.
//! * [`ParallelSolver`] splits every row in contiguous budget bands and
//!   lets one worker fill each band, synchronizing the workers once per
//!   item row. This is a performance option only: it returns the exact
//!   same solution as the two others.
//!
//! ## Quick Example
//! ```
//! use knapdp::*;
//!
//! // 1. Create an instance of the knapsack problem
//! let instance = Instance::new(
//!     vec![10,  20,  30],   // weight of each item
//!     vec![60, 100, 120],   // profit of each item
//!     50,                   // capacity of the sack
//! ).unwrap();
//!
//! // 2. Maximize the total profit of the items you pick
//! let solution = solve(&instance).unwrap();
//!
//! // 3. Do whatever you like with the optimal solution.
//! assert_eq!(220, solution.total_value);
//! assert_eq!( 50, solution.total_weight);
//! assert_eq!(vec![ItemId(1), ItemId(2)], solution.items);
//! ```
//!
//! When several subsets reach the optimal value, the solvers deterministically
//! prefer *leaving an item out* over packing it. The selection you get is thus
//! reproducible across runs, across solvers, and across thread counts.

mod common;
mod model;
mod io_utils;
mod abstraction;
mod implementation;

pub use common::*;
pub use model::*;
pub use io_utils::*;
pub use abstraction::*;
pub use implementation::*;
