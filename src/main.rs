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

//! This is the executable entry point: it reads a json instance file, solves
//! it exactly, prints a short report and optionally exports the selection as
//! json.

use std::time::Instant;

use clap::{Parser, ValueEnum};

use knapdp::*;

/// This structure uses `clap-derive` annotations and defines the arguments
/// that can be passed on to the executable solver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the instance file (json)
    fname: String,
    /// The algorithm used to explore the decision table
    #[clap(short, long, value_enum, default_value_t = AlgorithmArg::Table)]
    algorithm: AlgorithmArg,
    /// The number of concurrent threads (parallel algorithm only)
    #[clap(short, long)]
    threads: Option<usize>,
    /// The maximum number of table cells you agree to evaluate
    #[clap(short, long, conflicts_with = "unbounded")]
    budget: Option<usize>,
    /// Waive the safety bound on the table size altogether
    #[clap(long)]
    unbounded: bool,
    /// The factor by which fractional weights/values must be scaled to
    /// become integral
    #[clap(short, long)]
    scale: Option<u32>,
    /// Where to write the selection (json); nothing is written otherwise
    #[clap(short, long)]
    output: Option<String>,
}

/// The algorithm selection, as it appears on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// Full decision table in memory (the default)
    Table,
    /// One value row plus one decision bit per cell
    RowWise,
    /// Full table, rows filled by a team of workers
    Parallel,
}
impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Algorithm {
        match arg {
            AlgorithmArg::Table => Algorithm::Table,
            AlgorithmArg::RowWise => Algorithm::RowWise,
            AlgorithmArg::Parallel => Algorithm::Parallel,
        }
    }
}

/// This is your executable's entry point. It is the place where all the
/// pieces are put together to read, solve and report on the instance.
fn main() {
    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let instance = read_instance(&args.fname, args.scale)?;

    let defaults = SolveOptions::default();
    let options = SolveOptions {
        algorithm: args.algorithm.into(),
        nb_threads: args.threads.unwrap_or(defaults.nb_threads),
        cell_budget: if args.unbounded {
            None
        } else {
            Some(args.budget.unwrap_or(DEFAULT_CELL_BUDGET))
        },
    };

    let start = Instant::now();
    let solution = solve_with(&instance, &options)?;
    let duration = start.elapsed();

    let items = solution.items.iter().map(|item| item.id()).collect::<Vec<usize>>();

    println!("Duration:   {:.3} seconds", duration.as_secs_f32());
    println!("Objective:  {}", solution.total_value);
    println!("Weight:     {} / {}", solution.total_weight, instance.capacity());
    println!("Items:      {items:?}");

    if let Some(output) = &args.output {
        write_solution(output, &instance, &solution)?;
        println!("{} items selected. Results saved to '{}'.", items.len(), output);
    }
    Ok(())
}
