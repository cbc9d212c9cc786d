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

//! This module is meant to test the correctness of our knapsack solvers: the
//! classic instances from the literature with their published optima, and
//! the invariants of the problem checked against a brute force on a batch of
//! small generated instances.

use knapdp::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// The three interchangeable solve configurations under test.
fn all_algorithms() -> Vec<SolveOptions> {
    [Algorithm::Table, Algorithm::RowWise, Algorithm::Parallel]
        .iter()
        .map(|algorithm| {
            SolveOptionsBuilder::default()
                .algorithm(*algorithm)
                .nb_threads(4_usize)
                .build()
                .unwrap()
        })
        .collect()
}

/// The reference optimum, computed the slow and obviously correct way: by
/// enumerating every one of the 2^n subsets.
fn brute_force(instance: &Instance) -> isize {
    let n = instance.nb_items();
    let mut best = 0;

    for mask in 0_u32..(1_u32 << n) {
        let mut weight = 0;
        let mut value = 0;
        for i in 0..n {
            if mask & (1 << i) != 0 {
                weight += instance.weight(ItemId(i));
                value += instance.profit(ItemId(i));
            }
        }
        if weight <= instance.capacity() && value > best {
            best = value;
        }
    }
    best
}

/// Generates a small random instance the way benchmark generators do:
/// weights in 1..=50, values in 0..=100, capacity at half the total weight.
fn random_instance(rng: &mut SmallRng, nb_items: usize) -> Instance {
    let weight: Vec<isize> = (0..nb_items).map(|_| rng.gen_range(1..=50)).collect();
    let profit: Vec<isize> = (0..nb_items).map(|_| rng.gen_range(0..=100)).collect();
    let capacity = weight.iter().sum::<isize>() / 2;

    Instance::new(weight, profit, capacity).unwrap()
}

fn checked_solve(instance: &Instance, options: &SolveOptions) -> Solution {
    let solution = solve_with(instance, options).unwrap();

    // the totals must actually describe the selection
    let weight: usize = solution.items.iter().map(|i| instance.weight(*i)).sum();
    let value: isize = solution.items.iter().map(|i| instance.profit(*i)).sum();
    assert_eq!(weight, solution.total_weight);
    assert_eq!(value, solution.total_value);

    // and the selection must be feasible
    assert!(solution.total_weight <= instance.capacity());

    solution
}

// =================================================================
// classic instances from the low-dimensional 0/1 knapsack test set,
// with their published optima.
// =================================================================

fn solve_classic(weight: Vec<isize>, profit: Vec<isize>, capacity: isize) -> isize {
    let instance = Instance::new(weight, profit, capacity).unwrap();
    let mut value = None;

    for options in all_algorithms() {
        let solution = checked_solve(&instance, &options);
        let previous = value.replace(solution.total_value);
        if let Some(previous) = previous {
            assert_eq!(previous, solution.total_value);
        }
    }
    value.unwrap()
}

#[test]
fn p01() {
    let weight = vec![23, 31, 29, 44, 53, 38, 63, 85, 89, 82];
    let profit = vec![92, 57, 49, 68, 60, 43, 67, 84, 87, 72];
    assert_eq!(solve_classic(weight, profit, 165), 309);
}

#[test]
fn p02() {
    let weight = vec![12, 7, 11, 8, 9];
    let profit = vec![24, 13, 23, 15, 16];
    assert_eq!(solve_classic(weight, profit, 26), 51);
}

#[test]
fn p04() {
    let weight = vec![31, 10, 20, 19, 4, 3, 6];
    let profit = vec![70, 20, 39, 37, 7, 5, 10];
    assert_eq!(solve_classic(weight, profit, 50), 107);
}

#[test]
fn p06() {
    let weight = vec![56, 59, 80, 64, 75, 17];
    let profit = vec![50, 50, 64, 46, 50, 5];
    assert_eq!(solve_classic(weight, profit, 190), 150);
}

#[test]
fn p07() {
    let weight = vec![70, 73, 77, 80, 82, 87, 90, 94, 98, 106, 110, 113, 115, 118, 120];
    let profit = vec![135, 139, 149, 150, 156, 163, 173, 184, 192, 201, 210, 214, 221, 229, 240];
    assert_eq!(solve_classic(weight, profit, 750), 1458);
}

// =================================================================
// invariants, checked on a batch of small generated instances.
// =================================================================

#[test]
fn optimality_against_brute_force() {
    let mut rng = SmallRng::seed_from_u64(0xCAFE);

    for _ in 0..25 {
        let nb_items = rng.gen_range(0..=12);
        let instance = random_instance(&mut rng, nb_items);
        let reference = brute_force(&instance);

        for options in all_algorithms() {
            let solution = checked_solve(&instance, &options);
            assert_eq!(reference, solution.total_value);
        }
    }
}

#[test]
fn growing_the_capacity_never_hurts() {
    let mut rng = SmallRng::seed_from_u64(0xBEEF);
    let instance = random_instance(&mut rng, 10);

    let weight: Vec<isize> = (0..10).map(|i| instance.weight(ItemId(i)) as isize).collect();
    let profit: Vec<isize> = (0..10).map(|i| instance.profit(ItemId(i))).collect();

    let mut previous = 0;
    for capacity in 0..=(weight.iter().sum::<isize>() + 1) {
        let grown = Instance::new(weight.clone(), profit.clone(), capacity).unwrap();
        let value = solve(&grown).unwrap().total_value;

        assert!(value >= previous);
        previous = value;
    }

    // once everything fits, the optimum is the total profit
    assert_eq!(profit.iter().sum::<isize>(), previous);
}

#[test]
fn solving_twice_yields_the_same_selection() {
    let mut rng = SmallRng::seed_from_u64(0xF00D);
    let instance = random_instance(&mut rng, 14);

    let first = solve(&instance).unwrap();
    let second = solve(&instance).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_algorithm_agrees_on_the_selection_itself() {
    let mut rng = SmallRng::seed_from_u64(0xD1CE);

    for _ in 0..10 {
        let nb_items = rng.gen_range(1..=14);
        let instance = random_instance(&mut rng, nb_items);

        let mut reference: Option<Solution> = None;
        for options in all_algorithms() {
            let solution = checked_solve(&instance, &options);
            if let Some(reference) = &reference {
                assert_eq!(*reference, solution);
            } else {
                reference = Some(solution);
            }
        }
    }
}
