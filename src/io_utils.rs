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

//! This module is used to read the json instance files and to export the
//! selection a solver came up with.
//!
//! The instance format is the one a user interface typically produces when
//! someone fills in a form: a capacity and a flat list of weight/value
//! pairs.
//!
//! ```json
//! {
//!     "capacity": 5,
//!     "items": [
//!         { "weight": 2, "value": 3 },
//!         { "weight": 3, "value": 4 }
//!     ]
//! }
//! ```
//!
//! Additional fields (a `num_items` count, typically) are tolerated and
//! ignored. Numbers may be fractional in the file, but the solvers only work
//! on integers: a fractional instance is accepted iff the caller supplies a
//! scale factor that lands every number back on an integer; otherwise the
//! loading fails and nothing gets silently rounded.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Instance, Solution};

/// An instance file, as deserialized. Numbers are read as floating point so
/// that fractional inputs can be diagnosed (and scaled) instead of being
/// bounced with an obscure type error.
#[derive(Debug, Deserialize)]
struct RawInstance {
    capacity: f64,
    items: Vec<RawItem>,
}
#[derive(Debug, Deserialize)]
struct RawItem {
    weight: f64,
    value: f64,
}

/// One line of the exported selection.
#[derive(Debug, Serialize)]
struct ChosenItem {
    item: usize,
    weight: usize,
    value: isize,
}
/// The exported selection: the chosen items with their weights and values,
/// plus the totals.
#[derive(Debug, Serialize)]
struct Report {
    items: Vec<ChosenItem>,
    total_weight: usize,
    total_value: isize,
}

/// This function is used to read a knapsack instance from a json file. It
/// returns either the validated instance if everything went on well or an
/// error describing the problem.
pub fn read_instance<P: AsRef<Path>>(fname: P, scale: Option<u32>) -> Result<Instance, Error> {
    let f = File::open(fname)?;
    let raw: RawInstance = serde_json::from_reader(BufReader::new(f))?;
    instance_of(raw, scale)
}

/// Same as [`read_instance`], reading from an in-memory string rather than
/// from a file.
pub fn parse_instance(text: &str, scale: Option<u32>) -> Result<Instance, Error> {
    let raw: RawInstance = serde_json::from_str(text)?;
    instance_of(raw, scale)
}

/// This function exports the given solution as a json file listing the
/// selected items along with their weights, their values and the totals.
pub fn write_solution<P: AsRef<Path>>(
    fname: P,
    instance: &Instance,
    solution: &Solution,
) -> Result<(), Error> {
    let f = File::create(fname)?;
    serde_json::to_writer_pretty(BufWriter::new(f), &report_of(instance, solution))?;
    Ok(())
}

fn report_of(instance: &Instance, solution: &Solution) -> Report {
    Report {
        items: solution
            .items
            .iter()
            .map(|item| ChosenItem {
                item: item.id(),
                weight: instance.weight(*item),
                value: instance.profit(*item),
            })
            .collect(),
        total_weight: solution.total_weight,
        total_value: solution.total_value,
    }
}

/// Validates and converts a deserialized instance. The screening for
/// identical items happens here -- on the raw numbers, before any scaling --
/// because it is an input-form check, not a property of the model: the
/// in-memory `Instance` is perfectly happy with duplicates.
fn instance_of(raw: RawInstance, scale: Option<u32>) -> Result<Instance, Error> {
    check_distinct(&raw.items)?;

    let capacity = to_integer(raw.capacity, scale)?;
    let weight = raw
        .items
        .iter()
        .map(|item| to_integer(item.weight, scale))
        .collect::<Result<Vec<_>, _>>()?;
    let value = raw
        .items
        .iter()
        .map(|item| to_integer(item.value, scale))
        .collect::<Result<Vec<_>, _>>()?;

    Instance::new(weight, value, capacity)
}

/// Refuses instance files in which two items carry the exact same weight and
/// value.
fn check_distinct(items: &[RawItem]) -> Result<(), Error> {
    let mut seen = FxHashMap::default();
    for (i, item) in items.iter().enumerate() {
        let key = (item.weight.to_bits(), item.value.to_bits());
        if let Some(first) = seen.insert(key, i) {
            return Err(Error::DuplicateItem { first, second: i });
        }
    }
    Ok(())
}

/// Brings one number of the instance file back to the integers. Without a
/// scale factor, only numbers that already are integral make it through;
/// with one, the scaled number must land on an integer (up to the float
/// noise of the multiplication).
fn to_integer(number: f64, scale: Option<u32>) -> Result<isize, Error> {
    match scale {
        None if number.fract() == 0.0 => Ok(number as isize),
        None => Err(Error::Fractional(number)),
        Some(scale) => {
            let scaled = number * f64::from(scale);
            let rounded = scaled.round();
            if (scaled - rounded).abs() < 1e-6 {
                Ok(rounded as isize)
            } else {
                Err(Error::ScaleTooCoarse { scale, number })
            }
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
