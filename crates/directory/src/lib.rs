// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference directory for the Territory Assignment System.
//!
//! `InMemoryDirectory` answers directory lookups and acts as the territory
//! authority over one shared data set, loaded from CSV seed files or taken
//! from the built-in sample.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod authority;
mod data;
mod error;
mod memory;
mod seed;

#[cfg(test)]
mod tests;

pub use data::{AssignmentMap, AssignmentRecord, DirectoryData};
pub use error::SeedError;
pub use memory::InMemoryDirectory;
pub use seed::{
    ASSIGNMENTS_FILE, COUNTIES_FILE, REP_TYPES_FILE, SALES_REPS_FILE, ZIP_CODES_FILE, read_rows,
};
