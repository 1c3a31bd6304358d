// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV seed files for the reference directory.
//!
//! A seed directory holds five files with header rows:
//!
//! | File              | Columns                                       |
//! |-------------------|-----------------------------------------------|
//! | `rep_types.csv`   | `type_id,type_name`                           |
//! | `sales_reps.csv`  | `sales_rep_id,sales_rep_no,division,type_id`  |
//! | `counties.csv`    | `county_code,county_name,state_code`          |
//! | `zip_codes.csv`   | `zip_code,county_code`                        |
//! | `assignments.csv` | `type_id,zip_code,sales_rep_id`               |

use crate::data::DirectoryData;
use crate::error::SeedError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const REP_TYPES_FILE: &str = "rep_types.csv";
pub const SALES_REPS_FILE: &str = "sales_reps.csv";
pub const COUNTIES_FILE: &str = "counties.csv";
pub const ZIP_CODES_FILE: &str = "zip_codes.csv";
pub const ASSIGNMENTS_FILE: &str = "assignments.csv";

/// Reads every row of one CSV source.
///
/// Leading and trailing whitespace is trimmed from every field.
///
/// # Errors
///
/// Returns `SeedError::Csv` on the first malformed row.
pub fn read_rows<T, R>(file: &'static str, source: R) -> Result<Vec<T>, SeedError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(source);

    let rows: Vec<T> = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| SeedError::Csv { file, source })?;
    debug!(file, rows = rows.len(), "Read seed file");
    Ok(rows)
}

fn read_file<T>(dir: &Path, file: &'static str) -> Result<Vec<T>, SeedError>
where
    T: DeserializeOwned,
{
    let path: PathBuf = dir.join(file);
    let handle: File = File::open(&path).map_err(|source| SeedError::Io { path, source })?;
    read_rows(file, handle)
}

impl DirectoryData {
    /// Loads reference data from a seed directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory containing the five seed files
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A seed file is missing or unreadable
    /// - A row does not parse
    /// - Rows refer to types, reps, counties or ZIP codes that do not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self, SeedError> {
        let data: Self = Self {
            rep_types: read_file(dir, REP_TYPES_FILE)?,
            sales_reps: read_file(dir, SALES_REPS_FILE)?,
            counties: read_file(dir, COUNTIES_FILE)?,
            zip_codes: read_file(dir, ZIP_CODES_FILE)?,
            assignments: read_file(dir, ASSIGNMENTS_FILE)?,
        };
        data.check_integrity()?;

        info!(
            dir = %dir.display(),
            rep_types = data.rep_types.len(),
            sales_reps = data.sales_reps.len(),
            counties = data.counties.len(),
            zip_codes = data.zip_codes.len(),
            assignments = data.assignments.len(),
            "Loaded reference data"
        );
        Ok(data)
    }
}
