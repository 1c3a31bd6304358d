// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{seed_dir, zip};
use crate::{AssignmentRecord, DirectoryData, SeedError, read_rows};
use std::path::Path;
use territory_domain::{SalesRep, ZipCode};

#[test]
fn test_sample_data_is_consistent() {
    DirectoryData::sample().check_integrity().unwrap();
}

#[test]
fn test_seed_directory_matches_sample() {
    let loaded: DirectoryData = DirectoryData::load_from_dir(&seed_dir()).unwrap();
    assert_eq!(loaded, DirectoryData::sample());
}

#[test]
fn test_missing_seed_directory_reports_path() {
    let result: Result<DirectoryData, SeedError> =
        DirectoryData::load_from_dir(Path::new("/nonexistent/seed"));
    let err: SeedError = result.unwrap_err();
    assert!(matches!(err, SeedError::Io { .. }));
    assert!(err.to_string().contains("rep_types.csv"));
}

#[test]
fn test_read_rows_keeps_leading_zeros_and_trims() {
    let csv: &str = "zip_code,county_code\n 08099 , 08001\n";
    let rows: Vec<ZipCode> = read_rows("zip_codes.csv", csv.as_bytes()).unwrap();
    assert_eq!(rows, vec![ZipCode::new(zip("08099"), String::from("08001"))]);
}

#[test]
fn test_read_rows_rejects_malformed_zip() {
    let csv: &str = "type_id,zip_code,sales_rep_id\n1,8001,101\n";
    let result: Result<Vec<AssignmentRecord>, SeedError> =
        read_rows("assignments.csv", csv.as_bytes());
    assert!(matches!(
        result,
        Err(SeedError::Csv {
            file: "assignments.csv",
            ..
        })
    ));
}

#[test]
fn test_read_rows_rejects_ragged_rows() {
    let csv: &str = "sales_rep_id,sales_rep_no,division,type_id\n101,R-101,Metro\n";
    let result: Result<Vec<SalesRep>, SeedError> = read_rows("sales_reps.csv", csv.as_bytes());
    assert!(result.is_err());
}

#[test]
fn test_integrity_rejects_rep_of_unknown_type() {
    let mut data: DirectoryData = DirectoryData::sample();
    data.sales_reps.push(SalesRep::new(
        999,
        String::from("R-999"),
        String::from("Nowhere"),
        42,
    ));
    let err: SeedError = data.check_integrity().unwrap_err();
    assert!(err.to_string().contains("unknown type_id 42"));
}

#[test]
fn test_integrity_rejects_assignment_outside_rep_type() {
    let mut data: DirectoryData = DirectoryData::sample();
    data.assignments
        .push(AssignmentRecord::new(1, zip("80024"), 201));
    let err: SeedError = data.check_integrity().unwrap_err();
    assert!(matches!(
        err,
        SeedError::Integrity {
            file: "assignments.csv",
            ..
        }
    ));
}

#[test]
fn test_integrity_rejects_double_assignment() {
    let mut data: DirectoryData = DirectoryData::sample();
    data.assignments
        .push(AssignmentRecord::new(1, zip("80019"), 102));
    let err: SeedError = data.check_integrity().unwrap_err();
    assert!(err.to_string().contains("assigned twice"));
}
