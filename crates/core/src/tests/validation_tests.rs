// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    FakeAuthority, FakeDirectory, county_selector, create_test_assign, create_test_reassign, zip,
    zip_selector,
};
use crate::{
    CommunicationError, ResolvedZips, StagingSet, ValidationReport, resolve_zips,
    validate_assign, validate_reassign,
};
use territory_domain::{CurrentAssignment, OwnershipSnapshot, ReassignOperation};

fn snapshot_for_101() -> OwnershipSnapshot {
    OwnershipSnapshot::new(
        101,
        &[
            CurrentAssignment::new(zip("80019")),
            CurrentAssignment::new(zip("80022")),
        ],
    )
}

#[test]
fn test_assign_accepted_by_authority() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let report: ValidationReport =
        validate_assign(&authority, &create_test_assign(101, "80010", "80010")).unwrap();
    assert!(report.is_valid());
    assert_eq!(authority.validated.borrow().len(), 1);
}

#[test]
fn test_assign_errors_pass_through_verbatim() {
    let mut authority: FakeAuthority = FakeAuthority::accepting();
    authority.validate_errors = vec![
        String::from("ZIP 80010 overlaps Rep 102"),
        String::from("ZIP 80011 overlaps Rep 102"),
    ];

    let report: ValidationReport =
        validate_assign(&authority, &create_test_assign(101, "80010", "80011")).unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.errors, authority.validate_errors);
}

#[test]
fn test_validation_never_touches_staging() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let staging: StagingSet = StagingSet::new();
    validate_assign(&authority, &create_test_assign(101, "80010", "80010")).unwrap();
    assert!(staging.is_empty());
}

#[test]
fn test_resolve_zip_range_keeps_known_zips_only() {
    let directory: FakeDirectory = FakeDirectory::new();
    let resolved: ResolvedZips =
        resolve_zips(&directory, &zip_selector("80019", "80022")).unwrap();
    assert_eq!(resolved.zips, vec![zip("80019"), zip("80022")]);
    assert!(resolved.unknown_counties.is_empty());
}

#[test]
fn test_resolve_counties_uses_every_county_zip() {
    let directory: FakeDirectory = FakeDirectory::new();
    let resolved: ResolvedZips =
        resolve_zips(&directory, &county_selector(&["Adams", "Boulder"])).unwrap();
    assert_eq!(resolved.zips, vec![zip("80019"), zip("80022"), zip("80024")]);
    assert_eq!(resolved.unknown_counties, vec![String::from("Boulder")]);
    assert_eq!(directory.zip_lookups.get(), 1);
}

#[test]
fn test_reassign_of_owned_range_succeeds() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, zip_selector("80019", "80022"));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(report.is_valid(), "{:?}", report.errors);
}

#[test]
fn test_reassign_names_unowned_zip() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, zip_selector("80019", "80024"));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("80024"));
    assert!(!report.errors[0].contains("80019"));
}

#[test]
fn test_reassign_county_checks_all_county_zips() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, county_selector(&["Adams"]));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert_eq!(
        report.errors,
        vec![String::from(
            "ZIP codes not currently assigned to rep 101: 80024"
        )]
    );
}

#[test]
fn test_reassign_reports_authority_errors_before_ownership() {
    let mut authority: FakeAuthority = FakeAuthority::accepting();
    authority.validate_errors = vec![String::from("Rep 102 is not a member of type 1")];
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, zip_selector("80019", "80024"));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0], "Rep 102 is not a member of type 1");
    assert!(report.errors[1].contains("80024"));
}

#[test]
fn test_reassign_leaves_unknown_county_to_authority() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, county_selector(&["Boulder"]));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(report.is_valid());
}

#[test]
fn test_reassign_of_fully_held_range_skips_directory() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, zip_selector("80019", "80019"));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(report.is_valid());
    assert_eq!(directory.zip_lookups.get(), 0);
}

#[test]
fn test_reassign_county_lookups_limited_to_selection() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(101, 102, county_selector(&["Adams"]));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(!report.is_valid());
    assert_eq!(directory.zip_lookups.get(), 1);
}

#[test]
fn test_reassign_requires_snapshot_of_source_rep() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    let op: ReassignOperation = create_test_reassign(102, 101, zip_selector("80019", "80019"));

    let report: ValidationReport =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op).unwrap();

    assert!(!report.is_valid());
    assert!(report.errors[0].contains("rep 102"));
}

#[test]
fn test_directory_failure_propagates() {
    let authority: FakeAuthority = FakeAuthority::accepting();
    let directory: FakeDirectory = FakeDirectory::new();
    directory.unavailable.set(true);
    let op: ReassignOperation = create_test_reassign(101, 102, zip_selector("80019", "80022"));

    let result: Result<ValidationReport, CommunicationError> =
        validate_reassign(&authority, &directory, &snapshot_for_101(), &op);

    assert_eq!(
        result,
        Err(CommunicationError::Unavailable {
            operation: "counties"
        })
    );
}

#[test]
fn test_authority_failure_propagates() {
    let authority: FakeAuthority = FakeAuthority::unavailable();
    let result: Result<ValidationReport, CommunicationError> =
        validate_assign(&authority, &create_test_assign(101, "80010", "80010"));
    assert!(result.is_err());
}
