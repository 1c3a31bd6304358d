// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authority::{TerritoryAuthority, ValidationReport};
use crate::directory::DirectoryService;
use crate::error::CommunicationError;
use std::collections::BTreeSet;
use territory_domain::{
    AssignOperation, County, LocationSelector, OwnershipSnapshot, ReassignOperation,
    StagedOperation, Zip, ZipCode, validate_ownership,
};
use tracing::{debug, warn};

/// The ZIP codes a selector stands for in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedZips {
    /// Known ZIP codes, ascending and unique.
    pub zips: Vec<Zip>,
    /// Selected county names the directory does not know.
    pub unknown_counties: Vec<String>,
}

/// Resolves a selector against the directory's ZIP universe.
///
/// In ZIP mode only the ZIP codes of the range that the directory knows are
/// kept. In county mode every ZIP code of every selected county is used.
///
/// Costs one `zip_codes` call per selected county in county mode, and one per
/// directory county in ZIP mode.
///
/// # Errors
///
/// Returns a `CommunicationError` if the directory cannot be reached.
pub fn resolve_zips(
    directory: &dyn DirectoryService,
    selector: &LocationSelector,
) -> Result<ResolvedZips, CommunicationError> {
    let counties: Vec<County> = directory.counties()?;
    let mut zips: BTreeSet<Zip> = BTreeSet::new();
    let mut unknown_counties: Vec<String> = Vec::new();

    match selector {
        LocationSelector::Counties(selection) => {
            for name in selection.names() {
                let Some(county) = counties.iter().find(|c| &c.county_name == name) else {
                    unknown_counties.push(name.clone());
                    continue;
                };
                let rows: Vec<ZipCode> = directory.zip_codes(&county.county_code)?;
                zips.extend(rows.into_iter().map(|row| row.zip_code));
            }
        }
        LocationSelector::Zips(range) => {
            for county in &counties {
                let rows: Vec<ZipCode> = directory.zip_codes(&county.county_code)?;
                zips.extend(
                    rows.into_iter()
                        .map(|row| row.zip_code)
                        .filter(|zip| range.contains(*zip)),
                );
            }
        }
    }

    Ok(ResolvedZips {
        zips: zips.into_iter().collect(),
        unknown_counties,
    })
}

/// Validates an assignment with the authority.
///
/// The authority's error strings are passed through verbatim.
///
/// # Errors
///
/// Returns a `CommunicationError` if the authority cannot be reached.
pub fn validate_assign(
    authority: &dyn TerritoryAuthority,
    op: &AssignOperation,
) -> Result<ValidationReport, CommunicationError> {
    let report: ValidationReport = authority.validate(&StagedOperation::Assign(op.clone()))?;
    if report.is_valid() {
        debug!(type_id = op.type_id, rep_id = op.rep_id, "Assign accepted");
    } else {
        warn!(
            type_id = op.type_id,
            rep_id = op.rep_id,
            errors = ?report.errors,
            "Assign rejected"
        );
    }
    Ok(report)
}

/// Validates a reassignment.
///
/// Authority errors come first, verbatim. Then every ZIP code the selector
/// resolves to must be held by the source rep according to `snapshot`; all
/// offending ZIP codes are named in a single error. Unknown counties are the
/// authority's to report.
///
/// A ZIP range held in full by the source rep needs no directory lookup.
///
/// # Arguments
///
/// * `authority` - The authority to validate against
/// * `directory` - Used to resolve the selector to ZIP codes
/// * `snapshot` - The source rep's assignments as last fetched
/// * `op` - The reassignment to check
///
/// # Errors
///
/// Returns a `CommunicationError` if either collaborator cannot be reached.
pub fn validate_reassign(
    authority: &dyn TerritoryAuthority,
    directory: &dyn DirectoryService,
    snapshot: &OwnershipSnapshot,
    op: &ReassignOperation,
) -> Result<ValidationReport, CommunicationError> {
    let mut report: ValidationReport =
        authority.validate(&StagedOperation::Reassign(op.clone()))?;

    if snapshot.rep_id() == op.from_rep_id {
        let zips: Vec<Zip> = match &op.selector {
            LocationSelector::Zips(range) if range.iter().all(|zip| snapshot.owns(zip)) => {
                range.iter().collect()
            }
            selector => resolve_zips(directory, selector)?.zips,
        };
        if let Err(e) = validate_ownership(snapshot, &zips) {
            report.extend([e.to_string()]);
        }
    } else {
        report.extend([format!(
            "Current assignments for rep {} have not been loaded",
            op.from_rep_id
        )]);
    }

    if report.is_valid() {
        debug!(
            type_id = op.type_id,
            from_rep_id = op.from_rep_id,
            to_rep_id = op.to_rep_id,
            "Reassign accepted"
        );
    } else {
        warn!(
            type_id = op.type_id,
            from_rep_id = op.from_rep_id,
            to_rep_id = op.to_rep_id,
            errors = ?report.errors,
            "Reassign rejected"
        );
    }
    Ok(report)
}
