// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Territory rules enforced by the in-memory authority.

use crate::data::{AssignmentMap, DirectoryData};
use crate::memory::InMemoryDirectory;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use territory::{
    BatchResponse, BatchUpdate, CommunicationError, TerritoryAuthority, ValidationReport,
};
use territory_domain::{
    AssignOperation, LocationSelector, ReassignOperation, StagedOperation, Zip,
};
use tracing::{info, warn};

/// Checks that a rep type exists and that each rep belongs to it.
fn check_membership(data: &DirectoryData, type_id: i64, rep_ids: &[i64]) -> Vec<String> {
    if data.rep_type(type_id).is_none() {
        return vec![format!("Rep type {type_id} does not exist")];
    }
    rep_ids
        .iter()
        .filter_map(|rep_id| match data.rep(*rep_id) {
            None => Some(format!("Rep {rep_id} does not exist")),
            Some(rep) if rep.type_id != type_id => Some(format!(
                "Rep {rep_id} does not belong to rep type {type_id}"
            )),
            Some(_) => None,
        })
        .collect()
}

/// Resolves a selector, reporting unknown counties and empty selections.
fn resolve_selection(
    data: &DirectoryData,
    selector: &LocationSelector,
) -> Result<Vec<Zip>, Vec<String>> {
    let (zips, unknown): (Vec<Zip>, Vec<String>) = data.resolve(selector);
    let mut errors: Vec<String> = unknown
        .iter()
        .map(|name| format!("Unknown county: {name}"))
        .collect();
    if zips.is_empty() && errors.is_empty() {
        errors.push(format!("{selector} does not include any known ZIP code"));
    }
    if errors.is_empty() {
        Ok(zips)
    } else {
        Err(errors)
    }
}

/// Cross-rep rules for an assignment.
///
/// A ZIP code may be held by at most one rep of a type, so any resolved ZIP
/// already held by a different rep of the same type is an overlap.
fn check_assign(
    data: &DirectoryData,
    assignments: &AssignmentMap,
    op: &AssignOperation,
) -> Result<Vec<Zip>, Vec<String>> {
    let membership: Vec<String> = check_membership(data, op.type_id, &[op.rep_id]);
    if !membership.is_empty() {
        return Err(membership);
    }
    let zips: Vec<Zip> = resolve_selection(data, &op.selector)?;
    let overlaps: Vec<String> = zips
        .iter()
        .filter_map(|zip| {
            assignments
                .get(&(op.type_id, *zip))
                .filter(|holder| **holder != op.rep_id)
                .map(|holder| format!("ZIP {zip} overlaps Rep {holder}"))
        })
        .collect();
    if overlaps.is_empty() {
        Ok(zips)
    } else {
        Err(overlaps)
    }
}

/// Cross-rep rules for a reassignment.
fn check_reassign(
    data: &DirectoryData,
    op: &ReassignOperation,
) -> Result<Vec<Zip>, Vec<String>> {
    let membership: Vec<String> =
        check_membership(data, op.type_id, &[op.from_rep_id, op.to_rep_id]);
    if !membership.is_empty() {
        return Err(membership);
    }
    resolve_selection(data, &op.selector)
}

/// Strict ownership: the source rep must hold every resolved ZIP code.
fn check_ownership(
    assignments: &AssignmentMap,
    op: &ReassignOperation,
    zips: &[Zip],
) -> Vec<String> {
    zips.iter()
        .filter(|zip| assignments.get(&(op.type_id, **zip)) != Some(&op.from_rep_id))
        .map(|zip| format!("ZIP {zip} is not assigned to Rep {}", op.from_rep_id))
        .collect()
}

/// Applies a batch to a working copy of the assignments.
///
/// Stops at the first rejected operation; the caller discards the copy.
fn apply_batch(
    data: &DirectoryData,
    working: &mut AssignmentMap,
    batch: &BatchUpdate,
) -> Result<(), Vec<String>> {
    for op in &batch.assigns {
        let zips: Vec<Zip> = check_assign(data, working, op)?;
        for zip in zips {
            working.insert((op.type_id, zip), op.rep_id);
        }
    }
    for op in &batch.reassigns {
        let zips: Vec<Zip> = check_reassign(data, op)?;
        let unowned: Vec<String> = check_ownership(working, op, &zips);
        if !unowned.is_empty() {
            return Err(unowned);
        }
        for zip in zips {
            working.insert((op.type_id, zip), op.to_rep_id);
        }
    }
    Ok(())
}

impl TerritoryAuthority for InMemoryDirectory {
    fn validate(
        &self,
        operation: &StagedOperation,
    ) -> Result<ValidationReport, CommunicationError> {
        let assignments: RwLockReadGuard<'_, AssignmentMap> = self.read_assignments("validate")?;
        let result: Result<Vec<Zip>, Vec<String>> = match operation {
            StagedOperation::Assign(op) => check_assign(self.data(), &assignments, op),
            StagedOperation::Reassign(op) => check_reassign(self.data(), op),
        };
        drop(assignments);

        Ok(match result {
            Ok(_) => ValidationReport::accepted(),
            Err(errors) => {
                warn!(type_id = operation.type_id(), errors = ?errors, "Operation failed validation");
                ValidationReport::rejected(errors)
            }
        })
    }

    fn batch_update(&self, batch: &BatchUpdate) -> Result<BatchResponse, CommunicationError> {
        let mut assignments: RwLockWriteGuard<'_, AssignmentMap> =
            self.write_assignments("batch_update")?;
        let mut working: AssignmentMap = assignments.clone();

        match apply_batch(self.data(), &mut working, batch) {
            Ok(()) => {
                *assignments = working;
                info!(
                    assigns = batch.assigns.len(),
                    reassigns = batch.reassigns.len(),
                    "Batch applied"
                );
                Ok(BatchResponse { success: true })
            }
            Err(errors) => {
                warn!(errors = ?errors, "Batch rejected; nothing applied");
                Ok(BatchResponse { success: false })
            }
        }
    }
}
