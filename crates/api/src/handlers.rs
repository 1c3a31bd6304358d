// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations over an operator session.
//!
//! Every function here is synchronous and takes its collaborators as trait
//! objects. Lookups that feed the selection chain are split in two so the
//! caller can release the session while the directory is queried.

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_field_errors,
};
use crate::request_response::{
    ConfirmResponse, CountiesResponse, CurrentAssignmentsResponse, LocationRequest,
    PreviewResponse, RemoveResponse, RepTypesResponse, SalesRepsResponse, StageAssignRequest,
    StageReassignRequest, StageResponse, StagingResponse, ZipCodesResponse,
};
use crate::session::OperatorSession;
use territory::{
    CommunicationError, ConfirmOutcome, CoreError, DirectoryService, LookupTicket, RowMatch,
    TerritoryAuthority, ValidationReport, confirm, display_rows, validate_assign,
    validate_reassign,
};
use territory_domain::{
    AssignOperation, CurrentAssignment, LocationForm, LocationSelector, OwnershipSnapshot,
    ReassignOperation, RepType, SalesRep, StagedOperation, expand_tokens,
    validate_location_form,
};
use tracing::debug;

fn communication(err: CommunicationError) -> ApiError {
    translate_core_error(CoreError::from(err))
}

fn parse_location(request: LocationRequest) -> Result<LocationSelector, ApiError> {
    let form: LocationForm = request.into();
    validate_location_form(&form).map_err(translate_field_errors)
}

/// Builds the staging view returned by every staging operation.
#[must_use]
pub fn get_staging(session: &OperatorSession) -> StagingResponse {
    StagingResponse {
        assigns: session.staging.assigns(),
        reassigns: session.staging.reassigns(),
        rows: display_rows(&session.staging, &session.names),
    }
}

/// Loads display names for every rep type and rep into the session.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn prime_names(
    session: &mut OperatorSession,
    directory: &dyn DirectoryService,
) -> Result<(), ApiError> {
    let rep_types: Vec<RepType> = directory.rep_types().map_err(communication)?;
    for rep_type in &rep_types {
        let reps: Vec<SalesRep> = directory
            .sales_reps(rep_type.type_id)
            .map_err(communication)?;
        session.names.add_reps(&reps);
    }
    session.names.add_rep_types(&rep_types);
    Ok(())
}

/// Lists rep types.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn list_rep_types(
    session: &mut OperatorSession,
    directory: &dyn DirectoryService,
) -> Result<RepTypesResponse, ApiError> {
    let rep_types: Vec<RepType> = directory.rep_types().map_err(communication)?;
    session.names.add_rep_types(&rep_types);
    Ok(RepTypesResponse { rep_types })
}

/// Selects a rep type, starting a sales rep lookup.
///
/// Clears the selected source rep and its ownership snapshot.
pub fn select_rep_type(session: &mut OperatorSession, type_id: i64) -> LookupTicket {
    session.selection.select_type(type_id)
}

/// Fetches the reps of a type.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn fetch_sales_reps(
    directory: &dyn DirectoryService,
    type_id: i64,
) -> Result<Vec<SalesRep>, ApiError> {
    directory.sales_reps(type_id).map_err(communication)
}

/// Completes a sales rep lookup.
///
/// The result is applied to the selection chain only if `ticket` is still
/// current; it is returned to the caller either way.
pub fn apply_sales_reps(
    session: &mut OperatorSession,
    ticket: LookupTicket,
    type_id: i64,
    sales_reps: Vec<SalesRep>,
) -> SalesRepsResponse {
    session.names.add_reps(&sales_reps);
    let current: bool = session.selection.apply_reps(ticket, sales_reps.clone());
    SalesRepsResponse {
        type_id,
        display_names: sales_reps.iter().map(SalesRep::display_name).collect(),
        sales_reps,
        current,
    }
}

/// Selects a rep type and loads its reps in one step.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn list_sales_reps(
    session: &mut OperatorSession,
    directory: &dyn DirectoryService,
    type_id: i64,
) -> Result<SalesRepsResponse, ApiError> {
    let ticket: LookupTicket = select_rep_type(session, type_id);
    let reps: Vec<SalesRep> = fetch_sales_reps(directory, type_id)?;
    Ok(apply_sales_reps(session, ticket, type_id, reps))
}

/// Lists counties.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn list_counties(directory: &dyn DirectoryService) -> Result<CountiesResponse, ApiError> {
    Ok(CountiesResponse {
        counties: directory.counties().map_err(communication)?,
    })
}

/// Lists the ZIP codes of a county.
///
/// # Errors
///
/// Returns an error if the county code is blank or the directory cannot
/// be reached.
pub fn list_zip_codes(
    directory: &dyn DirectoryService,
    county_code: &str,
) -> Result<ZipCodesResponse, ApiError> {
    let county_code: &str = county_code.trim();
    if county_code.is_empty() {
        return Err(ApiError::invalid_input(
            "county_code",
            String::from("county_code is required"),
        ));
    }
    Ok(ZipCodesResponse {
        county_code: county_code.to_string(),
        zip_codes: directory.zip_codes(county_code).map_err(communication)?,
    })
}

/// Selects the source rep, starting a current assignment lookup.
pub fn select_source_rep(session: &mut OperatorSession, rep_id: i64) -> LookupTicket {
    session.selection.select_source_rep(rep_id)
}

/// Fetches a rep's current assignments.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn fetch_current_assignments(
    directory: &dyn DirectoryService,
    rep_id: i64,
) -> Result<Vec<CurrentAssignment>, ApiError> {
    directory.current_assignments(rep_id).map_err(communication)
}

/// Completes a current assignment lookup.
///
/// The snapshot is kept only if `ticket` is still current.
pub fn apply_current_assignments(
    session: &mut OperatorSession,
    ticket: LookupTicket,
    rep_id: i64,
    assignments: &[CurrentAssignment],
) -> CurrentAssignmentsResponse {
    let current: bool = session.selection.apply_assignments(ticket, assignments);
    let snapshot: OwnershipSnapshot = OwnershipSnapshot::new(rep_id, assignments);
    CurrentAssignmentsResponse {
        rep_id,
        zip_codes: snapshot.zips().collect(),
        current,
    }
}

/// Selects a source rep and loads its assignments in one step.
///
/// # Errors
///
/// Returns an error if the directory cannot be reached.
pub fn list_current_assignments(
    session: &mut OperatorSession,
    directory: &dyn DirectoryService,
    rep_id: i64,
) -> Result<CurrentAssignmentsResponse, ApiError> {
    let ticket: LookupTicket = select_source_rep(session, rep_id);
    let assignments: Vec<CurrentAssignment> = fetch_current_assignments(directory, rep_id)?;
    Ok(apply_current_assignments(
        session,
        ticket,
        rep_id,
        &assignments,
    ))
}

/// Expands a location selection into the rows it would produce.
///
/// # Errors
///
/// Returns an error if the form is malformed.
pub fn preview(request: LocationRequest) -> Result<PreviewResponse, ApiError> {
    let selector: LocationSelector = parse_location(request)?;
    let tokens: Vec<String> = expand_tokens(&selector);
    Ok(PreviewResponse {
        count: tokens.len(),
        tokens,
    })
}

/// Validates an assignment and stages it.
///
/// # Errors
///
/// Returns an error if:
/// - The location form is malformed
/// - The authority rejects the assignment
/// - The authority cannot be reached
///
/// Staging is unchanged on any error.
pub fn stage_assign(
    session: &mut OperatorSession,
    authority: &dyn TerritoryAuthority,
    request: StageAssignRequest,
) -> Result<StageResponse, ApiError> {
    let selector: LocationSelector = parse_location(request.location)?;
    let op: AssignOperation = AssignOperation::new(request.type_id, request.rep_id, selector);

    let report: ValidationReport = validate_assign(authority, &op).map_err(communication)?;
    if !report.is_valid() {
        return Err(translate_core_error(CoreError::ValidationFailed(
            report.errors,
        )));
    }

    let message: String = format!(
        "Staged assignment of {} to rep {}",
        op.selector,
        session.names.rep_name(op.rep_id)
    );
    session.staging.add_assign(op.clone());
    Ok(StageResponse {
        staged: StagedOperation::Assign(op),
        message,
        staging: get_staging(session),
    })
}

/// Validates a reassignment and stages it.
///
/// Ownership is checked against the source rep's snapshot in the selection
/// chain. If the chain holds no snapshot for that rep, the rep's current
/// assignments are fetched for this check alone.
///
/// # Errors
///
/// Returns an error if:
/// - The location form is malformed, or both reps are the same
/// - The authority or the ownership check rejects the reassignment
/// - A collaborator cannot be reached
///
/// Staging is unchanged on any error.
pub fn stage_reassign(
    session: &mut OperatorSession,
    directory: &dyn DirectoryService,
    authority: &dyn TerritoryAuthority,
    request: StageReassignRequest,
) -> Result<StageResponse, ApiError> {
    let selector: LocationSelector = parse_location(request.location)?;
    let op: ReassignOperation = ReassignOperation::new(
        request.type_id,
        request.from_rep_id,
        request.to_rep_id,
        selector,
    )
    .map_err(translate_domain_error)?;

    let snapshot: OwnershipSnapshot = match session.selection.snapshot() {
        Some(snapshot) if snapshot.rep_id() == op.from_rep_id => snapshot.clone(),
        _ => {
            debug!(
                rep_id = op.from_rep_id,
                "No ownership snapshot for source rep; fetching"
            );
            let held: Vec<CurrentAssignment> =
                fetch_current_assignments(directory, op.from_rep_id)?;
            OwnershipSnapshot::new(op.from_rep_id, &held)
        }
    };

    let report: ValidationReport =
        validate_reassign(authority, directory, &snapshot, &op).map_err(communication)?;
    if !report.is_valid() {
        return Err(translate_core_error(CoreError::ValidationFailed(
            report.errors,
        )));
    }

    let message: String = format!(
        "Staged reassignment of {} from rep {} to rep {}",
        op.selector,
        session.names.rep_name(op.from_rep_id),
        session.names.rep_name(op.to_rep_id)
    );
    session.staging.add_reassign(op.clone());
    Ok(StageResponse {
        staged: StagedOperation::Reassign(op),
        message,
        staging: get_staging(session),
    })
}

/// Removes a staged assignment by position.
///
/// An out-of-range index removes nothing.
pub fn remove_assign(session: &mut OperatorSession, index: usize) -> RemoveResponse {
    let removed: Option<StagedOperation> = session
        .staging
        .remove_assign(index)
        .map(StagedOperation::Assign);
    RemoveResponse {
        removed,
        staging: get_staging(session),
    }
}

/// Removes a staged reassignment by position.
///
/// An out-of-range index removes nothing.
pub fn remove_reassign(session: &mut OperatorSession, index: usize) -> RemoveResponse {
    let removed: Option<StagedOperation> = session
        .staging
        .remove_reassign(index)
        .map(StagedOperation::Reassign);
    RemoveResponse {
        removed,
        staging: get_staging(session),
    }
}

/// Removes the first staged operation a display row was derived from.
///
/// The whole operation is removed, not just the row's location.
pub fn remove_row(session: &mut OperatorSession, row: &RowMatch) -> RemoveResponse {
    let removed: Option<StagedOperation> = session.staging.remove_matching(row);
    RemoveResponse {
        removed,
        staging: get_staging(session),
    }
}

/// Discards everything staged.
pub fn clear_staging(session: &mut OperatorSession) -> StagingResponse {
    session.staging.clear();
    get_staging(session)
}

/// Submits everything staged as one batch.
///
/// # Errors
///
/// Returns an error if the authority rejects the batch or cannot be
/// reached. Staging is unchanged in both cases.
pub fn confirm_batch(
    session: &mut OperatorSession,
    authority: &dyn TerritoryAuthority,
) -> Result<ConfirmResponse, ApiError> {
    let outcome: ConfirmOutcome =
        confirm(&mut session.staging, authority).map_err(communication)?;

    let message: String = match outcome {
        ConfirmOutcome::Confirmed { assigns, reassigns } => format!(
            "Confirmed {assigns} assignment(s) and {reassigns} reassignment(s)"
        ),
        ConfirmOutcome::NothingStaged => String::from("Nothing to confirm"),
        ConfirmOutcome::Rejected => {
            return Err(translate_core_error(CoreError::ConfirmRejected));
        }
    };

    Ok(ConfirmResponse {
        outcome,
        message,
        staging: get_staging(session),
    })
}
