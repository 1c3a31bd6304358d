// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    county_location, create_assign_request, create_reassign_request, setup, zip_location,
};
use crate::{
    ApiError, ConfirmResponse, LocationRequest, PreviewResponse, RemoveResponse, StageResponse,
    StagingResponse, clear_staging, confirm_batch, list_current_assignments, preview,
    remove_assign, remove_row, stage_assign, stage_reassign,
};
use territory::{ConfirmOutcome, RowMatch};
use territory_domain::{LocationSelector, ReassignOperation, StagedOperation, Zip, ZipRange};

fn zip(value: &str) -> Zip {
    Zip::parse(value).unwrap()
}

#[test]
fn test_preview_expands_zip_range() {
    let response: PreviewResponse = preview(zip_location("80010", "80012")).unwrap();
    assert_eq!(response.tokens, vec!["80010", "80011", "80012"]);
    assert_eq!(response.count, 3);
}

#[test]
fn test_preview_keeps_county_order() {
    let response: PreviewResponse = preview(county_location(&["Denver", "Adams"])).unwrap();
    assert_eq!(response.tokens, vec!["Denver", "Adams"]);
}

#[test]
fn test_preview_rejects_both_selectors() {
    let mut request: LocationRequest = county_location(&["Adams"]);
    request.zip_from = Some(String::from("80010"));
    request.zip_to = Some(String::from("80012"));

    let err: ApiError = preview(request).unwrap_err();

    match err {
        ApiError::InvalidInput { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "location");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_preview_reports_every_bad_bound() {
    let err: ApiError = preview(zip_location("8001", "8002x")).unwrap_err();
    let ApiError::InvalidInput { errors } = err else {
        panic!("expected InvalidInput");
    };
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["zip_from", "zip_to"]);
}

#[test]
fn test_stage_assign_adds_operation_and_rows() {
    let (directory, mut session) = setup();

    let response: StageResponse = stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80011", "80013")),
    )
    .unwrap();

    assert_eq!(session.staging.assigns().len(), 1);
    assert_eq!(response.staging.rows.assigns.len(), 3);
    assert_eq!(response.staging.rows.assigns[0].rep_name, "R-101 (Metro)");
    assert_eq!(response.staging.rows.assigns[0].type_name, "Inside");
}

#[test]
fn test_stage_assign_overlap_is_not_staged() {
    let (directory, mut session) = setup();

    let err: ApiError = stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 102, zip_location("80019", "80019")),
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::ValidationFailed {
            errors: vec![String::from("ZIP 80019 overlaps Rep 101")]
        }
    );
    assert!(session.staging.is_empty());
}

#[test]
fn test_stage_assign_form_error_never_reaches_authority() {
    let (directory, mut session) = setup();
    directory.set_available(false);

    let err: ApiError = stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80020", "80010")),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_stage_reassign_of_owned_range() {
    let (directory, mut session) = setup();

    stage_reassign(
        &mut session,
        &directory,
        &directory,
        create_reassign_request(101, 102, zip_location("80019", "80022")),
    )
    .unwrap();

    assert_eq!(session.staging.reassigns().len(), 1);
}

#[test]
fn test_stage_reassign_uses_loaded_snapshot() {
    let (directory, mut session) = setup();
    list_current_assignments(&mut session, &directory, 101).unwrap();

    let err: ApiError = stage_reassign(
        &mut session,
        &directory,
        &directory,
        create_reassign_request(101, 102, zip_location("80019", "80024")),
    )
    .unwrap_err();

    let ApiError::ValidationFailed { errors } = err else {
        panic!("expected ValidationFailed");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("80024"));
    assert!(session.staging.is_empty());
}

#[test]
fn test_stage_reassign_county_not_fully_owned() {
    let (directory, mut session) = setup();

    let err: ApiError = stage_reassign(
        &mut session,
        &directory,
        &directory,
        create_reassign_request(101, 102, county_location(&["Adams"])),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ValidationFailed { .. }));
}

#[test]
fn test_stage_reassign_unknown_county_reported_once() {
    let (directory, mut session) = setup();

    let err: ApiError = stage_reassign(
        &mut session,
        &directory,
        &directory,
        create_reassign_request(101, 102, county_location(&["Nowhere"])),
    )
    .unwrap_err();

    let ApiError::ValidationFailed { errors } = err else {
        panic!("expected ValidationFailed");
    };
    assert_eq!(errors, vec![String::from("Unknown county: Nowhere")]);
    assert!(session.staging.is_empty());
}

#[test]
fn test_stage_reassign_to_same_rep_is_form_error() {
    let (directory, mut session) = setup();

    let err: ApiError = stage_reassign(
        &mut session,
        &directory,
        &directory,
        create_reassign_request(101, 101, zip_location("80019", "80019")),
    )
    .unwrap_err();

    let ApiError::InvalidInput { errors } = err else {
        panic!("expected InvalidInput");
    };
    assert_eq!(errors[0].field, "to_rep_id");
}

#[test]
fn test_remove_row_removes_whole_operation() {
    let (directory, mut session) = setup();
    let staged: StageResponse = stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80011", "80013")),
    )
    .unwrap();

    let middle: RowMatch = staged.staging.rows.assigns[1].row_match();
    let response: RemoveResponse = remove_row(&mut session, &middle);

    assert_eq!(response.removed, Some(staged.staged));
    assert!(response.staging.assigns.is_empty());
    assert!(response.staging.rows.assigns.is_empty());
}

#[test]
fn test_remove_out_of_range_index_is_noop() {
    let (directory, mut session) = setup();
    stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80011", "80011")),
    )
    .unwrap();

    let response: RemoveResponse = remove_assign(&mut session, 3);

    assert_eq!(response.removed, None);
    assert_eq!(response.staging.assigns.len(), 1);
}

#[test]
fn test_clear_staging() {
    let (directory, mut session) = setup();
    stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80011", "80011")),
    )
    .unwrap();

    let response: StagingResponse = clear_staging(&mut session);

    assert!(response.assigns.is_empty());
    assert!(session.staging.is_empty());
}

#[test]
fn test_confirm_single_assign_scenario() {
    let (directory, mut session) = setup();
    stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80010", "80010")),
    )
    .unwrap();

    let response: ConfirmResponse = confirm_batch(&mut session, &directory).unwrap();

    assert_eq!(
        response.outcome,
        ConfirmOutcome::Confirmed {
            assigns: 1,
            reassigns: 0
        }
    );
    assert!(session.staging.assigns().is_empty());
    assert_eq!(directory.owner(1, zip("80010")).unwrap(), Some(101));
}

#[test]
fn test_confirm_with_nothing_staged() {
    let (directory, mut session) = setup();
    directory.set_available(false);

    let response: ConfirmResponse = confirm_batch(&mut session, &directory).unwrap();

    assert_eq!(response.outcome, ConfirmOutcome::NothingStaged);
}

#[test]
fn test_confirm_rejected_keeps_staging() {
    let (directory, mut session) = setup();
    let selector: LocationSelector = LocationSelector::zips(ZipRange::single(zip("80019")));
    session
        .staging
        .add_reassign(ReassignOperation::new(1, 101, 201, selector).unwrap());

    let err: ApiError = confirm_batch(&mut session, &directory).unwrap_err();

    assert!(matches!(err, ApiError::ConfirmRejected { .. }));
    assert_eq!(session.staging.reassigns().len(), 1);
}

#[test]
fn test_confirm_communication_failure_keeps_staging() {
    let (directory, mut session) = setup();
    stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80010", "80010")),
    )
    .unwrap();
    directory.set_available(false);

    let err: ApiError = confirm_batch(&mut session, &directory).unwrap_err();

    assert!(matches!(
        err,
        ApiError::CommunicationFailure { ref operation, .. } if operation == "batch_update"
    ));
    assert_eq!(session.staging.assigns().len(), 1);

    directory.set_available(true);
    let response: ConfirmResponse = confirm_batch(&mut session, &directory).unwrap();
    assert!(response.outcome.is_success());
    assert!(session.staging.is_empty());
}

#[test]
fn test_staged_operation_reported_back() {
    let (directory, mut session) = setup();
    let response: StageResponse = stage_assign(
        &mut session,
        &directory,
        create_assign_request(1, 101, zip_location("80011", "80011")),
    )
    .unwrap();
    assert!(matches!(response.staged, StagedOperation::Assign(_)));
    assert!(response.message.contains("R-101 (Metro)"));
}
