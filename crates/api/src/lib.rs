// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_communication_error, translate_core_error, translate_domain_error,
    translate_field_errors,
};
pub use handlers::{
    apply_current_assignments, apply_sales_reps, clear_staging, confirm_batch,
    fetch_current_assignments, fetch_sales_reps, get_staging, list_counties,
    list_current_assignments, list_rep_types, list_sales_reps, list_zip_codes, preview,
    prime_names, remove_assign, remove_reassign, remove_row, select_rep_type, select_source_rep,
    stage_assign, stage_reassign,
};
pub use request_response::{
    ConfirmResponse, CountiesResponse, CurrentAssignmentsResponse, FieldMessage, LocationRequest,
    PreviewResponse, RemoveResponse, RepTypesResponse, SalesRepsResponse, StageAssignRequest,
    StageReassignRequest, StageResponse, StagingResponse, ZipCodesResponse,
};
pub use session::OperatorSession;
