// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use territory::{ConfirmOutcome, StagingRows};
use territory_domain::{
    AssignOperation, County, LocationForm, ReassignOperation, RepType, SalesRep,
    StagedOperation, Zip, ZipCode,
};

/// A location selection as entered on a form.
///
/// Either `counties` or the two ZIP bounds should be filled in; the form
/// check reports anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRequest {
    /// Selected county names, in selection order.
    pub counties: Vec<String>,
    /// Lower ZIP bound.
    pub zip_from: Option<String>,
    /// Upper ZIP bound.
    pub zip_to: Option<String>,
}

impl From<LocationRequest> for LocationForm {
    fn from(request: LocationRequest) -> Self {
        Self {
            counties: request.counties,
            zip_from: request.zip_from,
            zip_to: request.zip_to,
        }
    }
}

/// A per-field form error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    /// The form field at fault.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// API response listing rep types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepTypesResponse {
    pub rep_types: Vec<RepType>,
}

/// API response listing the reps of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRepsResponse {
    /// The rep type that was looked up.
    pub type_id: i64,
    pub sales_reps: Vec<SalesRep>,
    /// Display names, parallel to `sales_reps`.
    pub display_names: Vec<String>,
    /// `false` if a newer rep type was selected before this lookup landed.
    pub current: bool,
}

/// API response listing counties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountiesResponse {
    pub counties: Vec<County>,
}

/// API response listing the ZIP codes of a county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCodesResponse {
    pub county_code: String,
    pub zip_codes: Vec<ZipCode>,
}

/// API response with a rep's current assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssignmentsResponse {
    pub rep_id: i64,
    /// Held ZIP codes, ascending.
    pub zip_codes: Vec<Zip>,
    /// `false` if a newer source rep was selected before this lookup landed.
    pub current: bool,
}

/// API response for a location preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// One token per resolved location.
    pub tokens: Vec<String>,
    pub count: usize,
}

/// API request to stage an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssignRequest {
    pub type_id: i64,
    pub rep_id: i64,
    #[serde(flatten)]
    pub location: LocationRequest,
}

/// API request to stage a reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReassignRequest {
    pub type_id: i64,
    pub from_rep_id: i64,
    pub to_rep_id: i64,
    #[serde(flatten)]
    pub location: LocationRequest,
}

/// The staged operations and the rows derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingResponse {
    pub assigns: Vec<AssignOperation>,
    pub reassigns: Vec<ReassignOperation>,
    pub rows: StagingRows,
}

/// API response after staging an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResponse {
    /// The operation that was staged.
    pub staged: StagedOperation,
    pub message: String,
    pub staging: StagingResponse,
}

/// API response after a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResponse {
    /// The removed operation, or `None` if nothing matched.
    pub removed: Option<StagedOperation>,
    pub staging: StagingResponse,
}

/// API response for a batch confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub outcome: ConfirmOutcome,
    pub message: String,
    pub staging: StagingResponse,
}
