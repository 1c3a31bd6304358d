// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CommunicationError;
use territory_domain::{County, CurrentAssignment, RepType, SalesRep, ZipCode};

/// Read-only lookups against the reference directory.
///
/// Every call returns rows in the directory's order. A valid request with
/// nothing to report returns an empty `Vec`, never an error. Results are
/// not cached; callers fetch again whenever the selection they depend on
/// changes.
pub trait DirectoryService {
    /// Lists all rep types.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory cannot be reached.
    fn rep_types(&self) -> Result<Vec<RepType>, CommunicationError>;

    /// Lists the sales reps belonging to a rep type.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory cannot be reached.
    fn sales_reps(&self, type_id: i64) -> Result<Vec<SalesRep>, CommunicationError>;

    /// Lists all counties.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory cannot be reached.
    fn counties(&self) -> Result<Vec<County>, CommunicationError>;

    /// Lists the ZIP codes of a county.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory cannot be reached.
    fn zip_codes(&self, county_code: &str) -> Result<Vec<ZipCode>, CommunicationError>;

    /// Lists the ZIP codes a rep currently holds.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory cannot be reached.
    fn current_assignments(&self, rep_id: i64)
    -> Result<Vec<CurrentAssignment>, CommunicationError>;
}
