// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data::{AssignmentMap, DirectoryData};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use territory::{CommunicationError, DirectoryService};
use territory_domain::{County, CurrentAssignment, RepType, SalesRep, Zip, ZipCode};
use tracing::{debug, error};

/// A reference directory and territory authority held in memory.
///
/// Reference data is fixed at construction. Assignments change only
/// through a successful batch update.
#[derive(Debug)]
pub struct InMemoryDirectory {
    data: DirectoryData,
    assignments: RwLock<AssignmentMap>,
    available: AtomicBool,
}

impl InMemoryDirectory {
    /// Creates a directory over the given data.
    #[must_use]
    pub fn new(data: DirectoryData) -> Self {
        let assignments: AssignmentMap = data.assignment_map();
        Self {
            data,
            assignments: RwLock::new(assignments),
            available: AtomicBool::new(true),
        }
    }

    /// Creates a directory over the built-in sample data.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(DirectoryData::sample())
    }

    /// Returns the reference data.
    #[must_use]
    pub const fn data(&self) -> &DirectoryData {
        &self.data
    }

    /// Marks the directory reachable or unreachable.
    ///
    /// While unreachable every lookup and authority call fails with
    /// `CommunicationError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        debug!(available, "Directory availability changed");
    }

    /// Returns whether the directory is reachable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Returns the rep holding a ZIP code under a rep type.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the directory is unavailable.
    pub fn owner(&self, type_id: i64, zip: Zip) -> Result<Option<i64>, CommunicationError> {
        let assignments: RwLockReadGuard<'_, AssignmentMap> = self.read_assignments("owner")?;
        Ok(assignments.get(&(type_id, zip)).copied())
    }

    pub(crate) fn ensure_available(
        &self,
        operation: &'static str,
    ) -> Result<(), CommunicationError> {
        if self.is_available() {
            Ok(())
        } else {
            error!(operation, "Directory unavailable");
            Err(CommunicationError::Unavailable { operation })
        }
    }

    pub(crate) fn read_assignments(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, AssignmentMap>, CommunicationError> {
        self.ensure_available(operation)?;
        self.assignments
            .read()
            .map_err(|_| CommunicationError::Transport {
                operation,
                message: String::from("assignment store is poisoned"),
            })
    }

    pub(crate) fn write_assignments(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, AssignmentMap>, CommunicationError> {
        self.ensure_available(operation)?;
        self.assignments
            .write()
            .map_err(|_| CommunicationError::Transport {
                operation,
                message: String::from("assignment store is poisoned"),
            })
    }
}

impl DirectoryService for InMemoryDirectory {
    fn rep_types(&self) -> Result<Vec<RepType>, CommunicationError> {
        self.ensure_available("rep_types")?;
        Ok(self.data.rep_types.clone())
    }

    fn sales_reps(&self, type_id: i64) -> Result<Vec<SalesRep>, CommunicationError> {
        self.ensure_available("sales_reps")?;
        Ok(self
            .data
            .sales_reps
            .iter()
            .filter(|rep| rep.type_id == type_id)
            .cloned()
            .collect())
    }

    fn counties(&self) -> Result<Vec<County>, CommunicationError> {
        self.ensure_available("counties")?;
        Ok(self.data.counties.clone())
    }

    fn zip_codes(&self, county_code: &str) -> Result<Vec<ZipCode>, CommunicationError> {
        self.ensure_available("zip_codes")?;
        Ok(self
            .data
            .zip_codes
            .iter()
            .filter(|z| z.county_code == county_code)
            .cloned()
            .collect())
    }

    fn current_assignments(
        &self,
        rep_id: i64,
    ) -> Result<Vec<CurrentAssignment>, CommunicationError> {
        let assignments: RwLockReadGuard<'_, AssignmentMap> =
            self.read_assignments("current_assignments")?;
        // Map keys are ordered by (type, ZIP); a rep has a single type
        Ok(assignments
            .iter()
            .filter(|(_, holder)| **holder == rep_id)
            .map(|((_, zip), _)| CurrentAssignment::new(*zip))
            .collect())
    }
}
