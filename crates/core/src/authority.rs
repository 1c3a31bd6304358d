// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CommunicationError;
use serde::{Deserialize, Serialize};
use territory_domain::{AssignOperation, ReassignOperation, StagedOperation};

/// The authority's verdict on a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the operation may be staged.
    pub valid: bool,
    /// Every reason the operation was rejected, in reporting order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A report with no errors.
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A report carrying the given errors.
    ///
    /// An empty error list is still treated as accepted.
    #[must_use]
    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Appends further errors, invalidating the report if any were added.
    pub fn extend<I>(&mut self, errors: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.errors.extend(errors);
        if !self.errors.is_empty() {
            self.valid = false;
        }
    }

    /// Returns whether the operation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid && self.errors.is_empty()
    }
}

/// The payload of a batch confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    /// Staged assignments, in staging order.
    pub assigns: Vec<AssignOperation>,
    /// Staged reassignments, in staging order.
    pub reassigns: Vec<ReassignOperation>,
}

impl BatchUpdate {
    /// Returns whether the batch carries no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigns.is_empty() && self.reassigns.is_empty()
    }

    /// Returns the number of operations in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigns.len() + self.reassigns.len()
    }
}

/// The authority's answer to a batch update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// `true` when every operation was applied, `false` when none was.
    pub success: bool,
}

/// The external source of truth for territory assignments.
pub trait TerritoryAuthority {
    /// Checks a proposed operation against cross-rep and overlap rules.
    ///
    /// Error strings in the report are shown to the operator verbatim.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the authority cannot be reached.
    fn validate(&self, operation: &StagedOperation)
    -> Result<ValidationReport, CommunicationError>;

    /// Applies a whole batch atomically.
    ///
    /// # Errors
    ///
    /// Returns a `CommunicationError` if the authority cannot be reached.
    fn batch_update(&self, batch: &BatchUpdate) -> Result<BatchResponse, CommunicationError>;
}
