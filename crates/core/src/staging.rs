// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authority::BatchUpdate;
use serde::{Deserialize, Serialize};
use territory_domain::{AssignOperation, Location, ReassignOperation, StagedOperation};
use tracing::debug;

/// Identifies the staged operation a display row was derived from.
///
/// A row names one location; the operation it matches may cover many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowMatch {
    /// A row produced by an assignment.
    Assign {
        type_id: i64,
        rep_id: i64,
        location: Location,
    },
    /// A row produced by a reassignment.
    Reassign {
        type_id: i64,
        from_rep_id: i64,
        to_rep_id: i64,
        location: Location,
    },
}

impl RowMatch {
    fn matches_assign(&self, op: &AssignOperation) -> bool {
        match self {
            Self::Assign {
                type_id,
                rep_id,
                location,
            } => op.type_id == *type_id && op.rep_id == *rep_id && op.selector.covers(location),
            Self::Reassign { .. } => false,
        }
    }

    fn matches_reassign(&self, op: &ReassignOperation) -> bool {
        match self {
            Self::Reassign {
                type_id,
                from_rep_id,
                to_rep_id,
                location,
            } => {
                op.type_id == *type_id
                    && op.from_rep_id == *from_rep_id
                    && op.to_rep_id == *to_rep_id
                    && op.selector.covers(location)
            }
            Self::Assign { .. } => false,
        }
    }
}

/// The operator's pending, unconfirmed operations.
///
/// Staging order is preserved. Nothing here validates or de-duplicates;
/// operations are checked before they are added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingSet {
    assigns: Vec<AssignOperation>,
    reassigns: Vec<ReassignOperation>,
}

impl StagingSet {
    /// Creates an empty staging set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            assigns: Vec::new(),
            reassigns: Vec::new(),
        }
    }

    /// Appends an assignment.
    pub fn add_assign(&mut self, op: AssignOperation) {
        debug!(type_id = op.type_id, rep_id = op.rep_id, selector = %op.selector, "Staging assign");
        self.assigns.push(op);
    }

    /// Appends a reassignment.
    pub fn add_reassign(&mut self, op: ReassignOperation) {
        debug!(
            type_id = op.type_id,
            from_rep_id = op.from_rep_id,
            to_rep_id = op.to_rep_id,
            selector = %op.selector,
            "Staging reassign"
        );
        self.reassigns.push(op);
    }

    /// Removes the assignment at `index`.
    ///
    /// Returns `None`, leaving the set unchanged, if `index` is out of bounds.
    pub fn remove_assign(&mut self, index: usize) -> Option<AssignOperation> {
        (index < self.assigns.len()).then(|| self.assigns.remove(index))
    }

    /// Removes the reassignment at `index`.
    ///
    /// Returns `None`, leaving the set unchanged, if `index` is out of bounds.
    pub fn remove_reassign(&mut self, index: usize) -> Option<ReassignOperation> {
        (index < self.reassigns.len()).then(|| self.reassigns.remove(index))
    }

    /// Removes the first operation the row was derived from.
    ///
    /// The whole operation goes, even when it covers many locations besides
    /// the one on the row. Returns `None` if nothing matches.
    pub fn remove_matching(&mut self, row: &RowMatch) -> Option<StagedOperation> {
        match row {
            RowMatch::Assign { .. } => {
                let index: usize = self.assigns.iter().position(|op| row.matches_assign(op))?;
                Some(StagedOperation::Assign(self.assigns.remove(index)))
            }
            RowMatch::Reassign { .. } => {
                let index: usize = self
                    .reassigns
                    .iter()
                    .position(|op| row.matches_reassign(op))?;
                Some(StagedOperation::Reassign(self.reassigns.remove(index)))
            }
        }
    }

    /// Empties both sequences.
    pub fn clear(&mut self) {
        self.assigns.clear();
        self.reassigns.clear();
    }

    /// Returns a copy of the staged assignments.
    #[must_use]
    pub fn assigns(&self) -> Vec<AssignOperation> {
        self.assigns.clone()
    }

    /// Returns a copy of the staged reassignments.
    #[must_use]
    pub fn reassigns(&self) -> Vec<ReassignOperation> {
        self.reassigns.clone()
    }

    /// Returns the number of staged operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigns.len() + self.reassigns.len()
    }

    /// Returns whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigns.is_empty() && self.reassigns.is_empty()
    }

    /// Builds the batch payload for the current contents.
    #[must_use]
    pub fn to_batch(&self) -> BatchUpdate {
        BatchUpdate {
            assigns: self.assigns(),
            reassigns: self.reassigns(),
        }
    }

    pub(crate) fn iter_assigns(&self) -> impl Iterator<Item = (usize, &AssignOperation)> {
        self.assigns.iter().enumerate()
    }

    pub(crate) fn iter_reassigns(&self) -> impl Iterator<Item = (usize, &ReassignOperation)> {
        self.reassigns.iter().enumerate()
    }
}
