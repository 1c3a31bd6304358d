// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::selector::LocationSelector;
use serde::{Deserialize, Serialize};

/// Grant territory to a rep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignOperation {
    /// The rep type the assignment is made under.
    pub type_id: i64,
    /// The rep receiving the territory.
    pub rep_id: i64,
    /// The territory.
    pub selector: LocationSelector,
}

impl AssignOperation {
    /// Creates a new `AssignOperation`.
    #[must_use]
    pub const fn new(type_id: i64, rep_id: i64, selector: LocationSelector) -> Self {
        Self {
            type_id,
            rep_id,
            selector,
        }
    }
}

/// Transfer territory from one rep to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReassignOperation", into = "RawReassignOperation")]
pub struct ReassignOperation {
    /// The rep type both reps belong to.
    pub type_id: i64,
    /// The rep currently holding the territory.
    pub from_rep_id: i64,
    /// The rep receiving the territory.
    pub to_rep_id: i64,
    /// The territory.
    pub selector: LocationSelector,
}

impl ReassignOperation {
    /// Creates a new `ReassignOperation`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SameSourceAndTarget` if both reps are the same.
    pub fn new(
        type_id: i64,
        from_rep_id: i64,
        to_rep_id: i64,
        selector: LocationSelector,
    ) -> Result<Self, DomainError> {
        if from_rep_id == to_rep_id {
            return Err(DomainError::SameSourceAndTarget {
                rep_id: from_rep_id,
            });
        }
        Ok(Self {
            type_id,
            from_rep_id,
            to_rep_id,
            selector,
        })
    }
}

/// Wire shape of a [`ReassignOperation`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawReassignOperation {
    type_id: i64,
    from_rep_id: i64,
    to_rep_id: i64,
    selector: LocationSelector,
}

impl TryFrom<RawReassignOperation> for ReassignOperation {
    type Error = DomainError;

    fn try_from(raw: RawReassignOperation) -> Result<Self, Self::Error> {
        Self::new(raw.type_id, raw.from_rep_id, raw.to_rep_id, raw.selector)
    }
}

impl From<ReassignOperation> for RawReassignOperation {
    fn from(op: ReassignOperation) -> Self {
        Self {
            type_id: op.type_id,
            from_rep_id: op.from_rep_id,
            to_rep_id: op.to_rep_id,
            selector: op.selector,
        }
    }
}

/// An operation as submitted to the authority for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StagedOperation {
    /// An assignment.
    Assign(AssignOperation),
    /// A reassignment.
    Reassign(ReassignOperation),
}

impl StagedOperation {
    /// Returns the rep type of the operation.
    #[must_use]
    pub const fn type_id(&self) -> i64 {
        match self {
            Self::Assign(op) => op.type_id,
            Self::Reassign(op) => op.type_id,
        }
    }

    /// Returns the operation's location selector.
    #[must_use]
    pub const fn selector(&self) -> &LocationSelector {
        match self {
            Self::Assign(op) => &op.selector,
            Self::Reassign(op) => &op.selector,
        }
    }
}
