// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{CurrentAssignment, Zip};
use std::collections::BTreeSet;

/// The ZIP codes a rep held when its assignments were last fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipSnapshot {
    rep_id: i64,
    zips: BTreeSet<Zip>,
}

impl OwnershipSnapshot {
    /// Builds a snapshot from a rep's current assignments.
    #[must_use]
    pub fn new(rep_id: i64, assignments: &[CurrentAssignment]) -> Self {
        Self {
            rep_id,
            zips: assignments.iter().map(|a| a.zip_code).collect(),
        }
    }

    /// Returns the rep this snapshot describes.
    #[must_use]
    pub const fn rep_id(&self) -> i64 {
        self.rep_id
    }

    /// Returns whether the rep held the ZIP code.
    #[must_use]
    pub fn owns(&self, zip: Zip) -> bool {
        self.zips.contains(&zip)
    }

    /// Returns the held ZIP codes in ascending order.
    pub fn zips(&self) -> impl Iterator<Item = Zip> + '_ {
        self.zips.iter().copied()
    }

    /// Returns the number of held ZIP codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zips.len()
    }

    /// Returns whether the rep held nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zips.is_empty()
    }
}

/// Validates that the snapshot's rep holds every given ZIP code.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `snapshot` - The source rep's current assignments
/// * `zips` - The ZIP codes the reassignment resolves to
///
/// # Errors
///
/// Returns `DomainError::NotOwnedBySourceRep` naming every ZIP code the rep
/// does not hold, not just the first.
pub fn validate_ownership(snapshot: &OwnershipSnapshot, zips: &[Zip]) -> Result<(), DomainError> {
    let offending: BTreeSet<Zip> = zips
        .iter()
        .copied()
        .filter(|zip| !snapshot.owns(*zip))
        .collect();

    if offending.is_empty() {
        return Ok(());
    }

    Err(DomainError::NotOwnedBySourceRep {
        rep_id: snapshot.rep_id,
        zips: offending.into_iter().collect(),
    })
}
