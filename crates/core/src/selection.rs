// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rep type, sales rep and current assignment lookup chain.
//!
//! Each later lookup depends on the selection before it. Changing an
//! earlier selection clears everything after it, and a lookup result only
//! lands if no newer selection has been made since it was requested.

use serde::{Deserialize, Serialize};
use territory_domain::{CurrentAssignment, OwnershipSnapshot, SalesRep};
use tracing::{debug, warn};

/// Which lookup a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStage {
    /// Sales reps of the selected rep type.
    SalesReps,
    /// Current assignments of the selected source rep.
    CurrentAssignments,
}

/// Proof that a lookup was requested for a particular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    stage: LookupStage,
    generation: u64,
}

impl LookupTicket {
    /// Returns the lookup this ticket is for.
    #[must_use]
    pub const fn stage(&self) -> LookupStage {
        self.stage
    }
}

/// Dependent selection state for one operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChain {
    generation: u64,
    reps_generation: u64,
    assignments_generation: u64,
    type_id: Option<i64>,
    reps: Vec<SalesRep>,
    source_rep_id: Option<i64>,
    snapshot: Option<OwnershipSnapshot>,
}

impl SelectionChain {
    /// Creates a chain with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a rep type.
    ///
    /// Clears the rep list, the source rep and its ownership snapshot, and
    /// invalidates every outstanding lookup.
    pub fn select_type(&mut self, type_id: i64) -> LookupTicket {
        self.generation += 1;
        self.reps_generation = self.generation;
        self.assignments_generation = self.generation;
        self.type_id = Some(type_id);
        self.reps.clear();
        self.source_rep_id = None;
        self.snapshot = None;
        debug!(type_id, generation = self.generation, "Rep type selected");
        LookupTicket {
            stage: LookupStage::SalesReps,
            generation: self.generation,
        }
    }

    /// Selects the source rep.
    ///
    /// Clears the ownership snapshot and invalidates any outstanding
    /// assignment lookup.
    pub fn select_source_rep(&mut self, rep_id: i64) -> LookupTicket {
        self.generation += 1;
        self.assignments_generation = self.generation;
        self.source_rep_id = Some(rep_id);
        self.snapshot = None;
        debug!(rep_id, generation = self.generation, "Source rep selected");
        LookupTicket {
            stage: LookupStage::CurrentAssignments,
            generation: self.generation,
        }
    }

    /// Returns whether a lookup result for `ticket` would still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        match ticket.stage {
            LookupStage::SalesReps => ticket.generation == self.reps_generation,
            LookupStage::CurrentAssignments => ticket.generation == self.assignments_generation,
        }
    }

    /// Applies a sales rep lookup.
    ///
    /// Returns `false`, discarding the result, if the ticket is stale.
    pub fn apply_reps(&mut self, ticket: LookupTicket, reps: Vec<SalesRep>) -> bool {
        if ticket.stage != LookupStage::SalesReps || !self.is_current(ticket) {
            warn!(
                generation = ticket.generation,
                current = self.reps_generation,
                "Discarding stale sales rep lookup"
            );
            return false;
        }
        self.reps = reps;
        true
    }

    /// Applies a current assignment lookup.
    ///
    /// Returns `false`, discarding the result, if the ticket is stale.
    pub fn apply_assignments(
        &mut self,
        ticket: LookupTicket,
        assignments: &[CurrentAssignment],
    ) -> bool {
        let Some(rep_id) = self.source_rep_id else {
            return false;
        };
        if ticket.stage != LookupStage::CurrentAssignments || !self.is_current(ticket) {
            warn!(
                rep_id,
                generation = ticket.generation,
                current = self.assignments_generation,
                "Discarding stale assignment lookup"
            );
            return false;
        }
        self.snapshot = Some(OwnershipSnapshot::new(rep_id, assignments));
        true
    }

    /// Returns the selected rep type.
    #[must_use]
    pub const fn type_id(&self) -> Option<i64> {
        self.type_id
    }

    /// Returns the reps of the selected type, as last applied.
    #[must_use]
    pub fn reps(&self) -> &[SalesRep] {
        &self.reps
    }

    /// Returns the selected source rep.
    #[must_use]
    pub const fn source_rep_id(&self) -> Option<i64> {
        self.source_rep_id
    }

    /// Returns the source rep's ownership snapshot, once loaded.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&OwnershipSnapshot> {
        self.snapshot.as_ref()
    }
}
