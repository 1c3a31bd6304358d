// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator-facing rows derived from the staging set.
//!
//! Rows are a denormalized view: one row per location an operation
//! resolves to, with ids replaced by display names. They are never
//! authoritative and are rebuilt on every read.

use crate::staging::{RowMatch, StagingSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use territory_domain::{Location, RepType, SalesRep, expand};

/// Resolves type and rep ids to display names.
///
/// Unknown ids fall back to the id itself, so rows can always be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCatalog {
    type_names: HashMap<i64, String>,
    rep_names: HashMap<i64, String>,
}

impl NameCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from reference data.
    #[must_use]
    pub fn from_reference(rep_types: &[RepType], reps: &[SalesRep]) -> Self {
        let mut catalog: Self = Self::new();
        catalog.add_rep_types(rep_types);
        catalog.add_reps(reps);
        catalog
    }

    /// Records rep type names, replacing earlier entries.
    pub fn add_rep_types(&mut self, rep_types: &[RepType]) {
        for rep_type in rep_types {
            self.type_names
                .insert(rep_type.type_id, rep_type.type_name.clone());
        }
    }

    /// Records rep display names, replacing earlier entries.
    pub fn add_reps(&mut self, reps: &[SalesRep]) {
        for rep in reps {
            self.rep_names.insert(rep.sales_rep_id, rep.display_name());
        }
    }

    /// Returns the display name of a rep type.
    #[must_use]
    pub fn type_name(&self, type_id: i64) -> String {
        self.type_names
            .get(&type_id)
            .cloned()
            .unwrap_or_else(|| type_id.to_string())
    }

    /// Returns the display name of a rep.
    #[must_use]
    pub fn rep_name(&self, rep_id: i64) -> String {
        self.rep_names
            .get(&rep_id)
            .cloned()
            .unwrap_or_else(|| rep_id.to_string())
    }
}

/// One location of a staged assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRow {
    /// Position of the source operation in the staged assignments.
    pub operation_index: usize,
    pub type_id: i64,
    pub type_name: String,
    pub rep_id: i64,
    pub rep_name: String,
    pub location: Location,
}

impl AssignRow {
    /// Returns the key that removes this row's operation.
    #[must_use]
    pub fn row_match(&self) -> RowMatch {
        RowMatch::Assign {
            type_id: self.type_id,
            rep_id: self.rep_id,
            location: self.location.clone(),
        }
    }
}

/// One location of a staged reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignRow {
    /// Position of the source operation in the staged reassignments.
    pub operation_index: usize,
    pub type_id: i64,
    pub type_name: String,
    pub from_rep_id: i64,
    pub from_rep_name: String,
    pub to_rep_id: i64,
    pub to_rep_name: String,
    pub location: Location,
}

impl ReassignRow {
    /// Returns the key that removes this row's operation.
    #[must_use]
    pub fn row_match(&self) -> RowMatch {
        RowMatch::Reassign {
            type_id: self.type_id,
            from_rep_id: self.from_rep_id,
            to_rep_id: self.to_rep_id,
            location: self.location.clone(),
        }
    }
}

/// All display rows for a staging set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingRows {
    pub assigns: Vec<AssignRow>,
    pub reassigns: Vec<ReassignRow>,
}

/// Expands every staged operation into display rows.
///
/// Each operation contributes exactly as many rows as its selector
/// resolves to, in expansion order.
#[must_use]
pub fn display_rows(staging: &StagingSet, names: &NameCatalog) -> StagingRows {
    let mut rows: StagingRows = StagingRows::default();

    for (index, op) in staging.iter_assigns() {
        let type_name: String = names.type_name(op.type_id);
        let rep_name: String = names.rep_name(op.rep_id);
        rows.assigns
            .extend(expand(&op.selector).into_iter().map(|location| AssignRow {
                operation_index: index,
                type_id: op.type_id,
                type_name: type_name.clone(),
                rep_id: op.rep_id,
                rep_name: rep_name.clone(),
                location,
            }));
    }

    for (index, op) in staging.iter_reassigns() {
        let type_name: String = names.type_name(op.type_id);
        let from_rep_name: String = names.rep_name(op.from_rep_id);
        let to_rep_name: String = names.rep_name(op.to_rep_id);
        rows.reassigns
            .extend(expand(&op.selector).into_iter().map(|location| ReassignRow {
                operation_index: index,
                type_id: op.type_id,
                type_name: type_name.clone(),
                from_rep_id: op.from_rep_id,
                from_rep_name: from_rep_name.clone(),
                to_rep_id: op.to_rep_id,
                to_rep_name: to_rep_name.clone(),
                location,
            }));
    }

    rows
}
