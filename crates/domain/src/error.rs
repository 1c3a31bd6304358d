// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Zip;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A ZIP code is not exactly five ASCII digits.
    InvalidZipCode(String),
    /// A ZIP range bound was not supplied.
    MissingZipBound {
        /// Which bound is missing (`zip_from` or `zip_to`).
        bound: &'static str,
    },
    /// The lower bound of a ZIP range is greater than the upper bound.
    ZipRangeOutOfOrder {
        /// The lower bound as supplied.
        from: Zip,
        /// The upper bound as supplied.
        to: Zip,
    },
    /// A county selection contains no counties.
    EmptyCountySelection,
    /// A county name is empty.
    InvalidCountyName(String),
    /// A county appears more than once in a selection.
    DuplicateCounty(String),
    /// Both a county selection and a ZIP range were supplied.
    ConflictingSelectors,
    /// Neither a county selection nor a ZIP range was supplied.
    MissingSelector,
    /// A reassignment names the same rep as source and target.
    SameSourceAndTarget {
        /// The rep that appears on both sides.
        rep_id: i64,
    },
    /// One or more ZIP codes are not held by the reassignment's source rep.
    NotOwnedBySourceRep {
        /// The source rep.
        rep_id: i64,
        /// Every offending ZIP code, in ascending order.
        zips: Vec<Zip>,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidZipCode(value) => {
                write!(f, "ZIP code '{value}' must be exactly 5 digits")
            }
            Self::MissingZipBound { bound } => write!(f, "{bound} is required"),
            Self::ZipRangeOutOfOrder { from, to } => {
                write!(
                    f,
                    "ZIP range start {from} must not be greater than ZIP range end {to}"
                )
            }
            Self::EmptyCountySelection => write!(f, "At least one county must be selected"),
            Self::InvalidCountyName(value) => write!(f, "Invalid county name: '{value}'"),
            Self::DuplicateCounty(name) => {
                write!(f, "County '{name}' is selected more than once")
            }
            Self::ConflictingSelectors => {
                write!(f, "Select either counties or a ZIP range, not both")
            }
            Self::MissingSelector => write!(f, "Select counties or enter a ZIP range"),
            Self::SameSourceAndTarget { rep_id } => {
                write!(f, "Cannot reassign territory from rep {rep_id} to itself")
            }
            Self::NotOwnedBySourceRep { rep_id, zips } => {
                let listed: Vec<String> = zips.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "ZIP codes not currently assigned to rep {rep_id}: {}",
                    listed.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// A domain error attached to the form field that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The form field name (e.g. `zip_from`, `counties`).
    pub field: &'static str,
    /// The underlying error.
    pub error: DomainError,
}

impl FieldError {
    /// Creates a new `FieldError`.
    #[must_use]
    pub const fn new(field: &'static str, error: DomainError) -> Self {
        Self { field, error }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

impl std::error::Error for FieldError {}
