// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod expansion;
mod operation;
mod ownership;
mod selector;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::{DomainError, FieldError};
pub use expansion::{expand, expand_tokens};
pub use operation::{AssignOperation, ReassignOperation, StagedOperation};
pub use ownership::{OwnershipSnapshot, validate_ownership};
pub use selector::{CountySelection, Location, LocationSelector};
pub use types::{County, CurrentAssignment, RepType, SalesRep, Zip, ZipCode, ZipRange};
pub use validation::{LocationForm, validate_location_form};
