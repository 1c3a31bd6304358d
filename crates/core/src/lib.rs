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

mod authority;
mod confirm;
mod directory;
mod display;
mod error;
mod selection;
mod staging;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use authority::{BatchResponse, BatchUpdate, TerritoryAuthority, ValidationReport};
pub use confirm::{ConfirmOutcome, confirm};
pub use directory::DirectoryService;
pub use display::{AssignRow, NameCatalog, ReassignRow, StagingRows, display_rows};
pub use error::{CommunicationError, CoreError};
pub use selection::{LookupStage, LookupTicket, SelectionChain};
pub use staging::{RowMatch, StagingSet};
pub use validation::{ResolvedZips, resolve_zips, validate_assign, validate_reassign};
