// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::authority::{BatchResponse, BatchUpdate, TerritoryAuthority};
use crate::error::CommunicationError;
use crate::staging::StagingSet;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// How a batch confirmation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConfirmOutcome {
    /// The authority applied every operation; staging is now empty.
    Confirmed { assigns: usize, reassigns: usize },
    /// Nothing was staged; the authority was not contacted.
    NothingStaged,
    /// The authority applied nothing; staging is unchanged.
    Rejected,
}

impl ConfirmOutcome {
    /// Returns whether the confirmation counts as a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Confirmed { .. } | Self::NothingStaged)
    }
}

/// Submits everything staged as one atomic batch.
///
/// Staging is cleared only when the authority reports success. A rejection
/// or a transport failure leaves it exactly as it was, so confirming again
/// resends the identical batch.
///
/// # Errors
///
/// Returns a `CommunicationError` if the authority cannot be reached.
pub fn confirm(
    staging: &mut StagingSet,
    authority: &dyn TerritoryAuthority,
) -> Result<ConfirmOutcome, CommunicationError> {
    if staging.is_empty() {
        info!("Confirm requested with nothing staged");
        return Ok(ConfirmOutcome::NothingStaged);
    }

    let batch: BatchUpdate = staging.to_batch();
    let response: BatchResponse = authority.batch_update(&batch).map_err(|e| {
        error!(error = %e, operations = batch.len(), "Batch update failed");
        e
    })?;

    if !response.success {
        warn!(operations = batch.len(), "Batch update rejected");
        return Ok(ConfirmOutcome::Rejected);
    }

    staging.clear();
    info!(
        assigns = batch.assigns.len(),
        reassigns = batch.reassigns.len(),
        "Batch confirmed"
    );
    Ok(ConfirmOutcome::Confirmed {
        assigns: batch.assigns.len(),
        reassigns: batch.reassigns.len(),
    })
}
