// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use territory_domain::DomainError;
use thiserror::Error;

/// Transport failures talking to the directory or the authority.
///
/// Local state is never changed when one of these is returned, so the
/// call can simply be retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommunicationError {
    /// The remote service could not be reached.
    #[error("{operation} failed: service unavailable")]
    Unavailable { operation: &'static str },

    /// The remote service answered with something unusable.
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

impl CommunicationError {
    /// Returns the name of the call that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Unavailable { operation } | Self::Transport { operation, .. } => operation,
        }
    }
}

/// Errors produced by the staging workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The authority or the ownership check rejected the operation.
    ValidationFailed(Vec<String>),
    /// A collaborator could not be reached.
    Communication(CommunicationError),
    /// The authority answered a batch update with `success: false`.
    ConfirmRejected,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ValidationFailed(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::Communication(err) => write!(f, "Communication error: {err}"),
            Self::ConfirmRejected => write!(f, "Batch update was rejected; staging preserved"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<CommunicationError> for CoreError {
    fn from(err: CommunicationError) -> Self {
        Self::Communication(err)
    }
}
