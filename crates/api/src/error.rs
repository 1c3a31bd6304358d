// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::request_response::FieldMessage;
use territory::{CommunicationError, CoreError};
use territory_domain::{DomainError, FieldError};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The form was malformed; no operation was built.
    InvalidInput {
        /// One entry per problem, tagged with its field.
        errors: Vec<FieldMessage>,
    },
    /// The authority or the ownership check rejected the operation.
    ValidationFailed {
        /// Every reason, verbatim.
        errors: Vec<String>,
    },
    /// The directory or the authority could not be reached.
    CommunicationFailure {
        /// The call that failed.
        operation: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// The authority rejected the batch; staging is preserved.
    ConfirmRejected {
        /// A human-readable description of the rejection.
        message: String,
    },
}

impl ApiError {
    /// Creates an `InvalidInput` error for a single field.
    #[must_use]
    pub fn invalid_input(field: &str, message: String) -> Self {
        Self::InvalidInput {
            errors: vec![FieldMessage {
                field: field.to_string(),
                message,
            }],
        }
    }

    /// Returns the individual problems behind this error.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { errors } => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect(),
            Self::ValidationFailed { errors } => errors.clone(),
            Self::CommunicationFailure { .. } | Self::ConfirmRejected { .. } => Vec::new(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { errors } => match errors.as_slice() {
                [only] => write!(f, "Invalid input for field '{}': {}", only.field, only.message),
                _ => write!(f, "Invalid input: {} problems found", errors.len()),
            },
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::CommunicationFailure { operation, message } => {
                write!(f, "Communication failure during {operation}: {message}")
            }
            Self::ConfirmRejected { message } => write!(f, "Confirmation rejected: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidZipCode(_) => ApiError::invalid_input("zip", message),
        DomainError::MissingZipBound { bound } => ApiError::invalid_input(bound, message),
        DomainError::ZipRangeOutOfOrder { .. } => ApiError::invalid_input("zip_from", message),
        DomainError::EmptyCountySelection
        | DomainError::InvalidCountyName(_)
        | DomainError::DuplicateCounty(_) => ApiError::invalid_input("counties", message),
        DomainError::ConflictingSelectors | DomainError::MissingSelector => {
            ApiError::invalid_input("location", message)
        }
        DomainError::SameSourceAndTarget { .. } => ApiError::invalid_input("to_rep_id", message),
        DomainError::NotOwnedBySourceRep { .. } => ApiError::ValidationFailed {
            errors: vec![message],
        },
    }
}

/// Translates form errors into a single API error.
#[must_use]
pub fn translate_field_errors(errors: Vec<FieldError>) -> ApiError {
    ApiError::InvalidInput {
        errors: errors
            .into_iter()
            .map(|e| FieldMessage {
                field: e.field.to_string(),
                message: e.error.to_string(),
            })
            .collect(),
    }
}

/// Translates a communication error into an API error.
#[must_use]
pub fn translate_communication_error(err: CommunicationError) -> ApiError {
    ApiError::CommunicationFailure {
        operation: err.operation().to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ValidationFailed(errors) => ApiError::ValidationFailed { errors },
        CoreError::Communication(comm_err) => translate_communication_error(comm_err),
        CoreError::ConfirmRejected => ApiError::ConfirmRejected {
            message: String::from("The batch was not applied; staged changes were kept"),
        },
    }
}
