// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use ceutro::{AllocationError, CoreError, FieldErrors, SubmitError};
use ceutro_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A submitted form failed validation.
    #[error("Validation failed for {} field(s)", .errors.len())]
    ValidationFailed {
        /// One message per offending field path.
        errors: FieldErrors,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request clashes with existing data.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the clash.
        message: String,
    },
    /// The backend could not be reached.
    #[error("Network error: {message}")]
    Network {
        /// A description of the transport failure.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// How a failure is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A transient message.
    Toast {
        /// The message text.
        message: String,
    },
    /// A blocking dialog for conflicts the user must resolve.
    ConflictDialog {
        /// Dialog title.
        title: String,
        /// The message text.
        message: String,
    },
}

impl ApiError {
    /// Returns the notice shown for this error.
    ///
    /// Conflicts open a dialog, everything else is a toast.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Conflict { message } => Notice::ConflictDialog {
                title: String::from("Already exists"),
                message: message.clone(),
            },
            other => Notice::Toast {
                message: other.to_string(),
            },
        }
    }

    /// Returns whether this is a conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidProductCode(msg) => ApiError::InvalidInput {
            field: String::from("code"),
            message: msg,
        },
        DomainError::InvalidPrice(msg) => ApiError::InvalidInput {
            field: String::from("price"),
            message: msg,
        },
        DomainError::DuplicateProductCode(code) => ApiError::Conflict {
            message: format!("Product with code '{code}' already exists"),
        },
        DomainError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        DomainError::ProductNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Product"),
            message: format!("Product {id} does not exist"),
        },
        DomainError::CatalogItemNotFound { kind, id } => ApiError::ResourceNotFound {
            resource_type: String::from(kind.label()),
            message: format!("{} {id} does not exist", kind.label()),
        },
        DomainError::DuplicateAllocationLine { kind, id } => ApiError::InvalidInput {
            field: String::from(match kind {
                ceutro_domain::ResourceKind::Giveaway => "giveaway",
                ceutro_domain::ResourceKind::Sample => "sample",
            }),
            message: format!("{} {id} appears more than once", kind.label()),
        },
        DomainError::AllocationExists(user_id) => ApiError::Conflict {
            message: format!("Employee {user_id} already has an allocation"),
        },
        DomainError::AllocationNotFound(user_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Allocation"),
            message: format!("No allocation found for employee {user_id}"),
        },
        DomainError::EmptyAllocation => ApiError::InvalidInput {
            field: String::from("allocation"),
            message: String::from("Add at least one giveaway or sample"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Allocation(AllocationError::EmployeeLocked { user_id }) => {
            ApiError::InvalidInput {
                field: String::from("user_id"),
                message: format!("This allocation belongs to employee {user_id}"),
            }
        }
        CoreError::Allocation(
            ref alloc_err @ (AllocationError::SubmissionInProgress
            | AllocationError::AlreadySubmitted),
        ) => ApiError::Conflict {
            message: alloc_err.to_string(),
        },
        CoreError::Allocation(alloc_err) => ApiError::InvalidInput {
            field: String::from("allocation"),
            message: alloc_err.to_string(),
        },
        CoreError::Form(SubmitError::Invalid(errors)) => ApiError::ValidationFailed { errors },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        translate_core_error(CoreError::Allocation(err))
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        translate_core_error(CoreError::Form(err))
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        Self::Internal {
            message: format!("CSV export failed: {err}"),
        }
    }
}
