// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::form::FieldErrors;
use ceutro_domain::{DomainError, RecordId, ResourceKind};

/// Errors raised by the allocation editor when an operation does not fit
/// its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The operation needs a selected employee.
    NoEmployeeSelected,
    /// An edit-mode editor cannot switch to another employee.
    EmployeeLocked {
        /// The employee the editor is pinned to.
        user_id: RecordId,
    },
    /// The item is already in the list with a positive quantity.
    AlreadyAdded {
        /// The list searched.
        kind: ResourceKind,
        /// The item's display name.
        name: String,
    },
    /// The item is not in the list (or was removed).
    ItemNotFound {
        /// The list searched.
        kind: ResourceKind,
        /// The missing identifier.
        id: RecordId,
    },
    /// A create request would carry no lines.
    NothingToSubmit,
    /// A submission is already in flight.
    SubmissionInProgress,
    /// The allocation was already submitted successfully.
    AlreadySubmitted,
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEmployeeSelected => write!(f, "Select an employee first"),
            Self::EmployeeLocked { user_id } => {
                write!(f, "This allocation belongs to employee {user_id}")
            }
            Self::AlreadyAdded { kind, name } => {
                write!(f, "{} '{name}' is already added", kind.label())
            }
            Self::ItemNotFound { kind, id } => {
                write!(f, "{} {id} is not part of this allocation", kind.label())
            }
            Self::NothingToSubmit => {
                write!(f, "Add at least one giveaway or sample before submitting")
            }
            Self::SubmissionInProgress => write!(f, "A submission is already in progress"),
            Self::AlreadySubmitted => write!(f, "This allocation was already submitted"),
        }
    }
}

impl std::error::Error for AllocationError {}

/// Errors returned by form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Validation failed; the map holds one message per offending field path.
    Invalid(FieldErrors),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                write!(f, "Form has invalid fields: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Errors that can occur in the engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The allocation editor rejected an operation.
    Allocation(AllocationError),
    /// A form failed validation.
    Form(SubmitError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Allocation(err) => write!(f, "Allocation error: {err}"),
            Self::Form(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<AllocationError> for CoreError {
    fn from(err: AllocationError) -> Self {
        Self::Allocation(err)
    }
}

impl From<SubmitError> for CoreError {
    fn from(err: SubmitError) -> Self {
        Self::Form(err)
    }
}
