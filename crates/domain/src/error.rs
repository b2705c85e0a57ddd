// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocation::ResourceKind;
use crate::types::RecordId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name field is empty or invalid.
    InvalidName(String),
    /// A product code is empty or contains invalid characters.
    InvalidProductCode(String),
    /// A product price is negative or not a finite number.
    InvalidPrice(String),
    /// Another product already uses this code.
    DuplicateProductCode(String),
    /// Employee does not exist.
    EmployeeNotFound(RecordId),
    /// Product does not exist.
    ProductNotFound(RecordId),
    /// A giveaway or sample referenced by an allocation does not exist.
    CatalogItemNotFound {
        /// Which catalog was searched.
        kind: ResourceKind,
        /// The missing identifier.
        id: RecordId,
    },
    /// The same catalog item appears twice in one allocation list.
    DuplicateAllocationLine {
        /// Which list contains the duplicate.
        kind: ResourceKind,
        /// The duplicated identifier.
        id: RecordId,
    },
    /// An allocation already exists for this employee.
    AllocationExists(RecordId),
    /// No allocation exists for this employee.
    AllocationNotFound(RecordId),
    /// A create request carried no active lines.
    EmptyAllocation,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidProductCode(msg) => write!(f, "Invalid product code: {msg}"),
            Self::InvalidPrice(msg) => write!(f, "Invalid price: {msg}"),
            Self::DuplicateProductCode(code) => {
                write!(f, "Product with code '{code}' already exists")
            }
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::ProductNotFound(id) => write!(f, "Product {id} not found"),
            Self::CatalogItemNotFound { kind, id } => {
                write!(f, "{} {id} not found", kind.label())
            }
            Self::DuplicateAllocationLine { kind, id } => {
                write!(
                    f,
                    "{} {id} appears more than once in the allocation",
                    kind.label()
                )
            }
            Self::AllocationExists(user_id) => {
                write!(f, "Employee {user_id} already has an allocation")
            }
            Self::AllocationNotFound(user_id) => {
                write!(f, "No allocation found for employee {user_id}")
            }
            Self::EmptyAllocation => {
                write!(f, "Allocation must contain at least one giveaway or sample")
            }
        }
    }
}

impl std::error::Error for DomainError {}
