// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocation::{AllocationLine, ResourceKind};
use crate::error::DomainError;
use crate::types::{Doctor, Product, RecordId};
use std::collections::HashSet;

/// Validates that a product's basic field constraints are met.
///
/// This function does NOT check code uniqueness (that requires context).
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The code is empty or contains characters other than ASCII
///   letters, digits and `-`
/// - The price is negative or not finite
pub fn validate_product_fields(product: &Product) -> Result<(), DomainError> {
    if product.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Product name cannot be empty",
        )));
    }

    let code: &str = product.code.trim();
    if code.is_empty() {
        return Err(DomainError::InvalidProductCode(String::from(
            "Product code cannot be empty",
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(DomainError::InvalidProductCode(format!(
            "'{code}' may only contain letters, digits and '-'"
        )));
    }

    if !product.price.is_finite() || product.price < 0.0 {
        return Err(DomainError::InvalidPrice(format!(
            "Price must be a non-negative number, got {}",
            product.price
        )));
    }

    Ok(())
}

/// Validates that a product code is not used by another product.
///
/// Codes compare case-insensitively. The product being edited (`own_id`)
/// is ignored so an update may keep its code.
///
/// # Errors
///
/// Returns `DomainError::DuplicateProductCode` if another product uses the code.
pub fn validate_product_code_unique(
    code: &str,
    own_id: Option<RecordId>,
    existing: &[Product],
) -> Result<(), DomainError> {
    let clash: bool = existing
        .iter()
        .filter(|p| Some(p.id) != own_id)
        .any(|p| p.code.eq_ignore_ascii_case(code.trim()));
    if clash {
        return Err(DomainError::DuplicateProductCode(code.trim().to_uppercase()));
    }
    Ok(())
}

/// Validates a doctor record before it is stored.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name or speciality is empty.
pub fn validate_doctor_fields(doctor: &Doctor) -> Result<(), DomainError> {
    if doctor.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Doctor name cannot be empty",
        )));
    }
    if doctor.speciality.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Speciality cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that no catalog item appears twice in an allocation list.
///
/// # Errors
///
/// Returns `DomainError::DuplicateAllocationLine` for the first repeated id.
pub fn validate_allocation_lines(
    kind: ResourceKind,
    lines: &[AllocationLine],
) -> Result<(), DomainError> {
    let mut seen: HashSet<RecordId> = HashSet::new();
    for line in lines {
        if !seen.insert(line.id) {
            return Err(DomainError::DuplicateAllocationLine { kind, id: line.id });
        }
    }
    Ok(())
}
