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

mod allocation;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use allocation::{Allocation, AllocationLine, ResourceKind};
pub use error::DomainError;
pub use types::{
    CatalogEntry, Doctor, Employee, EmployeeRole, Giveaway, PackSize, Product, RecordId, Sample,
    Territory,
};
pub use validation::{
    validate_allocation_lines, validate_doctor_fields, validate_product_code_unique,
    validate_product_fields,
};
