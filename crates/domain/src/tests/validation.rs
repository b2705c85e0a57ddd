// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AllocationLine, Doctor, DomainError, Product, ResourceKind, validate_allocation_lines,
    validate_doctor_fields, validate_product_code_unique, validate_product_fields,
};

fn create_test_product(id: i64, code: &str) -> Product {
    Product {
        id,
        code: String::from(code),
        name: String::from("Cardiol"),
        category: String::from("Cardiology"),
        price: 12.5,
        pack_sizes: vec![],
    }
}

#[test]
fn test_valid_product_passes() {
    assert!(validate_product_fields(&create_test_product(1, "CRD-10")).is_ok());
}

#[test]
fn test_product_with_empty_name_fails() {
    let mut product: Product = create_test_product(1, "CRD-10");
    product.name = String::from("   ");

    let result: Result<(), DomainError> = validate_product_fields(&product);

    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_product_code_with_spaces_fails() {
    let product: Product = create_test_product(1, "CRD 10");

    let result: Result<(), DomainError> = validate_product_fields(&product);

    assert!(matches!(result, Err(DomainError::InvalidProductCode(_))));
}

#[test]
fn test_negative_price_fails() {
    let mut product: Product = create_test_product(1, "CRD-10");
    product.price = -1.0;

    assert!(matches!(
        validate_product_fields(&product),
        Err(DomainError::InvalidPrice(_))
    ));

    product.price = f64::NAN;
    assert!(matches!(
        validate_product_fields(&product),
        Err(DomainError::InvalidPrice(_))
    ));
}

#[test]
fn test_duplicate_product_code_is_case_insensitive() {
    let existing: Vec<Product> = vec![create_test_product(1, "CRD-10")];

    let result: Result<(), DomainError> = validate_product_code_unique("crd-10", None, &existing);

    assert_eq!(
        result,
        Err(DomainError::DuplicateProductCode(String::from("CRD-10")))
    );
}

#[test]
fn test_product_may_keep_its_own_code() {
    let existing: Vec<Product> = vec![create_test_product(1, "CRD-10")];

    assert!(validate_product_code_unique("CRD-10", Some(1), &existing).is_ok());
    assert!(validate_product_code_unique("CRD-10", Some(2), &existing).is_err());
}

#[test]
fn test_doctor_requires_name_and_speciality() {
    let mut doctor: Doctor = Doctor {
        id: 1,
        name: String::from("Dr. Ayesha Khan"),
        speciality: String::from("Cardiology"),
        city: String::from("Lahore"),
        territory: String::from("Lahore Central"),
        patients_per_day: 40,
        active: true,
    };
    assert!(validate_doctor_fields(&doctor).is_ok());

    doctor.speciality = String::new();
    assert!(matches!(
        validate_doctor_fields(&doctor),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_duplicate_allocation_line_is_rejected() {
    let lines: Vec<AllocationLine> = vec![
        AllocationLine::new(1, 2),
        AllocationLine::new(2, 1),
        AllocationLine::new(1, 5),
    ];

    let result: Result<(), DomainError> = validate_allocation_lines(ResourceKind::Sample, &lines);

    assert_eq!(
        result,
        Err(DomainError::DuplicateAllocationLine {
            kind: ResourceKind::Sample,
            id: 1
        })
    );
}
