// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CellValue, Record};
use ceutro_domain::{Employee, EmployeeRole, PackSize, Product};

#[test]
fn test_product_fields_expose_raw_values() {
    let product: Product = Product {
        id: 7,
        code: String::from("CAR-10"),
        name: String::from("Cardiol"),
        category: String::from("Cardiology"),
        price: 12.5,
        pack_sizes: vec![PackSize {
            label: String::from("10 tablets"),
            units_per_pack: 10,
            packs_per_carton: 20,
        }],
    };

    assert_eq!(product.id(), 7);
    assert_eq!(product.field("price"), CellValue::Number(12.5));
    assert_eq!(product.field("code"), CellValue::from("CAR-10"));
    assert_eq!(product.field("pack_sizes"), CellValue::Number(1.0));
    assert_eq!(product.field("unknown"), CellValue::Empty);
}

#[test]
fn test_employee_optional_fields_are_empty_when_absent() {
    let employee: Employee = Employee {
        id: 3,
        name: String::from("Asha Rao"),
        email: String::from("asha@example.com"),
        role: EmployeeRole::AreaManager,
        team: None,
        territory: Some(String::from("West")),
    };

    assert_eq!(employee.field("team"), CellValue::Empty);
    assert_eq!(employee.field("territory"), CellValue::from("West"));
    assert_eq!(employee.field("role"), CellValue::from("area_manager"));
}
