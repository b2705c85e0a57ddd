// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CatalogEntry, EmployeeRole, Giveaway, Sample};
use std::str::FromStr;

#[test]
fn test_employee_role_round_trips_through_str() {
    for role in [
        EmployeeRole::MedicalRep,
        EmployeeRole::AreaManager,
        EmployeeRole::RegionalManager,
        EmployeeRole::Admin,
    ] {
        assert_eq!(EmployeeRole::from_str(role.as_str()), Ok(role));
    }
}

#[test]
fn test_employee_role_rejects_unknown_value() {
    assert!(EmployeeRole::from_str("intern").is_err());
}

#[test]
fn test_employee_role_serializes_snake_case() {
    let json: String = serde_json::to_string(&EmployeeRole::AreaManager).unwrap();
    assert_eq!(json, "\"area_manager\"");
}

#[test]
fn test_catalog_entry_exposes_search_fields() {
    let giveaway: Giveaway = Giveaway {
        id: 5,
        name: String::from("Pen"),
        description: String::from("Branded ballpoint"),
        stock: 100,
    };
    let sample: Sample = Sample {
        id: 9,
        name: String::from("Cardiol 10mg"),
        description: String::from("Starter pack"),
        sku: String::from("CRD-10"),
    };

    assert_eq!(giveaway.entry_id(), 5);
    assert_eq!(giveaway.entry_name(), "Pen");
    assert_eq!(giveaway.entry_description(), "Branded ballpoint");
    assert_eq!(sample.entry_id(), 9);
    assert_eq!(sample.entry_name(), "Cardiol 10mg");
}

#[test]
fn test_pack_size_units_per_carton() {
    let pack: crate::PackSize = crate::PackSize {
        label: String::from("10 tablets"),
        units_per_pack: 10,
        packs_per_carton: 24,
    };
    assert_eq!(pack.units_per_carton(), 240);
}
