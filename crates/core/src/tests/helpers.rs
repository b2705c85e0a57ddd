// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ColumnSpec, DerivedOp, DerivedSpec, FieldDescriptor, FieldKind, FieldMap, FieldOption,
    FieldValue, OptionsFuture, RepeatableSpec, ValidationRule, ValidationSchema,
};
use ceutro_domain::{Doctor, Giveaway, Sample};

pub fn create_test_doctor(id: i64, name: &str, patients_per_day: u32) -> Doctor {
    Doctor {
        id,
        name: String::from(name),
        speciality: String::from("Cardiology"),
        city: String::from("Pune"),
        territory: String::from("West"),
        patients_per_day,
        active: true,
    }
}

pub fn create_test_doctors() -> Vec<Doctor> {
    vec![
        create_test_doctor(1, "B", 30),
        create_test_doctor(2, "A", 25),
        Doctor {
            speciality: String::from("Dermatology"),
            active: false,
            ..create_test_doctor(3, "c", 25)
        },
    ]
}

pub fn create_doctor_columns() -> Vec<ColumnSpec<Doctor>> {
    vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("speciality", "Speciality"),
        ColumnSpec::new("patients_per_day", "Patients / day").sortable(),
        ColumnSpec::new("active", "Status"),
    ]
}

pub fn create_test_giveaways() -> Vec<Giveaway> {
    vec![
        Giveaway {
            id: 10,
            name: String::from("Pen"),
            description: String::from("Branded ballpoint"),
            stock: 500,
        },
        Giveaway {
            id: 11,
            name: String::from("Notepad"),
            description: String::from("A5 ruled pad"),
            stock: 200,
        },
        Giveaway {
            id: 12,
            name: String::from("Mug"),
            description: String::from("Ceramic, with pen holder"),
            stock: 50,
        },
    ]
}

pub fn create_test_samples() -> Vec<Sample> {
    vec![
        Sample {
            id: 20,
            name: String::from("Cardiol 10mg"),
            description: String::from("Strip of 10 tablets"),
            sku: String::from("CAR-10"),
        },
        Sample {
            id: 21,
            name: String::from("Dermasoft"),
            description: String::from("Cream 15g"),
            sku: String::from("DER-15"),
        },
    ]
}

/// Resolves immediately with one option per letter of the country.
pub fn city_options(values: &FieldMap) -> Vec<FieldOption> {
    let country: &str = values
        .get("country")
        .and_then(FieldValue::as_text)
        .unwrap_or_default();
    vec![
        FieldOption::new(&format!("{country} North"), &format!("{country}-n")),
        FieldOption::new(&format!("{country} South"), &format!("{country}-s")),
    ]
}

pub fn create_location_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("country", FieldKind::Select, "Country").with_options(vec![
            FieldOption::new("A", "A"),
            FieldOption::new("B", "B"),
        ]),
        FieldDescriptor::new("city", FieldKind::DynamicSelect, "City").depends_on(
            &["country"],
            |values: FieldMap| -> OptionsFuture {
                let options: Vec<FieldOption> = city_options(&values);
                Box::pin(async move { Ok::<_, String>(options) })
            },
        ),
    ]
}

pub fn create_pack_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("name", FieldKind::Text, "Name"),
        FieldDescriptor::new("pack_sizes", FieldKind::Repeatable, "Pack sizes").repeatable(
            RepeatableSpec::new(vec![
                FieldDescriptor::new("label", FieldKind::Text, "Label"),
                FieldDescriptor::new("units_per_pack", FieldKind::Number, "Units per pack")
                    .with_default(FieldValue::Number(1.0)),
                FieldDescriptor::new("packs_per_carton", FieldKind::Number, "Packs per carton"),
                FieldDescriptor::new("units_per_carton", FieldKind::Number, "Units per carton")
                    .derived(DerivedSpec::new(
                        &["units_per_pack", "packs_per_carton"],
                        DerivedOp::Product,
                    )),
            ])
            .with_bounds(1, Some(3)),
        ),
    ]
}

pub fn create_pack_schema() -> ValidationSchema {
    ValidationSchema::new()
        .field("name", vec![ValidationRule::Required])
        .field("pack_sizes.label", vec![ValidationRule::Required])
}
