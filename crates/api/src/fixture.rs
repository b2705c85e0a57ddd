// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed data for the in-memory backend.

use crate::error::ApiError;
use ceutro_domain::{
    Allocation, AllocationLine, Doctor, Employee, EmployeeRole, Giveaway, PackSize, Product,
    Sample, Territory,
};
use serde::{Deserialize, Serialize};

/// Every entity the dashboard reads, as loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFixture {
    /// Sales-force members.
    pub employees: Vec<Employee>,
    /// Promotional giveaways.
    pub giveaways: Vec<Giveaway>,
    /// Product samples.
    pub samples: Vec<Sample>,
    /// Doctors on the call list.
    pub doctors: Vec<Doctor>,
    /// Marketed products.
    pub products: Vec<Product>,
    /// Sales territories.
    pub territories: Vec<Territory>,
    /// Existing allocations.
    pub allocations: Vec<Allocation>,
}

impl CatalogFixture {
    /// Parses a fixture from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the JSON does not describe a fixture.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        serde_json::from_str(json).map_err(|e| ApiError::InvalidInput {
            field: String::from("catalog"),
            message: format!("Invalid catalog fixture: {e}"),
        })
    }

    /// A small built-in catalog used when no fixture file is given.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn demo() -> Self {
        let employee = |id: i64, name: &str, email: &str, role: EmployeeRole, territory: &str| {
            Employee {
                id,
                name: String::from(name),
                email: String::from(email),
                role,
                team: Some(String::from("Cardio West")),
                territory: Some(String::from(territory)),
            }
        };
        let doctor = |id: i64, name: &str, speciality: &str, city: &str, patients: u32| Doctor {
            id,
            name: String::from(name),
            speciality: String::from(speciality),
            city: String::from(city),
            territory: String::from("Pune Central"),
            patients_per_day: patients,
            active: true,
        };

        Self {
            employees: vec![
                employee(1, "Asha Rao", "asha.rao@ceutro.in", EmployeeRole::MedicalRep, "Pune Central"),
                employee(2, "Vikram Shah", "vikram.shah@ceutro.in", EmployeeRole::MedicalRep, "Pune East"),
                employee(3, "Meera Iyer", "meera.iyer@ceutro.in", EmployeeRole::AreaManager, "Pune Central"),
            ],
            giveaways: vec![
                Giveaway {
                    id: 10,
                    name: String::from("Branded pen"),
                    description: String::from("Blue ballpoint with logo"),
                    stock: 1200,
                },
                Giveaway {
                    id: 11,
                    name: String::from("Prescription pad"),
                    description: String::from("A5, 50 sheets"),
                    stock: 400,
                },
                Giveaway {
                    id: 12,
                    name: String::from("Desk calendar"),
                    description: String::from("2026 flip calendar"),
                    stock: 150,
                },
            ],
            samples: vec![
                Sample {
                    id: 20,
                    name: String::from("Cardiol 10mg"),
                    description: String::from("Strip of 10 tablets"),
                    sku: String::from("CAR-10-S"),
                },
                Sample {
                    id: 21,
                    name: String::from("Glucomet 500"),
                    description: String::from("Strip of 15 tablets"),
                    sku: String::from("GLU-500-S"),
                },
            ],
            doctors: vec![
                doctor(100, "Dr. Kulkarni", "Cardiology", "Pune", 40),
                doctor(101, "Dr. Banerjee", "Endocrinology", "Pune", 25),
                Doctor {
                    active: false,
                    ..doctor(102, "Dr. Fernandes", "Dermatology", "Pimpri", 18)
                },
            ],
            products: vec![
                Product {
                    id: 200,
                    code: String::from("CAR-10"),
                    name: String::from("Cardiol"),
                    category: String::from("Cardiology"),
                    price: 84.5,
                    pack_sizes: vec![PackSize {
                        label: String::from("10 tablets"),
                        units_per_pack: 10,
                        packs_per_carton: 50,
                    }],
                },
                Product {
                    id: 201,
                    code: String::from("GLU-500"),
                    name: String::from("Glucomet"),
                    category: String::from("Diabetology"),
                    price: 112.0,
                    pack_sizes: Vec::new(),
                },
            ],
            territories: vec![
                Territory {
                    id: 300,
                    name: String::from("Pune Central"),
                    region: String::from("West"),
                },
                Territory {
                    id: 301,
                    name: String::from("Pune East"),
                    region: String::from("West"),
                },
                Territory {
                    id: 302,
                    name: String::from("Kolkata North"),
                    region: String::from("East"),
                },
            ],
            allocations: vec![Allocation::new(
                1,
                vec![AllocationLine::new(10, 50)],
                vec![AllocationLine::new(20, 10)],
            )],
        }
    }
}
