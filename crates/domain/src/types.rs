// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier assigned to every entity by the backend.
pub type RecordId = i64;

/// The position an employee holds in the sales force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Field medical representative. Receives allocations.
    #[default]
    MedicalRep,
    /// Manages the reps of one area.
    AreaManager,
    /// Manages several areas.
    RegionalManager,
    /// Back-office administrator.
    Admin,
}

impl EmployeeRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MedicalRep => "medical_rep",
            Self::AreaManager => "area_manager",
            Self::RegionalManager => "regional_manager",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medical_rep" => Ok(Self::MedicalRep),
            "area_manager" => Ok(Self::AreaManager),
            "regional_manager" => Ok(Self::RegionalManager),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("unknown employee role '{s}'")),
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member of the sales force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Backend identifier. Doubles as the `userId` of allocations.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Work email.
    pub email: String,
    /// Position in the sales force.
    pub role: EmployeeRole,
    /// Team the employee reports into, if any.
    pub team: Option<String>,
    /// Territory the employee covers, if any.
    pub territory: Option<String>,
}

/// A promotional giveaway kept in stock for reps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Giveaway {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Free-text description, searched alongside the name.
    pub description: String,
    /// Units currently in the warehouse.
    pub stock: u32,
}

/// A product sample SKU handed out to doctors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Free-text description, searched alongside the name.
    pub description: String,
    /// Stock keeping unit code.
    pub sku: String,
}

/// A doctor visited by the sales force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Medical speciality (e.g., "Cardiology").
    pub speciality: String,
    /// City of the practice.
    pub city: String,
    /// Territory the practice belongs to.
    pub territory: String,
    /// Average patients seen per day.
    pub patients_per_day: u32,
    /// Whether the doctor is still on the call list.
    pub active: bool,
}

/// A marketed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier.
    pub id: RecordId,
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Therapeutic category.
    pub category: String,
    /// Unit price.
    pub price: f64,
    /// Pack configurations the product ships in.
    #[serde(default)]
    pub pack_sizes: Vec<PackSize>,
}

/// One pack configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSize {
    /// Label printed on the pack (e.g., "10 tablets").
    pub label: String,
    /// Units inside one pack.
    pub units_per_pack: u32,
    /// Packs inside one carton.
    pub packs_per_carton: u32,
}

impl PackSize {
    /// Units inside one carton.
    #[must_use]
    pub const fn units_per_carton(&self) -> u32 {
        self.units_per_pack.saturating_mul(self.packs_per_carton)
    }
}

/// A sales territory inside a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Backend identifier.
    pub id: RecordId,
    /// Territory name.
    pub name: String,
    /// The region the territory belongs to.
    pub region: String,
}

/// A catalog item that can be allocated to an employee.
///
/// Giveaways and samples share the same search and allocation rules.
pub trait CatalogEntry {
    /// The backend identifier.
    fn entry_id(&self) -> RecordId;
    /// The display name.
    fn entry_name(&self) -> &str;
    /// The description searched alongside the name.
    fn entry_description(&self) -> &str;
}

impl CatalogEntry for Giveaway {
    fn entry_id(&self) -> RecordId {
        self.id
    }

    fn entry_name(&self) -> &str {
        &self.name
    }

    fn entry_description(&self) -> &str {
        &self.description
    }
}

impl CatalogEntry for Sample {
    fn entry_id(&self) -> RecordId {
        self.id
    }

    fn entry_name(&self) -> &str {
        &self.name
    }

    fn entry_description(&self) -> &str {
        &self.description
    }
}
