// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::table::CellValue;
use ceutro_domain::{Doctor, Employee, Giveaway, Product, RecordId, Sample, Territory};

/// A row that can be shown in a [`crate::TabularView`].
pub trait Record {
    /// The row identifier.
    fn id(&self) -> RecordId;

    /// Returns the raw value of the field named `key`.
    ///
    /// Unknown keys yield [`CellValue::Empty`].
    fn field(&self, key: &str) -> CellValue;
}

impl Record for Doctor {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "speciality" => self.speciality.as_str().into(),
            "city" => self.city.as_str().into(),
            "territory" => self.territory.as_str().into(),
            "patients_per_day" => self.patients_per_day.into(),
            "active" => self.active.into(),
            _ => CellValue::Empty,
        }
    }
}

impl Record for Product {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "code" => self.code.as_str().into(),
            "name" => self.name.as_str().into(),
            "category" => self.category.as_str().into(),
            "price" => self.price.into(),
            "pack_sizes" => u32::try_from(self.pack_sizes.len())
                .unwrap_or(u32::MAX)
                .into(),
            _ => CellValue::Empty,
        }
    }
}

impl Record for Employee {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "email" => self.email.as_str().into(),
            "role" => self.role.as_str().into(),
            "team" => self.team.clone().into(),
            "territory" => self.territory.clone().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Record for Giveaway {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "stock" => self.stock.into(),
            _ => CellValue::Empty,
        }
    }
}

impl Record for Sample {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "sku" => self.sku.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}

impl Record for Territory {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "region" => self.region.as_str().into(),
            _ => CellValue::Empty,
        }
    }
}
