// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column layouts of the listing pages.

use ceutro::{CellValue, ColumnSpec, FilterOption, FilterSpec, TabularView};
use ceutro_domain::{Doctor, Employee, EmployeeRole, Giveaway, Product, Sample, Territory};
use std::collections::BTreeSet;

fn status_label(value: &CellValue) -> String {
    match value {
        CellValue::Bool(true) => String::from("Active"),
        CellValue::Bool(false) => String::from("Inactive"),
        other => other.display(),
    }
}

/// Human-readable label of an employee role.
#[must_use]
pub const fn role_label(role: EmployeeRole) -> &'static str {
    match role {
        EmployeeRole::MedicalRep => "Medical rep",
        EmployeeRole::AreaManager => "Area manager",
        EmployeeRole::RegionalManager => "Regional manager",
        EmployeeRole::Admin => "Admin",
    }
}

fn distinct_text_options(values: impl Iterator<Item = String>) -> Vec<FilterOption> {
    values
        .collect::<BTreeSet<String>>()
        .into_iter()
        .map(|value| FilterOption {
            label: value.clone(),
            value: CellValue::Text(value),
        })
        .collect()
}

/// The doctors listing: searchable by name, filterable by status.
#[must_use]
pub fn doctor_table(doctors: Vec<Doctor>) -> TabularView<Doctor> {
    let columns: Vec<ColumnSpec<Doctor>> = vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("speciality", "Speciality").sortable(),
        ColumnSpec::new("city", "City").sortable(),
        ColumnSpec::new("territory", "Territory"),
        ColumnSpec::new("patients_per_day", "Patients / day").sortable(),
        ColumnSpec::new("active", "Status").with_render(|value, _| status_label(value)),
    ];
    let filter: FilterSpec = FilterSpec {
        key: "active",
        options: vec![
            FilterOption {
                label: String::from("Active"),
                value: CellValue::Bool(true),
            },
            FilterOption {
                label: String::from("Inactive"),
                value: CellValue::Bool(false),
            },
        ],
    };
    TabularView::new(doctors, columns, Some("name"), Some(filter))
}

/// The products listing: searchable by name, filterable by category.
#[must_use]
pub fn product_table(products: Vec<Product>) -> TabularView<Product> {
    let columns: Vec<ColumnSpec<Product>> = vec![
        ColumnSpec::new("code", "Code").sortable(),
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("category", "Category").sortable(),
        ColumnSpec::new("price", "Price")
            .sortable()
            .with_render(|value, _| {
                value
                    .as_number()
                    .map_or_else(String::new, |price| format!("₹{price:.2}"))
            }),
        ColumnSpec::new("pack_sizes", "Packs").with_render(|_, product: &Product| {
            product
                .pack_sizes
                .iter()
                .map(|pack| pack.label.as_str())
                .collect::<Vec<&str>>()
                .join(", ")
        }),
    ];
    let filter: FilterSpec = FilterSpec {
        key: "category",
        options: distinct_text_options(products.iter().map(|p| p.category.clone())),
    };
    TabularView::new(products, columns, Some("name"), Some(filter))
}

/// The employees listing: searchable by name, filterable by role.
#[must_use]
pub fn employee_table(employees: Vec<Employee>) -> TabularView<Employee> {
    let columns: Vec<ColumnSpec<Employee>> = vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("email", "Email").sortable(),
        ColumnSpec::new("role", "Role")
            .sortable()
            .with_render(|_, employee: &Employee| String::from(role_label(employee.role))),
        ColumnSpec::new("team", "Team"),
        ColumnSpec::new("territory", "Territory").sortable(),
    ];
    let filter: FilterSpec = FilterSpec {
        key: "role",
        options: [
            EmployeeRole::MedicalRep,
            EmployeeRole::AreaManager,
            EmployeeRole::RegionalManager,
            EmployeeRole::Admin,
        ]
        .into_iter()
        .map(|role| FilterOption {
            label: String::from(role_label(role)),
            value: CellValue::from(role.as_str()),
        })
        .collect(),
    };
    TabularView::new(employees, columns, Some("name"), Some(filter))
}

/// The giveaways listing.
#[must_use]
pub fn giveaway_table(giveaways: Vec<Giveaway>) -> TabularView<Giveaway> {
    let columns: Vec<ColumnSpec<Giveaway>> = vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("description", "Description"),
        ColumnSpec::new("stock", "Stock").sortable(),
    ];
    TabularView::new(giveaways, columns, Some("name"), None)
}

/// The samples listing.
#[must_use]
pub fn sample_table(samples: Vec<Sample>) -> TabularView<Sample> {
    let columns: Vec<ColumnSpec<Sample>> = vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("sku", "SKU").sortable(),
        ColumnSpec::new("description", "Description"),
    ];
    TabularView::new(samples, columns, Some("name"), None)
}

/// The territories listing: searchable by name, filterable by region.
#[must_use]
pub fn territory_table(territories: Vec<Territory>) -> TabularView<Territory> {
    let columns: Vec<ColumnSpec<Territory>> = vec![
        ColumnSpec::new("name", "Name").sortable(),
        ColumnSpec::new("region", "Region").sortable(),
    ];
    let filter: FilterSpec = FilterSpec {
        key: "region",
        options: distinct_text_options(territories.iter().map(|t| t.region.clone())),
    };
    TabularView::new(territories, columns, Some("name"), Some(filter))
}
