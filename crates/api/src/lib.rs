// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary of the Ceutro dashboard.
//!
//! Wires the engines of the `ceutro` crate to a [`DashboardBackend`]:
//! concrete table layouts and form schemas, the catalog cache, allocation
//! submission and page dispatch. Every failure surfaces as an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocations;
mod backend;
mod catalog;
mod error;
mod export;
mod fixture;
mod forms;
mod pages;
mod request_response;
mod tables;

#[cfg(test)]
mod tests;

pub use allocations::{
    create_allocation, editor_page, editor_response, get_allocation, load_editor, submit_editor,
    update_allocation,
};
pub use backend::{DashboardBackend, InMemoryBackend};
pub use catalog::CatalogCache;
pub use error::{ApiError, Notice, translate_core_error, translate_domain_error};
pub use export::export_table_csv;
pub use fixture::CatalogFixture;
pub use forms::{
    FormKind, MAX_PACK_SIZES, build_form, doctor_form, product_form, product_values, render_form,
    submit_form,
};
pub use pages::{PageVariant, apply_query, export_page, render_page, render_table};
pub use request_response::{
    AllocationLineInfo, AllocationPageResponse, AllocationRequest, AllocationResponse,
    CreateAllocationRequest, CreateDoctorRequest, CreateProductRequest, FormPageResponse,
    PageQuery, PageResponse, RefreshCatalogResponse, SubmitFormRequest, SubmitFormResponse,
    TablePageResponse, UpdateAllocationRequest,
};
pub use tables::{
    doctor_table, employee_table, giveaway_table, product_table, role_label, sample_table,
    territory_table,
};
