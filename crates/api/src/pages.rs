// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page dispatch.
//!
//! Every dashboard page is one [`PageVariant`]. [`render_page`] turns a
//! variant and its query into the view-model the page displays.

use crate::allocations::editor_page;
use crate::backend::DashboardBackend;
use crate::catalog::CatalogCache;
use crate::error::ApiError;
use crate::export::export_table_csv;
use crate::forms::{FormKind, product_values, render_form};
use crate::request_response::{PageQuery, PageResponse, TablePageResponse};
use crate::tables::{
    doctor_table, employee_table, giveaway_table, product_table, sample_table, territory_table,
};
use ceutro::{FieldMap, Record, RenderedTable, TabularView};
use ceutro_domain::{DomainError, Product, RecordId};
use tracing::debug;

/// The pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PageVariant {
    /// Doctors listing.
    DoctorTable,
    /// Products listing.
    ProductTable,
    /// Employees listing.
    EmployeeTable,
    /// Giveaways listing.
    GiveawayTable,
    /// Samples listing.
    SampleTable,
    /// Territories listing.
    TerritoryTable,
    /// New product, or a copy of an existing one.
    ProductForm {
        /// Product whose values prefill the form.
        product_id: Option<RecordId>,
    },
    /// New doctor.
    DoctorForm,
    /// Allocation editor.
    AllocationEditor {
        /// Employee whose allocation is edited. `None` creates a new one.
        user_id: Option<RecordId>,
    },
}

impl PageVariant {
    /// Resolves a page name from a URL.
    ///
    /// # Arguments
    ///
    /// * `name` - The page segment of the URL
    /// * `id` - The record the page opens on, for form and editor pages
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` for unknown names.
    pub fn from_name(name: &str, id: Option<RecordId>) -> Result<Self, ApiError> {
        match name {
            "doctors" => Ok(Self::DoctorTable),
            "products" => Ok(Self::ProductTable),
            "employees" => Ok(Self::EmployeeTable),
            "giveaways" => Ok(Self::GiveawayTable),
            "samples" => Ok(Self::SampleTable),
            "territories" => Ok(Self::TerritoryTable),
            "product-form" => Ok(Self::ProductForm { product_id: id }),
            "doctor-form" => Ok(Self::DoctorForm),
            "allocation" => Ok(Self::AllocationEditor { user_id: id }),
            other => Err(ApiError::ResourceNotFound {
                resource_type: String::from("Page"),
                message: format!("No page named '{other}'"),
            }),
        }
    }

    /// Returns the page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::DoctorTable => "Doctors",
            Self::ProductTable => "Products",
            Self::EmployeeTable => "Employees",
            Self::GiveawayTable => "Giveaways",
            Self::SampleTable => "Samples",
            Self::TerritoryTable => "Territories",
            Self::ProductForm { .. } => "Add product",
            Self::DoctorForm => "Add doctor",
            Self::AllocationEditor { user_id: None } => "New allocation",
            Self::AllocationEditor { user_id: Some(_) } => "Edit allocation",
        }
    }

    /// Returns whether the page is a table.
    #[must_use]
    pub const fn is_table(self) -> bool {
        matches!(
            self,
            Self::DoctorTable
                | Self::ProductTable
                | Self::EmployeeTable
                | Self::GiveawayTable
                | Self::SampleTable
                | Self::TerritoryTable
        )
    }
}

/// Applies search, filter and sort from `query` to `view`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the filter matches no option.
pub fn apply_query<T: Record>(view: &mut TabularView<T>, query: &PageQuery) -> Result<(), ApiError> {
    if let Some(term) = &query.search {
        view.set_search_term(term.trim());
    }

    let filter = match (query.filter.as_deref(), view.filter_spec()) {
        (None | Some(""), _) => None,
        (Some(raw), Some(spec)) => Some(
            spec.find_option(raw)
                .map(|option| option.value.clone())
                .ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("filter"),
                    message: format!("Unknown filter option '{raw}'"),
                })?,
        ),
        (Some(_), None) => {
            return Err(ApiError::InvalidInput {
                field: String::from("filter"),
                message: String::from("This table has no filter"),
            });
        }
    };
    view.set_filter(filter);

    view.set_sort(query.sort.as_deref(), query.direction);
    Ok(())
}

fn table_response<T: Record>(
    variant: PageVariant,
    mut view: TabularView<T>,
    query: &PageQuery,
) -> Result<TablePageResponse, ApiError> {
    apply_query(&mut view, query)?;
    let filter_options: Vec<String> = view
        .filter_spec()
        .map(|spec| spec.options.iter().map(|o| o.label.clone()).collect())
        .unwrap_or_default();
    Ok(TablePageResponse {
        page: page_name(variant),
        title: String::from(variant.title()),
        filter_options,
        total: view.records().len(),
        table: view.render(),
    })
}

fn page_name(variant: PageVariant) -> String {
    String::from(match variant {
        PageVariant::DoctorTable => "doctors",
        PageVariant::ProductTable => "products",
        PageVariant::EmployeeTable => "employees",
        PageVariant::GiveawayTable => "giveaways",
        PageVariant::SampleTable => "samples",
        PageVariant::TerritoryTable => "territories",
        PageVariant::ProductForm { .. } => "product-form",
        PageVariant::DoctorForm => "doctor-form",
        PageVariant::AllocationEditor { .. } => "allocation",
    })
}

async fn product_defaults<B: DashboardBackend + 'static>(
    cache: &CatalogCache<B>,
    product_id: Option<RecordId>,
) -> Result<FieldMap, ApiError> {
    let Some(product_id) = product_id else {
        return Ok(FieldMap::new());
    };
    let products = cache.products().await?;
    let product: &Product = products
        .iter()
        .find(|p| p.id == product_id)
        .ok_or(DomainError::ProductNotFound(product_id))?;
    let mut values: FieldMap = product_values(product);
    // Codes are unique, so a copy starts without one.
    values.remove("code");
    Ok(values)
}

/// Renders a page.
///
/// # Errors
///
/// Returns an error if the data behind the page cannot be fetched or the
/// query is invalid.
pub async fn render_page<B: DashboardBackend + 'static>(
    cache: &CatalogCache<B>,
    variant: PageVariant,
    query: &PageQuery,
) -> Result<PageResponse, ApiError> {
    debug!(?variant, "Rendering page");
    let page: PageResponse = match variant {
        PageVariant::DoctorTable => PageResponse::Table(table_response(
            variant,
            doctor_table(cache.doctors().await?.to_vec()),
            query,
        )?),
        PageVariant::ProductTable => PageResponse::Table(table_response(
            variant,
            product_table(cache.products().await?.to_vec()),
            query,
        )?),
        PageVariant::EmployeeTable => PageResponse::Table(table_response(
            variant,
            employee_table(cache.employees().await?.to_vec()),
            query,
        )?),
        PageVariant::GiveawayTable => PageResponse::Table(table_response(
            variant,
            giveaway_table(cache.giveaways().await?.to_vec()),
            query,
        )?),
        PageVariant::SampleTable => PageResponse::Table(table_response(
            variant,
            sample_table(cache.samples().await?.to_vec()),
            query,
        )?),
        PageVariant::TerritoryTable => PageResponse::Table(table_response(
            variant,
            territory_table(cache.territories().await?.to_vec()),
            query,
        )?),
        PageVariant::ProductForm { product_id } => {
            let defaults: FieldMap = product_defaults(cache, product_id).await?;
            PageResponse::Form(render_form(cache, FormKind::Product, defaults).await?)
        }
        PageVariant::DoctorForm => {
            PageResponse::Form(render_form(cache, FormKind::Doctor, FieldMap::new()).await?)
        }
        PageVariant::AllocationEditor { user_id } => {
            PageResponse::Allocation(editor_page(cache, user_id).await?)
        }
    };
    Ok(page)
}

/// Renders the table of a table page.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for pages that are not tables, or any
/// error of [`render_page`].
pub async fn render_table<B: DashboardBackend + 'static>(
    cache: &CatalogCache<B>,
    variant: PageVariant,
    query: &PageQuery,
) -> Result<RenderedTable, ApiError> {
    let not_a_table = || ApiError::InvalidInput {
        field: String::from("page"),
        message: format!("'{}' is not a table", page_name(variant)),
    };
    if !variant.is_table() {
        return Err(not_a_table());
    }
    match render_page(cache, variant, query).await? {
        PageResponse::Table(page) => Ok(page.table),
        PageResponse::Form(_) | PageResponse::Allocation(_) => Err(not_a_table()),
    }
}

/// Renders a table page as CSV.
///
/// # Errors
///
/// See [`render_table`].
pub async fn export_page<B: DashboardBackend + 'static>(
    cache: &CatalogCache<B>,
    variant: PageVariant,
    query: &PageQuery,
) -> Result<String, ApiError> {
    let table: RenderedTable = render_table(cache, variant, query).await?;
    export_table_csv(&table)
}
