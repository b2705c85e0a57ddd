// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use ceutro::{
    AllocationItem, AllocationSubmission, EditorMode, EditorPhase, FieldMap, RenderedField,
    RenderedTable, SortDirection,
};
use ceutro_domain::{AllocationLine, PackSize, RecordId};

/// Query parameters of a table page.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageQuery {
    /// Free-text search term.
    pub search: Option<String>,
    /// Filter option, by label or value.
    pub filter: Option<String>,
    /// Sort column.
    pub sort: Option<String>,
    /// Sort direction. Defaults to ascending when a column is given.
    pub direction: Option<SortDirection>,
    /// The record a form or editor page opens on.
    pub id: Option<RecordId>,
}

/// API response for a rendered table page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TablePageResponse {
    /// The page name.
    pub page: String,
    /// Page title.
    pub title: String,
    /// Filter choices offered above the table.
    pub filter_options: Vec<String>,
    /// Number of records before search and filter.
    pub total: usize,
    /// The rendered table.
    pub table: RenderedTable,
}

/// API response for a rendered form.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FormPageResponse {
    /// The form name.
    pub form: String,
    /// Form title.
    pub title: String,
    /// The rendered fields.
    pub fields: Vec<RenderedField>,
}

/// API response for the allocation editor page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AllocationPageResponse {
    /// Create or edit.
    pub mode: EditorMode,
    /// The editor phase.
    pub phase: EditorPhase,
    /// The employee the allocation belongs to.
    pub user_id: Option<RecordId>,
    /// Visible giveaways.
    pub giveaway: Vec<AllocationItem>,
    /// Visible samples.
    pub sample: Vec<AllocationItem>,
}

/// A page view-model of any variant.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PageResponse {
    /// A table page.
    Table(TablePageResponse),
    /// A form page.
    Form(FormPageResponse),
    /// The allocation editor.
    Allocation(AllocationPageResponse),
}

/// API request to submit a form.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubmitFormRequest {
    /// The submitted values keyed by field name.
    #[serde(default)]
    pub values: FieldMap,
}

/// API response for a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitFormResponse {
    /// The identifier of the created record.
    pub id: RecordId,
    /// A success message.
    pub message: String,
}

/// API request to create a product.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateProductRequest {
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Therapeutic category.
    pub category: String,
    /// Unit price.
    pub price: f64,
    /// Pack configurations.
    #[serde(default)]
    pub pack_sizes: Vec<PackSize>,
}

/// API request to create a doctor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateDoctorRequest {
    /// Display name.
    pub name: String,
    /// Medical speciality.
    pub speciality: String,
    /// City of the practice.
    pub city: String,
    /// Territory of the practice.
    pub territory: String,
    /// Average patients seen per day.
    pub patients_per_day: u32,
}

/// API request to create an allocation.
///
/// Serialized as `{ userId, giveaway: [{id, quantity}], sample: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllocationRequest {
    /// The employee receiving the allocation.
    pub user_id: RecordId,
    /// Giveaway lines.
    #[serde(default)]
    pub giveaway: Vec<AllocationLine>,
    /// Sample lines.
    #[serde(default)]
    pub sample: Vec<AllocationLine>,
}

/// API request to update an allocation.
///
/// Lines with quantity zero remove the matching entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateAllocationRequest {
    /// Giveaway changes.
    #[serde(default)]
    pub giveaway: Vec<AllocationLine>,
    /// Sample changes.
    #[serde(default)]
    pub sample: Vec<AllocationLine>,
}

/// One of the two allocation requests an editor submission turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationRequest {
    /// `POST /allocations`.
    Create(CreateAllocationRequest),
    /// `PATCH /allocations/{user_id}`.
    Update {
        /// The employee whose allocation is updated.
        user_id: RecordId,
        /// The changes.
        request: UpdateAllocationRequest,
    },
}

impl From<AllocationSubmission> for AllocationRequest {
    fn from(submission: AllocationSubmission) -> Self {
        match submission.mode {
            EditorMode::Create => Self::Create(CreateAllocationRequest {
                user_id: submission.user_id,
                giveaway: submission.giveaway,
                sample: submission.sample,
            }),
            EditorMode::Edit { user_id } => Self::Update {
                user_id,
                request: UpdateAllocationRequest {
                    giveaway: submission.giveaway,
                    sample: submission.sample,
                },
            },
        }
    }
}

/// API response for an allocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocationResponse {
    /// The employee the allocation belongs to.
    pub user_id: RecordId,
    /// Allocated giveaways with their names.
    pub giveaway: Vec<AllocationLineInfo>,
    /// Allocated samples with their names.
    pub sample: Vec<AllocationLineInfo>,
    /// A success message, for mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One named allocation line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocationLineInfo {
    /// The catalog identifier.
    pub id: RecordId,
    /// The catalog name.
    pub name: String,
    /// Units allocated.
    pub quantity: u32,
}

/// API response for a catalog refresh.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RefreshCatalogResponse {
    /// A success message.
    pub message: String,
}
