// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation reads and writes.
//!
//! Incoming requests are replayed onto an [`AllocationEditor`] so the HTTP
//! surface follows the same rules as the interactive editor: quantities are
//! clamped, duplicates are rejected and edit-mode removals go out as
//! quantity-zero lines.

use crate::backend::DashboardBackend;
use crate::catalog::CatalogCache;
use crate::error::ApiError;
use crate::request_response::{
    AllocationLineInfo, AllocationPageResponse, AllocationRequest, AllocationResponse,
    CreateAllocationRequest, UpdateAllocationRequest,
};
use ceutro::{AllocationEditor, SubmissionTicket};
use ceutro_domain::{
    Allocation, AllocationLine, CatalogEntry, DomainError, Giveaway, RecordId, ResourceKind,
    Sample, validate_allocation_lines,
};
use tracing::{debug, info};

fn named_lines<E: CatalogEntry>(
    kind: ResourceKind,
    lines: &[AllocationLine],
    catalog: &[E],
) -> Vec<AllocationLineInfo> {
    lines
        .iter()
        .map(|line| AllocationLineInfo {
            id: line.id,
            name: catalog
                .iter()
                .find(|entry| entry.entry_id() == line.id)
                .map_or_else(
                    || format!("{} {}", kind.label(), line.id),
                    |entry| entry.entry_name().to_owned(),
                ),
            quantity: line.quantity,
        })
        .collect()
}

async fn to_response<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    allocation: &Allocation,
    message: Option<String>,
) -> Result<AllocationResponse, ApiError> {
    let giveaways = cache.giveaways().await?;
    let samples = cache.samples().await?;
    Ok(AllocationResponse {
        user_id: allocation.user_id,
        giveaway: named_lines(ResourceKind::Giveaway, &allocation.giveaway, &giveaways),
        sample: named_lines(ResourceKind::Sample, &allocation.sample, &samples),
        message,
    })
}

/// Returns the allocation of `user_id` with item names.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee has no allocation.
pub async fn get_allocation<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    user_id: RecordId,
) -> Result<AllocationResponse, ApiError> {
    let allocation: Allocation = cache.backend().get_allocation(user_id).await?;
    to_response(cache, &allocation, None).await
}

/// Opens an editor on the existing allocation of `user_id`.
///
/// # Errors
///
/// Returns an error if the allocation or the catalogs cannot be read.
pub async fn load_editor<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    user_id: RecordId,
) -> Result<AllocationEditor, ApiError> {
    let allocation: Allocation = cache.backend().get_allocation(user_id).await?;
    let giveaways = cache.giveaways().await?;
    let samples = cache.samples().await?;
    Ok(AllocationEditor::for_existing(
        &allocation,
        &giveaways,
        &samples,
    ))
}

/// Renders the editor page for `user_id`.
///
/// Without a user, or for an employee with no allocation yet, the page is a
/// create-mode editor.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or the employee is
/// unknown.
pub async fn editor_page<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    user_id: Option<RecordId>,
) -> Result<AllocationPageResponse, ApiError> {
    let editor: AllocationEditor = match user_id {
        None => AllocationEditor::new(),
        Some(user_id) => match load_editor(cache, user_id).await {
            Ok(editor) => editor,
            Err(ApiError::ResourceNotFound { .. }) => {
                if !cache.employees().await?.iter().any(|e| e.id == user_id) {
                    return Err(DomainError::EmployeeNotFound(user_id).into());
                }
                let mut editor: AllocationEditor = AllocationEditor::new();
                editor.select_employee(user_id)?;
                editor
            }
            Err(other) => return Err(other),
        },
    };
    Ok(editor_response(&editor))
}

/// Snapshot of an editor for display.
#[must_use]
pub fn editor_response(editor: &AllocationEditor) -> AllocationPageResponse {
    AllocationPageResponse {
        mode: editor.mode(),
        phase: editor.phase(),
        user_id: editor.user_id(),
        giveaway: editor
            .visible_items(ResourceKind::Giveaway)
            .into_iter()
            .cloned()
            .collect(),
        sample: editor
            .visible_items(ResourceKind::Sample)
            .into_iter()
            .cloned()
            .collect(),
    }
}

fn find_entry<E: CatalogEntry>(
    catalog: &[E],
    kind: ResourceKind,
    id: RecordId,
) -> Result<&E, ApiError> {
    catalog
        .iter()
        .find(|entry| entry.entry_id() == id)
        .ok_or_else(|| DomainError::CatalogItemNotFound { kind, id }.into())
}

/// Replays `lines` onto the editor.
///
/// A positive quantity adds or updates the item. Zero removes it; removing an
/// item the editor does not hold is a no-op.
fn apply_lines<E: CatalogEntry>(
    editor: &mut AllocationEditor,
    kind: ResourceKind,
    lines: &[AllocationLine],
    catalog: &[E],
) -> Result<(), ApiError> {
    validate_allocation_lines(kind, lines)?;
    for line in lines {
        let held: bool = editor
            .items(kind)
            .iter()
            .any(|item| item.id == line.id && item.quantity > 0);

        if line.quantity == 0 {
            if held {
                editor.remove_item(kind, line.id)?;
            }
            continue;
        }
        if !held {
            editor.add_item(kind, find_entry(catalog, kind, line.id)?)?;
        }
        editor.commit_quantity(kind, line.id, i64::from(line.quantity))?;
    }
    Ok(())
}

/// Sends the editor's payload to the backend and records the outcome.
///
/// # Errors
///
/// Returns the editor's error if the submission cannot start, or the
/// backend's error. The editor is back in its editing phase in that case.
pub async fn submit_editor<B: DashboardBackend>(
    backend: &B,
    editor: &mut AllocationEditor,
) -> Result<Allocation, ApiError> {
    let ticket: SubmissionTicket = editor.begin_submit()?;

    let result: Result<Allocation, ApiError> =
        match AllocationRequest::from(ticket.submission().clone()) {
            AllocationRequest::Create(request) => backend.create_allocation(request).await,
            AllocationRequest::Update { user_id, request } => {
                backend.update_allocation(user_id, request).await
            }
        };

    let applied: bool = editor.complete_submit(
        &ticket,
        result.as_ref().map(|_| ()).map_err(ToString::to_string),
    );
    if !applied {
        debug!("Allocation editor no longer waiting for this submission");
    }
    result
}

/// Creates an allocation.
///
/// # Errors
///
/// Returns an error if an item is unknown or listed twice, the employee
/// already has an allocation, or no line has a positive quantity.
pub async fn create_allocation<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    request: CreateAllocationRequest,
) -> Result<AllocationResponse, ApiError> {
    let giveaways = cache.giveaways().await?;
    let samples = cache.samples().await?;

    let mut editor: AllocationEditor = AllocationEditor::new();
    editor.select_employee(request.user_id)?;
    apply_lines::<Giveaway>(&mut editor, ResourceKind::Giveaway, &request.giveaway, &giveaways)?;
    apply_lines::<Sample>(&mut editor, ResourceKind::Sample, &request.sample, &samples)?;

    let allocation: Allocation = submit_editor(cache.backend(), &mut editor).await?;
    info!(user_id = allocation.user_id, "Allocation created");
    to_response(
        cache,
        &allocation,
        Some(String::from("Allocation created successfully")),
    )
    .await
}

/// Updates the allocation of `user_id`.
///
/// # Errors
///
/// Returns an error if the employee has no allocation or a line names an
/// unknown item.
pub async fn update_allocation<B: DashboardBackend>(
    cache: &CatalogCache<B>,
    user_id: RecordId,
    request: UpdateAllocationRequest,
) -> Result<AllocationResponse, ApiError> {
    let giveaways = cache.giveaways().await?;
    let samples = cache.samples().await?;

    let mut editor: AllocationEditor = load_editor(cache, user_id).await?;
    apply_lines::<Giveaway>(&mut editor, ResourceKind::Giveaway, &request.giveaway, &giveaways)?;
    apply_lines::<Sample>(&mut editor, ResourceKind::Sample, &request.sample, &samples)?;

    let allocation: Allocation = submit_editor(cache.backend(), &mut editor).await?;
    info!(user_id, "Allocation updated");
    to_response(
        cache,
        &allocation,
        Some(String::from("Allocation updated successfully")),
    )
    .await
}
