// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local reconciliation of one employee's giveaway and sample allocation.
//!
//! The editor keeps two item lists and produces a single submission. In
//! edit mode a removed item stays in its list with quantity zero so the
//! update tells the backend to drop it.

use crate::error::AllocationError;
use crate::generation::{Generation, GenerationToken};
use ceutro_domain::{Allocation, AllocationLine, CatalogEntry, RecordId, ResourceKind};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};

/// How long the success state is shown before returning to the listing.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// One giveaway or sample in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationItem {
    /// The catalog identifier.
    pub id: RecordId,
    /// The catalog name.
    pub name: String,
    /// Units allocated. Zero marks an item removed in edit mode.
    pub quantity: u32,
}

/// Whether the editor creates a new allocation or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorMode {
    /// A new allocation for an employee chosen in the editor.
    Create,
    /// The existing allocation of `user_id`.
    Edit {
        /// The employee the allocation belongs to.
        user_id: RecordId,
    },
}

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EditorPhase {
    /// Waiting for an employee to be chosen.
    NoEmployeeSelected,
    /// Items can be added, changed and removed.
    Editing,
    /// A submission is in flight.
    Submitting,
    /// The submission was accepted.
    Succeeded {
        /// Delay before returning to the listing.
        #[serde(with = "duration_millis")]
        redirect_after: Duration,
    },
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}

/// What [`AllocationEditor::add_item`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended with quantity one.
    Appended,
    /// A removed item was restored with quantity one.
    Revived,
}

/// The payload of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationSubmission {
    /// Create or update.
    pub mode: EditorMode,
    /// The employee receiving the allocation.
    pub user_id: RecordId,
    /// Giveaway lines.
    pub giveaway: Vec<AllocationLine>,
    /// Sample lines.
    pub sample: Vec<AllocationLine>,
}

/// A started submission. Hand it back to
/// [`AllocationEditor::complete_submit`] with the backend's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    token: GenerationToken,
    submission: AllocationSubmission,
}

impl SubmissionTicket {
    /// Returns the payload to send.
    #[must_use]
    pub const fn submission(&self) -> &AllocationSubmission {
        &self.submission
    }

    /// Returns the generation the submission was started in.
    #[must_use]
    pub const fn token(&self) -> GenerationToken {
        self.token
    }
}

/// Clamps a committed quantity to at least one.
fn clamp_quantity(raw: i64) -> u32 {
    u32::try_from(raw.max(1)).unwrap_or(u32::MAX)
}

/// Parses a quantity typed by the user. Blank or unparsable text counts as
/// one.
#[allow(clippy::cast_possible_truncation)]
fn parse_quantity(text: &str) -> i64 {
    let text: &str = text.trim();
    text.parse::<i64>().unwrap_or_else(|_| {
        text.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(1, |n| n.trunc() as i64)
    })
}

/// Edits the allocation of one employee.
#[derive(Debug, Clone)]
pub struct AllocationEditor {
    mode: EditorMode,
    phase: EditorPhase,
    user_id: Option<RecordId>,
    giveaway: Vec<AllocationItem>,
    sample: Vec<AllocationItem>,
    generation: Generation,
    last_error: Option<String>,
}

impl Default for AllocationEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationEditor {
    /// Creates an editor for a new allocation. No employee is selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: EditorMode::Create,
            phase: EditorPhase::NoEmployeeSelected,
            user_id: None,
            giveaway: Vec::new(),
            sample: Vec::new(),
            generation: Generation::new(),
            last_error: None,
        }
    }

    /// Creates an editor for an existing allocation.
    ///
    /// Names are looked up in the catalogs. Lines whose item is missing from
    /// the catalog are kept under a placeholder name.
    ///
    /// # Arguments
    ///
    /// * `allocation` - The allocation as stored by the backend
    /// * `giveaways` - The giveaway catalog
    /// * `samples` - The sample catalog
    #[must_use]
    pub fn for_existing<G: CatalogEntry, S: CatalogEntry>(
        allocation: &Allocation,
        giveaways: &[G],
        samples: &[S],
    ) -> Self {
        Self {
            mode: EditorMode::Edit {
                user_id: allocation.user_id,
            },
            phase: EditorPhase::Editing,
            user_id: Some(allocation.user_id),
            giveaway: named_items(ResourceKind::Giveaway, &allocation.giveaway, giveaways),
            sample: named_items(ResourceKind::Sample, &allocation.sample, samples),
            generation: Generation::new(),
            last_error: None,
        }
    }

    /// Returns the editor mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Returns the selected employee.
    #[must_use]
    pub const fn user_id(&self) -> Option<RecordId> {
        self.user_id
    }

    /// Returns the message of the last failed submission.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn ensure_editable(&self) -> Result<(), AllocationError> {
        match self.phase {
            EditorPhase::Editing => Ok(()),
            EditorPhase::NoEmployeeSelected => Err(AllocationError::NoEmployeeSelected),
            EditorPhase::Submitting => Err(AllocationError::SubmissionInProgress),
            EditorPhase::Succeeded { .. } => Err(AllocationError::AlreadySubmitted),
        }
    }

    /// Chooses the employee receiving the allocation.
    ///
    /// In create mode choosing a different employee clears both lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor is pinned to another employee or a
    /// submission is in flight or done.
    pub fn select_employee(&mut self, user_id: RecordId) -> Result<(), AllocationError> {
        match self.phase {
            EditorPhase::Submitting => return Err(AllocationError::SubmissionInProgress),
            EditorPhase::Succeeded { .. } => return Err(AllocationError::AlreadySubmitted),
            EditorPhase::NoEmployeeSelected | EditorPhase::Editing => {}
        }

        match self.mode {
            EditorMode::Edit { user_id: pinned } if pinned != user_id => {
                Err(AllocationError::EmployeeLocked { user_id: pinned })
            }
            EditorMode::Edit { .. } => Ok(()),
            EditorMode::Create => {
                if self.user_id != Some(user_id) {
                    debug!(user_id, "Employee changed, clearing allocation lists");
                    self.giveaway.clear();
                    self.sample.clear();
                }
                self.user_id = Some(user_id);
                self.phase = EditorPhase::Editing;
                Ok(())
            }
        }
    }

    /// Returns every item of a list, removed ones included.
    #[must_use]
    pub fn items(&self, kind: ResourceKind) -> &[AllocationItem] {
        match kind {
            ResourceKind::Giveaway => &self.giveaway,
            ResourceKind::Sample => &self.sample,
        }
    }

    fn items_mut(&mut self, kind: ResourceKind) -> &mut Vec<AllocationItem> {
        match kind {
            ResourceKind::Giveaway => &mut self.giveaway,
            ResourceKind::Sample => &mut self.sample,
        }
    }

    /// Returns the items shown to the user: those with a positive quantity.
    #[must_use]
    pub fn visible_items(&self, kind: ResourceKind) -> Vec<&AllocationItem> {
        self.items(kind)
            .iter()
            .filter(|item| item.quantity > 0)
            .collect()
    }

    /// Returns the ids hidden from catalog search.
    #[must_use]
    pub fn excluded_ids(&self, kind: ResourceKind) -> BTreeSet<RecordId> {
        self.visible_items(kind).iter().map(|item| item.id).collect()
    }

    /// Searches `catalog` by name or description, skipping entries already
    /// in the list.
    ///
    /// An empty query matches every remaining entry.
    #[must_use]
    pub fn search_catalog<'a, E: CatalogEntry>(
        &self,
        kind: ResourceKind,
        catalog: &'a [E],
        query: &str,
    ) -> Vec<&'a E> {
        let excluded: BTreeSet<RecordId> = self.excluded_ids(kind);
        let needle: String = query.trim().to_lowercase();
        catalog
            .iter()
            .filter(|entry| !excluded.contains(&entry.entry_id()))
            .filter(|entry| {
                needle.is_empty()
                    || entry.entry_name().to_lowercase().contains(&needle)
                    || entry.entry_description().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Adds a catalog entry with quantity one.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::AlreadyAdded`] if the entry is already in
    /// the list with a positive quantity.
    pub fn add_item<E: CatalogEntry>(
        &mut self,
        kind: ResourceKind,
        entry: &E,
    ) -> Result<AddOutcome, AllocationError> {
        self.ensure_editable()?;
        let items: &mut Vec<AllocationItem> = self.items_mut(kind);

        match items.iter_mut().find(|item| item.id == entry.entry_id()) {
            Some(item) if item.quantity > 0 => Err(AllocationError::AlreadyAdded {
                kind,
                name: item.name.clone(),
            }),
            Some(item) => {
                item.quantity = 1;
                Ok(AddOutcome::Revived)
            }
            None => {
                items.push(AllocationItem {
                    id: entry.entry_id(),
                    name: entry.entry_name().to_owned(),
                    quantity: 1,
                });
                Ok(AddOutcome::Appended)
            }
        }
    }

    fn active_item_mut(
        &mut self,
        kind: ResourceKind,
        id: RecordId,
    ) -> Result<&mut AllocationItem, AllocationError> {
        self.items_mut(kind)
            .iter_mut()
            .find(|item| item.id == id && item.quantity > 0)
            .ok_or(AllocationError::ItemNotFound { kind, id })
    }

    /// Commits a quantity, clamping it to at least one.
    ///
    /// # Returns
    ///
    /// The stored quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the list.
    pub fn commit_quantity(
        &mut self,
        kind: ResourceKind,
        id: RecordId,
        raw: i64,
    ) -> Result<u32, AllocationError> {
        self.ensure_editable()?;
        let item: &mut AllocationItem = self.active_item_mut(kind, id)?;
        item.quantity = clamp_quantity(raw);
        Ok(item.quantity)
    }

    /// Commits a quantity typed as text. Blank or unparsable input stores
    /// one.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the list.
    pub fn commit_quantity_input(
        &mut self,
        kind: ResourceKind,
        id: RecordId,
        text: &str,
    ) -> Result<u32, AllocationError> {
        self.commit_quantity(kind, id, parse_quantity(text))
    }

    /// Removes an item.
    ///
    /// Create mode drops it from the list. Edit mode keeps it with quantity
    /// zero so the update removes it on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the list.
    pub fn remove_item(&mut self, kind: ResourceKind, id: RecordId) -> Result<(), AllocationError> {
        self.ensure_editable()?;
        match self.mode {
            EditorMode::Create => {
                let items: &mut Vec<AllocationItem> = self.items_mut(kind);
                let position: usize = items
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or(AllocationError::ItemNotFound { kind, id })?;
                items.remove(position);
            }
            EditorMode::Edit { .. } => {
                self.active_item_mut(kind, id)?.quantity = 0;
            }
        }
        Ok(())
    }

    /// Starts a submission.
    ///
    /// Create payloads carry only positive quantities. Update payloads carry
    /// every item, so removed ones go out with quantity zero.
    ///
    /// # Errors
    ///
    /// Returns an error if no employee is selected, a submission is already
    /// in flight or done, or a create would carry no lines.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, AllocationError> {
        self.ensure_editable()?;
        let user_id: RecordId = self.user_id.ok_or(AllocationError::NoEmployeeSelected)?;

        let include_removed: bool = matches!(self.mode, EditorMode::Edit { .. });
        let lines = |items: &[AllocationItem]| -> Vec<AllocationLine> {
            items
                .iter()
                .filter(|item| include_removed || item.quantity > 0)
                .map(|item| AllocationLine::new(item.id, item.quantity))
                .collect()
        };
        let submission: AllocationSubmission = AllocationSubmission {
            mode: self.mode,
            user_id,
            giveaway: lines(&self.giveaway),
            sample: lines(&self.sample),
        };

        if self.mode == EditorMode::Create
            && submission.giveaway.is_empty()
            && submission.sample.is_empty()
        {
            return Err(AllocationError::NothingToSubmit);
        }

        let token: GenerationToken = self.generation.advance();
        self.phase = EditorPhase::Submitting;
        self.last_error = None;
        info!(
            user_id,
            giveaways = submission.giveaway.len(),
            samples = submission.sample.len(),
            "Submitting allocation"
        );

        Ok(SubmissionTicket { token, submission })
    }

    /// Records the backend's answer to a submission.
    ///
    /// # Returns
    ///
    /// `false` if the answer was discarded because the editor was reset or
    /// disposed after the submission started.
    pub fn complete_submit(
        &mut self,
        ticket: &SubmissionTicket,
        result: Result<(), String>,
    ) -> bool {
        if !self.generation.is_current(ticket.token) || self.phase != EditorPhase::Submitting {
            debug!(
                token = ticket.token.value(),
                "Discarding stale allocation submission result"
            );
            return false;
        }

        match result {
            Ok(()) => {
                info!(user_id = ticket.submission.user_id, "Allocation saved");
                self.phase = EditorPhase::Succeeded {
                    redirect_after: REDIRECT_DELAY,
                };
            }
            Err(message) => {
                self.phase = EditorPhase::Editing;
                self.last_error = Some(message);
            }
        }
        true
    }

    /// Abandons any submission in flight and starts over.
    ///
    /// A create editor forgets the employee and both lists. An edit editor
    /// keeps its lists.
    pub fn reset(&mut self) {
        self.generation.invalidate();
        self.last_error = None;
        match self.mode {
            EditorMode::Create => {
                self.user_id = None;
                self.giveaway.clear();
                self.sample.clear();
                self.phase = EditorPhase::NoEmployeeSelected;
            }
            EditorMode::Edit { .. } => self.phase = EditorPhase::Editing,
        }
    }

    /// Drops the results of any submission still in flight.
    pub const fn dispose(&mut self) {
        self.generation.invalidate();
    }
}

fn named_items<E: CatalogEntry>(
    kind: ResourceKind,
    lines: &[AllocationLine],
    catalog: &[E],
) -> Vec<AllocationItem> {
    lines
        .iter()
        .map(|line| AllocationItem {
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
