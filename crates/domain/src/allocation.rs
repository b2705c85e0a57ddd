// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// The two resource lists an allocation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Promotional giveaways.
    Giveaway,
    /// Product samples.
    Sample,
}

impl ResourceKind {
    /// Human-readable name used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Giveaway => "Giveaway",
            Self::Sample => "Sample",
        }
    }
}

/// One `{id, quantity}` entry of an allocation list.
///
/// A quantity of zero in an update means "remove this line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllocationLine {
    /// The giveaway or sample identifier.
    pub id: RecordId,
    /// Units allocated.
    pub quantity: u32,
}

impl AllocationLine {
    /// Creates a new allocation line.
    #[must_use]
    pub const fn new(id: RecordId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// The giveaways and samples allocated to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    /// The employee receiving the allocation.
    pub user_id: RecordId,
    /// Allocated giveaways.
    pub giveaway: Vec<AllocationLine>,
    /// Allocated samples.
    pub sample: Vec<AllocationLine>,
}

impl Allocation {
    /// Creates an allocation, dropping any zero-quantity lines.
    #[must_use]
    pub fn new(
        user_id: RecordId,
        giveaway: Vec<AllocationLine>,
        sample: Vec<AllocationLine>,
    ) -> Self {
        Self {
            user_id,
            giveaway: giveaway.into_iter().filter(|l| l.quantity > 0).collect(),
            sample: sample.into_iter().filter(|l| l.quantity > 0).collect(),
        }
    }

    /// Returns the lines of one resource list.
    #[must_use]
    pub fn lines(&self, kind: ResourceKind) -> &[AllocationLine] {
        match kind {
            ResourceKind::Giveaway => &self.giveaway,
            ResourceKind::Sample => &self.sample,
        }
    }

    /// Returns whether no line is allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.giveaway.is_empty() && self.sample.is_empty()
    }

    /// Applies a diff-style update.
    ///
    /// Lines with quantity zero remove the matching entry, other lines
    /// replace the existing quantity or are appended.
    pub fn apply_changes(&mut self, giveaway: &[AllocationLine], sample: &[AllocationLine]) {
        merge_lines(&mut self.giveaway, giveaway);
        merge_lines(&mut self.sample, sample);
    }
}

fn merge_lines(current: &mut Vec<AllocationLine>, changes: &[AllocationLine]) {
    for change in changes {
        let position: Option<usize> = current.iter().position(|l| l.id == change.id);
        match (position, change.quantity) {
            (Some(idx), 0) => {
                current.remove(idx);
            }
            (Some(idx), quantity) => current[idx].quantity = quantity,
            (None, 0) => {}
            (None, _) => current.push(*change),
        }
    }
}
