// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Headless view-model engines behind the Ceutro admin dashboard.
//!
//! Three descriptor-driven mechanisms live here:
//!
//! - [`TabularView`]: search, filter and sort over an in-memory page of records
//! - [`FormEngine`]: schema-driven forms with dependent option loading,
//!   repeatable groups and derived fields
//! - [`AllocationEditor`]: local reconciliation of giveaway and sample
//!   allocations before a single bulk submission
//!
//! The engines own plain state and never perform I/O themselves. Async work
//! (option loaders, backend calls) is started by the caller and fed back
//! through generation tokens so superseded results are dropped.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod error;
mod form;
mod generation;
mod record;
mod table;

#[cfg(test)]
mod tests;

pub use allocation::{
    AddOutcome, AllocationEditor, AllocationItem, AllocationSubmission, EditorMode, EditorPhase,
    REDIRECT_DELAY, SubmissionTicket,
};
pub use error::{AllocationError, CoreError, SubmitError};
pub use form::{
    DerivedOp, DerivedSpec, FieldDescriptor, FieldErrors, FieldKind, FieldMap, FieldOption,
    FieldValue, FormEngine, OptionLoadRequest, OptionLoader, OptionsFuture, RenderedField,
    RepeatableSpec, ValidationRule, ValidationSchema, Widget, WidgetRegistry,
};
pub use generation::{Generation, GenerationToken, SharedGeneration};
pub use record::Record;
pub use table::{
    CellRenderer, CellValue, ColumnKey, ColumnSpec, FilterOption, FilterSpec, NO_DATA_MESSAGE,
    RenderedHeader, RenderedRow, RenderedTable, SortDirection, SortState, TableBody, TabularView,
};
