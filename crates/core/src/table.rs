// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Generic tabular view: search, filter and sort over a page of records.

use crate::record::Record;
use ceutro_domain::RecordId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Message shown in the single placeholder row of an empty table.
pub const NO_DATA_MESSAGE: &str = "No data";

/// Names a field of a record type.
pub type ColumnKey = &'static str;

/// Produces the display string of a cell from its raw value and row.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> String + Send + Sync>;

/// The raw value of a record field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// A boolean flag.
    Bool(bool),
    /// A numeric value. Compared numerically when sorting.
    Number(f64),
    /// Any other value.
    Text(String),
}

impl CellValue {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Stringifies the raw value.
    ///
    /// Whole numbers render without a fractional part.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Declares how one field of `T` is displayed.
pub struct ColumnSpec<T> {
    /// The record field shown in this column.
    pub key: ColumnKey,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    render: Option<CellRenderer<T>>,
}

impl<T> ColumnSpec<T> {
    /// Creates a non-sortable column showing the raw value.
    #[must_use]
    pub fn new(key: ColumnKey, label: &str) -> Self {
        Self {
            key,
            label: label.to_owned(),
            sortable: false,
            render: None,
        }
    }

    /// Marks the column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a custom renderer. It affects the displayed string only.
    #[must_use]
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &T) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Returns whether a custom renderer is set.
    #[must_use]
    pub const fn has_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: Record> ColumnSpec<T> {
    /// Returns the display string of this column for `row`.
    pub fn display(&self, row: &T) -> String {
        let raw: CellValue = row.field(self.key);
        match &self.render {
            Some(render) => render(&raw, row),
            None => raw.display(),
        }
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// One selectable filter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOption {
    /// Text shown in the filter dropdown.
    pub label: String,
    /// Raw value compared against the filtered field.
    pub value: CellValue,
}

/// The filter dropdown of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    /// The record field compared against the chosen value.
    pub key: ColumnKey,
    /// The values a user can choose from.
    pub options: Vec<FilterOption>,
}

impl FilterSpec {
    /// Finds the option whose label or stringified value matches `raw`.
    #[must_use]
    pub fn find_option(&self, raw: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| {
            option.label.eq_ignore_ascii_case(raw) || option.value.display() == raw
        })
    }
}

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// The current sort column and direction.
///
/// Either both parts are set or neither is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    column: Option<ColumnKey>,
    direction: Option<SortDirection>,
}

impl SortState {
    /// The unsorted state: insertion order.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            column: None,
            direction: None,
        }
    }

    /// Sorts by `column` in `direction`.
    #[must_use]
    pub const fn by(column: ColumnKey, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction: Some(direction),
        }
    }

    /// Returns the sort column, if any.
    #[must_use]
    pub const fn column(&self) -> Option<ColumnKey> {
        self.column
    }

    /// Returns the sort direction, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Computes the state after clicking `column`: asc → desc → none,
    /// and a different column restarts at asc.
    #[must_use]
    pub fn toggled(self, column: ColumnKey) -> Self {
        match (self.column, self.direction) {
            (Some(current), Some(SortDirection::Asc)) if current == column => {
                Self::by(column, SortDirection::Desc)
            }
            (Some(current), Some(SortDirection::Desc)) if current == column => Self::unsorted(),
            _ => Self::by(column, SortDirection::Asc),
        }
    }
}

/// A column header ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedHeader {
    /// The record field.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header is clickable.
    pub sortable: bool,
    /// The direction this column is currently sorted in.
    pub sort: Option<SortDirection>,
}

/// One visible row of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    /// The record identifier.
    pub id: RecordId,
    /// One display string per column.
    pub cells: Vec<String>,
}

/// The body of a rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    /// At least one row matched.
    Rows {
        /// The visible rows in display order.
        rows: Vec<RenderedRow>,
    },
    /// Nothing matched: one row spanning every column.
    Placeholder {
        /// Number of columns the row spans.
        colspan: usize,
        /// Placeholder text.
        message: String,
    },
}

/// A table ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    /// Column headers in display order.
    pub headers: Vec<RenderedHeader>,
    /// Rows or the empty-state placeholder.
    pub body: TableBody,
}

/// A searchable, filterable, sortable view over a page of records.
///
/// The records are never reordered or mutated; every query computes a new
/// sequence of references.
#[derive(Debug, Clone)]
pub struct TabularView<T> {
    records: Vec<T>,
    columns: Vec<ColumnSpec<T>>,
    search_key: Option<ColumnKey>,
    filter_spec: Option<FilterSpec>,
    search_term: String,
    filter_value: Option<CellValue>,
    sort: SortState,
}

impl<T: Record> TabularView<T> {
    /// Creates a view with no search term, no filter and insertion order.
    ///
    /// # Arguments
    ///
    /// * `records` - The fetched page of records
    /// * `columns` - The columns in display order
    /// * `search_key` - The field free-text search matches against
    /// * `filter_spec` - The filter dropdown, if the table has one
    #[must_use]
    pub const fn new(
        records: Vec<T>,
        columns: Vec<ColumnSpec<T>>,
        search_key: Option<ColumnKey>,
        filter_spec: Option<FilterSpec>,
    ) -> Self {
        Self {
            records,
            columns,
            search_key,
            filter_spec,
            search_term: String::new(),
            filter_value: None,
            sort: SortState::unsorted(),
        }
    }

    /// Replaces the records, keeping search, filter and sort.
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Returns the records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Returns the column specs.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    /// Returns the filter dropdown, if any.
    #[must_use]
    pub const fn filter_spec(&self) -> Option<&FilterSpec> {
        self.filter_spec.as_ref()
    }

    /// Returns the current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the chosen filter value.
    #[must_use]
    pub const fn filter_value(&self) -> Option<&CellValue> {
        self.filter_value.as_ref()
    }

    /// Returns the current sort state.
    #[must_use]
    pub const fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Sets the free-text search term. An empty term disables search.
    pub fn set_search_term(&mut self, term: &str) {
        term.clone_into(&mut self.search_term);
    }

    /// Restricts rows to those whose filter field equals `value`.
    /// `None` clears the filter.
    pub fn set_filter(&mut self, value: Option<CellValue>) {
        self.filter_value = value;
    }

    /// Advances the sort state for `column`.
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, column: &str) {
        if let Some(key) = self.sortable_key(column) {
            self.sort = self.sort.toggled(key);
        }
    }

    /// Sets the sort state directly, e.g. from a query string.
    ///
    /// Unknown and non-sortable columns reset to insertion order.
    pub fn set_sort(&mut self, column: Option<&str>, direction: Option<SortDirection>) {
        self.sort = match (column.and_then(|c| self.sortable_key(c)), direction) {
            (Some(key), Some(direction)) => SortState::by(key, direction),
            (Some(key), None) => SortState::by(key, SortDirection::Asc),
            (None, _) => SortState::unsorted(),
        };
    }

    fn sortable_key(&self, column: &str) -> Option<ColumnKey> {
        self.columns
            .iter()
            .find(|spec| spec.sortable && spec.key == column)
            .map(|spec| spec.key)
    }

    /// Computes the visible rows: search, then filter, then sort.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&T> {
        let needle: String = self.search_term.to_lowercase();
        let mut rows: Vec<&T> = self
            .records
            .iter()
            .filter(|row| self.matches_search(row, &needle))
            .filter(|row| self.matches_filter(row))
            .collect();

        if let (Some(column), Some(direction)) = (self.sort.column(), self.sort.direction()) {
            rows.sort_by(|a, b| {
                let ordering: Ordering = compare_cells(&a.field(column), &b.field(column));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }

    fn matches_search(&self, row: &T, needle: &str) -> bool {
        match self.search_key {
            Some(key) if !needle.is_empty() => {
                row.field(key).display().to_lowercase().contains(needle)
            }
            _ => true,
        }
    }

    fn matches_filter(&self, row: &T) -> bool {
        match (&self.filter_spec, &self.filter_value) {
            (Some(spec), Some(value)) => row.field(spec.key) == *value,
            _ => true,
        }
    }

    /// Renders headers and the visible rows as display strings.
    ///
    /// An empty result renders a single placeholder spanning every column.
    #[must_use]
    pub fn render(&self) -> RenderedTable {
        let headers: Vec<RenderedHeader> = self
            .columns
            .iter()
            .map(|spec| RenderedHeader {
                key: spec.key.to_owned(),
                label: spec.label.clone(),
                sortable: spec.sortable,
                sort: if self.sort.column() == Some(spec.key) {
                    self.sort.direction()
                } else {
                    None
                },
            })
            .collect();

        let rows: Vec<RenderedRow> = self
            .visible_rows()
            .into_iter()
            .map(|row| RenderedRow {
                id: row.id(),
                cells: self.columns.iter().map(|spec| spec.display(row)).collect(),
            })
            .collect();

        let body: TableBody = if rows.is_empty() {
            TableBody::Placeholder {
                colspan: self.columns.len(),
                message: String::from(NO_DATA_MESSAGE),
            }
        } else {
            TableBody::Rows { rows }
        };

        RenderedTable { headers, body }
    }
}

/// Numbers compare numerically; everything else compares as lower-cased text.
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.display().to_lowercase().cmp(&b.display().to_lowercase()),
    }
}
