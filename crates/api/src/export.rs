// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of rendered tables.

use crate::error::ApiError;
use ceutro::{RenderedTable, TableBody};

/// Writes the visible rows of `table` as CSV.
///
/// The first record holds the column labels. A table showing the empty-state
/// placeholder exports the header record only.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV writer fails.
pub fn export_table_csv(table: &RenderedTable) -> Result<String, ApiError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.headers.iter().map(|header| header.label.as_str()))?;
    if let TableBody::Rows { rows } = &table.body {
        for row in rows {
            writer.write_record(&row.cells)?;
        }
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("CSV export failed: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV export produced invalid UTF-8: {e}"),
    })
}
