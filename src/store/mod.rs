// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence for the three top-level collections. Every function takes the
//! connection it runs on; callers own opening and closing it.

pub mod assembly;
pub mod loans;
pub mod records;
pub mod settings;

use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;

/// Reads a TEXT decimal column, surfacing bad data as a conversion failure on
/// that column rather than silently zeroing it.
pub(crate) fn row_decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
