//! Cell canonicalization: heterogeneous spreadsheet values become a
//! deterministic string grid before anything is hashed.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// One raw cell as handed over by the ingestion layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// A tab whose cells have been canonicalized.
///
/// Row and column order is part of the commitment; rows are never
/// filtered or reordered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CanonicalTab {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Canonical string form of one cell.
///
/// Empty cells render as the empty string. Numbers with no fractional
/// part render as plain base-10 integers; all other numbers render with
/// exactly two fractional digits, rounded half away from zero. Text is
/// trimmed and NFC-normalized, which makes the function idempotent on
/// already-canonical strings.
pub fn canonicalize(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Int(v) => v.to_string(),
        Cell::Float(v) => canonical_float(*v),
        Cell::Bool(v) => v.to_string(),
        Cell::Text(s) => s.trim().nfc().collect(),
    }
}

fn canonical_float(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    // Integral values render without a fractional part.
    if v == v.trunc() && v.abs() < i64::MAX as f64 {
        return (v as i64).to_string();
    }
    // Fixed-point with two fractional digits, half away from zero.
    let cents = (v.abs() * 100.0 + 0.5).floor() as i128;
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

/// Canonicalize every cell, preserving the grid shape.
pub fn canonicalize_grid(grid: &[Vec<Cell>]) -> Vec<Vec<String>> {
    grid.iter()
        .map(|row| row.iter().map(canonicalize).collect())
        .collect()
}

impl CanonicalTab {
    pub fn new(name: impl Into<String>, grid: &[Vec<Cell>]) -> Self {
        Self {
            name: name.into(),
            rows: canonicalize_grid(grid),
        }
    }

    /// Deterministic byte encoding of `{name, rows}`.
    ///
    /// serde_json writes struct fields in declaration order, so identical
    /// tabs always serialize to identical bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("in-memory serialization")
    }
}
