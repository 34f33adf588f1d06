//! Report rendering.
//!
//! Rendering is split in two steps:
//! - `layout_rows` turns a tagged sequence into display rows, dropping gaps
//!   and breaking every `row_width` cells
//! - a backend turns rows and match records into markup (`html`) or
//!   terminal lines (`crate::ui`)
//!
//! Both steps are pure: the same inputs always give the same output.

pub mod html;

use crate::model::{Conservation, Sequence};
use crate::summary::MatchRecord;

/// Default number of cells per row in the annotated view.
pub const ROW_WIDTH: usize = 60;

/// Explains the report colors.
pub const LEGEND: &str = "Hello! This is your kinase consensus data. \
Colored amino acids mark relative conservation. Gold means that it was identically \
conserved across species inspected, pink means strongly conserved, green means weakly \
conserved, and white is non-conserved.";

/// Explains the fields of each summary line.
pub const SUMMARY_KEY: &str =
    "Consensus list key, for list below: consensus seq. location; consensus sequence; consensus rank";

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Cells per annotated row
    pub row_width: usize,
    /// Append the matches ranked by score
    pub ranked: bool,
    /// Document title
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            row_width: ROW_WIDTH,
            ranked: false,
            title: "Kinase consensus search".to_string(),
        }
    }
}

/// One displayed residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub conservation: Conservation,
    /// Whether a motif match covers this residue
    pub in_motif: bool,
}

/// One row of the annotated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based ungapped position of the first cell
    pub position: usize,
    pub cells: Vec<Cell>,
}

/// Lays out the non-gap residues of `sequence` in rows of `row_width` cells.
///
/// Row breaks depend only on the number of displayed cells, so a motif may
/// straddle two rows. A zero width is treated as one.
pub fn layout_rows(sequence: &Sequence, row_width: usize) -> Vec<Row> {
    let row_width = row_width.max(1);
    let mut rows: Vec<Row> = Vec::with_capacity(sequence.ungapped_len().div_ceil(row_width));
    let mut displayed = 0;

    for residue in sequence.residues().iter().filter(|r| !r.is_gap()) {
        if displayed % row_width == 0 {
            rows.push(Row {
                position: displayed + 1,
                cells: Vec::with_capacity(row_width),
            });
        }
        if let Some(row) = rows.last_mut() {
            row.cells.push(Cell {
                symbol: residue.symbol,
                conservation: residue.conservation,
                in_motif: residue.group().is_some(),
            });
        }
        displayed += 1;
    }

    rows
}

/// Renders the full report: legend, summary listing, then annotated view.
pub fn render_document(sequence: &Sequence, records: &[MatchRecord], options: &RenderOptions) -> String {
    let rows = layout_rows(sequence, options.row_width);
    html::document(&rows, records, options)
}
