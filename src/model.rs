//! Data model for the motif annotator.
//!
//! This module contains all data structures for representing:
//! - Residues and their conservation level
//! - The annotated sequence built from raw inputs
//! - Viewer state for the terminal preview
//!
//! A `Sequence` keeps the raw symbol string next to its residues so the
//! motif matcher can scan the gapped coordinate system directly.

use std::ops::Range;

use thiserror::Error;

use crate::summary::MatchRecord;

/// Alignment gap marker.
pub const GAP: char = '-';

/// Errors that can occur while building a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Sequence has {residues} residues but {labels} conservation labels were given")]
    InputMismatch { residues: usize, labels: usize },
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Evolutionary conservation of a single alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Conservation {
    /// Not conserved, or no recognizable label.
    #[default]
    NonConserved,
    Weak,
    Strong,
    Identical,
}

impl Conservation {
    /// All levels, lowest first.
    pub const ALL: [Conservation; 4] = [
        Conservation::NonConserved,
        Conservation::Weak,
        Conservation::Strong,
        Conservation::Identical,
    ];

    /// Maps a source label to a level. Unknown labels are not conserved.
    pub fn from_label(label: &str) -> Self {
        match label {
            "yellow" => Conservation::Identical,
            "pink" => Conservation::Strong,
            "lightgreen" => Conservation::Weak,
            _ => Conservation::NonConserved,
        }
    }

    /// Numeric rank used when scoring matches.
    pub fn score(self) -> u32 {
        match self {
            Conservation::NonConserved => 0,
            Conservation::Weak => 1,
            Conservation::Strong => 2,
            Conservation::Identical => 3,
        }
    }
}

/// One position of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    /// The sequence letter (may be the gap marker)
    pub symbol: char,
    /// Conservation level at this position
    pub conservation: Conservation,
    group: Option<usize>,
}

impl Residue {
    /// Creates an untagged residue.
    pub fn new(symbol: char, conservation: Conservation) -> Self {
        Self {
            symbol,
            conservation,
            group: None,
        }
    }

    /// Returns true for the gap marker.
    pub fn is_gap(&self) -> bool {
        self.symbol == GAP
    }

    /// Conservation score, always derived from the level.
    pub fn score(&self) -> u32 {
        self.conservation.score()
    }

    /// Motif group covering this residue, if any.
    pub fn group(&self) -> Option<usize> {
        self.group
    }
}

/// An ordered run of residues built from a raw sequence and its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    raw: String,
    residues: Vec<Residue>,
    group_count: usize,
}

impl Sequence {
    /// Builds a sequence, pairing each character with the label at the same
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use motifmark::model::{Conservation, Sequence};
    ///
    /// let seq = Sequence::build("KA-S", &["yellow", "pink", "", "lightgreen"]).unwrap();
    /// assert_eq!(seq.len(), 4);
    /// assert_eq!(seq.get(0).unwrap().conservation, Conservation::Identical);
    /// ```
    pub fn build<S: AsRef<str>>(sequence: &str, labels: &[S]) -> ModelResult<Self> {
        let residue_count = sequence.chars().count();
        if residue_count != labels.len() {
            return Err(ModelError::InputMismatch {
                residues: residue_count,
                labels: labels.len(),
            });
        }

        let mut unrecognized = 0;
        let residues: Vec<Residue> = sequence
            .chars()
            .zip(labels)
            .map(|(symbol, label)| {
                let label = label.as_ref();
                let conservation = Conservation::from_label(label);
                if conservation == Conservation::NonConserved && !label.is_empty() && label != "white" {
                    unrecognized += 1;
                }
                Residue::new(symbol, conservation)
            })
            .collect();

        if unrecognized > 0 {
            log::debug!("{} conservation labels not recognized, treated as non-conserved", unrecognized);
        }

        Ok(Self {
            raw: sequence.to_string(),
            residues,
            group_count: 0,
        })
    }

    /// Returns the number of residues (gaps included).
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// The raw symbol string, gaps included.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Gets a residue by index.
    pub fn get(&self, index: usize) -> Option<&Residue> {
        self.residues.get(index)
    }

    /// All residues in order.
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Number of non-gap residues.
    pub fn ungapped_len(&self) -> usize {
        self.residues.iter().filter(|r| !r.is_gap()).count()
    }

    /// Number of motif groups tagged so far. Also the next unused group id.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Tags every residue in `range` with a fresh group id and returns it.
    ///
    /// Spans must be disjoint and come in left-to-right order.
    pub(crate) fn tag_span(&mut self, range: Range<usize>) -> usize {
        let group = self.group_count;
        let end = range.end.min(self.residues.len());
        let start = range.start.min(end);
        for residue in &mut self.residues[start..end] {
            residue.group = Some(group);
        }
        self.group_count += 1;
        group
    }
}

/// State of the terminal preview.
#[derive(Debug)]
pub struct ViewerState {
    /// Annotated sequence
    pub sequence: Sequence,
    /// Match records, in discovery order
    pub records: Vec<MatchRecord>,
    /// Cells per row
    pub row_width: usize,
    /// Index of the first visible row
    pub first_row: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Whether the viewer should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl ViewerState {
    /// Creates a viewer over an annotated sequence.
    pub fn new(sequence: Sequence, records: Vec<MatchRecord>, row_width: usize) -> Self {
        let status_message = Some(format!("{} motif matches", records.len()));
        Self {
            sequence,
            records,
            row_width: row_width.max(1),
            first_row: 0,
            visible_rows: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Total number of rows in the annotated view.
    pub fn row_count(&self) -> usize {
        self.sequence.ungapped_len().div_ceil(self.row_width)
    }

    /// Updates the number of visible rows.
    pub fn update_viewport_size(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.clamp();
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.first_row = self.first_row.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.first_row += rows;
        self.clamp();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_rows.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_rows.max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.visible_rows / 2).max(1));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.visible_rows / 2).max(1));
    }

    pub fn goto_top(&mut self) {
        self.first_row = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.first_row = self.max_first_row();
    }

    /// Scrolls to the first motif starting on a row after the first visible one.
    pub fn next_match(&mut self) {
        let current = self.first_row;
        let target = self.match_rows().find(|&row| row > current);
        self.jump_to(target);
    }

    /// Scrolls to the last motif starting on a row before the first visible one.
    pub fn previous_match(&mut self) {
        let current = self.first_row;
        let target = self.match_rows().filter(|&row| row < current).last();
        self.jump_to(target);
    }

    /// Moves to `row`, clamped to the last full page. A jump that would
    /// leave the view where it is counts as no match.
    fn jump_to(&mut self, row: Option<usize>) {
        match row.map(|row| row.min(self.max_first_row())) {
            Some(row) if row != self.first_row => {
                self.first_row = row;
                self.status_message = None;
            }
            _ => self.status_message = Some("No more motif matches".to_string()),
        }
    }

    /// Rows holding the first cell of each match, in order.
    fn match_rows(&self) -> impl Iterator<Item = usize> + '_ {
        // A match starting on a gap shares its position with the residue before it.
        self.records
            .iter()
            .map(|record| record.position.saturating_sub(1) / self.row_width)
    }

    fn max_first_row(&self) -> usize {
        self.row_count().saturating_sub(self.visible_rows.max(1))
    }

    fn clamp(&mut self) {
        self.first_row = self.first_row.min(self.max_first_row());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservation_from_label() {
        assert_eq!(Conservation::from_label("yellow"), Conservation::Identical);
        assert_eq!(Conservation::from_label("pink"), Conservation::Strong);
        assert_eq!(Conservation::from_label("lightgreen"), Conservation::Weak);
        assert_eq!(Conservation::from_label("white"), Conservation::NonConserved);
        assert_eq!(Conservation::from_label(""), Conservation::NonConserved);
        assert_eq!(Conservation::from_label("Yellow"), Conservation::NonConserved);
    }

    #[test]
    fn test_conservation_scores() {
        let scores: Vec<u32> = Conservation::ALL.iter().map(|c| c.score()).collect();
        assert_eq!(scores, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_build_sequence() {
        let seq = Sequence::build("KAST-ILV", &["yellow", "pink", "lightgreen", "white", "white", "yellow", "yellow", "yellow"]).unwrap();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.as_str(), "KAST-ILV");
        assert_eq!(seq.ungapped_len(), 7);
        assert!(seq.get(4).unwrap().is_gap());
        assert_eq!(seq.get(1).unwrap().score(), 2);
        assert!(seq.residues().iter().all(|r| r.group().is_none()));
        assert_eq!(seq.group_count(), 0);
    }

    #[test]
    fn test_build_keeps_case_and_unknown_symbols() {
        let seq = Sequence::build("ka*X", &["", "", "", ""]).unwrap();
        let symbols: String = seq.residues().iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, "ka*X");
    }

    #[test]
    fn test_build_length_mismatch() {
        let result = Sequence::build("KAST", &["yellow", "pink"]);
        assert_eq!(result, Err(ModelError::InputMismatch { residues: 4, labels: 2 }));

        let result = Sequence::build("", &["yellow"]);
        assert!(matches!(result, Err(ModelError::InputMismatch { .. })));
    }

    #[test]
    fn test_build_empty() {
        let labels: [&str; 0] = [];
        let seq = Sequence::build("", &labels).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_tag_span_numbers_groups() {
        let mut seq = Sequence::build("KASTKASI", &["", "", "", "", "", "", "", ""]).unwrap();
        assert_eq!(seq.tag_span(0..3), 0);
        assert_eq!(seq.tag_span(4..20), 1);
        assert_eq!(seq.get(2).unwrap().group(), Some(0));
        assert_eq!(seq.get(3).unwrap().group(), None);
        assert_eq!(seq.get(7).unwrap().group(), Some(1));
        assert_eq!(seq.group_count(), 2);
    }

    fn viewer(len: usize, match_positions: &[usize]) -> ViewerState {
        let raw = "A".repeat(len);
        let labels = vec![""; len];
        let seq = Sequence::build(&raw, &labels).unwrap();
        let records = match_positions
            .iter()
            .enumerate()
            .map(|(group, &position)| MatchRecord {
                group,
                start: position - 1,
                end: position + 3,
                position,
                literal: "AAAA".to_string(),
                score: 0,
            })
            .collect();
        ViewerState::new(seq, records, 10)
    }

    #[test]
    fn test_viewer_scrolling() {
        let mut state = viewer(95, &[]);
        assert_eq!(state.row_count(), 10);
        state.update_viewport_size(4);

        state.scroll_down(1);
        assert_eq!(state.first_row, 1);
        state.page_down();
        assert_eq!(state.first_row, 5);
        state.page_down();
        assert_eq!(state.first_row, 6); // clamped: last 4 rows visible
        state.goto_top();
        assert_eq!(state.first_row, 0);
        state.scroll_up(3);
        assert_eq!(state.first_row, 0);
        state.goto_bottom();
        assert_eq!(state.first_row, 6);
    }

    #[test]
    fn test_viewer_match_navigation() {
        let mut state = viewer(200, &[5, 31, 150]);
        state.update_viewport_size(3);

        state.next_match();
        assert_eq!(state.first_row, 3);
        state.next_match();
        assert_eq!(state.first_row, 14);
        assert!(state.status_message.is_none());

        state.next_match();
        assert_eq!(state.first_row, 14);
        assert_eq!(state.status_message.as_deref(), Some("No more motif matches"));

        state.previous_match();
        assert_eq!(state.first_row, 3);
        state.previous_match();
        assert_eq!(state.first_row, 0);
    }

    #[test]
    fn test_next_match_stops_at_last_page() {
        let mut state = viewer(200, &[155, 175, 195]);
        state.update_viewport_size(5);

        state.next_match();
        assert_eq!(state.first_row, 15);
        assert!(state.status_message.is_none());

        // Rows 17 and 19 are already on screen.
        state.next_match();
        assert_eq!(state.first_row, 15);
        assert_eq!(state.status_message.as_deref(), Some("No more motif matches"));
        state.next_match();
        assert_eq!(state.first_row, 15);
        assert_eq!(state.status_message.as_deref(), Some("No more motif matches"));
    }
}
