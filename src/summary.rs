//! Match summaries.
//!
//! Walks a tagged sequence once and folds each motif group into a
//! `MatchRecord` holding its position, literal and conservation score.

use crate::model::Sequence;

/// One motif occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Group id assigned by the matcher
    pub group: usize,
    /// First residue index of the match (gaps counted)
    pub start: usize,
    /// One past the last residue index of the match
    pub end: usize,
    /// 1-based ungapped position of the match start
    pub position: usize,
    /// Symbols of the match, gaps included
    pub literal: String,
    /// Sum of conservation scores over the match
    pub score: u32,
}

impl MatchRecord {
    fn open(group: usize, index: usize, position: usize, symbol: char, score: u32) -> Self {
        Self {
            group,
            start: index,
            end: index + 1,
            position,
            literal: symbol.to_string(),
            score,
        }
    }

    fn extend(&mut self, index: usize, symbol: char, score: u32) {
        self.end = index + 1;
        self.literal.push(symbol);
        self.score += score;
    }
}

/// Builds one record per motif group, in discovery order.
///
/// The position counter advances on every non-gap residue before the
/// residue's group is examined. A match starting on a gap therefore reports
/// the position of the last residue before it, and gaps inside a match are
/// folded into its literal and score like any other residue.
pub fn summarize(sequence: &Sequence) -> Vec<MatchRecord> {
    let mut records: Vec<MatchRecord> = Vec::with_capacity(sequence.group_count());
    let mut non_gap_count = 0;
    let mut current_group: Option<usize> = None;

    for (index, residue) in sequence.residues().iter().enumerate() {
        if !residue.is_gap() {
            non_gap_count += 1;
        }

        let Some(group) = residue.group() else {
            continue;
        };

        if current_group == Some(group) {
            if let Some(record) = records.last_mut() {
                record.extend(index, residue.symbol, residue.score());
                continue;
            }
        }

        records.push(MatchRecord::open(
            group,
            index,
            non_gap_count,
            residue.symbol,
            residue.score(),
        ));
        current_group = Some(group);
    }

    records
}

/// Orders records by descending score, ties by ascending position.
pub fn rank(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    let mut ranked: Vec<&MatchRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
    ranked
}
