//! Motif matching.
//!
//! A `Motif` wraps a compiled pattern and tags every residue covered by one
//! of its matches. Matching runs over the raw symbol string, gaps included,
//! using the regex engine's leftmost-first, non-overlapping scan: a match
//! resumes the scan at its end, so two groups never share a residue.

use regex::Regex;
use thiserror::Error;

use crate::model::Sequence;

/// Aurora B kinase consensus site: `[KR]`, any residue, `[ST]`, `[ILV]`.
pub const AURORA_B: &str = "[KR].[ST][ILV]";

/// Errors that can occur while preparing a motif.
#[derive(Error, Debug)]
pub enum MotifError {
    #[error("Invalid motif pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Sequence already carries {groups} motif groups; mark a freshly built sequence")]
    AlreadyMarked { groups: usize },
}

/// Result type for motif operations.
pub type MotifResult<T> = Result<T, MotifError>;

/// A compiled motif pattern.
#[derive(Debug, Clone)]
pub struct Motif {
    regex: Regex,
}

impl Motif {
    /// Compiles a motif pattern.
    pub fn new(pattern: &str) -> MotifResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| MotifError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// The Aurora B kinase consensus motif.
    pub fn aurora_b() -> Self {
        Self {
            regex: Regex::new(AURORA_B).expect("Aurora B pattern is valid"),
        }
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Tags each match in `sequence` with the next unused group id, starting
    /// at 0, and returns the tagged sequence.
    ///
    /// Empty matches cover no residue and are not assigned a group. A
    /// sequence that already holds groups is rejected untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use motifmark::model::Sequence;
    /// use motifmark::motif::Motif;
    ///
    /// let seq = Sequence::build("AKASIA", &["", "", "", "", "", ""]).unwrap();
    /// let seq = Motif::aurora_b().mark(seq).unwrap();
    /// assert_eq!(seq.get(1).unwrap().group(), Some(0));
    /// assert_eq!(seq.get(0).unwrap().group(), None);
    /// ```
    pub fn mark(&self, mut sequence: Sequence) -> MotifResult<Sequence> {
        if sequence.group_count() > 0 {
            return Err(MotifError::AlreadyMarked {
                groups: sequence.group_count(),
            });
        }

        let spans: Vec<(usize, usize)> = {
            let raw = sequence.as_str();
            // Byte offset of every residue; regex offsets are in bytes.
            let offsets: Vec<usize> = raw.char_indices().map(|(b, _)| b).collect();
            self.regex
                .find_iter(raw)
                .filter(|m| !m.is_empty())
                .map(|m| {
                    let start = offsets.partition_point(|&b| b < m.start());
                    let end = offsets.partition_point(|&b| b < m.end());
                    (start, end)
                })
                .collect()
        };

        for (start, end) in spans {
            let group = sequence.tag_span(start..end);
            log::debug!("motif group {} at residues {}..{}", group, start, end);
        }

        Ok(sequence)
    }
}

/// Compiles `pattern` and marks its matches on `sequence`.
///
/// Fails before touching the sequence if the pattern does not compile.
pub fn mark(sequence: Sequence, pattern: &str) -> MotifResult<Sequence> {
    let motif = Motif::new(pattern)?;
    motif.mark(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlabeled(raw: &str) -> Sequence {
        let labels = vec![""; raw.chars().count()];
        Sequence::build(raw, &labels).unwrap()
    }

    fn groups(seq: &Sequence) -> Vec<Option<usize>> {
        seq.residues().iter().map(|r| r.group()).collect()
    }

    #[test]
    fn test_single_match() {
        let seq = Motif::aurora_b().mark(unlabeled("KAST-ILV")).unwrap();
        assert_eq!(
            groups(&seq),
            vec![Some(0), Some(0), Some(0), Some(0), None, None, None, None]
        );
        assert_eq!(seq.group_count(), 1);
    }

    #[test]
    fn test_no_match() {
        let seq = Motif::aurora_b().mark(unlabeled("AAAAAAA")).unwrap();
        assert!(groups(&seq).iter().all(Option::is_none));
        assert_eq!(seq.group_count(), 0);
    }

    #[test]
    fn test_groups_in_discovery_order() {
        let seq = Motif::aurora_b().mark(unlabeled("RGSLAAKKTV")).unwrap();
        assert_eq!(
            groups(&seq),
            vec![
                Some(0), Some(0), Some(0), Some(0),
                None, None,
                Some(1), Some(1), Some(1), Some(1),
            ]
        );
        assert_eq!(seq.group_count(), 2);
    }

    #[test]
    fn test_leftmost_first_skips_overlap() {
        // Candidates at 0..3 and 2..5 overlap; only the first is kept.
        let seq = mark(unlabeled("ABABA"), "ABA").unwrap();
        assert_eq!(groups(&seq), vec![Some(0), Some(0), Some(0), None, None]);
        assert_eq!(seq.group_count(), 1);
    }

    #[test]
    fn test_adjacent_matches_get_distinct_groups() {
        let seq = Motif::aurora_b().mark(unlabeled("KASIRGTV")).unwrap();
        assert_eq!(
            groups(&seq),
            vec![Some(0), Some(0), Some(0), Some(0), Some(1), Some(1), Some(1), Some(1)]
        );
    }

    #[test]
    fn test_match_spans_gap() {
        let seq = mark(unlabeled("K-AST"), "K-?A.T").unwrap();
        assert_eq!(groups(&seq), vec![Some(0); 5]);
    }

    #[test]
    fn test_gap_blocks_fixed_width_motif() {
        // The gap is a literal character for the pattern.
        let seq = Motif::aurora_b().mark(unlabeled("KA-SI")).unwrap();
        assert_eq!(seq.group_count(), 0);
    }

    #[test]
    fn test_custom_pattern() {
        let seq = mark(unlabeled("AAGGAAGG"), "GG").unwrap();
        assert_eq!(
            groups(&seq),
            vec![None, None, Some(0), Some(0), None, None, Some(1), Some(1)]
        );
    }

    #[test]
    fn test_empty_matches_ignored() {
        let seq = mark(unlabeled("AKA"), "K*").unwrap();
        assert_eq!(groups(&seq), vec![None, Some(0), None]);
        assert_eq!(seq.group_count(), 1);
    }

    #[test]
    fn test_multibyte_symbols() {
        let seq = mark(unlabeled("éKASIé"), AURORA_B).unwrap();
        assert_eq!(
            groups(&seq),
            vec![None, Some(0), Some(0), Some(0), Some(0), None]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let result = mark(unlabeled("KASI"), "[KR");
        match result {
            Err(MotifError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "[KR"),
            other => panic!("expected invalid pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_second_mark_rejected() {
        let seq = mark(unlabeled("AAAARGSVAKASI"), "KASI").unwrap();
        let before = groups(&seq);

        let result = Motif::aurora_b().mark(seq.clone());
        assert!(matches!(result, Err(MotifError::AlreadyMarked { groups: 1 })));
        assert_eq!(groups(&seq), before);
        assert_eq!(seq.group_count(), 1);
    }

    #[test]
    fn test_unmatched_sequence_can_be_marked_again() {
        let seq = mark(unlabeled("AAAARGSV"), "KASI").unwrap();
        let seq = Motif::aurora_b().mark(seq).unwrap();
        assert_eq!(
            groups(&seq),
            vec![None, None, None, None, Some(0), Some(0), Some(0), Some(0)]
        );
    }

    #[test]
    fn test_pattern_accessor() {
        assert_eq!(Motif::aurora_b().pattern(), AURORA_B);
        assert_eq!(Motif::new("GG").unwrap().pattern(), "GG");
    }
}
