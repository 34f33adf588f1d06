//! # motifmark - kinase consensus annotator
//!
//! Marks motif occurrences (by default the Aurora B kinase consensus site)
//! on a gapped protein sequence, scores each occurrence by its evolutionary
//! conservation and renders an annotated report.
//!
//! ## Architecture
//!
//! Each run is a single forward pipeline:
//! - `model`: residues, conservation levels and the sequence they form
//! - `motif`: pattern matching and group tagging
//! - `summary`: one scored record per motif occurrence
//! - `render`: row layout and the HTML report
//! - `input`: loading the sequence and its conservation labels from files
//! - `ui`, `event`, `controller`: terminal preview of a finished annotation
//!
//! ```
//! use motifmark::{annotate, motif::Motif, render::RenderOptions};
//!
//! let labels = ["yellow", "pink", "lightgreen", "white", "white", "yellow", "yellow", "yellow"];
//! let annotation = annotate("KAST-ILV", &labels, &Motif::aurora_b()).unwrap();
//! assert_eq!(annotation.records[0].literal, "KAST");
//! assert_eq!(annotation.records[0].score, 6);
//!
//! let html = annotation.render(&RenderOptions::default());
//! assert!(html.contains("1 KAST 6"));
//! ```

pub mod controller;
pub mod event;
pub mod input;
pub mod model;
pub mod motif;
pub mod render;
pub mod summary;
pub mod ui;

use thiserror::Error;

use model::{ModelError, Sequence};
use motif::{Motif, MotifError};
use render::RenderOptions;
use summary::MatchRecord;

/// Errors that can stop an annotation run.
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Motif(#[from] MotifError),
}

/// Result type for annotation runs.
pub type AnnotateResult<T> = Result<T, AnnotateError>;

/// A tagged sequence and its match records.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub sequence: Sequence,
    pub records: Vec<MatchRecord>,
}

impl Annotation {
    /// Renders the HTML report for this annotation.
    pub fn render(&self, options: &RenderOptions) -> String {
        render::render_document(&self.sequence, &self.records, options)
    }
}

/// Builds the sequence, marks `motif` on it and summarizes the matches.
pub fn annotate<S: AsRef<str>>(sequence: &str, labels: &[S], motif: &Motif) -> AnnotateResult<Annotation> {
    let sequence = motif.mark(Sequence::build(sequence, labels)?)?;
    let records = summary::summarize(&sequence);

    log::info!(
        "{} residues ({} ungapped), {} matches of {}",
        sequence.len(),
        sequence.ungapped_len(),
        records.len(),
        motif.pattern()
    );
    if log::log_enabled!(log::Level::Info) {
        if let Some(best) = summary::rank(&records).first() {
            log::info!("Best conserved match: {} at {} (score {})", best.literal, best.position, best.score);
        }
    }

    Ok(Annotation { sequence, records })
}

/// Like [`annotate`], compiling `pattern` first.
pub fn annotate_with_pattern<S: AsRef<str>>(
    sequence: &str,
    labels: &[S],
    pattern: &str,
) -> AnnotateResult<Annotation> {
    let motif = Motif::new(pattern)?;
    annotate(sequence, labels, &motif)
}
