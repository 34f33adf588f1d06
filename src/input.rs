//! Input loading.
//!
//! Reads the two inputs of an annotation run from local files:
//! - the gapped sequence, from a FASTA file (one or more records)
//! - the conservation labels, one label per line
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! MKAST-ILV...
//! >another_sequence
//! MRGS--TLV...
//! ```
//!
//! Gap characters and letter case are kept as-is so the sequence stays in
//! register with its labels.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading inputs.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("No sequence with identifier '{0}'")]
    RecordNotFound(String),
}

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// One FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The sequence data, gaps included
    pub data: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }
}

/// Parses FASTA content from a string.
///
/// Handles multi-line sequences; whitespace inside sequence lines is
/// dropped. Records with no sequence data are skipped.
pub fn parse_fasta_str(content: &str) -> InputResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut current_id: Option<&str> = None;
    let mut current_seq = String::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            // Save previous sequence if exists
            if let Some(id) = current_id.take() {
                if !current_seq.is_empty() {
                    records.push(Record::new(id, std::mem::take(&mut current_seq)));
                }
            }

            // Take everything before first space as ID
            let id = header.split_whitespace().next().unwrap_or(header);

            if id.is_empty() {
                return Err(InputError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id);
            current_seq.clear();
        } else {
            if current_id.is_none() {
                return Err(InputError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    // Don't forget the last sequence
    if let Some(id) = current_id {
        if !current_seq.is_empty() {
            records.push(Record::new(id, current_seq));
        }
    }

    if records.is_empty() {
        return Err(InputError::EmptyFile);
    }

    Ok(records)
}

/// Picks the record named `id`, or the first record when `id` is `None`.
pub fn select_record(records: Vec<Record>, id: Option<&str>) -> InputResult<Record> {
    match id {
        Some(id) => records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| InputError::RecordNotFound(id.to_string())),
        None => records.into_iter().next().ok_or(InputError::EmptyFile),
    }
}

/// Reads one sequence from a FASTA file.
pub fn read_sequence<P: AsRef<Path>>(path: P, id: Option<&str>) -> InputResult<Record> {
    let content = fs::read_to_string(&path)?;
    let records = parse_fasta_str(&content)?;
    log::debug!(
        "Read {} FASTA records from {}",
        records.len(),
        path.as_ref().display()
    );
    select_record(records, id)
}

/// Parses conservation labels, one per line.
///
/// Surrounding whitespace is trimmed. Blank lines are kept as empty labels
/// so that unlabelled positions stay in register with the sequence.
pub fn parse_labels_str(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}

/// Reads conservation labels from a file.
pub fn read_labels<P: AsRef<Path>>(path: P) -> InputResult<Vec<String>> {
    let content = fs::read_to_string(&path)?;
    let labels = parse_labels_str(&content);
    log::debug!("Read {} labels from {}", labels.len(), path.as_ref().display());
    Ok(labels)
}
