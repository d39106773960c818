//! Static reference data: symptom vocabulary, disease labels and the
//! description/precaution tables. Loaded once at startup, read-only after.

pub mod csv;
pub mod explanations;
pub mod labels;
pub mod vocabulary;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use explanations::{Explanation, ExplanationTables, DESCRIPTION_NOT_FOUND};
pub use labels::{DiseaseLabels, DISEASE_LABELS, UNKNOWN_DISEASE};
pub use vocabulary::SymptomVocabulary;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV syntax error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Duplicate symptom in vocabulary: {0}")]
    DuplicateSymptom(String),

    #[error("Blank symptom name at vocabulary position {position}")]
    BlankSymptom { position: usize },

    #[error("Symptom vocabulary is empty")]
    EmptyVocabulary,
}

/// Read a reference file into memory, attaching the path to I/O failures.
pub(crate) fn read_to_string(path: &Path) -> Result<String, ReferenceError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
