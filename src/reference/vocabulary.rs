use std::collections::HashMap;
use std::path::Path;

use super::csv::parse_records;
use super::{read_to_string, ReferenceError};

/// Ordered list of the symptom names the classifier was trained on.
///
/// Position is the contract: `names()[i]` feeds input `i` of the model,
/// so the order must match the one used at training time.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Build from names in model-input order. Names are trimmed; a blank
    /// name is an error since every entry owns one model input.
    pub fn new<I, S>(names: I) -> Result<Self, ReferenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut positions = HashMap::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ReferenceError::BlankSymptom {
                    position: ordered.len(),
                });
            }
            if positions.insert(name.to_string(), ordered.len()).is_some() {
                return Err(ReferenceError::DuplicateSymptom(name.to_string()));
            }
            ordered.push(name.to_string());
        }

        if ordered.is_empty() {
            return Err(ReferenceError::EmptyVocabulary);
        }

        Ok(Self {
            names: ordered,
            positions,
        })
    }

    /// Parse a symptom list: one symptom per row, first CSV column.
    ///
    /// Every data row is one position, so a row with an empty first cell
    /// is rejected with its line number rather than dropped.
    pub fn parse(text: &str, has_header: bool) -> Result<Self, ReferenceError> {
        let records = parse_records(text)?;
        let skip = usize::from(has_header);

        let mut names = Vec::with_capacity(records.len().saturating_sub(skip));
        for record in records.into_iter().skip(skip) {
            match record.get(0).map(str::trim) {
                Some(name) if !name.is_empty() => names.push(name.to_string()),
                _ => {
                    return Err(ReferenceError::Csv {
                        line: record.line,
                        message: "empty symptom name".into(),
                    })
                }
            }
        }
        Self::new(names)
    }

    /// Load the symptom-list reference file (header row skipped).
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let text = read_to_string(path)?;
        let vocabulary = Self::parse(&text, true)?;
        tracing::info!(
            path = %path.display(),
            symptoms = vocabulary.len(),
            "Symptom vocabulary loaded"
        );
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}
