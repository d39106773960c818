//! Disease description and precaution tables.
//!
//! Both tables are keyed by the exact disease name produced by
//! [`DiseaseLabels`](super::DiseaseLabels). When a disease has several rows
//! the first one wins. A missing row is not an error: the description falls
//! back to [`DESCRIPTION_NOT_FOUND`] and the precautions to an empty list.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::csv::CsvTable;
use super::{read_to_string, ReferenceError};

pub const DESCRIPTION_NOT_FOUND: &str = "Description not found.";

/// Precaution columns, in emission order.
const PRECAUTION_COLUMNS: [&str; 4] = [
    "Precaution_1",
    "Precaution_2",
    "Precaution_3",
    "Precaution_4",
];

/// Human-readable text attached to a predicted disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub description: String,
    pub precautions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExplanationTables {
    descriptions: HashMap<String, String>,
    precautions: HashMap<String, Vec<String>>,
}

impl ExplanationTables {
    /// Build from parsed description (`Disease`, `Description`) and
    /// precaution (`Disease`, `Precaution_1..4`) tables.
    pub fn from_tables(
        descriptions: &CsvTable,
        precautions: &CsvTable,
    ) -> Result<Self, ReferenceError> {
        let mut tables = Self::default();

        let disease_col = descriptions.column("Disease")?;
        let description_col = descriptions.column("Description")?;
        for row in descriptions.rows() {
            let Some(disease) = row.get(disease_col).filter(|d| !d.trim().is_empty()) else {
                continue;
            };
            let description = row.get(description_col).unwrap_or_default();
            tables
                .descriptions
                .entry(disease.to_string())
                .or_insert_with(|| description.to_string());
        }

        let disease_col = precautions.column("Disease")?;
        // A table without some Precaution_N column just never yields that field.
        let precaution_cols: Vec<usize> = PRECAUTION_COLUMNS
            .iter()
            .filter_map(|name| precautions.optional_column(name))
            .collect();
        if precaution_cols.is_empty() {
            return Err(ReferenceError::MissingColumn(PRECAUTION_COLUMNS[0].into()));
        }
        for row in precautions.rows() {
            let Some(disease) = row.get(disease_col).filter(|d| !d.trim().is_empty()) else {
                continue;
            };
            let present: Vec<String> = precaution_cols
                .iter()
                .filter_map(|&col| row.get(col))
                .filter(|cell| !cell.trim().is_empty())
                .map(str::to_string)
                .collect();
            tables
                .precautions
                .entry(disease.to_string())
                .or_insert(present);
        }

        Ok(tables)
    }

    /// Parse both tables from CSV text.
    pub fn parse(descriptions_csv: &str, precautions_csv: &str) -> Result<Self, ReferenceError> {
        let descriptions = CsvTable::parse(descriptions_csv)?;
        let precautions = CsvTable::parse(precautions_csv)?;
        Self::from_tables(&descriptions, &precautions)
    }

    /// Load both reference tables from disk.
    pub fn load(descriptions_path: &Path, precautions_path: &Path) -> Result<Self, ReferenceError> {
        let descriptions_csv = read_to_string(descriptions_path)?;
        let precautions_csv = read_to_string(precautions_path)?;
        let tables = Self::parse(&descriptions_csv, &precautions_csv)?;
        tracing::info!(
            descriptions = tables.descriptions.len(),
            precautions = tables.precautions.len(),
            "Explanation tables loaded"
        );
        Ok(tables)
    }

    pub fn description(&self, disease: &str) -> &str {
        self.descriptions
            .get(disease)
            .map(String::as_str)
            .unwrap_or(DESCRIPTION_NOT_FOUND)
    }

    pub fn precautions(&self, disease: &str) -> &[String] {
        self.precautions
            .get(disease)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn lookup(&self, disease: &str) -> Explanation {
        Explanation {
            description: self.description(disease).to_string(),
            precautions: self.precautions(disease).to_vec(),
        }
    }
}
