use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Caller-supplied symptom names. Unrecognized names are kept here and
/// ignored by encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomSet(BTreeSet<String>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Outcome of one prediction, serialized verbatim as the `/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease_name: String,
    /// Rounded to two decimals.
    pub probability: f64,
    pub description: String,
    pub home_care: Vec<String>,
}

impl PredictionResult {
    /// Probability as a percentage string with two decimals, e.g. `"91.00"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}", self.probability * 100.0)
    }
}
