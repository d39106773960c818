use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "Symptom Triage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen ports for the three front-ends
pub const DEFAULT_API_PORT: u16 = 5000;
pub const DEFAULT_UI_PORT: u16 = 8501;
pub const DEFAULT_PROXY_UI_PORT: u16 = 8502;

/// Address the proxy UI posts predictions to
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Reference file names inside the data directory
pub const SYMPTOMS_FILE: &str = "symptoms_list.csv";
pub const DESCRIPTIONS_FILE: &str = "symptom_Description.csv";
pub const PRECAUTIONS_FILE: &str = "symptom_precaution.csv";
pub const MODEL_FILE: &str = "classifier.json";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_triage=info"
}

/// Locations of the four startup inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub symptoms: PathBuf,
    pub descriptions: PathBuf,
    pub precautions: PathBuf,
    pub model: PathBuf,
}

impl ReferencePaths {
    /// Default file names resolved inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            symptoms: dir.join(SYMPTOMS_FILE),
            descriptions: dir.join(DESCRIPTIONS_FILE),
            precautions: dir.join(PRECAUTIONS_FILE),
            model: dir.join(MODEL_FILE),
        }
    }
}
