//! Symptom-vector encoding and the prediction-to-explanation pipeline.

pub mod classifier;
pub mod encoder;
pub mod error;
pub mod service;
pub mod types;

pub use classifier::{load_classifier, Classifier, ClassifierError, DenseNetwork};
pub use encoder::{encode, EncodedVector};
pub use error::PredictionError;
pub use service::PredictionService;
pub use types::{PredictionResult, SymptomSet};
