//! Classifier seam: symptom vector in, per-class probabilities out.
//!
//! The model itself is opaque to the rest of the crate. Two backends:
//! - [`DenseNetwork`]: pure-Rust feed-forward network read from a JSON
//!   export of the trained weights (always available)
//! - `OnnxClassifier`: ONNX Runtime session, behind the
//!   `onnx-classifier` feature

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model artifact not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Model initialization: {0}")]
    ModelInit(String),

    #[error("Input shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A pretrained multi-class classifier.
///
/// `predict` is called once per request, possibly from several threads.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError>;

    /// Input width the model was trained with, when known.
    fn input_width(&self) -> Option<usize> {
        None
    }

    /// Number of classes the model emits, when known.
    fn output_width(&self) -> Option<usize> {
        None
    }
}

/// Load a classifier artifact, picking the backend from the file extension.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ClassifierError> {
    if !path.exists() {
        return Err(ClassifierError::ModelNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => Ok(Arc::new(DenseNetwork::load(path)?)),
        #[cfg(feature = "onnx-classifier")]
        "onnx" => Ok(Arc::new(onnx::OnnxClassifier::load(path)?)),
        #[cfg(not(feature = "onnx-classifier"))]
        "onnx" => Err(ClassifierError::UnsupportedFormat(
            "ONNX models require the `onnx-classifier` feature".into(),
        )),
        other => Err(ClassifierError::UnsupportedFormat(format!(
            "unrecognized model extension {other:?} ({})",
            path.display()
        ))),
    }
}

// ═══════════════════════════════════════════════════════════
// Dense network (JSON weights)
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Softmax,
}

/// One fully connected layer. `weights` holds one row per output unit.
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut out: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect();

        match self.activation {
            Activation::Linear => {}
            Activation::Relu => out.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => out.iter_mut().for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Softmax => softmax_in_place(&mut out),
        }
        out
    }
}

fn softmax_in_place(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        values.iter_mut().for_each(|v| *v /= sum);
    }
}

/// Feed-forward network exported from the trained model as JSON:
///
/// ```json
/// {"input_width": 222, "layers": [{"weights": [[...]], "bias": [...], "activation": "relu"}]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DenseNetwork {
    input_width: usize,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Build and validate layer shapes.
    pub fn new(input_width: usize, layers: Vec<DenseLayer>) -> Result<Self, ClassifierError> {
        let network = Self {
            input_width,
            layers,
        };
        network.validate()?;
        Ok(network)
    }

    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let network: Self = serde_json::from_str(json)
            .map_err(|e| ClassifierError::ModelInit(format!("invalid model JSON: {e}")))?;
        network.validate()?;
        Ok(network)
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::ModelInit(format!("{}: {e}", path.display())))?;
        let network = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            input_width = network.input_width,
            classes = network.classes(),
            layers = network.layers.len(),
            "Dense classifier loaded"
        );
        Ok(network)
    }

    fn classes(&self) -> usize {
        self.layers.last().map_or(0, |l| l.bias.len())
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.input_width == 0 {
            return Err(ClassifierError::ModelInit("input_width must be positive".into()));
        }
        if self.layers.is_empty() {
            return Err(ClassifierError::ModelInit("model has no layers".into()));
        }

        let mut width = self.input_width;
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.bias.len() || layer.bias.is_empty() {
                return Err(ClassifierError::ModelInit(format!(
                    "layer {i}: {} weight rows for {} biases",
                    layer.weights.len(),
                    layer.bias.len()
                )));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != width) {
                return Err(ClassifierError::ModelInit(format!(
                    "layer {i}: weight row has {} columns, expected {width}",
                    row.len()
                )));
            }
            width = layer.bias.len();
        }
        Ok(())
    }
}

impl Classifier for DenseNetwork {
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        if input.len() != self.input_width {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.input_width,
                actual: input.len(),
            });
        }

        let mut activations = input.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        Ok(activations)
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.input_width)
    }

    fn output_width(&self) -> Option<usize> {
        Some(self.classes())
    }
}

// ═══════════════════════════════════════════════════════════
// ONNX classifier, behind `onnx-classifier` feature
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-classifier")]
mod onnx {
    use super::{Classifier, ClassifierError};
    use ort::session::Session;
    use std::path::Path;
    use std::sync::Mutex;

    /// Trained model exported to ONNX, input `[1, N]` f32, first output read
    /// as the class probabilities.
    ///
    /// `Session::run` needs `&mut self`, hence the Mutex.
    pub struct OnnxClassifier {
        session: Mutex<Session>,
        input_width: Option<usize>,
        output_width: Option<usize>,
    }

    impl OnnxClassifier {
        pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
            let session = Session::builder()
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .with_intra_threads(2)
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .commit_from_file(model_path)
                .map_err(|e: ort::Error| {
                    ClassifierError::ModelInit(format!("ONNX load failed: {e}"))
                })?;

            let input_width = session
                .inputs()
                .first()
                .and_then(|input| input.dtype().tensor_shape())
                .and_then(|shape| declared_width(shape));
            let output_width = session
                .outputs()
                .first()
                .and_then(|output| output.dtype().tensor_shape())
                .and_then(|shape| declared_width(shape));

            tracing::info!(
                path = %model_path.display(),
                input_width = ?input_width,
                output_width = ?output_width,
                "ONNX classifier loaded"
            );

            Ok(Self {
                session: Mutex::new(session),
                input_width,
                output_width,
            })
        }
    }

    /// Last dimension of a tensor shape; dynamic (`-1`) means undeclared.
    fn declared_width(shape: &[i64]) -> Option<usize> {
        shape.last().and_then(|&dim| usize::try_from(dim).ok())
    }

    impl Classifier for OnnxClassifier {
        fn predict(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError> {
            use ort::value::TensorRef;

            let array = ndarray::Array2::from_shape_vec((1, input.len()), input.to_vec())
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;
            let tensor = TensorRef::from_array_view(&array)
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

            Ok(data.to_vec())
        }

        fn input_width(&self) -> Option<usize> {
            self.input_width
        }

        fn output_width(&self) -> Option<usize> {
            self.output_width
        }
    }

    #[cfg(test)]
    mod tests {
        use super::declared_width;

        #[test]
        fn width_is_last_fixed_dimension() {
            assert_eq!(declared_width(&[1, 222]), Some(222));
            assert_eq!(declared_width(&[-1, 28]), Some(28));
        }

        #[test]
        fn dynamic_or_missing_dimension_is_undeclared() {
            assert_eq!(declared_width(&[1, -1]), None);
            assert_eq!(declared_width(&[]), None);
        }
    }
}

#[cfg(feature = "onnx-classifier")]
pub use onnx::OnnxClassifier;

// ═══════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════


#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_network_json() -> &'static str {
        r#"{
            "input_width": 3,
            "layers": [
                {"weights": [[1, 0, 0], [0, 1, 1]], "bias": [0, -0.5], "activation": "relu"},
                {"weights": [[2, 0], [0, 2], [0, 0]], "bias": [0, 0, 0], "activation": "softmax"}
            ]
        }"#
    }

    #[test]
    fn dense_network_outputs_probabilities() {
        let network = DenseNetwork::from_json(tiny_network_json()).unwrap();
        let probs = network.predict(&[0.0, 1.0, 1.0]).unwrap();

        assert_eq!(probs.len(), 3);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "softmax sums to 1, got {sum}");
        // hidden = [0, 1.5] → logits [0, 3, 0]: class 1 wins
        assert!(probs[1] > probs[0] && probs[1] > probs[2]);
    }

    #[test]
    fn dense_network_declares_widths() {
        let network = DenseNetwork::from_json(tiny_network_json()).unwrap();
        assert_eq!(network.input_width(), Some(3));
        assert_eq!(network.output_width(), Some(3));
    }

    #[test]
    fn wrong_input_length_is_shape_mismatch() {
        let network = DenseNetwork::from_json(tiny_network_json()).unwrap();
        let err = network.predict(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::ShapeMismatch { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn inconsistent_layer_shapes_are_rejected() {
        let err = DenseNetwork::new(
            3,
            vec![DenseLayer {
                weights: vec![vec![1.0, 2.0]],
                bias: vec![0.0],
                activation: Activation::Linear,
            }],
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::ModelInit(_)));

        let err = DenseNetwork::new(
            2,
            vec![DenseLayer {
                weights: vec![vec![1.0, 2.0]],
                bias: vec![0.0, 1.0],
                activation: Activation::Linear,
            }],
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::ModelInit(_)));
    }

    #[test]
    fn network_without_layers_is_rejected() {
        let err = DenseNetwork::from_json(r#"{"input_width": 4, "layers": []}"#).unwrap_err();
        assert!(err.to_string().contains("no layers"));
    }

    #[test]
    fn sigmoid_activation_maps_zero_to_half() {
        let network = DenseNetwork::new(
            1,
            vec![DenseLayer {
                weights: vec![vec![0.0]],
                bias: vec![0.0],
                activation: Activation::Sigmoid,
            }],
        )
        .unwrap();
        assert_eq!(network.predict(&[5.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn load_classifier_reads_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, tiny_network_json()).unwrap();

        let classifier = load_classifier(&path).unwrap();
        assert_eq!(classifier.input_width(), Some(3));
    }

    #[test]
    fn load_classifier_rejects_missing_and_unknown_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            load_classifier(&missing),
            Err(ClassifierError::ModelNotFound(_))
        ));

        let h5 = dir.path().join("Advanced_MLP_Model.h5");
        std::fs::write(&h5, b"\x89HDF").unwrap();
        assert!(matches!(
            load_classifier(&h5),
            Err(ClassifierError::UnsupportedFormat(_))
        ));
    }
}
