//! Fitted categorical label encoder

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::ModelError;

/// On-disk form: `{"classes": ["Alluvial", "Black Soil", ...]}`
#[derive(Debug, Serialize, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

/// Maps labels to the integer codes used at training time.
///
/// The code of a label is its position in `classes`, which is exactly what a
/// fitted scikit-learn `LabelEncoder` stores in `classes_`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        if classes.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "encoder has no classes".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (code, label) in classes.iter().enumerate() {
            if index.insert(label.clone(), code).is_some() {
                return Err(ModelError::InvalidArtifact(format!(
                    "duplicate encoder class '{}'",
                    label
                )));
            }
        }

        Ok(Self { classes, index })
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: EncoderArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(artifact.classes)
    }

    pub fn encode(&self, label: &str) -> Result<usize, ModelError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| ModelError::UnknownLabel(label.to_string()))
    }

    pub fn decode(&self, code: usize) -> Result<&str, ModelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(ModelError::UnknownCode(code))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
