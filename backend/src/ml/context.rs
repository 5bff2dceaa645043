//! Process-wide model state, loaded once and shared read-only

use std::path::Path;
use std::sync::Arc;

use super::{CropClassifier, LabelEncoder, ModelError, RandomForest};

pub const MODEL_FILE: &str = "crop_model.json";
pub const SOIL_ENCODER_FILE: &str = "soil_encoder.json";
pub const SEASON_ENCODER_FILE: &str = "season_encoder.json";
pub const CROP_ENCODER_FILE: &str = "crop_encoder.json";

/// The classifier plus the encoders it was trained with
pub struct ModelContext {
    classifier: Arc<dyn CropClassifier>,
    soil_encoder: LabelEncoder,
    season_encoder: LabelEncoder,
    crop_encoder: LabelEncoder,
}

impl ModelContext {
    pub fn new(
        classifier: Arc<dyn CropClassifier>,
        soil_encoder: LabelEncoder,
        season_encoder: LabelEncoder,
        crop_encoder: LabelEncoder,
    ) -> Result<Self, ModelError> {
        if classifier.n_classes() != crop_encoder.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier predicts {} classes but crop encoder knows {}",
                classifier.n_classes(),
                crop_encoder.len()
            )));
        }

        Ok(Self {
            classifier,
            soil_encoder,
            season_encoder,
            crop_encoder,
        })
    }

    /// Load all four artifacts from `dir`:
    ///
    /// - `crop_model.json`: random forest export
    /// - `soil_encoder.json`, `season_encoder.json`, `crop_encoder.json`:
    ///   `{"classes": [...]}`
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let forest = RandomForest::from_file(&dir.join(MODEL_FILE))?;
        let soil_encoder = LabelEncoder::from_file(&dir.join(SOIL_ENCODER_FILE))?;
        let season_encoder = LabelEncoder::from_file(&dir.join(SEASON_ENCODER_FILE))?;
        let crop_encoder = LabelEncoder::from_file(&dir.join(CROP_ENCODER_FILE))?;

        tracing::info!(
            artifact_dir = %dir.display(),
            trees = forest.trees.len(),
            crops = crop_encoder.len(),
            soil_types = soil_encoder.len(),
            seasons = season_encoder.len(),
            "ML model & encoders loaded"
        );

        Self::new(Arc::new(forest), soil_encoder, season_encoder, crop_encoder)
    }

    pub fn classifier(&self) -> &dyn CropClassifier {
        self.classifier.as_ref()
    }

    pub fn soil_encoder(&self) -> &LabelEncoder {
        &self.soil_encoder
    }

    pub fn season_encoder(&self) -> &LabelEncoder {
        &self.season_encoder
    }

    pub fn crop_encoder(&self) -> &LabelEncoder {
        &self.crop_encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FeatureVector;

    struct FixedClassifier(usize);

    impl CropClassifier for FixedClassifier {
        fn predict_proba(&self, _: &FeatureVector) -> Result<Vec<f64>, ModelError> {
            Ok(vec![1.0 / self.0 as f64; self.0])
        }

        fn n_classes(&self) -> usize {
            self.0
        }
    }

    fn encoder(labels: &[&str]) -> LabelEncoder {
        LabelEncoder::new(labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_class_count_must_match_crop_encoder() {
        let result = ModelContext::new(
            Arc::new(FixedClassifier(4)),
            encoder(&["Clay"]),
            encoder(&["Rabi"]),
            encoder(&["rice", "wheat", "maize"]),
        );
        assert!(matches!(result, Err(ModelError::InvalidArtifact(_))));
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let result = ModelContext::load(Path::new("/nonexistent/models"));
        assert!(matches!(result, Err(ModelError::Io { .. })));
    }
}
