//! Ranks classifier output into the top crop recommendations

use shared::{economics_or_default, FeatureVector, Recommendation, TOP_K};

use crate::ml::{ModelContext, ModelError};

/// Slack allowed for floating-point drift in averaged probabilities
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Indices of the `k` largest probabilities, highest first.
///
/// Equal probabilities keep the order of the distribution; that tie-break is
/// an implementation detail, not a guarantee.
pub fn top_k_indices(proba: &[f64], k: usize) -> Result<Vec<usize>, ModelError> {
    if proba.len() < k {
        return Err(ModelError::Inference(format!(
            "distribution has {} classes, need at least {}",
            proba.len(),
            k
        )));
    }
    if let Some(bad) = proba
        .iter()
        .find(|p| p.is_nan() || **p < -PROBABILITY_TOLERANCE || **p > 1.0 + PROBABILITY_TOLERANCE)
    {
        return Err(ModelError::Inference(format!("invalid probability {}", bad)));
    }

    let mut indices: Vec<usize> = (0..proba.len()).collect();
    indices.sort_by(|&a, &b| proba[b].total_cmp(&proba[a]));
    indices.truncate(k);
    Ok(indices)
}

/// Classify the features and return the top crops with their economics
pub fn rank_crops(
    models: &ModelContext,
    features: &FeatureVector,
) -> Result<Vec<Recommendation>, ModelError> {
    let proba = models.classifier().predict_proba(features)?;

    top_k_indices(&proba, TOP_K)?
        .into_iter()
        .map(|idx| -> Result<Recommendation, ModelError> {
            let crop = models.crop_encoder().decode(idx)?;
            let probability = proba[idx].clamp(0.0, 1.0);
            Ok(Recommendation::new(
                crop.to_string(),
                probability,
                economics_or_default(crop),
            ))
        })
        .collect()
}
