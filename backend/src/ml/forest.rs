//! Random-forest crop classifier
//!
//! Trees use the array layout scikit-learn keeps in `tree_`: node `i` is a
//! leaf when `children_left[i] == -1`, otherwise samples with
//! `x[feature[i]] <= threshold[i]` go left. `value[i]` holds the class
//! distribution (counts or fractions) at node `i`.

use serde::Deserialize;
use shared::{FeatureVector, FEATURE_COUNT};
use std::path::Path;

use super::ModelError;

const LEAF: i64 = -1;

/// Anything that can turn a feature vector into a class distribution
pub trait CropClassifier: Send + Sync {
    /// Probability per class, indexed by crop code
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError>;

    /// Number of classes the distribution covers
    fn n_classes(&self) -> usize;
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n_nodes
            || self.feature.len() != n_nodes
            || self.threshold.len() != n_nodes
            || self.value.len() != n_nodes
        {
            return Err("tree arrays differ in length".to_string());
        }

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {} has exactly one child", node));
                }
                if self.value[node].len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class values, expected {}",
                        node,
                        self.value[node].len(),
                        n_classes
                    ));
                }
                continue;
            }
            // Children always come after their parent, so traversal terminates
            for child in [left, right] {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on invalid feature {}", node, feature));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf `x` falls into
    fn leaf_distribution(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let values = &self.value[node];
        let total: f64 = values.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return Err(ModelError::Inference(format!(
                "leaf {} has an empty class distribution",
                node
            )));
        }
        Ok(values.iter().map(|v| v / total).collect())
    }
}

/// Averages the leaf distributions of its trees, like scikit-learn's
/// `RandomForestClassifier.predict_proba`
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ModelError> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let forest: RandomForest =
            serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        forest.validate()?;
        Ok(forest)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "forest was trained on {} features, requests carry {}",
                self.n_features, FEATURE_COUNT
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".to_string()));
        }
        if self.n_classes == 0 {
            return Err(ModelError::InvalidArtifact("forest has no classes".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|e| ModelError::InvalidArtifact(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

impl CropClassifier for RandomForest {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(ModelError::Inference(format!(
                "expected {} features, got {}",
                self.n_features,
                x.len()
            )));
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(x)?) {
                *acc += p;
            }
        }

        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}
