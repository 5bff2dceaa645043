//! Pre-trained model artifacts
//!
//! The classifier and the three categorical encoders are trained offline and
//! loaded once at startup. Only their learned mappings matter here; they are
//! stored as JSON exports (see `ModelContext::load` for the file layout).

pub mod context;
pub mod encoder;
pub mod forest;

pub use context::ModelContext;
pub use encoder::LabelEncoder;
pub use forest::{CropClassifier, DecisionTree, RandomForest};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or invoking model artifacts
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    #[error("unknown class code {0}")]
    UnknownCode(usize),

    #[error("inference failed: {0}")]
    Inference(String),
}
