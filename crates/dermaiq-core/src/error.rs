use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("nothing to score: the ingredient list is empty")]
    EmptyIngredientList,

    #[error("ingredient '{ingredient}' has invalid risk level '{value}' (expected green, yellow, orange or red)")]
    InvalidRiskLevel { ingredient: String, value: String },

    #[error("ingredient '{ingredient}' has invalid risk reason '{value}' (expected carcinogen, endocrine, allergen, irritant or pollutant)")]
    InvalidRiskReason { ingredient: String, value: String },

    #[error("failed to load policy from {path}: {reason}")]
    PolicyLoad { path: PathBuf, reason: String },

    #[error("invalid policy: {0}")]
    PolicyInvalid(String),

    #[error("failed to load classified input from {path}: {reason}")]
    InputLoad { path: PathBuf, reason: String },

    #[error("classifier '{backend}' failed: {reason}")]
    Classifier { backend: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
