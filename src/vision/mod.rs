pub mod classifier;
pub mod dto;
pub mod handlers;
pub mod openai;

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::VisionConfig;
use crate::state::AppState;
use classifier::{DeterministicClassifier, FoodClassifier};
use openai::OpenAiVisionClassifier;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    handlers::predict_routes(max_upload_bytes)
}

/// Remote vision model when an API key is configured, offline classifier otherwise.
pub fn classifier_from_config(cfg: &VisionConfig) -> anyhow::Result<Arc<dyn FoodClassifier>> {
    let classifier: Arc<dyn FoodClassifier> = match &cfg.api_key {
        Some(key) => Arc::new(OpenAiVisionClassifier::new(cfg, key.clone())?),
        None => {
            warn!("OPENAI_API_KEY not set; using deterministic food classifier");
            Arc::new(DeterministicClassifier::default())
        }
    };
    info!(classifier = classifier.name(), "food classifier ready");
    Ok(classifier)
}
