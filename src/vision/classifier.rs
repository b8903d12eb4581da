use axum::async_trait;
use bytes::Bytes;
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use super::dto::FoodDetection;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("vision request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("vision service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("vision service returned no content")]
    EmptyResponse,
    #[error("malformed vision payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Turns photo bytes into candidate food labels, most confident first.
#[async_trait]
pub trait FoodClassifier: Send + Sync {
    async fn classify(&self, image: Bytes) -> Result<Vec<FoodDetection>, ClassifyError>;

    fn name(&self) -> &'static str;
}

pub const DEFAULT_LABELS: [&str; 20] = [
    "apple", "banana", "bread", "rice", "chicken", "salad", "pizza", "pasta", "fish", "eggs",
    "milk", "cheese", "yogurt", "orange", "dates", "hummus", "falafel", "shawarma", "tabbouleh",
    "baklava",
];

/// Offline classifier: output depends only on the image bytes.
///
/// The first 100 bytes seed a PRNG that picks one to three distinct labels
/// with confidences in `[0.70, 0.99]`.
#[derive(Debug, Clone)]
pub struct DeterministicClassifier {
    labels: Vec<String>,
}

impl Default for DeterministicClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS.iter().map(|s| s.to_string()).collect())
    }
}

impl DeterministicClassifier {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn predict(&self, image: &[u8]) -> Vec<FoodDetection> {
        let seed: u64 = image.iter().take(100).map(|&b| u64::from(b)).sum();
        let mut rng = StdRng::seed_from_u64(seed);

        let count = rng.gen_range(1..=3usize).min(self.labels.len());
        let picks = index::sample(&mut rng, self.labels.len(), count);

        let mut out: Vec<FoodDetection> = picks
            .iter()
            .map(|i| FoodDetection {
                food: self.labels[i].clone(),
                confidence: round2(0.7 + rng.gen::<f64>() * 0.29),
            })
            .collect();
        sort_by_confidence(&mut out);
        out
    }
}

#[async_trait]
impl FoodClassifier for DeterministicClassifier {
    async fn classify(&self, image: Bytes) -> Result<Vec<FoodDetection>, ClassifyError> {
        Ok(self.predict(&image))
    }

    fn name(&self) -> &'static str {
        "deterministic"
    }
}

pub(crate) fn sort_by_confidence(detections: &mut [FoodDetection]) {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_prediction() {
        let c = DeterministicClassifier::default();
        let img = b"\xff\xd8\xff\xe0 some jpeg-ish payload".to_vec();
        assert_eq!(c.predict(&img), c.predict(&img));
    }

    #[test]
    fn prediction_shape() {
        let c = DeterministicClassifier::default();
        for seed in 0u8..50 {
            let img = vec![seed; 128];
            let out = c.predict(&img);
            assert!((1..=3).contains(&out.len()));
            for d in &out {
                assert!(DEFAULT_LABELS.contains(&d.food.as_str()));
                assert!((0.7..=0.99).contains(&d.confidence), "{}", d.confidence);
            }
            assert!(out.windows(2).all(|w| w[0].confidence >= w[1].confidence));
            let mut labels: Vec<&str> = out.iter().map(|d| d.food.as_str()).collect();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), out.len());
        }
    }

    #[test]
    fn only_first_hundred_bytes_matter() {
        let c = DeterministicClassifier::default();
        let mut a = vec![7u8; 100];
        let mut b = a.clone();
        a.extend_from_slice(b"tail one");
        b.extend_from_slice(b"a different tail");
        assert_eq!(c.predict(&a), c.predict(&b));
    }

    #[test]
    fn empty_image_still_predicts() {
        let c = DeterministicClassifier::default();
        assert!(!c.predict(&[]).is_empty());
    }

    #[test]
    fn empty_vocabulary_predicts_nothing() {
        let c = DeterministicClassifier::new(Vec::new());
        assert!(c.predict(b"abc").is_empty());
    }
}
