use std::time::Duration;

use axum::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use super::classifier::{sort_by_confidence, ClassifyError, FoodClassifier};
use super::dto::FoodDetection;
use crate::config::VisionConfig;

const MAX_DETECTIONS: usize = 3;

const SYSTEM_PROMPT: &str = "You are a nutritional expert specialized in identifying food items in images, \
particularly for diabetic patients. Analyze the image and identify all food items present. For each food \
item, provide a confidence score (between 0 and 1) of your identification. Return your analysis as a JSON \
array with objects containing 'food' and 'confidence' fields. Be specific - prefer detailed descriptions \
(e.g., 'grilled chicken breast' instead of just 'chicken'). Limit to maximum 3 main food items, from \
highest to lowest confidence.";

const USER_PROMPT: &str = "What food items do you see in this image? Return only JSON.";

/// Classifier backed by an OpenAI-compatible chat-completions vision model.
#[derive(Debug, Clone)]
pub struct OpenAiVisionClassifier {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    response_format: ResponseFormat,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiVisionClassifier {
    pub fn new(cfg: &VisionConfig, api_key: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
        })
    }

    fn build_request(&self, image: &[u8]) -> ChatRequest {
        let encoded = general_purpose::STANDARD.encode(image);
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:image/jpeg;base64,{encoded}"),
                            },
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            max_tokens: 500,
        }
    }
}

#[async_trait]
impl FoodClassifier for OpenAiVisionClassifier {
    async fn classify(&self, image: Bytes) -> Result<Vec<FoodDetection>, ClassifyError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(&image))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "vision request failed");
                ClassifyError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "vision service error");
            return Err(ClassifyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ClassifyError::EmptyResponse)?;

        let payload: Value = serde_json::from_str(&content)?;
        let detections = detections_from_payload(&payload);
        debug!(count = detections.len(), "vision detections");
        Ok(detections)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Normalises the shapes vision models actually return into detections.
///
/// Accepts a bare array, an array under `results` or `foods`, any array of
/// objects carrying `food`, or a `{label: confidence}` map. Anything else
/// becomes a single `unidentified` detection.
pub fn detections_from_payload(payload: &Value) -> Vec<FoodDetection> {
    let mut out = match find_detection_array(payload) {
        Some(items) => items.iter().filter_map(detection_from_item).collect(),
        None => label_map(payload),
    };

    if out.is_empty() {
        out.push(FoodDetection {
            food: "unidentified".into(),
            confidence: 0.5,
        });
    }
    sort_by_confidence(&mut out);
    out.truncate(MAX_DETECTIONS);
    out
}

fn find_detection_array(payload: &Value) -> Option<&Vec<Value>> {
    if let Some(items) = payload.as_array() {
        return Some(items);
    }
    let obj = payload.as_object()?;
    for key in ["results", "foods"] {
        if let Some(items) = obj.get(key).and_then(Value::as_array) {
            return Some(items);
        }
    }
    obj.values().filter_map(Value::as_array).find(|items| {
        items
            .first()
            .and_then(Value::as_object)
            .is_some_and(|o| o.contains_key("food"))
    })
}

fn detection_from_item(item: &Value) -> Option<FoodDetection> {
    let food = item.get("food")?.as_str()?.trim();
    if food.is_empty() {
        return None;
    }
    let confidence = item
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    Some(FoodDetection {
        food: food.to_string(),
        confidence,
    })
}

fn label_map(payload: &Value) -> Vec<FoodDetection> {
    let Some(obj) = payload.as_object() else {
        return Vec::new();
    };
    obj.iter()
        .filter_map(|(label, v)| {
            let c = v.as_f64()?;
            (0.0..=1.0).contains(&c).then(|| FoodDetection {
                food: label.clone(),
                confidence: c,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(d: &[FoodDetection]) -> Vec<&str> {
        d.iter().map(|x| x.food.as_str()).collect()
    }

    #[test]
    fn bare_array_and_wrapped_arrays() {
        let bare = json!([{"food": "rice", "confidence": 0.6}, {"food": "salad", "confidence": 0.9}]);
        assert_eq!(labels(&detections_from_payload(&bare)), vec!["salad", "rice"]);

        let wrapped = json!({"results": [{"food": "eggs", "confidence": 0.8}]});
        assert_eq!(labels(&detections_from_payload(&wrapped)), vec!["eggs"]);

        let foods = json!({"foods": [{"food": "dates", "confidence": 0.95}]});
        assert_eq!(labels(&detections_from_payload(&foods)), vec!["dates"]);
    }

    #[test]
    fn any_array_of_food_objects() {
        let payload = json!({"note": "ok", "items": [{"food": "hummus", "confidence": 0.7}]});
        assert_eq!(labels(&detections_from_payload(&payload)), vec!["hummus"]);
    }

    #[test]
    fn label_confidence_map() {
        let payload = json!({"apple": 0.4, "banana": 0.85, "count": 3});
        let out = detections_from_payload(&payload);
        assert_eq!(labels(&out), vec!["banana", "apple"]);
    }

    #[test]
    fn unrecognised_payload_is_unidentified() {
        let out = detections_from_payload(&json!({"description": "a plate"}));
        assert_eq!(
            out,
            vec![FoodDetection {
                food: "unidentified".into(),
                confidence: 0.5
            }]
        );
    }

    #[test]
    fn capped_at_three() {
        let payload = json!([
            {"food": "a", "confidence": 0.1},
            {"food": "b", "confidence": 0.2},
            {"food": "c", "confidence": 0.3},
            {"food": "d", "confidence": 0.4}
        ]);
        assert_eq!(labels(&detections_from_payload(&payload)), vec!["d", "c", "b"]);
    }

    #[test]
    fn request_carries_image_as_data_url() {
        let cfg = VisionConfig {
            api_key: Some("k".into()),
            base_url: "https://example.test/v1/".into(),
            model: "gpt-4o".into(),
            timeout_secs: 5,
        };
        let c = OpenAiVisionClassifier::new(&cfg, "k".into()).unwrap();
        assert_eq!(c.base_url, "https://example.test/v1");

        let body = serde_json::to_value(c.build_request(b"img")).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        assert_eq!(body["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,aW1n"
        );
    }
}
