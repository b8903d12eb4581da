use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::FoodDetection;
use crate::state::AppState;

pub fn predict_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict_food))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /predict (multipart), field `file`
#[instrument(skip(state, mp))]
pub async fn predict_food(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<Vec<FoodDetection>>, (StatusCode, String)> {
    let mut image = None;
    while let Some(field) = mp.next_field().await.map_err(bad_request)? {
        if field.name() == Some("file") {
            image = Some(field.bytes().await.map_err(bad_request)?);
            break;
        }
    }
    let Some(image) = image else {
        warn!("predict called without file");
        return Err((StatusCode::BAD_REQUEST, "file is required".into()));
    };

    let size = image.len();
    match state.classifier.classify(image).await {
        Ok(detections) => {
            info!(size, count = detections.len(), "food classified");
            Ok(Json(detections))
        }
        Err(e) => {
            error!(error = %e, classifier = state.classifier.name(), "classification failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Prediction error: {e}"),
            ))
        }
    }
}

fn bad_request<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState, vision::dto::FoodDetection};

    const BOUNDARY: &str = "XBOUNDARYX";

    fn multipart(field: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"meal.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_predict(body: Vec<u8>) -> (StatusCode, Vec<u8>) {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::post("/api/predict")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn predict_is_stable_for_same_upload() {
        let (status, first) = post_predict(multipart("file", b"fake image bytes")).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = post_predict(multipart("file", b"fake image bytes")).await;
        assert_eq!(first, second);

        let detections: Vec<FoodDetection> = serde_json::from_slice(&first).unwrap();
        assert!((1..=3).contains(&detections.len()));
    }

    #[tokio::test]
    async fn predict_requires_file_field() {
        let (status, body) = post_predict(multipart("photo", b"bytes")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(String::from_utf8(body).unwrap(), "file is required");
    }
}
