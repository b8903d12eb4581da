use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument};

use super::{
    dto::{ChatAnswer, ChatQuestion},
    repo_types::Language,
    services::answer_question,
};
use crate::state::AppState;

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatQuestion>,
) -> Result<Json<ChatAnswer>, (StatusCode, String)> {
    let lang = Language::from_code(&payload.language);

    match answer_question(&*state.catalog, &payload.question, lang).await {
        Ok(answer) => {
            info!(lang = lang.code(), related = answer.related_foods.len(), "chat answered");
            Ok(Json(answer))
        }
        Err(e) => {
            error!(error = %e, "chat lookup failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Chat error: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    async fn post_chat(body: &str) -> (StatusCode, Value) {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::post("/api/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn chat_returns_answer_and_related_foods() {
        let (status, json) =
            post_chat(r#"{"question":"Is hummus good for diabetics?","language":"en"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["answer"].as_str().unwrap().starts_with("Yes, hummus"));
        assert_eq!(json["related_foods"][0]["name"], "Hummus");
        assert_eq!(json["related_foods"][0]["diabetic_suitability"], "Safe");
    }

    #[tokio::test]
    async fn unknown_language_defaults_to_english() {
        let (status, json) = post_chat(r#"{"question":"asdkjasdkj","language":"fr"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["answer"]
            .as_str()
            .unwrap()
            .starts_with("I don't have specific information"));
        assert_eq!(json["related_foods"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn language_is_optional_and_case_insensitive() {
        let (_, json) = post_chat(r#"{"question":"Can diabetics eat dates?"}"#).await;
        assert!(json["answer"].as_str().unwrap().starts_with("Dates should be limited"));

        let (_, json) = post_chat(r#"{"question":"هل الصيام جيد لمرضى السكري؟","language":" AR "}"#).await;
        assert!(json["answer"].as_str().unwrap().starts_with("تختلف آثار الصيام"));
    }
}
