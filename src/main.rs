mod app;
mod chat;
mod config;
mod db;
mod foods;
mod seed;
mod state;
mod storage;
mod vision;

const DEFAULT_LOG_FILTER: &str = "diabetic_nutrition=debug,axum=info,tower_http=info";

/// `RUST_LOG` overrides the filter; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        subscriber.with_target(false).json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let app_state = state::AppState::init().await?;
    tracing::info!(
        catalog = if app_state.config.database_url.is_some() { "postgres" } else { "memory" },
        classifier = app_state.classifier.name(),
        "state ready"
    );
    app::serve(app::build_app(app_state)).await
}
