use crate::config::{AppConfig, VisionConfig};
use crate::storage::{Catalog, MemoryCatalog, PgCatalog};
use crate::vision::classifier::{DeterministicClassifier, FoodClassifier};
use crate::{db, seed, vision};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn Catalog>,
    pub classifier: Arc<dyn FoodClassifier>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let catalog: Arc<dyn Catalog> = match &config.database_url {
            Some(url) => {
                let pool = db::connect(url, config.db_max_connections).await?;
                db::migrate(&pool).await;
                seed::seed_if_empty(&pool).await?;
                Arc::new(PgCatalog::new(pool))
            }
            None => {
                warn!("DATABASE_URL not set; serving reference data from memory");
                Arc::new(MemoryCatalog::seeded())
            }
        };
        let classifier = vision::classifier_from_config(&config.vision)?;

        Ok(Self {
            config,
            catalog,
            classifier,
        })
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        catalog: Arc<dyn Catalog>,
        classifier: Arc<dyn FoodClassifier>,
    ) -> Self {
        Self {
            config,
            catalog,
            classifier,
        }
    }

    /// Seeded in-memory catalog with the offline classifier.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            db_max_connections: 1,
            max_upload_bytes: 1024 * 1024,
            vision: VisionConfig {
                api_key: None,
                base_url: "http://fake.local".into(),
                model: "fake".into(),
                timeout_secs: 1,
            },
        });
        Self::from_parts(
            config,
            Arc::new(MemoryCatalog::seeded()),
            Arc::new(DeterministicClassifier::default()),
        )
    }
}
