use async_trait::async_trait;

use textlens_core::models::analysis::{AnalysisDocument, AnalysisSummary};

use crate::client::ContainerClient;
use crate::config::CosmosConfig;
use crate::error::StorageError;

/// Projection used for the history listing. Ordering happens after retrieval
/// because the gateway cannot run a cross-partition `ORDER BY` without a
/// query plan.
pub const HISTORY_QUERY: &str = "SELECT c.id, c.analysis, c.metadata FROM c";

/// Persistence for analysis documents.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn insert(&self, document: &AnalysisDocument) -> Result<(), StorageError>;

    /// Every stored analysis, newest first.
    async fn history(&self) -> Result<Vec<AnalysisSummary>, StorageError>;
}

/// [`AnalysisStore`] backed by a Cosmos DB container.
#[derive(Debug)]
pub struct CosmosStore {
    container: ContainerClient,
}

impl CosmosStore {
    pub fn connect(config: &CosmosConfig) -> Result<Self, StorageError> {
        Ok(Self {
            container: ContainerClient::new(config)?,
        })
    }

    /// Resolve configuration from the environment and build the store.
    /// Fails before any network call when the connection string is absent.
    pub fn from_env() -> Result<Self, StorageError> {
        let config = CosmosConfig::from_env()?;
        tracing::info!(
            database = %config.database,
            container = %config.container,
            "connecting to Cosmos DB"
        );
        Self::connect(&config)
    }
}

#[async_trait]
impl AnalysisStore for CosmosStore {
    async fn insert(&self, document: &AnalysisDocument) -> Result<(), StorageError> {
        self.container.create_item(document).await
    }

    async fn history(&self) -> Result<Vec<AnalysisSummary>, StorageError> {
        let raw: Vec<serde_json::Value> = self.container.query_items(HISTORY_QUERY).await?;

        let mut items: Vec<AnalysisSummary> = raw
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable history document");
                    None
                }
            })
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }
}

/// Order by `metadata.analyzed_at`, most recent first. Stable for equal times.
pub fn sort_newest_first(items: &mut [AnalysisSummary]) {
    items.sort_by(|a, b| b.metadata.analyzed_at.cmp(&a.metadata.analyzed_at));
}
