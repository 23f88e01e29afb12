use std::sync::Arc;

use tokio::sync::OnceCell;

use textlens_storage::error::StorageError;
use textlens_storage::store::{AnalysisStore, CosmosStore};

type StoreInit = dyn Fn() -> Result<Arc<dyn AnalysisStore>, StorageError> + Send + Sync;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreHandle>,
}

impl AppState {
    /// Cosmos-backed state, configured from the environment on first use.
    pub fn from_env() -> Self {
        Self::with_store_init(|| {
            let store: Arc<dyn AnalysisStore> = Arc::new(CosmosStore::from_env()?);
            Ok(store)
        })
    }

    pub fn with_store(store: Arc<dyn AnalysisStore>) -> Self {
        Self::with_store_init(move || Ok(store.clone()))
    }

    pub fn with_store_init(
        init: impl Fn() -> Result<Arc<dyn AnalysisStore>, StorageError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            store: Arc::new(StoreHandle {
                store: OnceCell::new(),
                init: Box::new(init),
            }),
        }
    }
}

/// Per-request access to the store.
///
/// Handlers call [`StoreHandle::get`] before touching storage. The first
/// successful initialization is kept for the life of the process; a failed
/// one is retried on the next request.
pub struct StoreHandle {
    store: OnceCell<Arc<dyn AnalysisStore>>,
    init: Box<StoreInit>,
}

impl StoreHandle {
    pub async fn get(&self) -> Result<Arc<dyn AnalysisStore>, StorageError> {
        self.store
            .get_or_try_init(|| async { (self.init)() })
            .await
            .cloned()
    }
}
