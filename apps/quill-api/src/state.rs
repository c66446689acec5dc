//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostStore, TagStore, UserStore};
use quill_infra::{BlogStore, DbErr, StoreConfig, connect};

/// Shared application state. All three ports are served by one store over
/// one pooled connection.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub tags: Arc<dyn TagStore>,
}

impl AppState {
    pub async fn new(config: &StoreConfig) -> Result<Self, DbErr> {
        let db = connect(config).await?;
        let store = Arc::new(BlogStore::new(db));

        Ok(Self {
            users: store.clone(),
            posts: store.clone(),
            tags: store,
        })
    }
}
