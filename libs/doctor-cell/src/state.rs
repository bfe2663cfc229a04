use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{DirectoryStore, InMemoryDirectoryStore, PgDirectoryStore};

/// Shared handler state: the storage handle, opened once per process.
#[derive(Clone)]
pub struct DirectoryState {
    pub store: Arc<dyn DirectoryStore>,
}

impl DirectoryState {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgDirectoryStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDirectoryStore::new()))
    }
}
