//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{
    Database, FamilyMemberRepository, FamilyMemberStore, MemoryRepository, MemoryStore,
    S3Presigner, UploadSigner,
};

/// Shared state handed to every handler.
///
/// Accessors are trait objects so tests can swap in mocks or in-memory
/// stores without a database.
#[derive(Clone)]
pub struct AppState {
    pub family_members: Arc<dyn FamilyMemberRepository>,
    pub memories: Arc<dyn MemoryRepository>,
    pub uploads: Arc<dyn UploadSigner>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the Postgres-backed stores and the S3 presigner.
    pub fn from_database(database: &Database, config: Config) -> Self {
        let connection = database.get_connection();

        Self::new(
            Arc::new(FamilyMemberStore::new(connection.clone())),
            Arc::new(MemoryStore::new(connection)),
            Arc::new(S3Presigner::new(config.storage.clone())),
            config,
        )
    }

    /// Create state with manually injected accessors.
    pub fn new(
        family_members: Arc<dyn FamilyMemberRepository>,
        memories: Arc<dyn MemoryRepository>,
        uploads: Arc<dyn UploadSigner>,
        config: Config,
    ) -> Self {
        Self {
            family_members,
            memories,
            uploads,
            config: Arc::new(config),
        }
    }
}
