use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{verifier_from_config, AuthError, CredentialVerifier, SessionKeys};
use crate::config::AppConfig;
use crate::database::{ProductStore, SqliteProductStore};
use crate::graphql::{build_schema, CatalogSchema};
use crate::uploads::UploadHandler;

/// Everything a handler needs, cloned into each request
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub store: Arc<dyn ProductStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub sessions: SessionKeys,
    pub uploads: UploadHandler,
    pub graphql: CatalogSchema,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Result<Self, AuthError> {
        let store: Arc<dyn ProductStore> = Arc::new(SqliteProductStore::new(pool.clone()));

        Ok(Self {
            pool,
            graphql: build_schema(store.clone()),
            store,
            credentials: verifier_from_config(&config.security)?,
            sessions: SessionKeys::from_config(&config.security),
            uploads: UploadHandler::new(&config.uploads.dir),
            cookie_secure: config.security.cookie_secure,
        })
    }
}
