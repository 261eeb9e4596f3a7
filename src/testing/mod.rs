use std::path::PathBuf;
use uuid::Uuid;

use crate::config::{AppConfig, DatabaseConfig};
use crate::database::{DatabaseManager, SqliteProductStore};

/// Fresh, migrated, private in-memory store
pub async fn memory_store() -> SqliteProductStore {
    let pool = DatabaseManager::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open");
    SqliteProductStore::new(pool)
}

/// A not-yet-created directory unique to the calling test
pub fn temp_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("catalog-admin-test-{}", Uuid::new_v4().simple()))
}

/// Development defaults pointed at an in-memory database and a private upload dir
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database = DatabaseConfig::in_memory();
    config.uploads.dir = temp_upload_dir().to_string_lossy().into_owned();
    config.security.session_secret = "test-session-secret".to_string();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_dirs_are_unique() {
        assert_ne!(temp_upload_dir(), temp_upload_dir());
    }

    #[tokio::test]
    async fn memory_stores_are_isolated() {
        use crate::database::{NewProduct, ProductStore};

        let first = memory_store().await;
        let second = memory_store().await;
        first.insert(NewProduct::new("Chair", 1.0, "x")).await.unwrap();

        assert_eq!(first.list_all().await.unwrap().len(), 1);
        assert!(second.list_all().await.unwrap().is_empty());
    }
}
