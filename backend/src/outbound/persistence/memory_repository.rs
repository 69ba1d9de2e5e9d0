//! In-process directory repository for ephemeral runs and tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::Directory;
use crate::domain::ports::{DirectoryPersistenceError, DirectoryRepository};

/// Keeps the last saved snapshot in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    stored: Mutex<Option<Directory>>,
}

impl InMemoryDirectoryRepository {
    /// Empty repository; the first `load` returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that already holds `directory`.
    pub fn with_directory(directory: Directory) -> Self {
        Self {
            stored: Mutex::new(Some(directory)),
        }
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn load(&self) -> Result<Option<Directory>, DirectoryPersistenceError> {
        Ok(self.stored.lock().await.clone())
    }

    async fn save(&self, directory: &Directory) -> Result<(), DirectoryPersistenceError> {
        *self.stored.lock().await = Some(directory.clone());
        Ok(())
    }
}
