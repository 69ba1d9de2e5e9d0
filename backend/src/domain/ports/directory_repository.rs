//! Driven port for loading and saving the whole directory snapshot.

use async_trait::async_trait;

use crate::domain::Directory;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by directory repository adapters.
    pub enum DirectoryPersistenceError {
        /// Backing store could not be reached.
        Connection { message: String } => "directory store unavailable: {message}",
        /// Reading or writing the snapshot failed.
        Io { message: String } => "directory store i/o failed: {message}",
        /// Stored snapshot could not be decoded or encoded.
        Serialization { message: String } => "directory snapshot is malformed: {message}",
    }
}

/// Snapshot persistence for [`Directory`].
///
/// `save` must be all-or-nothing: after an error the previously saved
/// snapshot is still what `load` returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Load the stored snapshot, or `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<Directory>, DirectoryPersistenceError>;

    /// Replace the stored snapshot.
    async fn save(&self, directory: &Directory) -> Result<(), DirectoryPersistenceError>;
}
