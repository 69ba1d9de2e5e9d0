//! Directory repository backed by a single JSON file.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::write_atomic;
use super::models::DirectoryDocument;
use crate::domain::Directory;
use crate::domain::ports::{DirectoryPersistenceError, DirectoryRepository};

/// Stores the directory as pretty-printed JSON, replacing the file atomically
/// on every save.
#[derive(Debug, Clone)]
pub struct JsonFileDirectoryRepository {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl JsonFileDirectoryRepository {
    /// Open the repository for `path`, creating missing parent directories.
    /// The file itself is created on the first save.
    ///
    /// # Examples
    /// ```no_run
    /// use coursehub::outbound::persistence::JsonFileDirectoryRepository;
    ///
    /// let repo = JsonFileDirectoryRepository::open("data/db.json").expect("open store");
    /// assert_eq!(repo.path().as_str(), "data/db.json");
    /// ```
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, DirectoryPersistenceError> {
        let path = path.as_ref();
        let file_name = path.file_name().ok_or_else(|| {
            DirectoryPersistenceError::connection(format!("{path} does not name a file"))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(parent, ambient_authority()))
            .map(|dir| Self {
                dir: Arc::new(dir),
                file_name: Utf8PathBuf::from(file_name),
                path: path.to_path_buf(),
            })
            .map_err(|err| DirectoryPersistenceError::connection(format!("{parent}: {err}")))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn decode(&self, raw: &str) -> Result<Directory, DirectoryPersistenceError> {
        let document: DirectoryDocument = serde_json::from_str(raw).map_err(|err| {
            DirectoryPersistenceError::serialization(format!("{}: {err}", self.path))
        })?;
        Directory::try_from(document).map_err(|err| {
            DirectoryPersistenceError::serialization(format!("{}: {err}", self.path))
        })
    }
}

fn join_error(err: tokio::task::JoinError) -> DirectoryPersistenceError {
    DirectoryPersistenceError::io(format!("file task failed: {err}"))
}

#[async_trait]
impl DirectoryRepository for JsonFileDirectoryRepository {
    async fn load(&self) -> Result<Option<Directory>, DirectoryPersistenceError> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let read = tokio::task::spawn_blocking(move || dir.read_to_string(&file_name))
            .await
            .map_err(join_error)?;

        match read {
            Ok(raw) => self.decode(&raw).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path, "no directory file yet");
                Ok(None)
            }
            Err(err) => Err(DirectoryPersistenceError::io(format!("{}: {err}", self.path))),
        }
    }

    async fn save(&self, directory: &Directory) -> Result<(), DirectoryPersistenceError> {
        let mut contents = serde_json::to_vec_pretty(&DirectoryDocument::from(directory))
            .map_err(|err| DirectoryPersistenceError::serialization(err.to_string()))?;
        contents.push(b'\n');

        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &file_name, &contents))
            .await
            .map_err(join_error)?
            .map_err(|err| DirectoryPersistenceError::io(format!("{}: {err}", self.path)))?;
        debug!(path = %self.path, "directory saved");
        Ok(())
    }
}
