//! Directory persistence adapters.
//!
//! Both adapters implement [`DirectoryRepository`](crate::domain::ports::DirectoryRepository)
//! and only translate between the domain [`Directory`](crate::domain::Directory)
//! and their storage. No business logic resides here.
//!
//! - [`JsonFileDirectoryRepository`]: one JSON document on disk, replaced
//!   atomically through `cap-std`.
//! - [`InMemoryDirectoryRepository`]: process memory only.

mod atomic_io;
mod json_file_repository;
mod memory_repository;
mod models;

pub use json_file_repository::JsonFileDirectoryRepository;
pub use memory_repository::InMemoryDirectoryRepository;
