//! Builders wiring the file-backed directory service into HTTP state.

use std::sync::Arc;

use camino::Utf8Path;
use coursehub::domain::{DirectoryService, PasswordHasher, SeedPolicy};
use coursehub::inbound::http::state::HttpState;
use coursehub::outbound::persistence::JsonFileDirectoryRepository;
use tracing::info;

use super::ServerSettings;

/// Open the JSON directory at `data_file` and expose it through every port.
pub(crate) async fn build_directory_state(
    data_file: &Utf8Path,
    seed: SeedPolicy,
) -> std::io::Result<HttpState> {
    let repository = JsonFileDirectoryRepository::open(data_file)
        .map(Arc::new)
        .map_err(std::io::Error::other)?;
    let service = DirectoryService::open(
        repository,
        Arc::new(mockable::DefaultClock),
        PasswordHasher::default(),
        seed,
    )
    .await
    .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(path = %data_file, "directory loaded");
    Ok(HttpState::from_service(Arc::new(service)))
}

/// Build HTTP state from loaded settings.
pub(crate) async fn build_http_state(settings: &ServerSettings) -> std::io::Result<HttpState> {
    let data_file = settings.data_file()?;
    build_directory_state(&data_file, settings.seed_policy()).await
}
