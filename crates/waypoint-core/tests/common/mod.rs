use waypoint_core::{Mapper, MapperBuilder};
use tempfile::TempDir;

/// Relay address nothing listens on.
pub const UNREACHABLE_RELAY: &str = "http://127.0.0.1:1/api";

/// Helper function to create a test mapper
pub async fn create_test_mapper(relay_url: &str) -> (TempDir, Mapper) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mapper = open_mapper(&temp_dir, relay_url).await;
    (temp_dir, mapper)
}

/// Builds a mapper over the database inside `temp_dir`.
pub async fn open_mapper(temp_dir: &TempDir, relay_url: &str) -> Mapper {
    MapperBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_relay_url(Some(relay_url))
        .build()
        .await
        .expect("Failed to create mapper")
}
