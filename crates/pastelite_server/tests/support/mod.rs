//! Shared integration-test server bootstrap helpers.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use pastelite_server::{create_app, AppState, Config, Database};
use std::path::Path;
use tempfile::TempDir;

pub(crate) const TEST_NOW: HeaderName = HeaderName::from_static("x-test-now-ms");

pub(crate) fn test_config_for_db_path(db_path: &Path, test_mode: bool) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_paste_size: 1024,
        base_url: Some("http://paste.test".to_string()),
        test_mode,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    let app = create_app(state, false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server_with_mode(test_mode: bool) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let config = test_config_for_db_path(&db_path, test_mode);
    (test_server_for_config(config), temp_dir)
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    setup_test_server_with_mode(true)
}

pub(crate) fn millis(value: i64) -> HeaderValue {
    HeaderValue::from_str(&value.to_string()).expect("millis header")
}
