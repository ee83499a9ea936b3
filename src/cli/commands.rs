//! CLI command implementations

use tracing::{error, info, warn};

use crate::http_server::HttpServer;
use crate::rest_api::AppState;
use crate::store::{self, LibraryGateway, StoreHandle};

use super::args::Command;
use super::config::{AppConfig, RunMode};
use super::errors::{CliError, CliResult};
use super::telemetry::init_tracing;

/// Store used when the test database cannot be reached
const FALLBACK_TEST_STORE: &str = "memory://test-fallback";

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { host, port } => {
            let config = AppConfig::from_env()?.with_overrides(host, port);
            serve(config)
        }
    }
}

/// Connect to the store for the configured mode and serve until Ctrl-C
pub fn serve(config: AppConfig) -> CliResult<()> {
    init_tracing(&config.log_filter);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let library = open_library(&config).await?;
        info!(
            store = %library.store().describe(),
            mode = ?config.mode,
            "connected to the database"
        );

        HttpServer::with_config(config.server.clone(), AppState::new(library))
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Connect and declare store constraints.
///
/// Failing to reach the primary database is fatal. In test mode the
/// failure is logged and an empty in-memory store is used instead.
async fn open_library(config: &AppConfig) -> CliResult<LibraryGateway> {
    let uri = config.store_uri();

    let connected = match store::connect(uri).await {
        Ok(handle) => LibraryGateway::open(handle).await,
        Err(e) => Err(e),
    };

    match (connected, config.mode) {
        (Ok(library), _) => Ok(library),
        (Err(e), RunMode::Production) => {
            error!(uri, error = %e, "cannot connect to the main database");
            Err(CliError::store_connection_failed(e.to_string()))
        }
        (Err(e), RunMode::Test) => {
            warn!(
                uri,
                error = %e,
                "cannot connect to the test database, using an empty in-memory store"
            );
            let handle: StoreHandle = store::connect(FALLBACK_TEST_STORE)
                .await
                .map_err(|e| CliError::store_connection_failed(e.to_string()))?;
            LibraryGateway::open(handle)
                .await
                .map_err(|e| CliError::store_connection_failed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;

    fn config(mode: RunMode, uri: &str) -> AppConfig {
        AppConfig {
            mode,
            main_db_uri: uri.to_string(),
            test_db_uri: uri.to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_primary_connection_failure_is_fatal() {
        let err = open_library(&config(RunMode::Production, "mongodb://localhost/bookdb"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::StoreConnectionFailed);
    }

    #[tokio::test]
    async fn test_test_mode_falls_back_to_memory() {
        let library = open_library(&config(RunMode::Test, "mongodb://localhost/testdb"))
            .await
            .unwrap();
        assert_eq!(library.store().describe(), FALLBACK_TEST_STORE);
    }

    #[tokio::test]
    async fn test_connects_to_configured_store() {
        let library = open_library(&config(RunMode::Production, "memory://main"))
            .await
            .unwrap();
        assert_eq!(library.store().describe(), "memory://main");
    }
}
