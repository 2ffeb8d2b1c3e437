//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, pipeline creation,
//! and file output to reduce duplication across command handlers.

use crate::error::CliError;
use contour::config::{ConfigFile, FetchConfig};
use contour::logging::{init_logging, LoggingGuard};
use contour::pipeline::TerrainPipeline;
use contour::provider::{AsyncReqwestClient, TerrariumSource};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Pipeline type used by the CLI.
pub type CliPipeline = TerrainPipeline<TerrariumSource<AsyncReqwestClient>>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of
    ///   RUST_LOG and mirrors log events to stdout
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "contour.log".to_string());

        let logging_guard = init_logging(log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Contour v{}", contour::VERSION);
        info!("Contour CLI: {} command", command);
    }

    /// Create a terrain pipeline from the `[provider]` and `[download]`
    /// config sections.
    pub fn create_pipeline(&self) -> Result<CliPipeline, CliError> {
        let download = &self.config.download;
        let client = AsyncReqwestClient::with_timeout(download.timeout.max(1) * 2)
            .map_err(CliError::Provider)?;
        let source = TerrariumSource::with_url_template(client, &self.config.provider.url_template);

        info!(url_template = %source.url_template(), "Terrarium source ready");

        Ok(TerrainPipeline::new(Arc::new(source))
            .with_fetch_config(FetchConfig::from_settings(download))
            .with_max_tiles(download.max_tiles))
    }

    /// Run a future to completion on a fresh multi-threaded runtime.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, CliError> {
        let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
        Ok(runtime.block_on(future))
    }

    /// Write bytes to a file.
    pub fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), CliError> {
        std::fs::write(path, data).map_err(|e| CliError::FileWrite {
            path: path.display().to_string(),
            error: e,
        })?;

        info!(path = %path.display(), bytes = data.len(), "File written");
        Ok(())
    }
}
