//! Configuration for Contour components.
//!
//! [`ConfigFile`] is the user's `~/.contour/config.ini`, one struct per INI
//! section. [`FetchConfig`] is the value object handed to the tile fetcher.
//!
//! # Example
//!
//! ```
//! use contour::config::{ConfigFile, FetchConfig};
//!
//! let file = ConfigFile::default();
//! let fetch = FetchConfig::from_settings(&file.download);
//! assert_eq!(fetch.timeout().as_secs(), file.download.timeout);
//! ```

mod defaults;
mod fetch;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use fetch::FetchConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DemSettings, DownloadSettings, LoggingSettings, MeshSettings, ProviderSettings,
};
