//! Reading and writing `~/.contour/config.ini`.

use ini::Ini;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::parser::parse_ini;
use super::settings::ConfigFile;
use super::writer::to_config_string;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read or is not valid INI
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// The file or its directory could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A key holds a value outside its allowed range or format
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Loads `~/.contour/config.ini`, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Loads `path`. A missing file yields the defaults; keys absent from the
    /// file keep their default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        match Ini::load_from_file(path) {
            Ok(ini) => parse_ini(&ini),
            Err(ini::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigFileError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the commented INI form to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_error = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, to_config_string(self)).map_err(write_error)
    }

    /// Writes a default config to `path` unless one exists and `force` is
    /// false. Returns whether the file was written.
    pub fn write_default(path: &Path, force: bool) -> Result<bool, ConfigFileError> {
        if path.exists() && !force {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }
}

/// The config directory, `~/.contour` (or `./.contour` without a home).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".contour")
}

pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
