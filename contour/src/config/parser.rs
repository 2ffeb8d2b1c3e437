//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{MAX_MESH_SEGMENTS, MAX_OUTPUT_RESOLUTION};
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::provider::TERRARIUM_MAX_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = section.get("url_template") {
            let v = v.trim();
            if !v.is_empty() {
                if !(v.contains("{z}") && v.contains("{x}") && v.contains("{y}")) {
                    return Err(invalid(
                        "provider",
                        "url_template",
                        v,
                        "must contain {z}, {x} and {y} placeholders",
                    ));
                }
                config.provider.url_template = v.to_string();
            }
        }
    }

    // [dem] section
    if let Some(section) = ini.section(Some("dem")) {
        if let Some(v) = section.get("zoom") {
            config.dem.zoom = parse_in_range("dem", "zoom", v, 0, TERRARIUM_MAX_ZOOM)?;
        }
        if let Some(v) = section.get("output_resolution") {
            config.dem.output_resolution =
                parse_in_range("dem", "output_resolution", v, 1, MAX_OUTPUT_RESOLUTION)?;
        }
        if let Some(v) = section.get("resample") {
            config.dem.resample = v
                .parse()
                .map_err(|_| invalid("dem", "resample", v, "must be 'nearest' or 'bilinear'"))?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_in_range("download", "timeout", v, 1, 600)?;
        }
        if let Some(v) = section.get("max_concurrent") {
            config.download.max_concurrent = parse_value(
                "download",
                "max_concurrent",
                v,
                "must be a non-negative integer (0 = unlimited)",
            )?;
        }
        if let Some(v) = section.get("max_tiles") {
            config.download.max_tiles = parse_in_range("download", "max_tiles", v, 1, 4096)?;
        }
    }

    // [mesh] section
    if let Some(section) = ini.section(Some("mesh")) {
        if let Some(v) = section.get("size") {
            config.mesh.size = parse_positive_f32("mesh", "size", v, false)?;
        }
        if let Some(v) = section.get("segments") {
            config.mesh.segments = parse_in_range("mesh", "segments", v, 1, MAX_MESH_SEGMENTS)?;
        }
        if let Some(v) = section.get("exaggeration") {
            config.mesh.exaggeration = parse_positive_f32("mesh", "exaggeration", v, true)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_in_range<T>(
    section: &str,
    key: &str,
    value: &str,
    min: T,
    max: T,
) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let reason = format!("must be an integer between {} and {}", min, max);
    let parsed: T = parse_value(section, key, value, &reason)?;
    if parsed < min || parsed > max {
        return Err(invalid(section, key, value, &reason));
    }
    Ok(parsed)
}

fn parse_positive_f32(
    section: &str,
    key: &str,
    value: &str,
    allow_zero: bool,
) -> Result<f32, ConfigFileError> {
    let reason = if allow_zero {
        "must be a finite number >= 0"
    } else {
        "must be a finite number > 0"
    };
    let parsed: f32 = parse_value(section, key, value, reason)?;
    let in_range = if allow_zero {
        parsed >= 0.0
    } else {
        parsed > 0.0
    };
    if !parsed.is_finite() || !in_range {
        return Err(invalid(section, key, value, reason));
    }
    Ok(parsed)
}

/// Expands a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
