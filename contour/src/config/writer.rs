//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[provider]
; Terrarium-encoded elevation tiles. {{z}}, {{x}} and {{y}} are replaced with
; the XYZ tile coordinates of each request.
url_template = {}

[dem]
; Zoom level for elevation tiles (0-15). Higher values fetch more tiles.
zoom = {}
; Side length in pixels of the square heightmap produced for the bounds
output_resolution = {}
; Resampling filter when cropping the mosaic: nearest or bilinear
resample = {}

[download]
; Seconds to wait for a single tile before treating it as missing
timeout = {}
; Maximum concurrent tile requests (0 = request every tile at once)
max_concurrent = {}
; Refuse requests whose bounds need more tiles than this
max_tiles = {}

[mesh]
; Edge length of the terrain plane in world units
size = {}
; Grid subdivisions per side (vertices per side = segments + 1)
segments = {}
; Height of a full-white heightmap pixel in world units
exaggeration = {}

[logging]
; Log file, cleared at the start of every session
file = {}
"#,
        config.provider.url_template,
        config.dem.zoom,
        config.dem.output_resolution,
        config.dem.resample,
        config.download.timeout,
        config.download.max_concurrent,
        config.download.max_tiles,
        config.mesh.size,
        config.mesh.segments,
        config.mesh.exaggeration,
        config.logging.file.display(),
    )
}
