//! Tiles command - show the tile range covering an area.

use contour::config::{ConfigFile, TILE_SIZE};
use contour::coord::TileRange;

use super::common::{resolve_zoom, BoundsArgs};
use crate::error::CliError;

/// Arguments for the tiles command.
pub struct TilesArgs {
    pub bounds: BoundsArgs,
    pub zoom: Option<u8>,
    pub list: bool,
}

/// Run the tiles command.
pub fn run(args: TilesArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let bounds = args.bounds.to_bounds()?;
    let zoom = resolve_zoom(args.zoom, &config)?;

    let range = TileRange::from_bounds(&bounds, zoom);
    let extent = range.extent();

    println!("Tile range at zoom {}:", zoom);
    println!("  x: {} - {}", range.x_min, range.x_max);
    println!("  y: {} - {}", range.y_min, range.y_max);
    println!(
        "  {} tiles ({} x {})",
        range.tile_count(),
        range.columns(),
        range.rows()
    );
    match range.mosaic_size(TILE_SIZE) {
        Some((width, height)) => println!("Mosaic: {}x{} pixels", width, height),
        None => println!("Mosaic: too large to assemble into one raster"),
    }
    println!("Extent:");
    println!("  north {:.6}  south {:.6}", extent.north, extent.south);
    println!("  west  {:.6}  east  {:.6}", extent.west, extent.east);

    if range.tile_count() > config.download.max_tiles {
        println!();
        println!(
            "Warning: exceeds the configured limit of {} tiles per request",
            config.download.max_tiles
        );
    }

    if args.list {
        println!();
        let template = &config.provider.url_template;
        for tile in range.tiles() {
            println!(
                "{}",
                template
                    .replace("{z}", &tile.zoom.to_string())
                    .replace("{x}", &tile.x.to_string())
                    .replace("{y}", &tile.y.to_string())
            );
        }
    }

    Ok(())
}
