//! Terrain command - build a heightmap and mesh for an area.

use std::path::PathBuf;
use std::time::Instant;

use contour::config::MAX_OUTPUT_RESOLUTION;
use contour::pipeline::{RequestGate, TerrainRequest};
use tracing::{info, warn};

use super::common::{
    check_range, print_mesh_stats, resolve_zoom, BoundsArgs, FilterType, MeshArgs,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the terrain command.
pub struct TerrainArgs {
    pub bounds: BoundsArgs,
    pub zoom: Option<u8>,
    pub resolution: Option<u32>,
    pub filter: Option<FilterType>,
    pub mesh: MeshArgs,
    pub output: Option<PathBuf>,
    pub debug: bool,
}

/// Run the terrain command.
pub fn run(args: TerrainArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("terrain");
    let config = runner.config();

    let mut request = TerrainRequest::from_config(config)
        .with_bounds(args.bounds.to_bounds()?)
        .with_zoom(resolve_zoom(args.zoom, config)?);
    if let Some(resolution) = args.resolution {
        check_range("resolution", resolution, 1, MAX_OUTPUT_RESOLUTION)?;
        request = request.with_output_resolution(resolution);
    }
    if let Some(filter) = args.filter {
        request = request.with_filter(filter.into());
    }
    let request = args.mesh.apply(request)?;

    let pipeline = runner.create_pipeline()?;
    let (_, range) = pipeline.plan(&request)?;

    println!(
        "Loading {} elevation tiles at zoom {} from {}...",
        range.tile_count(),
        request.zoom,
        pipeline.source().url_template()
    );

    let gate = RequestGate::new();
    let start = Instant::now();
    let dem = runner.block_on(pipeline.fetch_heightmap(&request, gate.begin()))??;

    for tile in &dem.summary.missing_tiles {
        warn!(tile = %tile, "Tile missing from heightmap");
    }
    println!("{}", dem.summary);
    println!(
        "  {} of {} tiles loaded in {:.2}s",
        dem.summary.loaded_tiles,
        dem.summary.requested_tiles,
        start.elapsed().as_secs_f64()
    );
    if !dem.summary.missing_tiles.is_empty() {
        println!(
            "  {} tiles unavailable; their area is treated as sea level",
            dem.summary.missing_tiles.len()
        );
    }

    let mesh = pipeline.build_mesh(&request, Some(&dem.heightmap))?;
    print_mesh_stats(&mesh);

    if let Some(path) = args.output {
        let png = dem.heightmap.to_png_bytes()?;
        runner.write_file(&path, &png)?;
        println!(
            "Heightmap saved: {} ({}x{})",
            path.display(),
            dem.heightmap.width(),
            dem.heightmap.height()
        );
    }

    info!("Terrain command complete");
    Ok(())
}
