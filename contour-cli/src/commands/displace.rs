//! Displace command - build a mesh from an existing heightmap image.

use std::path::PathBuf;

use contour::heightmap::Heightmap;
use contour::mesh::{displace, MeshGrid};
use contour::pipeline::TerrainRequest;
use tracing::info;

use super::common::{print_mesh_stats, MeshArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the displace command.
pub struct DisplaceArgs {
    pub heightmap: PathBuf,
    pub mesh: MeshArgs,
    pub debug: bool,
}

/// Run the displace command.
pub fn run(args: DisplaceArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("displace");

    let bytes = std::fs::read(&args.heightmap).map_err(|e| CliError::FileRead {
        path: args.heightmap.display().to_string(),
        error: e,
    })?;
    let heightmap = Heightmap::decode(&bytes)?;
    println!(
        "Heightmap: {} ({}x{})",
        args.heightmap.display(),
        heightmap.width(),
        heightmap.height()
    );

    let request = args.mesh.apply(TerrainRequest::from_config(runner.config()))?;
    let mut mesh = MeshGrid::plane(request.mesh_size, request.segments);
    displace(&mut mesh, Some(&heightmap), request.exaggeration)
        .map_err(|e| CliError::Terrain(e.into()))?;

    print_mesh_stats(&mesh);
    info!(
        vertices = mesh.vertex_count(),
        exaggeration = request.exaggeration,
        "Displace command complete"
    );
    Ok(())
}
