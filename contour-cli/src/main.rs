//! Contour CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Contour library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::common::{BoundsArgs, FilterType, MeshArgs};
use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "contour")]
#[command(version = contour::VERSION)]
#[command(about = "Terrain heightmaps and meshes from Terrarium elevation tiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the elevation tiles covering an area
    Tiles {
        #[command(flatten)]
        bounds: BoundsArgs,

        /// Zoom level (default from config, 0-15)
        #[arg(long)]
        zoom: Option<u8>,

        /// Print the URL of every tile
        #[arg(long)]
        list: bool,
    },

    /// Build a heightmap and terrain mesh for an area
    Terrain {
        #[command(flatten)]
        bounds: BoundsArgs,

        /// Zoom level (default from config, 0-15)
        #[arg(long)]
        zoom: Option<u8>,

        /// Side length of the square heightmap in pixels
        #[arg(long)]
        resolution: Option<u32>,

        /// Resampling filter for the crop
        #[arg(long, value_enum)]
        filter: Option<FilterType>,

        #[command(flatten)]
        mesh: MeshArgs,

        /// Write the heightmap as PNG
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable debug logging (also mirrors logs to stdout)
        #[arg(long)]
        debug: bool,
    },

    /// Build a terrain mesh from an existing heightmap image
    Displace {
        /// Heightmap image (PNG or JPEG, red channel = height)
        #[arg(long)]
        heightmap: PathBuf,

        #[command(flatten)]
        mesh: MeshArgs,

        /// Enable debug logging (also mirrors logs to stdout)
        #[arg(long)]
        debug: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tiles { bounds, zoom, list } => {
            commands::tiles::run(commands::tiles::TilesArgs { bounds, zoom, list })
        }
        Commands::Terrain {
            bounds,
            zoom,
            resolution,
            filter,
            mesh,
            output,
            debug,
        } => commands::terrain::run(commands::terrain::TerrainArgs {
            bounds,
            zoom,
            resolution,
            filter,
            mesh,
            output,
            debug,
        }),
        Commands::Displace {
            heightmap,
            mesh,
            debug,
        } => commands::displace::run(commands::displace::DisplaceArgs {
            heightmap,
            mesh,
            debug,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
