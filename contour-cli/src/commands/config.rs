//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use clap::Subcommand;
use contour::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration (file values over defaults)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Print every setting, grouped by section.
fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load_from(&path)?;

    if !path.exists() {
        println!("; {} not found, showing defaults", path.display());
        println!();
    }

    println!("[provider]");
    println!("  url_template = {}", config.provider.url_template);
    println!();
    println!("[dem]");
    println!("  zoom = {}", config.dem.zoom);
    println!("  output_resolution = {}", config.dem.output_resolution);
    println!("  resample = {}", config.dem.resample);
    println!();
    println!("[download]");
    println!("  timeout = {}", config.download.timeout);
    println!("  max_concurrent = {}", config.download.max_concurrent);
    println!("  max_tiles = {}", config.download.max_tiles);
    println!();
    println!("[mesh]");
    println!("  size = {}", config.mesh.size);
    println!("  segments = {}", config.mesh.segments);
    println!("  exaggeration = {}", config.mesh.exaggeration);
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

/// Create the configuration file.
fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if ConfigFile::write_default(&path, force)? {
        println!("Created {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}
