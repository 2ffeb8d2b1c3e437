//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`displace`] - Mesh from an existing heightmap image
//! - [`terrain`] - Heightmap and mesh for an area
//! - [`tiles`] - Tile range covering an area

pub mod common;
pub mod config;
pub mod displace;
pub mod terrain;
pub mod tiles;
