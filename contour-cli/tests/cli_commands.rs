//! Integration tests for the offline CLI commands.
//!
//! Each test runs the real binary with HOME pointed at a temporary directory
//! so the user's configuration is never read or written.

use std::process::{Command, Output};
use tempfile::TempDir;

fn contour(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_contour"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run contour binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_tiles_reports_range_and_mosaic() {
    let home = TempDir::new().unwrap();

    let output = contour(
        &home,
        &[
            "tiles", "--north", "45.1", "--south", "45.0", "--east", "7.1", "--west", "7.0",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Tile range at zoom 11"));
    assert!(text.contains("x: 1063 - 1064"));
    assert!(text.contains("y: 735 - 736"));
    assert!(text.contains("Mosaic: 512x512 pixels"));
}

#[test]
fn test_tiles_list_uses_template() {
    let home = TempDir::new().unwrap();

    let output = contour(
        &home,
        &[
            "tiles", "--north", "45.1", "--south", "45.0", "--east", "7.1", "--west", "7.0",
            "--list",
        ],
    );

    let text = stdout(&output);
    assert!(text.contains("terrarium/11/1063/735.png"));
    assert!(text.contains("terrarium/11/1064/736.png"));
}

#[test]
fn test_inverted_bounds_fail() {
    let home = TempDir::new().unwrap();

    let output = contour(
        &home,
        &[
            "tiles", "--north", "45.0", "--south", "45.1", "--east", "7.1", "--west", "7.0",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bounds"));
}

#[test]
fn test_zoom_beyond_source_is_rejected() {
    let home = TempDir::new().unwrap();

    for zoom in ["25", "70"] {
        let output = contour(
            &home,
            &[
                "tiles", "--north", "80", "--south", "-80", "--east", "179", "--west", "-179",
                "--zoom", zoom,
            ],
        );

        assert_eq!(output.status.code(), Some(1), "zoom {}", zoom);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid --zoom"), "zoom {}: {}", zoom, stderr);
        assert!(!stderr.contains("panicked"));
    }
}

#[test]
fn test_terrain_rejects_oversized_overrides() {
    let home = TempDir::new().unwrap();

    let output = contour(
        &home,
        &[
            "terrain", "--north", "45.1", "--south", "45.0", "--east", "7.1", "--west", "7.0",
            "--resolution", "100000",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid --resolution"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();

    let init = contour(&home, &["config", "init"]);
    assert!(init.status.success());
    assert!(home.path().join(".contour").join("config.ini").exists());

    let show = contour(&home, &["config", "show"]);
    let text = stdout(&show);
    assert!(text.contains("[dem]"));
    assert!(text.contains("zoom = 11"));
    assert!(text.contains("resample = bilinear"));
}

#[test]
fn test_displace_missing_file_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.png");

    let output = contour(
        &home,
        &["displace", "--heightmap", missing.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read file"));
}
