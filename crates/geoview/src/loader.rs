//! Geometry loading through the shared engine handle.

use std::io::Write;
use std::path::Path;

use geoview_core::{GeoViewError, Result};
use geoview_render::SharedEngine;

/// Default 3D field of view in radians (20 degrees).
pub const DEFAULT_3D_FOV: f64 = 0.349_065_850_398_865_9;

/// Initializes the engine from a geometry configuration file.
///
/// A non-zero engine code maps to [`GeoViewError::EngineInit`] and leaves the
/// geometry unloaded; on success the caller broadcasts
/// `notify_geometry_loaded` to its viewports.
pub fn load_geometry(engine: &SharedEngine, config_path: &Path) -> Result<()> {
    let code = {
        let mut guard = engine.write().expect("engine lock poisoned");
        guard.init(config_path)
    };
    if code == 0 {
        log::info!("geometry loaded from '{}'", config_path.display());
        Ok(())
    } else {
        log::error!(
            "geometry load from '{}' failed with code {code}",
            config_path.display()
        );
        Err(GeoViewError::EngineInit { code })
    }
}

/// Sets the engine-side 3D resolution and pixel size with the default field
/// of view. Called by the container before broadcasting `update_3d` to its
/// viewports.
pub fn configure_3d(engine: &SharedEngine, width: u32, height: u32, pixel_size: f64) {
    let mut guard = engine.write().expect("engine lock poisoned");
    guard.set_3d_resolution(width, height, pixel_size, pixel_size, DEFAULT_3D_FOV);
}

/// Loads a bare quadric geometry file by synthesizing the one-line engine
/// configuration wrapping it.
pub fn load_quadric(engine: &SharedEngine, input_file: &Path, scratch_dir: &Path) -> Result<()> {
    let config_path = scratch_dir.join("quadConf.txt");
    let mut file = std::fs::File::create(&config_path)?;
    writeln!(file, "type \"PEN_QUADRIC\"")?;
    writeln!(file, "input-file \"{}\"", input_file.display())?;
    writeln!(file, "processed-geo-file \"report.geo\"")?;
    drop(file);
    load_geometry(engine, &config_path)
}

/// Loads a triangular-mesh geometry file by synthesizing the engine
/// configuration wrapping it.
pub fn load_mesh(engine: &SharedEngine, input_file: &Path, scratch_dir: &Path) -> Result<()> {
    let config_path = scratch_dir.join("triMeshConf.txt");
    let mut file = std::fs::File::create(&config_path)?;
    writeln!(file, "type \"MESH_BODY\"")?;
    writeln!(file, "input-file \"{}\"", input_file.display())?;
    drop(file);
    load_geometry(engine, &config_path)
}
