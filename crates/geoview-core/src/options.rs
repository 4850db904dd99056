//! Persistable view configuration.
//!
//! A plain snapshot of the user-facing view settings, serialized as JSON so
//! an embedding application can restore its viewport layout across sessions.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of one viewport's view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Logical 2D frame width.
    pub width: u32,
    /// Logical 2D frame height.
    pub height: u32,
    /// Logical 3D frame width.
    pub width_3d: u32,
    /// Logical 3D frame height.
    pub height_3d: u32,
    /// 2D pixel size in cm.
    pub pixel_size: f64,
    /// 3D pixel size in cm.
    pub pixel_size_3d: f64,
    /// Perspective selector index (0=X, 1=Y, 2=Z, 3=3D).
    pub perspective: u32,
    /// Material view when true, body view otherwise.
    pub material_view: bool,
    /// Query point.
    pub position: DVec3,
    /// Orbit radius of the 3D camera.
    pub rho: f64,
    /// Polar angle of the 3D camera.
    pub theta: f64,
    /// Azimuthal angle of the 3D camera.
    pub phi: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            width_3d: 400,
            height_3d: 400,
            pixel_size: 0.1,
            pixel_size_3d: 0.1,
            perspective: 0,
            material_view: true,
            position: DVec3::ZERO,
            rho: 10.0,
            theta: std::f64::consts::FRAC_PI_2,
            phi: 0.0,
        }
    }
}

impl ViewConfig {
    /// Writes the configuration as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a configuration written by [`ViewConfig::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
