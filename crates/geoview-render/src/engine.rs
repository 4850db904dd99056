//! The external geometry engine contract.
//!
//! The engine is a black box that classifies pixels of a query grid into
//! material and body ids (plus camera distances in 3D). The viewport never
//! looks inside it; this trait pins down exactly the entry points the render
//! dispatcher uses, including which of them receive a thread-count hint.

use std::path::Path;
use std::sync::{Arc, RwLock};

use glam::DVec3;

use geoview_core::{Axis, BoundaryError, PanDirection};

/// Query grid for a 2D slice render: the slice position and the pixel grid
/// laid out around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceQuery {
    /// Query point the grid is centered on. For incremental pan renders this
    /// is the point of the previous render, so the engine can shift the
    /// existing frame instead of recomputing it.
    pub origin: DVec3,
    /// Horizontal pixel size in cm.
    pub pixel_size_u: f64,
    /// Vertical pixel size in cm.
    pub pixel_size_v: f64,
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
}

/// Camera parameters for a 3D perspective render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraQuery {
    /// Cartesian camera position.
    pub position: DVec3,
    /// Unit look direction.
    pub look: DVec3,
    /// Roll angle.
    pub roll: f64,
    /// Azimuth of the previous 3D render; opaque incremental-render hint.
    pub last_azimuth: f32,
}

/// Camera distance bounds of a 3D render, used for depth shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    /// Closest rendered distance.
    pub min: f32,
    /// Farthest rendered distance.
    pub max: f32,
}

/// Contract of the external geometry evaluator.
///
/// All output buffers are pre-allocated by the caller to the viewport's
/// maximum pixel budget; the engine writes only the first `width * height`
/// entries of each.
pub trait GeometryEngine {
    /// Loads a geometry from a configuration file. Returns 0 on success; any
    /// other code means the geometry stays unloaded.
    fn init(&mut self, config_path: &Path) -> i32;

    /// Renders the full slice perpendicular to `axis`. The output slices
    /// hold exactly `query.width * query.height` row-major pixels.
    ///
    /// This is the only entry point taking a thread-count hint; incremental
    /// and 3D renders parallelize at the engine's own discretion.
    fn render_slice(
        &self,
        axis: Axis,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
        threads: u32,
    );

    /// Incremental render after a small in-plane move: shifts the previous
    /// frame by `pan_pixels` in `direction` and computes only the entering
    /// rows or columns. `query.origin` is the previous render's position.
    fn render_pan(
        &self,
        axis: Axis,
        direction: PanDirection,
        pan_pixels: u32,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
    );

    /// Renders the 3D perspective projection, filling the distance buffer as
    /// well, and reports the distance bounds used for depth shading.
    fn render_3d(
        &self,
        query: &CameraQuery,
        material: &mut [u32],
        body: &mut [u32],
        distance: &mut [f32],
    ) -> DepthRange;

    /// Walks the slice perpendicular to `axis` and reports every boundary
    /// crossing whose observed classification disagrees with the geometry's
    /// expected one.
    fn test_axis(&self, axis: Axis, query: &SliceQuery) -> Vec<BoundaryError>;

    /// Sets the resolution, pixel size, and field of view used by subsequent
    /// 3D renders.
    fn set_3d_resolution(
        &mut self,
        width: u32,
        height: u32,
        pixel_size_u: f64,
        pixel_size_v: f64,
        fov: f64,
    );
}

/// Shared engine handle. The engine outlives all viewports and is owned by
/// the container; viewports hold non-owning clones. Reads dominate - only
/// geometry loading and 3D resolution changes take the write lock.
pub type SharedEngine = Arc<RwLock<dyn GeometryEngine + Send + Sync>>;
