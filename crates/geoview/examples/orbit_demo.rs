//! Drives a viewport over an analytic nested-sphere geometry and writes the
//! resulting frames as PNG files.
//!
//! Run with `cargo run --example orbit_demo`. Set `RUST_LOG=debug` to watch
//! the render dispatch.

use std::path::Path;

use geoview::{
    configure_3d, Axis, BoundaryError, CameraQuery, DVec3, DepthRange, GeometryEngine, Key,
    Palette, Perspective, SharedEngine, SliceQuery, Viewport, DEFAULT_3D_FOV,
};

/// Three concentric spheres around the origin; material id grows outward and
/// everything past the outer shell is void.
struct NestedSpheres {
    radii: [f64; 3],
}

impl NestedSpheres {
    fn new() -> Self {
        Self {
            radii: [2.0, 4.0, 6.0],
        }
    }

    fn classify(&self, point: DVec3) -> u32 {
        let r = point.length();
        match self.radii.iter().position(|&radius| r < radius) {
            Some(shell) => shell as u32 + 1,
            None => u32::MAX,
        }
    }

    /// Marches a ray until it leaves the void, returning the hit material and
    /// travel distance.
    fn cast(&self, origin: DVec3, direction: DVec3) -> (u32, f32) {
        let mut t = 0.0;
        while t < 50.0 {
            let id = self.classify(origin + direction * t);
            if id != u32::MAX {
                return (id, t as f32);
            }
            t += 0.05;
        }
        (u32::MAX, 50.0)
    }
}

impl GeometryEngine for NestedSpheres {
    fn init(&mut self, _config_path: &Path) -> i32 {
        0
    }

    fn render_slice(
        &self,
        axis: Axis,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
        _threads: u32,
    ) {
        let (h_axis, v_axis) = axis.plane_axes();
        for row in 0..query.height {
            for col in 0..query.width {
                let u = (f64::from(col) - f64::from(query.width) / 2.0) * query.pixel_size_u;
                let v = (f64::from(query.height) / 2.0 - f64::from(row)) * query.pixel_size_v;
                let mut point = query.origin;
                let h = geoview::component(point, h_axis) + u;
                geoview::set_component(&mut point, h_axis, h);
                let v_value = geoview::component(point, v_axis) + v;
                geoview::set_component(&mut point, v_axis, v_value);

                let id = self.classify(point);
                let index = (row * query.width + col) as usize;
                material[index] = id;
                body[index] = id;
            }
        }
    }

    fn render_pan(
        &self,
        axis: Axis,
        direction: geoview::PanDirection,
        pan_pixels: u32,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
    ) {
        // An analytic geometry is cheap to evaluate, so the incremental
        // entry point just recomputes the whole slice at the panned position.
        use geoview::PanDirection;
        let (h_axis, v_axis) = axis.plane_axes();
        let (pan_axis, sign) = match direction {
            PanDirection::Right => (h_axis, 1.0),
            PanDirection::Left => (h_axis, -1.0),
            PanDirection::Up => (v_axis, 1.0),
            PanDirection::Down => (v_axis, -1.0),
        };
        let mut moved = *query;
        let offset = sign * f64::from(pan_pixels) * query.pixel_size_u;
        let panned = geoview::component(moved.origin, pan_axis) + offset;
        geoview::set_component(&mut moved.origin, pan_axis, panned);
        self.render_slice(axis, &moved, material, body, 1);
    }

    fn render_3d(
        &self,
        query: &CameraQuery,
        material: &mut [u32],
        body: &mut [u32],
        distance: &mut [f32],
    ) -> DepthRange {
        let forward = query.look;
        let right = forward.cross(DVec3::Z).normalize_or_zero();
        let up = right.cross(forward);

        let side = (material.len() as f64).sqrt() as u32;
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for row in 0..side {
            for col in 0..side {
                let u = (f64::from(col) / f64::from(side) - 0.5) * DEFAULT_3D_FOV;
                let v = (0.5 - f64::from(row) / f64::from(side)) * DEFAULT_3D_FOV;
                let direction = (forward + right * u + up * v).normalize();

                let (id, depth) = self.cast(query.position, direction);
                let index = (row * side + col) as usize;
                material[index] = id;
                body[index] = id;
                distance[index] = depth;
                if id != u32::MAX {
                    min = min.min(depth);
                    max = max.max(depth);
                }
            }
        }
        if min > max {
            (min, max) = (0.0, 0.0);
        }
        DepthRange { min, max }
    }

    fn test_axis(&self, _axis: Axis, _query: &SliceQuery) -> Vec<BoundaryError> {
        Vec::new()
    }

    fn set_3d_resolution(
        &mut self,
        _width: u32,
        _height: u32,
        _pixel_size_u: f64,
        _pixel_size_v: f64,
        _fov: f64,
    ) {
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    geoview::init_logging();

    let engine: SharedEngine = std::sync::Arc::new(std::sync::RwLock::new(NestedSpheres::new()));

    let palette = Palette::new_shared();
    let mut viewport = Viewport::new(palette);
    viewport.set_engine(engine.clone());
    configure_3d(&engine, 400, 400, 0.1);
    viewport.notify_geometry_loaded();

    // A slice through the sphere centers, zoomed to fit all three shells
    viewport.set_pixel_size(0.025);
    viewport.save_frame(Path::new("slice_x.png"))?;
    println!("wrote slice_x.png");

    // Pan off-center a few steps and keep the incremental render result
    for _ in 0..8 {
        viewport.handle_key(Key::Char('d'));
    }
    viewport.save_frame(Path::new("slice_x_panned.png"))?;
    println!("wrote slice_x_panned.png");

    // Orbit the 3D camera a quarter turn in ten arrow presses
    viewport.set_perspective(Perspective::ThreeD);
    viewport.set_rho(12.0);
    for _ in 0..10 {
        viewport.handle_key(Key::ArrowLeft);
    }
    viewport.save_frame(Path::new("orbit_3d.png"))?;
    println!("wrote orbit_3d.png");

    for event in viewport.drain_events() {
        log::debug!("viewport event: {event:?}");
    }
    Ok(())
}
