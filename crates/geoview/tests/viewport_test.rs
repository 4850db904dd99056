//! End-to-end viewport tests against a scripted mock engine.
//!
//! The mock records every engine call and fills the classification buffers
//! with configurable values, so the tests can pin down exactly which entry
//! point the viewport used and what ended up on screen.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use geoview::{
    load_geometry, update_palette, Axis, BoundaryError, CameraQuery, DVec3, DepthRange,
    GeometryEngine, Key, Palette, PanDirection, Perspective, RenderMode, SharedEngine, SliceQuery,
    ViewMode, Viewport, ViewportEvent,
};

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq)]
enum EngineCall {
    Init,
    Slice(Axis, DVec3, u32),
    Pan(Axis, PanDirection, u32, DVec3),
    ThreeD(DVec3, f32),
    Test(Axis),
}

/// Scripted engine: fills material/body with fixed ids, distances with a
/// left-to-right ramp, and records calls.
struct ScriptedEngine {
    calls: Mutex<Vec<EngineCall>>,
    material_id: u32,
    body_id: u32,
    init_code: i32,
    test_errors: Vec<BoundaryError>,
}

impl ScriptedEngine {
    fn new(material_id: u32, body_id: u32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            material_id,
            body_id,
            init_code: 0,
            test_errors: Vec::new(),
        }
    }

    fn shared(self) -> (SharedEngine, Arc<RwLock<Self>>) {
        let inner = Arc::new(RwLock::new(self));
        let shared: SharedEngine = inner.clone();
        (shared, inner)
    }
}

impl GeometryEngine for ScriptedEngine {
    fn init(&mut self, _config_path: &Path) -> i32 {
        self.calls.lock().unwrap().push(EngineCall::Init);
        self.init_code
    }

    fn render_slice(
        &self,
        axis: Axis,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
        threads: u32,
    ) {
        let pixels = (query.width * query.height) as usize;
        material[..pixels].fill(self.material_id);
        body[..pixels].fill(self.body_id);
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::Slice(axis, query.origin, threads));
    }

    fn render_pan(
        &self,
        axis: Axis,
        direction: PanDirection,
        pan_pixels: u32,
        query: &SliceQuery,
        material: &mut [u32],
        body: &mut [u32],
    ) {
        let pixels = (query.width * query.height) as usize;
        material[..pixels].fill(self.material_id);
        body[..pixels].fill(self.body_id);
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::Pan(axis, direction, pan_pixels, query.origin));
    }

    fn render_3d(
        &self,
        query: &CameraQuery,
        material: &mut [u32],
        body: &mut [u32],
        distance: &mut [f32],
    ) -> DepthRange {
        material.fill(self.material_id);
        body.fill(self.body_id);
        for (i, d) in distance.iter_mut().enumerate() {
            *d = 5.0 + (i % 100) as f32 / 10.0;
        }
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::ThreeD(query.position, query.last_azimuth));
        DepthRange {
            min: 5.0,
            max: 15.0,
        }
    }

    fn test_axis(&self, axis: Axis, _query: &SliceQuery) -> Vec<BoundaryError> {
        self.calls.lock().unwrap().push(EngineCall::Test(axis));
        self.test_errors.clone()
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

fn viewport_with_engine(engine: SharedEngine) -> Viewport {
    let mut viewport = Viewport::new(Palette::new_shared());
    viewport.set_engine(engine);
    viewport.resize_display(8, 8);
    viewport.notify_geometry_loaded();
    viewport.drain_events();
    viewport
}

#[test]
fn render_is_noop_without_engine_or_geometry() {
    let mut viewport = Viewport::new(Palette::new_shared());
    viewport.render(RenderMode::Full);
    assert!(viewport.frame().iter().all(|&b| b == 0));
    assert!(viewport.self_test().is_empty());

    // Bound engine but geometry not loaded: still a no-op
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    viewport.set_engine(engine);
    viewport.render(RenderMode::Full);
    assert!(inner.read().unwrap().calls.lock().unwrap().is_empty());
}

#[test]
fn palette_scenario_colors_every_pixel() {
    let (engine, _inner) = ScriptedEngine::new(5, 9).shared();
    let palette = Palette::new_shared();
    palette.write().unwrap().set_color(5, [10, 20, 30]);

    let mut viewport = Viewport::new(palette);
    viewport.set_engine(engine);
    viewport.resize_display(8, 8);
    viewport.notify_geometry_loaded();

    assert!(viewport
        .frame()
        .chunks_exact(3)
        .all(|px| px == [10, 20, 30]));

    let legend = viewport.legend();
    assert!(legend.contains("Material 5"));
    assert_eq!(legend.matches("<th").count(), 1);
}

#[test]
fn pan_key_uses_incremental_render() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);

    // X perspective: 'd' pans right along the Y axis
    assert!(viewport.handle_key(Key::Char('d')));
    let calls = inner.read().unwrap().calls.lock().unwrap().clone();
    assert_eq!(
        calls.last(),
        Some(&EngineCall::Pan(
            Axis::X,
            PanDirection::Right,
            10,
            DVec3::ZERO
        ))
    );

    // The move itself shifted the stored query point
    assert!((viewport.nav().position().y - 1.0).abs() < 1e-12);
    // ...and the render committed it as the next pan origin
    assert_eq!(viewport.nav().last_position(), viewport.nav().position());
    assert_eq!(viewport.drain_events(), vec![ViewportEvent::Changed]);
}

#[test]
fn forward_key_renders_full() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);

    assert!(viewport.handle_key(Key::Char('f')));
    let calls = inner.read().unwrap().calls.lock().unwrap().clone();
    match calls.last() {
        Some(EngineCall::Slice(Axis::X, origin, threads)) => {
            assert!((origin.x - 1.0).abs() < 1e-12);
            assert!(*threads >= 1);
        }
        other => panic!("expected a full slice render, got {other:?}"),
    }
}

#[test]
fn zoom_floor_scenario() {
    let (engine, _inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);

    viewport.set_pixel_size(0.1);
    assert!(viewport.handle_key(Key::Char('+')));
    assert!((viewport.nav().pixel_size() - 0.09).abs() < 1e-12);

    for _ in 0..200 {
        viewport.handle_key(Key::Char('+'));
    }
    assert!((viewport.nav().pixel_size() - 1e-5).abs() < 1e-15);
    assert!(viewport.nav().pixel_size() > 0.0);
}

#[test]
fn orbit_scenario_recomputes_camera() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);

    viewport.set_perspective(Perspective::ThreeD);
    viewport.set_theta(1.5);
    assert!(viewport.handle_key(Key::ArrowUp));

    let nav = viewport.nav();
    assert!((nav.theta() - 1.4).abs() < 1e-12);

    let rho = nav.rho();
    let expected = DVec3::new(
        rho * nav.phi().cos() * nav.theta().sin(),
        rho * nav.phi().sin() * nav.theta().sin(),
        rho * nav.theta().cos(),
    );
    assert!((nav.camera() - expected).length() < 1e-12);
    assert!((nav.look().length() - 1.0).abs() < 1e-12);

    // Every 3D move renders in full through the 3D entry point
    let calls = inner.read().unwrap().calls.lock().unwrap().clone();
    assert!(matches!(calls.last(), Some(EngineCall::ThreeD(_, _))));
}

#[test]
fn theta_clamps_at_polar_margin() {
    let (engine, _inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);
    viewport.set_perspective(Perspective::ThreeD);

    for _ in 0..100 {
        viewport.handle_key(Key::ArrowUp);
    }
    assert!((viewport.nav().theta() - 0.1).abs() < 1e-12);

    for _ in 0..100 {
        viewport.handle_key(Key::ArrowDown);
    }
    assert!((viewport.nav().theta() - (std::f64::consts::PI - 0.1)).abs() < 1e-12);
}

#[test]
fn phi_wraps_without_going_negative() {
    let (engine, _inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);
    viewport.set_perspective(Perspective::ThreeD);

    // Right arrow decreases phi from 0; it must wrap just below 2*pi
    viewport.handle_key(Key::ArrowRight);
    let phi = viewport.nav().phi();
    assert!(phi > 0.0 && phi < std::f64::consts::TAU);
    assert!((phi - (std::f64::consts::TAU - 0.1)).abs() < 1e-9);
}

#[test]
fn zoom_keys_in_3d_request_global_zoom() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);
    viewport.set_perspective(Perspective::ThreeD);
    inner.read().unwrap().calls.lock().unwrap().clear();
    viewport.drain_events();

    // Reported unhandled so the caller skips the redundant render
    assert!(!viewport.handle_key(Key::Char('+')));
    assert!(!viewport.handle_key(Key::Char('-')));
    assert_eq!(
        viewport.drain_events(),
        vec![ViewportEvent::ZoomIn3D, ViewportEvent::ZoomOut3D]
    );
    assert!(inner.read().unwrap().calls.lock().unwrap().is_empty());
}

#[test]
fn toggle_view_recolors_without_engine_render() {
    let (engine, inner) = ScriptedEngine::new(2, 7).shared();
    let palette = Palette::new_shared();
    {
        let mut guard = palette.write().unwrap();
        guard.set_color(2, [100, 0, 0]);
        guard.set_color(7, [0, 100, 0]);
    }

    let mut viewport = Viewport::new(palette);
    viewport.set_engine(engine);
    viewport.resize_display(4, 4);
    viewport.notify_geometry_loaded();
    assert_eq!(&viewport.frame()[..3], &[100, 0, 0]);

    let renders_before = inner.read().unwrap().calls.lock().unwrap().len();
    assert!(viewport.handle_key(Key::Char('m')));
    assert_eq!(viewport.view_mode(), ViewMode::Body);
    assert_eq!(&viewport.frame()[..3], &[0, 100, 0]);
    assert!(viewport.legend().contains("Body 7"));

    // No engine call happened; only the color mapping changed
    assert_eq!(
        inner.read().unwrap().calls.lock().unwrap().len(),
        renders_before
    );
}

#[test]
fn redundant_perspective_switch_is_unhandled() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);
    inner.read().unwrap().calls.lock().unwrap().clear();

    assert!(!viewport.handle_key(Key::Char('x')));
    assert!(inner.read().unwrap().calls.lock().unwrap().is_empty());
    assert!(viewport.drain_events().is_empty());

    assert!(viewport.handle_key(Key::Char('y')));
    assert_eq!(viewport.nav().perspective(), Perspective::Y);
}

#[test]
fn unbound_key_does_nothing() {
    let (engine, inner) = ScriptedEngine::new(1, 1).shared();
    let mut viewport = viewport_with_engine(engine);
    inner.read().unwrap().calls.lock().unwrap().clear();

    assert!(!viewport.handle_key(Key::Char('q')));
    assert!(inner.read().unwrap().calls.lock().unwrap().is_empty());
    assert!(viewport.drain_events().is_empty());
}

#[test]
fn self_test_surfaces_engine_findings_verbatim() {
    let mut engine = ScriptedEngine::new(1, 1);
    let finding = BoundaryError {
        from: DVec3::ZERO,
        to: DVec3::X,
        initial: (1, 2),
        observed: (4, 5),
        expected: (6, 7),
    };
    engine.test_errors = vec![finding.clone()];
    let (engine, _inner) = engine.shared();
    let mut viewport = viewport_with_engine(engine);

    let findings = viewport.self_test();
    assert_eq!(findings, vec![finding]);

    // 3D self-test is intentionally not defined
    viewport.set_perspective(Perspective::ThreeD);
    assert!(viewport.self_test().is_empty());
}

#[test]
fn depth_shading_darkens_far_3d_pixels() {
    let (engine, _inner) = ScriptedEngine::new(3, 3).shared();
    let palette = Palette::new_shared();
    palette.write().unwrap().set_color(3, [200, 200, 200]);

    let mut viewport = Viewport::new(palette);
    viewport.set_engine(engine);
    viewport.notify_geometry_loaded();
    viewport.set_perspective(Perspective::ThreeD);

    // The mock ramps distance with pixel index; nearer pixels are brighter
    let frame = viewport.frame();
    assert!(frame[0] > frame[99 * 3]);
}

#[test]
fn copy_state_is_by_value() {
    let (engine, _inner) = ScriptedEngine::new(5, 5).shared();
    let mut source = viewport_with_engine(engine);
    source.set_perspective(Perspective::Z);
    source.set_pixel_size(0.05);

    let mut copy = Viewport::new(Palette::new_shared());
    copy.copy_state_from(&source);
    assert_eq!(copy.nav().perspective(), Perspective::Z);
    assert!((copy.nav().pixel_size() - 0.05).abs() < 1e-12);
    assert_eq!(copy.frame(), source.frame());

    // Later moves of the source do not leak into the copy
    source.handle_key(Key::Char('f'));
    assert_ne!(copy.nav().position(), source.nav().position());
}

#[test]
fn palette_edits_funnel_through_update() {
    let (engine, _inner) = ScriptedEngine::new(5, 5).shared();
    let palette = Palette::new_shared();

    let mut viewport = Viewport::new(palette.clone());
    viewport.set_engine(engine);
    viewport.resize_display(4, 4);
    viewport.notify_geometry_loaded();
    viewport.drain_events();

    update_palette(&palette, &mut [&mut viewport], |p| {
        p.set_color(5, [1, 2, 3]);
    });
    assert_eq!(&viewport.frame()[..3], &[1, 2, 3]);
    assert_eq!(viewport.drain_events(), vec![ViewportEvent::Changed]);
}

#[test]
fn load_geometry_reports_engine_failure() {
    let mut failing = ScriptedEngine::new(1, 1);
    failing.init_code = 2;
    let (engine, _inner) = failing.shared();

    let config = std::env::temp_dir().join("geoview_bad_geometry.conf");
    std::fs::write(&config, "type \"PEN_QUADRIC\"\n").unwrap();

    let err = load_geometry(&engine, &config).unwrap_err();
    assert!(matches!(
        err,
        geoview::GeoViewError::EngineInit { code: 2 }
    ));

    std::fs::remove_file(&config).ok();
}
