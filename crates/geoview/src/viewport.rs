//! The viewport: composition root of navigation, dispatch, and compositing.

use std::path::Path;

use geoview_core::{
    Axis, BoundaryError, FrameBuffers, NavigationState, PanDirection, Perspective, SharedPalette,
    ViewConfig,
};
use geoview_render::{
    build_legend, recolor, save_rgb_image, DepthRange, Dispatcher, ExportError, RenderMode,
    SharedEngine, ViewMode,
};

use crate::input::{Action, Key, KeyBindings};

/// Pixels moved by one in-plane pan step; also the incremental render width.
const PAN_STEP_PIXELS: u32 = 10;

/// Orbit step in radians for one 3D arrow-key press.
const ORBIT_STEP: f64 = 0.1;

/// Notification emitted by a viewport for its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The viewport was clicked; the container may change its selection.
    Clicked,
    /// Viewport state changed; dependent UI should refresh.
    Changed,
    /// Request a global 3D zoom-in (3D pixel size is container-owned).
    ZoomIn3D,
    /// Request a global 3D zoom-out.
    ZoomOut3D,
}

/// What a handled action asks the viewport to do next.
enum Outcome {
    Render(RenderMode),
    Recolor,
    Unhandled,
}

/// An interactive view of the geometry: one navigation state, one set of
/// frame buffers, and the machinery to keep the displayable image in sync.
///
/// A viewport may exist before any geometry is available; render and
/// self-test calls are silent no-ops until an engine is bound and
/// [`Viewport::notify_geometry_loaded`] has been called.
pub struct Viewport {
    nav: NavigationState,
    buffers: FrameBuffers,
    mode: ViewMode,
    geometry_loaded: bool,
    engine: Option<SharedEngine>,
    palette: SharedPalette,
    dispatcher: Dispatcher,
    depth: Option<DepthRange>,
    legend: String,
    bindings: KeyBindings,
    events: Vec<ViewportEvent>,
}

impl Viewport {
    /// Creates a viewport sharing the given palette, with no engine bound.
    #[must_use]
    pub fn new(palette: SharedPalette) -> Self {
        Self {
            nav: NavigationState::new(),
            buffers: FrameBuffers::new(),
            mode: ViewMode::Material,
            geometry_loaded: false,
            engine: None,
            palette,
            dispatcher: Dispatcher::new(),
            depth: None,
            legend: String::new(),
            bindings: KeyBindings::default(),
            events: Vec::new(),
        }
    }

    /// Binds the shared engine handle. Geometry is considered unloaded until
    /// the next [`Viewport::notify_geometry_loaded`].
    pub fn set_engine(&mut self, engine: SharedEngine) {
        self.engine = Some(engine);
        self.geometry_loaded = false;
    }

    /// Marks the geometry as loaded and performs the first render.
    pub fn notify_geometry_loaded(&mut self) {
        self.geometry_loaded = true;
        self.render(RenderMode::Full);
        self.events.push(ViewportEvent::Changed);
    }

    /// Returns whether geometry has been loaded.
    #[must_use]
    pub fn geometry_loaded(&self) -> bool {
        self.geometry_loaded
    }

    /// Returns the navigation state.
    #[must_use]
    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    /// Returns the active view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns the legend markup of the last composited frame.
    #[must_use]
    pub fn legend(&self) -> &str {
        &self.legend
    }

    /// Returns the displayable RGB frame of the active view.
    #[must_use]
    pub fn frame(&self) -> &[u8] {
        self.buffers.rgb_frame(self.nav.perspective().is_3d())
    }

    /// Returns the `(width, height)` of the active view.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffers.dimensions(self.nav.perspective().is_3d())
    }

    /// Returns the key binding table.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Returns the key binding table for editing.
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Takes all notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<ViewportEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reports a click on this viewport to the container.
    pub fn click(&mut self) {
        self.events.push(ViewportEvent::Clicked);
    }

    /// Renders through the engine and recomposites the frame. A no-op when no
    /// engine is bound or geometry is not loaded.
    pub fn render(&mut self, mode: RenderMode) {
        let Some(engine) = &self.engine else {
            return;
        };
        if !self.geometry_loaded {
            return;
        }

        {
            let guard = engine.read().expect("engine lock poisoned");
            self.depth = self
                .dispatcher
                .render(&*guard, &self.nav, &mut self.buffers, mode);
        }
        self.nav.commit_render();
        self.recolor();
    }

    /// Recomposites the color buffer and legend from the classification
    /// buffers, without touching the engine.
    pub fn recolor(&mut self) {
        if !self.geometry_loaded {
            return;
        }
        let palette = self.palette.read().expect("palette lock poisoned");
        let is_3d = self.nav.perspective().is_3d();
        let visibility = recolor(&mut self.buffers, &palette, self.mode, is_3d, self.depth);
        self.legend = build_legend(&visibility, &palette, self.mode);
    }

    /// Runs the engine's boundary self-test on the current slice. Defined for
    /// the 2D perspectives only; returns no findings in 3D or when no
    /// geometry is available. Does not render or mutate viewport state.
    #[must_use]
    pub fn self_test(&self) -> Vec<BoundaryError> {
        let Some(engine) = &self.engine else {
            return Vec::new();
        };
        if !self.geometry_loaded {
            return Vec::new();
        }
        let Some(axis) = self.nav.perspective().axis() else {
            return Vec::new();
        };

        let query = Dispatcher::slice_query(&self.nav, &self.buffers);
        let guard = engine.read().expect("engine lock poisoned");
        guard.test_axis(axis, &query)
    }

    /// Handles one key press. Returns whether the key changed viewport state;
    /// redundant perspective switches and unbound keys report `false` so the
    /// caller can skip redundant redraws.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.bindings.action(key) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }

    /// Applies one logical action against the current perspective.
    pub fn apply_action(&mut self, action: Action) -> bool {
        let outcome = match self.nav.perspective().axis() {
            Some(axis) => self.apply_2d(axis, action),
            None => self.apply_3d(action),
        };

        match outcome {
            Outcome::Render(mode) => {
                self.render(mode);
                self.events.push(ViewportEvent::Changed);
                true
            }
            Outcome::Recolor => {
                self.recolor();
                self.events.push(ViewportEvent::Changed);
                true
            }
            Outcome::Unhandled => false,
        }
    }

    /// Effects of actions in a 2D slice view. Arrow and letter movement both
    /// pan the slice; small pans render incrementally.
    fn apply_2d(&mut self, axis: Axis, action: Action) -> Outcome {
        let step = f64::from(PAN_STEP_PIXELS) * self.nav.pixel_size();
        let (horizontal, vertical) = axis.plane_axes();

        match action {
            Action::PanUp | Action::OrbitUp => self.pan(vertical, step, PanDirection::Up),
            Action::PanDown | Action::OrbitDown => self.pan(vertical, -step, PanDirection::Down),
            Action::PanLeft | Action::OrbitLeft => self.pan(horizontal, -step, PanDirection::Left),
            Action::PanRight | Action::OrbitRight => {
                self.pan(horizontal, step, PanDirection::Right)
            }
            Action::Forward => {
                self.nav.translate(axis, step);
                Outcome::Render(RenderMode::Full)
            }
            Action::Backward => {
                self.nav.translate(axis, -step);
                Outcome::Render(RenderMode::Full)
            }
            Action::ZoomIn => {
                self.nav.zoom_in();
                Outcome::Render(RenderMode::Full)
            }
            Action::ZoomOut => {
                self.nav.zoom_out();
                Outcome::Render(RenderMode::Full)
            }
            Action::SetPerspective(target) if target == axis => Outcome::Unhandled,
            Action::SetPerspective(target) => {
                self.nav.set_perspective(Perspective::from(target));
                Outcome::Render(RenderMode::Full)
            }
            Action::ToggleView => {
                self.mode = self.mode.toggled();
                Outcome::Recolor
            }
        }
    }

    /// Effects of actions in the 3D view. Letters move the look-at point,
    /// arrows orbit the camera; every move is a full render.
    fn apply_3d(&mut self, action: Action) -> Outcome {
        let step = f64::from(PAN_STEP_PIXELS) * self.nav.pixel_size_3d();

        match action {
            Action::PanUp => self.nav.translate(Axis::Z, step),
            Action::PanDown => self.nav.translate(Axis::Z, -step),
            Action::PanLeft => self.nav.translate(Axis::Y, -step),
            Action::PanRight => self.nav.translate(Axis::Y, step),
            Action::OrbitUp => self.nav.set_theta(self.nav.theta() - ORBIT_STEP),
            Action::OrbitDown => self.nav.set_theta(self.nav.theta() + ORBIT_STEP),
            Action::OrbitLeft => self.nav.set_phi(self.nav.phi() + ORBIT_STEP),
            Action::OrbitRight => self.nav.set_phi(self.nav.phi() - ORBIT_STEP),
            Action::Forward => self.nav.set_rho(self.nav.rho() - step),
            Action::Backward => self.nav.set_rho(self.nav.rho() + step),
            Action::ZoomIn => {
                // 3D zoom is global; the container adjusts the shared pixel
                // size and re-renders every viewport.
                self.events.push(ViewportEvent::ZoomIn3D);
                return Outcome::Unhandled;
            }
            Action::ZoomOut => {
                self.events.push(ViewportEvent::ZoomOut3D);
                return Outcome::Unhandled;
            }
            Action::SetPerspective(target) => {
                self.nav.set_perspective(Perspective::from(target));
                return Outcome::Render(RenderMode::Full);
            }
            Action::ToggleView => {
                self.mode = self.mode.toggled();
                return Outcome::Recolor;
            }
        }
        Outcome::Render(RenderMode::Full)
    }

    fn pan(&mut self, axis: Axis, delta: f64, direction: PanDirection) -> Outcome {
        self.nav.translate(axis, delta);
        Outcome::Render(RenderMode::Pan {
            direction,
            pixels: PAN_STEP_PIXELS,
        })
    }

    /// Re-renders only when the 3D view is active.
    fn render_if_3d(&mut self) {
        if self.nav.perspective().is_3d() {
            self.render(RenderMode::Full);
        }
    }

    /// Sets one component of the query point and re-renders.
    pub fn set_position(&mut self, axis: Axis, value: f64) {
        self.nav.set_position(axis, value);
        self.render(RenderMode::Full);
    }

    /// Sets the orbit radius; re-renders in the 3D view.
    pub fn set_rho(&mut self, rho: f64) {
        self.nav.set_rho(rho);
        self.render_if_3d();
    }

    /// Sets the polar angle; re-renders in the 3D view.
    pub fn set_theta(&mut self, theta: f64) {
        self.nav.set_theta(theta);
        self.render_if_3d();
    }

    /// Sets the azimuthal angle; re-renders in the 3D view.
    pub fn set_phi(&mut self, phi: f64) {
        self.nav.set_phi(phi);
        self.render_if_3d();
    }

    /// Switches perspective and re-renders.
    pub fn set_perspective(&mut self, perspective: Perspective) {
        self.nav.set_perspective(perspective);
        self.render(RenderMode::Full);
    }

    /// Sets the 2D pixel size; re-renders the slice views.
    pub fn set_pixel_size(&mut self, pixel_size: f64) {
        self.nav.set_pixel_size(pixel_size);
        if !self.nav.perspective().is_3d() {
            self.render(RenderMode::Full);
        }
    }

    /// Sets the material/body view mode and recomposites; the classification
    /// buffers are unchanged, so no engine render happens.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.recolor();
    }

    /// Sets the logical 2D display resolution; re-renders the slice views.
    pub fn resize_display(&mut self, width: u32, height: u32) {
        self.buffers.resize(width, height);
        if !self.nav.perspective().is_3d() {
            self.render(RenderMode::Full);
        }
    }

    /// Applies a container-wide 3D resolution/zoom change; re-renders when
    /// the 3D view is active. The container updates the engine's 3D
    /// resolution before broadcasting this to its viewports.
    pub fn update_3d(&mut self, width: u32, height: u32, pixel_size: f64) {
        self.buffers.resize_3d(width, height);
        self.nav.set_pixel_size_3d(pixel_size);
        self.render_if_3d();
    }

    /// Value-copies another viewport's camera, view settings, and buffer
    /// contents. Used when a new viewport is added so it inherits the active
    /// one's view. Queued events are not copied.
    pub fn copy_state_from(&mut self, other: &Viewport) {
        self.nav = other.nav.clone();
        self.buffers.copy_from(&other.buffers);
        self.mode = other.mode;
        self.geometry_loaded = other.geometry_loaded;
        self.engine = other.engine.clone();
        self.depth = other.depth;
        self.legend = other.legend.clone();
        self.bindings = other.bindings.clone();
    }

    /// Saves the displayable frame to an image file.
    pub fn save_frame(&self, path: &Path) -> Result<(), ExportError> {
        let (width, height) = self.dimensions();
        save_rgb_image(path, self.frame(), width, height)
    }

    /// Snapshots the user-facing view settings.
    #[must_use]
    pub fn config(&self) -> ViewConfig {
        ViewConfig {
            width: self.buffers.width(),
            height: self.buffers.height(),
            width_3d: self.buffers.width_3d(),
            height_3d: self.buffers.height_3d(),
            pixel_size: self.nav.pixel_size(),
            pixel_size_3d: self.nav.pixel_size_3d(),
            perspective: self.nav.perspective().to_index(),
            material_view: self.mode == ViewMode::Material,
            position: self.nav.position(),
            rho: self.nav.rho(),
            theta: self.nav.theta(),
            phi: self.nav.phi(),
        }
    }

    /// Restores view settings from a snapshot and re-renders.
    pub fn apply_config(&mut self, config: &ViewConfig) {
        self.buffers.resize(config.width, config.height);
        self.buffers.resize_3d(config.width_3d, config.height_3d);
        self.nav.set_pixel_size(config.pixel_size);
        self.nav.set_pixel_size_3d(config.pixel_size_3d);
        self.nav.set_position(Axis::X, config.position.x);
        self.nav.set_position(Axis::Y, config.position.y);
        self.nav.set_position(Axis::Z, config.position.z);
        self.nav.set_rho(config.rho);
        self.nav.set_theta(config.theta);
        self.nav.set_phi(config.phi);
        self.mode = if config.material_view {
            ViewMode::Material
        } else {
            ViewMode::Body
        };
        self.nav
            .set_perspective(Perspective::from_index(config.perspective));
        self.render(RenderMode::Full);
    }
}

/// Applies one palette edit and recomposites every dependent viewport. All
/// palette mutation funnels through here so no viewport is left displaying
/// stale colors.
pub fn update_palette<F>(palette: &SharedPalette, viewports: &mut [&mut Viewport], edit: F)
where
    F: FnOnce(&mut geoview_core::Palette),
{
    {
        let mut guard = palette.write().expect("palette lock poisoned");
        edit(&mut guard);
    }
    for viewport in viewports {
        viewport.recolor();
        viewport.events.push(ViewportEvent::Changed);
    }
}
