//! geoview-rs: an interactive viewport for inspecting 3D solid-geometry
//! models through axis-aligned 2D slices and a perspective 3D projection.
//!
//! The viewport talks to an external [`GeometryEngine`] that classifies each
//! pixel of a query grid into material and body ids; the compositor maps
//! those ids through a shared 60-entry [`Palette`] into a displayable RGB
//! frame with a generated legend. Small in-plane moves render incrementally;
//! everything else re-renders in full.
//!
//! # Example
//!
//! ```no_run
//! use geoview::{load_geometry, Key, Palette, SharedEngine, Viewport};
//! # fn engine_impl() -> geoview::SharedEngine { unimplemented!() }
//!
//! let palette = Palette::new_shared();
//! let engine: SharedEngine = engine_impl();
//!
//! let mut viewport = Viewport::new(palette);
//! viewport.set_engine(engine.clone());
//! load_geometry(&engine, std::path::Path::new("geometry.conf"))?;
//! viewport.notify_geometry_loaded();
//!
//! viewport.handle_key(Key::Char('d'));   // pan right, incremental render
//! let _frame = viewport.frame();         // interleaved RGB
//! # Ok::<(), geoview::GeoViewError>(())
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod input;
pub mod loader;
pub mod viewport;

/// Initializes `env_logger` from the `RUST_LOG` environment variable.
/// Embedding applications with their own logger setup can skip this.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

pub use input::{Action, Key, KeyBindings};
pub use loader::{configure_3d, load_geometry, load_mesh, load_quadric, DEFAULT_3D_FOV};
pub use viewport::{update_palette, Viewport, ViewportEvent};

// Re-export the core and render surface used by embedders
pub use geoview_core::{
    component, format_report, set_component, Axis, BoundaryError, DVec3, FrameBuffers,
    GeoViewError, NavigationState,
    Palette, PanDirection, Perspective, Result, SharedPalette, ViewConfig, MAX_HEIGHT, MAX_PIXELS,
    MAX_WIDTH, MIN_PIXEL_SIZE, MIN_RHO, PALETTE_SIZE, THETA_MARGIN,
};
pub use geoview_render::{
    build_legend, save_rgb_image, CameraQuery, DepthRange, Dispatcher, ExportError,
    GeometryEngine, RenderMode, SharedEngine, SliceQuery, ViewMode, Visibility,
};
