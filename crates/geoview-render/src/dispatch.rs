//! Render dispatch: from navigation state to the right engine entry point.

use geoview_core::{FrameBuffers, NavigationState, Perspective};

use crate::engine::{CameraQuery, DepthRange, GeometryEngine, SliceQuery};
use geoview_core::PanDirection;

/// How the next render may reuse the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Recompute every pixel.
    Full,
    /// Shift the previous frame by `pixels` in `direction` and compute only
    /// the entering rows or columns. Only meaningful in 2D slice views.
    Pan {
        direction: PanDirection,
        pixels: u32,
    },
}

/// Invokes the geometry engine for the active perspective.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    threads: u32,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with the thread hint derived once from available
    /// hardware concurrency: half the reported parallelism, rounded up.
    #[must_use]
    pub fn new() -> Self {
        let concurrency = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        #[allow(clippy::cast_possible_truncation)]
        let threads = concurrency.div_ceil(2) as u32;
        log::debug!("render dispatcher using thread hint {threads}");
        Self { threads }
    }

    /// Returns the thread hint passed to 2D full renders.
    #[must_use]
    pub fn threads(&self) -> u32 {
        self.threads
    }

    /// Dispatches one render into the viewport's buffers.
    ///
    /// 2D perspectives use the full-slice entry (with the thread hint) or,
    /// for [`RenderMode::Pan`], the directional incremental entry seeded with
    /// the previous render's position. The 3D perspective always renders in
    /// full and yields the engine's depth range for the compositor.
    ///
    /// The caller is responsible for the no-op policy (engine present,
    /// geometry loaded) and for committing the navigation state afterwards.
    pub fn render(
        &self,
        engine: &dyn GeometryEngine,
        nav: &NavigationState,
        buffers: &mut FrameBuffers,
        mode: RenderMode,
    ) -> Option<DepthRange> {
        match nav.perspective() {
            Perspective::ThreeD => {
                let query = CameraQuery {
                    position: nav.camera(),
                    look: nav.look(),
                    roll: nav.roll(),
                    last_azimuth: nav.last_render_phi(),
                };
                // Engines see exactly the active resolution's worth of pixels
                let pixels = buffers.pixel_count(true);
                let range = engine.render_3d(
                    &query,
                    &mut buffers.material[..pixels],
                    &mut buffers.body[..pixels],
                    &mut buffers.distance[..pixels],
                );
                Some(range)
            }
            perspective => {
                let axis = perspective.axis().unwrap_or(geoview_core::Axis::X);
                let (width, height) = buffers.dimensions(false);
                let pixels = buffers.pixel_count(false);
                match mode {
                    RenderMode::Full => {
                        let query = SliceQuery {
                            origin: nav.position(),
                            pixel_size_u: nav.pixel_size(),
                            pixel_size_v: nav.pixel_size(),
                            width,
                            height,
                        };
                        engine.render_slice(
                            axis,
                            &query,
                            &mut buffers.material[..pixels],
                            &mut buffers.body[..pixels],
                            self.threads,
                        );
                    }
                    RenderMode::Pan { direction, pixels: pan_pixels } => {
                        let query = SliceQuery {
                            origin: nav.last_position(),
                            pixel_size_u: nav.pixel_size(),
                            pixel_size_v: nav.pixel_size(),
                            width,
                            height,
                        };
                        engine.render_pan(
                            axis,
                            direction,
                            pan_pixels,
                            &query,
                            &mut buffers.material[..pixels],
                            &mut buffers.body[..pixels],
                        );
                    }
                }
                None
            }
        }
    }

    /// Builds the slice query for the active 2D perspective, used by the
    /// boundary self-test.
    #[must_use]
    pub fn slice_query(nav: &NavigationState, buffers: &FrameBuffers) -> SliceQuery {
        let (width, height) = buffers.dimensions(false);
        SliceQuery {
            origin: nav.position(),
            pixel_size_u: nav.pixel_size(),
            pixel_size_v: nav.pixel_size(),
            width,
            height,
        }
    }
}
