//! The compositor: classification buffers to displayable RGB.
//!
//! Every render ends here. Pixels are mapped from material or body ids
//! through the shared palette into the interleaved color buffer, and the set
//! of palette entries actually visible in the frame is tracked for the
//! legend.

use geoview_core::{FrameBuffers, Palette, PALETTE_SIZE};

use crate::engine::DepthRange;

/// Which classification buffer drives the coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Color by material id.
    #[default]
    Material,
    /// Color by body id.
    Body,
}

impl ViewMode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Material => ViewMode::Body,
            ViewMode::Body => ViewMode::Material,
        }
    }

    /// Returns the legend label prefix.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Material => "Material",
            ViewMode::Body => "Body",
        }
    }
}

/// Depth-shading curve per view mode. The two modes deliberately use
/// different constants; the asymmetry is a fixed behavioral contract.
impl ViewMode {
    fn depth_base(self) -> f32 {
        match self {
            ViewMode::Material => 1.0,
            ViewMode::Body => 1.2,
        }
    }

    fn depth_decay(self) -> f32 {
        match self {
            ViewMode::Material => 1.1,
            ViewMode::Body => 2.0,
        }
    }
}

/// Palette entries visible in the last composited frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility([bool; PALETTE_SIZE]);

impl Default for Visibility {
    fn default() -> Self {
        Self([false; PALETTE_SIZE])
    }
}

impl Visibility {
    /// Returns whether the palette entry `id` appeared in the frame.
    #[must_use]
    pub fn is_visible(&self, id: u32) -> bool {
        self.0.get(id as usize).copied().unwrap_or(false)
    }

    /// Iterates the visible palette ids in ascending order.
    pub fn visible_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| id as u32)
    }
}

/// Recomposites the color buffer from the active classification buffer.
///
/// Ids within the palette take their palette color (depth shaded in 3D);
/// out-of-range ids become the white sentinel, untouched by depth shading.
/// The function is pure in its inputs: recoloring twice with unchanged
/// buffers and palette produces byte-identical output.
#[must_use]
pub fn recolor(
    buffers: &mut FrameBuffers,
    palette: &Palette,
    mode: ViewMode,
    is_3d: bool,
    depth: Option<DepthRange>,
) -> Visibility {
    let mut visibility = Visibility::default();
    let pixels = buffers.pixel_count(is_3d);

    let source = match mode {
        ViewMode::Material => &buffers.material,
        ViewMode::Body => &buffers.body,
    };

    let depth = if is_3d { depth } else { None };
    let base = mode.depth_base();
    let decay = mode.depth_decay();

    for i in 0..pixels {
        let id = source[i];
        let out = i * 3;
        match palette.color(id) {
            Some(rgb) => {
                let factor = depth.map_or(1.0, |range| {
                    let interval = range.max - range.min;
                    let beyond = if interval > 0.0 {
                        (buffers.distance[i] - range.min) / interval
                    } else {
                        0.0
                    };
                    base / (1.0 + decay * beyond)
                });
                buffers.color[out] = shade(rgb[0], factor);
                buffers.color[out + 1] = shade(rgb[1], factor);
                buffers.color[out + 2] = shade(rgb[2], factor);
                visibility.0[id as usize] = true;
            }
            None => {
                // Out-of-range sentinel
                buffers.color[out] = 255;
                buffers.color[out + 1] = 255;
                buffers.color[out + 2] = 255;
            }
        }
    }

    visibility
}

/// Applies a brightness factor to one channel, saturating at white.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shade(channel: u8, factor: f32) -> u8 {
    (f32::from(channel) * factor).min(255.0) as u8
}
