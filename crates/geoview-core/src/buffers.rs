//! Frame buffers for one viewport.
//!
//! All buffers are allocated once to the maximum supported resolution;
//! display resolution changes only adjust the logical width and height, so a
//! resize never reallocates and the engine always has the full budget to
//! write into.

/// Maximum supported frame width in pixels.
pub const MAX_WIDTH: u32 = 2000;

/// Maximum supported frame height in pixels.
pub const MAX_HEIGHT: u32 = 2000;

/// Maximum pixel budget per viewport.
pub const MAX_PIXELS: usize = (MAX_WIDTH as usize) * (MAX_HEIGHT as usize);

/// Classification and color buffers owned by one viewport.
///
/// The engine fills `material`, `body` and (for 3D renders) `distance`; the
/// compositor maps them through the palette into `color`, an interleaved RGB
/// buffer of 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffers {
    /// Material id per pixel.
    pub material: Vec<u32>,
    /// Body id per pixel.
    pub body: Vec<u32>,
    /// Camera distance per pixel, 3D renders only.
    pub distance: Vec<f32>,
    /// Interleaved RGB output, 3 bytes per pixel.
    pub color: Vec<u8>,
    width: u32,
    height: u32,
    width_3d: u32,
    height_3d: u32,
}

impl Default for FrameBuffers {
    fn default() -> Self {
        Self {
            material: vec![0; MAX_PIXELS],
            body: vec![0; MAX_PIXELS],
            distance: vec![0.0; MAX_PIXELS],
            color: vec![0; MAX_PIXELS * 3],
            width: 600,
            height: 600,
            width_3d: 400,
            height_3d: 400,
        }
    }
}

impl FrameBuffers {
    /// Allocates the full pixel budget with the default display resolutions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logical 2D frame width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the logical 2D frame height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the logical 3D frame width.
    #[must_use]
    pub fn width_3d(&self) -> u32 {
        self.width_3d
    }

    /// Returns the logical 3D frame height.
    #[must_use]
    pub fn height_3d(&self) -> u32 {
        self.height_3d
    }

    /// Sets the logical 2D resolution, clamped to the allocation budget.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.clamp(1, MAX_WIDTH);
        self.height = height.clamp(1, MAX_HEIGHT);
    }

    /// Sets the logical 3D resolution, clamped to the allocation budget.
    pub fn resize_3d(&mut self, width: u32, height: u32) {
        self.width_3d = width.clamp(1, MAX_WIDTH);
        self.height_3d = height.clamp(1, MAX_HEIGHT);
    }

    /// Returns the logical `(width, height)` of the active view.
    #[must_use]
    pub fn dimensions(&self, is_3d: bool) -> (u32, u32) {
        if is_3d {
            (self.width_3d, self.height_3d)
        } else {
            (self.width, self.height)
        }
    }

    /// Returns the number of pixels in the active view.
    #[must_use]
    pub fn pixel_count(&self, is_3d: bool) -> usize {
        let (w, h) = self.dimensions(is_3d);
        (w as usize) * (h as usize)
    }

    /// Returns the displayable RGB prefix of the color buffer for the active
    /// view, independent of the max-capacity allocation.
    #[must_use]
    pub fn rgb_frame(&self, is_3d: bool) -> &[u8] {
        &self.color[..self.pixel_count(is_3d) * 3]
    }

    /// Value-copies another viewport's buffer contents and logical sizes.
    pub fn copy_from(&mut self, other: &FrameBuffers) {
        self.material.copy_from_slice(&other.material);
        self.body.copy_from_slice(&other.body);
        self.distance.copy_from_slice(&other.distance);
        self.color.copy_from_slice(&other.color);
        self.width = other.width;
        self.height = other.height;
        self.width_3d = other.width_3d;
        self.height_3d = other.height_3d;
    }
}
