//! Core abstractions for geoview-rs.
//!
//! This crate provides the fundamental types used throughout geoview-rs:
//! - [`Palette`] - the shared 60-entry classification color table
//! - [`NavigationState`] - per-viewport camera and query-point state
//! - [`FrameBuffers`] - fixed-budget classification and color buffers
//! - [`BoundaryError`] - geometry consistency self-test records

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod buffers;
pub mod consistency;
pub mod error;
pub mod navigation;
pub mod options;
pub mod palette;
pub mod perspective;

pub use buffers::{FrameBuffers, MAX_HEIGHT, MAX_PIXELS, MAX_WIDTH};
pub use consistency::{format_report, BoundaryError};
pub use error::{GeoViewError, Result};
pub use navigation::{component, set_component, NavigationState, MIN_PIXEL_SIZE, MIN_RHO, THETA_MARGIN};
pub use options::ViewConfig;
pub use palette::{Palette, SharedPalette, PALETTE_SIZE};
pub use perspective::{Axis, PanDirection, Perspective};

// Re-export glam types for convenience
pub use glam::DVec3;
