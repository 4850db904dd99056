//! Render side of geoview-rs.
//!
//! This crate holds everything between the navigation state and the
//! displayable image:
//! - [`GeometryEngine`] - the contract of the external geometry evaluator
//! - [`Dispatcher`] - selects and invokes the right engine entry point
//! - [`compositor`] - maps classification buffers through the palette
//! - [`legend`] - builds the markup listing of visible classification ids

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod compositor;
pub mod dispatch;
pub mod engine;
pub mod export;
pub mod legend;

pub use compositor::{recolor, ViewMode, Visibility};
pub use dispatch::{Dispatcher, RenderMode};
pub use engine::{CameraQuery, DepthRange, GeometryEngine, SharedEngine, SliceQuery};
pub use export::{save_rgb_image, ExportError};
pub use legend::build_legend;
