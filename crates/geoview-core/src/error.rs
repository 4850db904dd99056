//! Error types for geoview-rs.

use thiserror::Error;

/// The main error type for geoview-rs operations.
#[derive(Error, Debug)]
pub enum GeoViewError {
    /// No geometry engine has been bound to the viewing subsystem.
    #[error("geometry engine unavailable - bind an engine before loading geometry")]
    EngineUnavailable,

    /// The geometry engine rejected its configuration.
    #[error("geometry engine initialization failed with code {code}")]
    EngineInit { code: i32 },

    /// A palette file could not be read at all.
    ///
    /// Malformed individual lines are not errors; they are skipped with a
    /// warning during load.
    #[error("palette file error: {0}")]
    Palette(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for geoview-rs operations.
pub type Result<T> = std::result::Result<T, GeoViewError>;
