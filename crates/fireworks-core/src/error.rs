//! Error types reported to the host.
//!
//! Once mounted the effect has no user-visible error states; only setup can
//! fail, and individual frames may fail to present.

use thiserror::Error;

/// Mount-time failure reported to the host instead of running silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("render target not found: {0}")]
    MissingTarget(String),
    #[error("render target is not drawable: {0}")]
    InvalidTarget(String),
    #[error("viewport must have a non-zero area, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
    #[error("render backend setup failed: {0}")]
    Backend(String),
}

/// Per-frame presentation failure. The frame is skipped, the effect keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("surface lost")]
    SurfaceLost,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("render failed: {0}")]
    Other(String),
}

pub type SetupResult<T> = Result<T, SetupError>;
