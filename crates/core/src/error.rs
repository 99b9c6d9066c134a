//! Engine error taxonomy.
//!
//! Rejected moves are not errors; they are plain `false`/outcome values on the
//! controller. Only configuration failures and invariant violations cross the
//! engine boundary.

use thiserror::Error;

/// Why a cell cannot hold a piece cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    OutOfBounds,
    Occupied,
}

impl ConflictReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::OutOfBounds => "out of bounds",
            ConflictReason::Occupied => "occupied",
        }
    }
}

/// A piece state that bypassed collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invariant violation: cell ({x}, {y}) is {}", .reason.as_str())]
pub struct InvariantViolation {
    pub x: i8,
    pub y: i8,
    pub reason: ConflictReason,
}

/// Renderer construction or draw failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("render target unavailable: {0}")]
    ContextUnavailable(&'static str),
    #[error("shader compile failed ({stage}): {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("program link failed: {0}")]
    ProgramLink(String),
    #[error("missing shader attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("missing shader uniform `{0}`")]
    MissingUniform(&'static str),
    #[error("vertex buffer allocation failed")]
    BufferAllocation,
    #[error("render backend error: {0}")]
    Backend(String),
}

impl RenderError {
    /// Construction-time failures that make the renderer unusable.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RenderError::Backend(_))
    }
}

/// Errors returned from [`crate::GameLoop::tick`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Render(#[from] RenderError),
}
