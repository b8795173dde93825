/// Errors raised while building shapes, offsets and animation paths
use thiserror::Error;

/// Result type for shapemotion operations
pub type Result<T> = std::result::Result<T, ShapeError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("offset count {offsets} does not match shape count {shapes}")]
    MismatchedOffsets { shapes: usize, offsets: usize },

    #[error("cannot join an empty list of shapes")]
    NothingToJoin,

    #[error("expected 1 or {expected} colors, got {got}")]
    MismatchedColors { expected: usize, got: usize },

    #[error("duration must be positive and representable, got {0:?} seconds")]
    NonPositiveDuration(f64),

    #[error("repeat count must not be negative, got {0}")]
    NegativeRepeatCount(i64),

    #[error("repeat count {0} is too large")]
    RepeatCountTooLarge(i64),

    #[error("{0} must be a non-zero vector")]
    ZeroVector(&'static str),

    #[error("axis endpoints must be distinct")]
    DegenerateAxis,

    #[error("axis index {0} is out of range (expected 0, 1 or 2)")]
    InvalidAxisIndex(usize),

    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error("scale factors must be non-zero, got ({0}, {1}, {2})")]
    ZeroScale(f32, f32, f32),

    #[error("vertex index {index} is out of range for a mesh with {count} vertices")]
    VertexOutOfRange { index: usize, count: usize },

    #[error("unknown texture: {0}")]
    UnknownTexture(String),

    #[error("shape handle is stale or unknown")]
    StaleHandle,

    #[error("failed to parse STL: {0}")]
    Stl(String),
}
