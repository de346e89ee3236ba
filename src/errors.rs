//! Errors produced while validating or running a render call.

use failure::Fail;

/// Everything that can stop a render call.  Validation happens before
/// the buffer is touched, so an `InvalidArgument` never leaves a
/// half-written raster behind.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// One of the caller's preconditions does not hold.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// A worker thread of the parallel driver panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

impl RenderError {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> Self {
        RenderError::InvalidArgument(reason.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
