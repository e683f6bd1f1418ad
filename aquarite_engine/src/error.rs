//! Error types for the Aquarite engine
//!
//! Almost every failure in the frame pipeline is recovered locally (the
//! affected draw unit is skipped and logged). The variants below cover the
//! cases that are reported to the caller instead.

use std::fmt;

/// Result type for Aquarite engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Aquarite engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Degenerate geometry input (collinear points, zero-length vectors, NaN/Inf)
    InvalidGeometry(String),

    /// An operation was called in the wrong state (frustum not defined,
    /// renderer phase out of order, ...)
    InvalidState(String),

    /// Entity hierarchy violation (unknown key, cycle, reparenting the root)
    InvalidHierarchy(String),

    /// Invalid resource (unknown model key, duplicate name, ...)
    InvalidResource(String),

    /// Graphics backend error
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidHierarchy(msg) => write!(f, "Invalid hierarchy: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`] and log it at ERROR severity with file:line.
///
/// ```ignore
/// return Err(engine_err!(InvalidState, "aquarite::Frustum", "planes not defined"));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($kind:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::aquarite::Error::$kind(message)
    }};
}

/// Log and return early with an [`Error`].
#[macro_export]
macro_rules! engine_bail {
    ($kind:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($kind, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
