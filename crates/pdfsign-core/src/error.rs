//! Error handling for PDFSign
//!
//! Runtime lookups (annotation by identity, current page, overlay by identity)
//! never fail loudly: they are no-ops returning `Option` or `bool`. The error
//! types here cover what cannot be recovered from:
//! - Annotation errors (construction-time invariant violations)
//! - Render errors (drawing context and bitmap failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Annotation construction error type
///
/// Raised when a stamp would otherwise be created in a partially
/// initialised state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// Bounds are empty, negative or not finite
    #[error("Invalid annotation bounds {width}x{height}")]
    InvalidBounds {
        /// The requested width.
        width: f64,
        /// The requested height.
        height: f64,
    },

    /// The signature bitmap has no pixels
    #[error("Signature image is empty ({width}x{height})")]
    EmptyImage {
        /// The bitmap width in pixels.
        width: u32,
        /// The bitmap height in pixels.
        height: u32,
    },
}

/// Render error type
///
/// Represents failures while drawing stamps into a raster context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Target surface could not be allocated
    #[error("Cannot allocate {width}x{height} surface")]
    SurfaceAllocation {
        /// The requested width in pixels.
        width: u32,
        /// The requested height in pixels.
        height: u32,
    },

    /// Destination rectangle is degenerate
    #[error("Cannot draw into degenerate rectangle {width}x{height}")]
    DegenerateTarget {
        /// The destination width.
        width: f64,
        /// The destination height.
        height: f64,
    },

    /// Restore without matching save
    #[error("Graphics state stack underflow")]
    StateUnderflow,

    /// Page index is not part of the document
    #[error("Page {index} not found")]
    PageNotFound {
        /// The requested page index.
        index: usize,
    },
}

/// Main error type for PDFSign
#[derive(Error, Debug)]
pub enum Error {
    /// Annotation error
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an annotation construction error
    pub fn is_annotation_error(&self) -> bool {
        matches!(self, Error::Annotation(_))
    }

    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
