//! # PDFSign Core
//!
//! Core types and utilities for PDFSign.
//! Provides the geometry primitives shared by page space and view space,
//! the identity token pairing stamps with overlays, and the error types.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod identity;

pub use error::{AnnotationError, Error, RenderError, Result};
pub use geometry::{
    approx_eq, distance, rotate_rect, rotation_scale, transform_rotation_degrees,
    transform_rotation_radians, transform_scale, Affine, Point, Rect, Size,
};
pub use identity::AnnotationIdentity;
