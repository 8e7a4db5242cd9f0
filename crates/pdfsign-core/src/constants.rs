//! Shared constants for the stamp workflow.

/// Gap between the overlay frame and the signature image, and the unit
/// used to size and place the overlay handles.
pub const HANDLE_INSET: f64 = 8.0;

/// Side of the square close/rotate handles, in screen points.
pub const HANDLE_SIZE: f64 = HANDLE_INSET * 3.0;

/// Extra margin around a stamp's rotated bounds that still counts as a tap on it.
pub const HIT_TEST_INSET: f64 = 30.0;

/// Vertical space between consecutive pages in the paged viewer.
pub const PAGE_GAP: f64 = 10.0;

/// Zoom limits for the document viewer.
pub const MIN_SCALE_FACTOR: f64 = 0.1;
pub const MAX_SCALE_FACTOR: f64 = 50.0;

/// Tolerance used when comparing derived geometry.
pub const EPSILON: f64 = 1e-9;
