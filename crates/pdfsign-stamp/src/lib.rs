//! # PDFSign Stamp
//!
//! Interactive placement of signature stamps on document pages.
//!
//! ## Components
//!
//! - **Annotation**: page-space signature stamp (bounds, angle, scale, center)
//! - **Page**: annotation host with intrinsic rotation
//! - **Viewer**: document viewer trait and an in-memory paged viewer
//! - **Overlay**: screen-space control with rotate and move gestures
//! - **Coordinator**: `SignView`, tying taps and pans to overlays and stamps
//! - **Render**: tiny-skia drawing of pages and their stamps
//!
//! ```text
//! touch -> OverlayControl -> OverlayEvent -> SignView -> DocumentAnnotation
//!   tap -> SignView -> DocumentPage (hit-test) -> OverlayControl (show)
//! ```

pub mod annotation;
pub mod coordinator;
pub mod overlay;
pub mod page;
pub mod render;
pub mod viewer;

pub use annotation::DocumentAnnotation;
pub use coordinator::{SignView, SignViewOptions};
pub use overlay::{
    GesturePhase, HandleKind, OverlayControl, OverlayEvent, OverlayEvents, OverlayListener,
};
pub use page::{DocumentPage, MarkupAnnotation, PageAnnotation};
pub use render::{render_page, GraphicsContext, PixmapContext, SignatureImage, StateGuard};
pub use viewer::{DocumentViewer, PagedViewer};
