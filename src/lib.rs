//! # PDFSign
//!
//! Place, move, scale and rotate a signature image stamp on document pages.
//!
//! ## Architecture
//!
//! PDFSign is organized as a workspace with multiple crates:
//!
//! 1. **pdfsign-core** - Geometry, affine helpers, identity tokens, errors
//! 2. **pdfsign-stamp** - Stamps, pages, viewer, overlay control, `SignView`, rendering
//! 3. **pdfsign-settings** - Configuration loaded from TOML or JSON
//! 4. **pdfsign** - This crate: re-exports, logging setup and the demo binary
//!
//! ## Features
//!
//! - **Touch Transforms**: Combined rotate and scale by dragging a corner handle
//! - **Identity Pairing**: Overlays and stamps joined only by an opaque token
//! - **Rotated Hit-Testing**: Taps select stamps by their rotated bounds
//! - **Raster Output**: Pages rendered with their stamps through tiny-skia

pub use pdfsign_core::{
    approx_eq, distance, rotate_rect, rotation_scale, transform_rotation_degrees,
    transform_rotation_radians, transform_scale, Affine, AnnotationError, AnnotationIdentity,
    Error, Point, Rect, RenderError, Result, Size,
};

pub use pdfsign_stamp::{
    render_page, DocumentAnnotation, DocumentPage, DocumentViewer, GesturePhase, GraphicsContext,
    HandleKind, MarkupAnnotation, OverlayControl, OverlayEvent, OverlayEvents, OverlayListener,
    PageAnnotation, PagedViewer, PixmapContext, SignView, SignViewOptions, SignatureImage,
    StateGuard,
};

pub use pdfsign_settings::{
    Config, InteractionSettings, SettingsError, SettingsResult, ViewerSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Sign view tuning taken from the interaction settings
pub fn sign_view_options(config: &Config) -> SignViewOptions {
    SignViewOptions {
        hit_test_inset: config.interaction.hit_test_inset,
        handle_inset: config.interaction.handle_inset,
    }
}

/// Paged viewer over `pages`, laid out and zoomed per the viewer settings
pub fn paged_viewer(config: &Config, pages: Vec<DocumentPage>) -> PagedViewer {
    PagedViewer::new(pages)
        .with_page_gap(config.viewer.page_gap)
        .with_scale_factor(config.viewer.initial_scale)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
