//! Raster drawing for signature stamps
//! Draws stamps into a tiny-skia surface laid out in page space.
//!
//! Features:
//! - Graphics state stack with scoped save/restore (`StateGuard`)
//! - Page space (y-up, points) mapped to pixels at a chosen scale
//! - Bitmaps drawn upright into their destination rectangle

use std::ops::{Deref, DerefMut};
use std::path::Path;

use image::{ImageError, Rgba, RgbaImage};
use pdfsign_core::{AnnotationError, Error, Rect, RenderError, Result, Size};
use tiny_skia::{
    Color, ColorU8, FilterQuality, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::page::DocumentPage;

/// Immutable signature bitmap.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    pixels: RgbaImage,
}

impl SignatureImage {
    /// Wraps an RGBA bitmap. Empty bitmaps are rejected.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(AnnotationError::EmptyImage { width, height }.into());
        }
        Ok(Self { pixels })
    }

    /// Decodes any format supported by the `image` crate.
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|e| match e {
            ImageError::IoError(io) => Error::Io(io),
            other => Error::other(format!("Failed to decode {}: {}", path.display(), other)),
        })?;
        Self::from_rgba(decoded.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Natural size in points (one pixel per point).
    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    fn to_pixmap(&self) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width(), self.height())?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(self.pixels.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Some(pixmap)
    }
}

/// Minimal 2D drawing context the stamps render through.
pub trait GraphicsContext {
    /// Pushes the current graphics state.
    fn save_state(&mut self);

    /// Pops the last saved graphics state.
    fn restore_state(&mut self) -> Result<()>;

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, radians: f64);

    /// Draws `image` upright, stretched to fill `rect` in current coordinates.
    fn draw_image(&mut self, image: &SignatureImage, rect: Rect) -> Result<()>;
}

/// Saved graphics state, restored when the guard goes out of scope.
pub struct StateGuard<'a, C: GraphicsContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: GraphicsContext + ?Sized> StateGuard<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save_state();
        Self { ctx }
    }
}

impl<C: GraphicsContext + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: GraphicsContext + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: GraphicsContext + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.ctx.restore_state() {
            tracing::warn!("Graphics state restore failed: {}", e);
        }
    }
}

/// tiny-skia surface covering one page.
pub struct PixmapContext {
    pixmap: Pixmap,
    transform: Transform,
    saved: Vec<Transform>,
}

impl PixmapContext {
    /// Creates a surface for a page of `page_size` points rendered at `scale`
    /// pixels per point. Page space is y-up with its origin at the bottom-left.
    pub fn new(page_size: Size, scale: f64) -> Result<Self> {
        let width = (page_size.width * scale).ceil().max(0.0) as u32;
        let height = (page_size.height * scale).ceil().max(0.0) as u32;
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;

        // pixel_x = x * scale
        // pixel_y = (page_height - y) * scale
        let scale = scale as f32;
        let transform = Transform::from_row(
            scale,
            0.0,
            0.0,
            -scale,
            0.0,
            page_size.height as f32 * scale,
        );

        Ok(Self {
            pixmap,
            transform,
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Number of states currently saved.
    pub fn saved_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Converts the surface to a straight-alpha RGBA image.
    pub fn into_rgba_image(self) -> RgbaImage {
        let pixmap = self.pixmap;
        RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
            let c = pixmap
                .pixel(x, y)
                .unwrap_or(PremultipliedColorU8::TRANSPARENT)
                .demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }
}

impl GraphicsContext for PixmapContext {
    fn save_state(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore_state(&mut self) -> Result<()> {
        self.transform = self.saved.pop().ok_or(RenderError::StateUnderflow)?;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx as f32, dy as f32);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self
            .transform
            .pre_concat(Transform::from_rotate(radians.to_degrees() as f32));
    }

    fn draw_image(&mut self, image: &SignatureImage, rect: Rect) -> Result<()> {
        if rect.size.is_empty() || !rect.is_finite() {
            return Err(RenderError::DegenerateTarget {
                width: rect.width(),
                height: rect.height(),
            }
            .into());
        }
        let source = image.to_pixmap().ok_or(RenderError::SurfaceAllocation {
            width: image.width(),
            height: image.height(),
        })?;

        // Bitmap rows run top-down; page space runs bottom-up.
        let sx = (rect.width() / image.width() as f64) as f32;
        let sy = (rect.height() / image.height() as f64) as f32;
        let transform = self
            .transform
            .pre_translate(rect.min_x() as f32, rect.max_y() as f32)
            .pre_scale(sx, -sy);

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }
}

/// Renders a page and every stamp on it onto a white background.
pub fn render_page(page: &DocumentPage, scale: f64) -> Result<RgbaImage> {
    let mut ctx = PixmapContext::new(page.size(), scale)?;
    ctx.fill(Color::WHITE);
    page.draw(&mut ctx)?;
    Ok(ctx.into_rgba_image())
}
