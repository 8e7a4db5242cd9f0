//! Signature stamp annotation in page space.
//!
//! A `DocumentAnnotation` holds the placed signature bitmap together with its
//! page-space transform: an immutable reference frame (`original_bounds`, at
//! scale 1 and angle 0), a uniform scale, an accumulated angle and a center.
//! Every setter recomputes the axis-aligned `bounds` and raises a coalesced
//! redraw request that the renderer consumes with `take_needs_display`.

use std::f64::consts::PI;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pdfsign_core::{AnnotationError, AnnotationIdentity, Point, Rect, Result};

use crate::render::{GraphicsContext, SignatureImage, StateGuard};

/// Image stamp placed on a page.
#[derive(Debug, Clone)]
pub struct DocumentAnnotation {
    identity: AnnotationIdentity,
    original_bounds: Rect,
    bounds: Rect,
    angle: f64,
    scale: f64,
    center: Point,
    image: Arc<SignatureImage>,
    needs_display: bool,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl DocumentAnnotation {
    /// Creates a stamp covering `bounds` at scale 1 and angle 0.
    ///
    /// Empty or non-finite bounds are rejected.
    pub fn new(
        identity: AnnotationIdentity,
        bounds: Rect,
        image: Arc<SignatureImage>,
    ) -> Result<Self> {
        if !bounds.is_finite() || bounds.size.is_empty() {
            return Err(AnnotationError::InvalidBounds {
                width: bounds.width(),
                height: bounds.height(),
            }
            .into());
        }

        let now = Utc::now();
        Ok(Self {
            identity,
            original_bounds: bounds,
            bounds,
            angle: 0.0,
            scale: 1.0,
            center: bounds.center(),
            image,
            needs_display: true,
            created_at: now,
            modified_at: now,
        })
    }

    pub fn identity(&self) -> &AnnotationIdentity {
        &self.identity
    }

    pub fn original_bounds(&self) -> Rect {
        self.original_bounds
    }

    /// Current axis-aligned bounds in page space (unrotated).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rotation in degrees, accumulated without wrapping.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn image(&self) -> &Arc<SignatureImage> {
        &self.image
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Consumes the pending redraw request.
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    pub fn set_angle(&mut self, degrees: f64) -> Rect {
        if degrees.is_finite() {
            self.angle = degrees;
            self.touch();
        }
        self.bounds
    }

    /// Resizes `original_bounds` by `scale` around the current center.
    ///
    /// Non-positive or non-finite scales leave the stamp untouched.
    pub fn set_scale(&mut self, scale: f64) -> Rect {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::debug!("Ignoring scale {} for {}", scale, self.identity);
            return self.bounds;
        }
        self.scale = scale;
        self.bounds = Rect::from_center(self.center, self.original_bounds.size.scaled(scale));
        self.touch();
        self.bounds
    }

    /// Moves the stamp so that its center sits at `center`. Size is kept.
    pub fn set_center(&mut self, center: Point) -> Rect {
        if !center.is_finite() {
            return self.bounds;
        }
        self.center = center;
        self.bounds = self.bounds.with_center(center);
        self.touch();
        self.bounds
    }

    fn touch(&mut self) {
        self.needs_display = true;
        self.modified_at = Utc::now();
    }

    /// Draws the bitmap rotated about the bounds center by the stamp angle
    /// plus the page's intrinsic rotation.
    pub fn draw<C>(&self, ctx: &mut C, page_rotation: f64) -> Result<()>
    where
        C: GraphicsContext + ?Sized,
    {
        let center = self.bounds.center();
        let radians = (self.angle + page_rotation) * PI / 180.0;

        let mut ctx = StateGuard::new(ctx);
        ctx.translate(center.x, center.y);
        ctx.rotate(radians);
        ctx.translate(-center.x, -center.y);
        ctx.draw_image(&self.image, self.bounds)
    }
}
