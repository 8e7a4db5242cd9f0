//! Overlay control drawn over a selected signature stamp.
//!
//! The control lives in the viewer's view space (its superview). It knows its
//! center, its untransformed size and a rotation+scale transform about the
//! center. Gestures update that state and report what changed as
//! `OverlayEvent`s; the control never touches the stamp itself; the
//! coordinator forwards the events to whoever implements `OverlayListener`.

pub mod gesture;
pub mod handle;

use lyon::geom::euclid::vec2;
use pdfsign_core::{Affine, AnnotationIdentity, Point, Rect, Size};
use smallvec::SmallVec;

pub use gesture::{GesturePhase, MoveGesture, RotateGesture, RotateUpdate};
pub use handle::{Handle, HandleKind};

/// Change reported by an overlay control.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// New center, in superview coordinates.
    Moved(Point),
    /// Cumulative scale relative to the stamp's original size.
    Scaled(f64),
    /// Absolute rotation of the control, in degrees.
    Rotated(f64),
    /// The close handle was activated.
    Closed(AnnotationIdentity),
}

impl OverlayEvent {
    /// Forwards the event to the matching listener callback.
    pub fn dispatch<L>(&self, identity: &AnnotationIdentity, listener: &mut L)
    where
        L: OverlayListener + ?Sized,
    {
        match self {
            OverlayEvent::Moved(point) => listener.on_move(identity, *point),
            OverlayEvent::Scaled(scale) => listener.on_scale(identity, *scale),
            OverlayEvent::Rotated(degrees) => listener.on_rotate(identity, *degrees),
            OverlayEvent::Closed(closed) => listener.on_close(closed),
        }
    }
}

/// Events produced by a single gesture sample; rotate samples emit two.
pub type OverlayEvents = SmallVec<[OverlayEvent; 2]>;

/// Receiver of overlay changes.
pub trait OverlayListener {
    fn on_move(&mut self, identity: &AnnotationIdentity, center: Point);
    fn on_scale(&mut self, identity: &AnnotationIdentity, scale: f64);
    fn on_rotate(&mut self, identity: &AnnotationIdentity, degrees: f64);
    fn on_close(&mut self, identity: &AnnotationIdentity);
}

/// Movable, rotatable frame with a close handle and a rotate handle.
#[derive(Debug, Clone)]
pub struct OverlayControl {
    identity: AnnotationIdentity,
    center: Point,
    bounds_size: Size,
    transform: Affine,
    cumulative_scale: f64,
    hidden: bool,
    inset: f64,
    close_handle: Handle,
    rotate_handle: Handle,
    rotate: RotateGesture,
    moving: MoveGesture,
}

impl OverlayControl {
    /// Creates a visible control covering `frame`. Each side is at least
    /// `2 * inset` long, and rotate gestures cannot shrink it below that.
    pub fn new(frame: Rect, identity: AnnotationIdentity, inset: f64) -> Self {
        let min_side = inset * 2.0;
        let bounds_size = Size::new(frame.width().max(min_side), frame.height().max(min_side));
        let shortest = bounds_size.width.min(bounds_size.height);
        let min_scale = if shortest > 0.0 { min_side / shortest } else { 0.0 };
        Self {
            identity,
            center: frame.center(),
            bounds_size,
            transform: Affine::identity(),
            cumulative_scale: 1.0,
            hidden: false,
            inset,
            close_handle: Handle::new(HandleKind::Close, bounds_size, inset),
            rotate_handle: Handle::new(HandleKind::Rotate, bounds_size, inset),
            rotate: RotateGesture::new().with_min_scale(min_scale),
            moving: MoveGesture::new(),
        }
    }

    pub fn identity(&self) -> &AnnotationIdentity {
        &self.identity
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn bounds_size(&self) -> Size {
        self.bounds_size
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    pub fn cumulative_scale(&self) -> f64 {
        self.cumulative_scale
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn inset(&self) -> f64 {
        self.inset
    }

    pub fn handle(&self, kind: HandleKind) -> &Handle {
        match kind {
            HandleKind::Close => &self.close_handle,
            HandleKind::Rotate => &self.rotate_handle,
        }
    }

    /// True while a rotate or move gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.rotate.is_active() || self.moving.is_active()
    }

    fn local_center(&self) -> Point {
        Point::new(self.bounds_size.width / 2.0, self.bounds_size.height / 2.0)
    }

    /// Maps a point of the control's local space into the superview.
    pub fn to_superview(&self, local: Point) -> Point {
        let origin = self.local_center();
        let v = self
            .transform
            .transform_vector(vec2(local.x - origin.x, local.y - origin.y));
        self.center.translated(v.x, v.y)
    }

    /// Maps a superview point into local space. `None` for a singular transform.
    pub fn to_local(&self, point: Point) -> Option<Point> {
        let inverse = self.transform.inverse()?;
        let origin = self.local_center();
        let v = inverse.transform_vector(vec2(point.x - self.center.x, point.y - self.center.y));
        Some(origin.translated(v.x, v.y))
    }

    fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds_size.width, self.bounds_size.height)
    }

    fn rect_to_superview(&self, rect: Rect) -> Rect {
        Rect::bounding(rect.corners().into_iter().map(|c| self.to_superview(c)))
    }

    /// Bounding box of the transformed control in superview space.
    pub fn frame(&self) -> Rect {
        self.rect_to_superview(self.local_bounds())
    }

    /// Bounding box of a handle in superview space.
    pub fn handle_frame(&self, kind: HandleKind) -> Rect {
        self.rect_to_superview(self.handle(kind).local_frame())
    }

    /// Handle under `point`, close handle first. Hidden controls hit nothing.
    pub fn hit_handle(&self, point: Point) -> Option<HandleKind> {
        if self.hidden {
            return None;
        }
        let local = self.to_local(point)?;
        [HandleKind::Close, HandleKind::Rotate]
            .into_iter()
            .find(|&kind| self.handle(kind).local_frame().contains(&local))
    }

    /// Body hit-test in local space, so rotation is honored.
    pub fn contains(&self, point: Point) -> bool {
        !self.hidden
            && self
                .to_local(point)
                .is_some_and(|local| self.local_bounds().contains(&local))
    }

    /// Feeds one sample of a drag on the rotate handle.
    pub fn rotate_gesture(&mut self, phase: GesturePhase, touch: Point) -> OverlayEvents {
        let mut events = OverlayEvents::new();
        match phase {
            GesturePhase::Began => {
                self.rotate
                    .on_begin(self.center, touch, &self.transform, self.cumulative_scale);
            }
            GesturePhase::Changed => {
                if let Some(update) = self.rotate.on_change(self.center, touch) {
                    self.transform = update.transform;
                    self.cumulative_scale = update.scale;
                    self.close_handle.counter_scale(update.scale, self.inset);
                    self.rotate_handle.counter_scale(update.scale, self.inset);
                    tracing::trace!(
                        "Overlay {}: angle {:.2} scale {:.3}",
                        self.identity,
                        update.angle_degrees,
                        update.scale
                    );
                    events.push(OverlayEvent::Rotated(update.angle_degrees));
                    events.push(OverlayEvent::Scaled(update.scale));
                }
            }
            GesturePhase::Ended | GesturePhase::Cancelled => self.rotate.on_end(),
        }
        events
    }

    /// Feeds one sample of a drag on the control body.
    pub fn move_gesture(&mut self, phase: GesturePhase, touch: Point) -> OverlayEvents {
        let mut events = OverlayEvents::new();
        match phase {
            GesturePhase::Began => self.moving.on_begin(touch),
            GesturePhase::Changed => {
                if let Some(center) = self.moving.on_change(self.center, touch) {
                    self.center = center;
                    events.push(OverlayEvent::Moved(center));
                }
            }
            GesturePhase::Ended | GesturePhase::Cancelled => self.moving.on_end(),
        }
        events
    }

    /// Activates the close handle.
    pub fn close(&self) -> OverlayEvents {
        let mut events = OverlayEvents::new();
        events.push(OverlayEvent::Closed(self.identity.clone()));
        events
    }
}
