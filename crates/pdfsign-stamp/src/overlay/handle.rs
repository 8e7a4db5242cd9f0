//! Corner handles of the overlay control.
//!
//! Handle frames live in the overlay's local space (y-down, origin at the
//! top-left of the untransformed control). Each handle carries its own
//! transform about its center that cancels the overlay's scale, so the
//! handle keeps the same on-screen size at any zoom of the control.

use lyon::geom::euclid::vec2;
use pdfsign_core::{Affine, Point, Rect, Size};

/// Which corner action a handle performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Top-left: removes the stamp.
    Close,
    /// Bottom-right: rotates and scales the stamp.
    Rotate,
}

impl HandleKind {
    /// Unit direction pointing away from the control, in local space.
    fn outward(self) -> (f64, f64) {
        match self {
            HandleKind::Close => (-1.0, -1.0),
            HandleKind::Rotate => (1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    kind: HandleKind,
    frame: Rect,
    transform: Affine,
}

impl Handle {
    /// Square of `3 * inset` sticking `inset / 2` out of the control's corner.
    pub fn new(kind: HandleKind, control_size: Size, inset: f64) -> Self {
        let side = inset * 3.0;
        let origin = match kind {
            HandleKind::Close => Point::new(-inset / 2.0, -inset / 2.0),
            HandleKind::Rotate => Point::new(
                control_size.width + inset / 2.0 - side,
                control_size.height + inset / 2.0 - side,
            ),
        };
        Self {
            kind,
            frame: Rect::new(origin.x, origin.y, side, side),
            transform: Affine::identity(),
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Untransformed frame in the control's local space.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    /// Cancels the control scale `scale` and pushes the handle `inset`
    /// outward in local space, which centers it on the control's corner.
    pub fn counter_scale(&mut self, scale: f64, inset: f64) {
        if !(scale.is_finite() && scale > 0.0) {
            return;
        }
        let (dx, dy) = self.kind.outward();
        self.transform =
            Affine::scale(1.0 / scale, 1.0 / scale).then_translate(vec2(dx * inset, dy * inset));
    }

    /// Frame after the handle's own transform, still in local space.
    pub fn local_frame(&self) -> Rect {
        let center = self.frame.center();
        let about_center = Rect::from_center(Point::ZERO, self.frame.size).apply(&self.transform);
        Rect::from_center(
            center.translated(about_center.mid_x(), about_center.mid_y()),
            about_center.size,
        )
    }
}
