//! Touch gesture state machines for the overlay control.
//!
//! Each machine is `Idle -> Active -> Idle`. The snapshot taken on `Began`
//! is the baseline every `Changed` sample is measured against, so the
//! transform is rebuilt from scratch on each sample instead of accumulated.

use pdfsign_core::{
    distance, rotation_scale, transform_rotation_degrees, transform_rotation_radians, Affine,
    Point,
};

/// Phase of a continuous touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
struct RotateSnapshot {
    last_location: Point,
    initial_distance: f64,
    delta_angle: f64,
    scale_at_start: f64,
}

/// Result of one rotate/scale sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateUpdate {
    /// Rotation then uniform scale, about the overlay center.
    pub transform: Affine,
    pub scale: f64,
    pub angle_degrees: f64,
}

/// Combined rotate and pinch-by-drag gesture on the rotate handle.
#[derive(Debug, Clone, Default)]
pub struct RotateGesture {
    snapshot: Option<RotateSnapshot>,
    min_scale: f64,
}

impl RotateGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower bound for the reported scale.
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        if min_scale.is_finite() && min_scale > 0.0 {
            self.min_scale = min_scale;
        }
        self
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn on_begin(&mut self, center: Point, touch: Point, transform: &Affine, scale: f64) {
        self.snapshot = Some(RotateSnapshot {
            last_location: touch,
            initial_distance: distance(&center, &touch),
            delta_angle: -transform_rotation_radians(transform),
            scale_at_start: scale,
        });
    }

    /// Returns `None` while idle, and for a touch on the center, where the
    /// drag has no direction.
    pub fn on_change(&self, center: Point, touch: Point) -> Option<RotateUpdate> {
        let snapshot = self.snapshot?;
        let radius = distance(&center, &touch);
        if radius < f64::EPSILON {
            return None;
        }

        let ratio = if snapshot.initial_distance > f64::EPSILON {
            radius / snapshot.initial_distance
        } else {
            1.0
        };
        let scale = (snapshot.scale_at_start + (ratio - 1.0) * snapshot.scale_at_start)
            .max(self.min_scale);

        let turn = touch.angle_from(&center) - snapshot.last_location.angle_from(&center);
        let angle = -(snapshot.delta_angle - turn);

        let transform = rotation_scale(angle, scale);
        Some(RotateUpdate {
            transform,
            scale,
            angle_degrees: transform_rotation_degrees(&transform),
        })
    }

    pub fn on_end(&mut self) {
        self.snapshot = None;
    }
}

/// Drag of the overlay body.
#[derive(Debug, Clone, Default)]
pub struct MoveGesture {
    last_location: Option<Point>,
}

impl MoveGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.last_location.is_some()
    }

    pub fn on_begin(&mut self, touch: Point) {
        self.last_location = Some(touch);
    }

    /// New center after applying the translation since the previous sample.
    pub fn on_change(&mut self, center: Point, touch: Point) -> Option<Point> {
        let last = self.last_location.replace(touch)?;
        Some(center.translated(touch.x - last.x, touch.y - last.y))
    }

    pub fn on_end(&mut self) {
        self.last_location = None;
    }
}
