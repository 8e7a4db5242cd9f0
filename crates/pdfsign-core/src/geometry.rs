//! Geometry utilities for stamp placement.
//!
//! Plain value types (`Point`, `Size`, `Rect`) shared by page space and view
//! space, plus the handful of pure functions the overlay and the coordinator
//! build on: point distance, rotating a rectangle about its own center, and
//! pulling the rotation angle back out of an affine transform.
//!
//! Transforms use euclid's `Transform2D` (re-exported through lyon) in f64.
//! Euclid uses row vectors, so `m11`/`m12` are the `a`/`b` coefficients of
//! the usual `[a b; c d; tx ty]` layout.

use lyon::geom::euclid;
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// 2D affine transform in f64.
pub type Affine = euclid::default::Transform2D<f64>;

/// Point in either page space or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Angle of the vector from `origin` to this point, in radians.
    pub fn angle_from(&self, origin: &Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for euclid::default::Point2D<f64> {
    fn from(p: Point) -> Self {
        euclid::point2(p.x, p.y)
    }
}

impl From<euclid::default::Point2D<f64>> for Point {
    fn from(p: euclid::default::Point2D<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle defined by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle of the given size whose center sits at `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Smallest rectangle containing every point. Empty input gives a zero rect.
    pub fn bounding<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.size.width.is_finite() && self.size.height.is_finite()
    }

    /// Corners in order: min/min, max/min, max/max, min/max.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x(), self.min_y()),
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.min_x(), self.max_y()),
        ]
    }

    /// Point containment. Minimum edges are inclusive, maximum edges exclusive.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Shrinks the rectangle by `dx`/`dy` on each side; negative values grow it.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.origin.x + dx,
            self.origin.y + dy,
            (self.size.width - 2.0 * dx).max(0.0),
            (self.size.height - 2.0 * dy).max(0.0),
        )
    }

    /// Same size, new center.
    pub fn with_center(&self, center: Point) -> Self {
        Self::from_center(center, self.size)
    }

    /// Axis-aligned bounding box of the rectangle after `transform`.
    pub fn apply(&self, transform: &Affine) -> Self {
        Self::bounding(
            self.corners()
                .into_iter()
                .map(|c| Point::from(transform.transform_point(c.into()))),
        )
    }

    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.origin.x - other.origin.x).abs() <= tolerance
            && (self.origin.y - other.origin.y).abs() <= tolerance
            && (self.size.width - other.size.width).abs() <= tolerance
            && (self.size.height - other.size.height).abs() <= tolerance
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance_to(p2)
}

/// Bounding box of `rect` rotated by `angle_degrees` about its own center.
///
/// Quarter turns are resolved exactly (size swap about the center) so that a
/// rotation and its inverse reproduce the input without trigonometric noise.
pub fn rotate_rect(rect: &Rect, angle_degrees: f64) -> Rect {
    let turn = angle_degrees.rem_euclid(360.0);
    if turn == 0.0 || turn == 180.0 {
        return *rect;
    }
    let center = rect.center();
    if turn == 90.0 || turn == 270.0 {
        return Rect::from_center(center, Size::new(rect.height(), rect.width()));
    }

    let transform = Affine::translation(-center.x, -center.y)
        .then_rotate(euclid::Angle::radians(angle_degrees.to_radians()))
        .then_translate(euclid::vec2(center.x, center.y));
    rect.apply(&transform)
}

/// Pure rotation followed by a uniform scale, both about the origin.
pub fn rotation_scale(radians: f64, scale: f64) -> Affine {
    Affine::rotation(euclid::Angle::radians(radians)).then_scale(scale, scale)
}

/// Rotation carried by `transform`, in radians. Unaffected by uniform scale.
pub fn transform_rotation_radians(transform: &Affine) -> f64 {
    transform.m12.atan2(transform.m11)
}

/// Rotation carried by `transform`, in degrees.
pub fn transform_rotation_degrees(transform: &Affine) -> f64 {
    transform_rotation_radians(transform).to_degrees()
}

/// Uniform scale carried by a rotation+scale transform.
pub fn transform_scale(transform: &Affine) -> f64 {
    transform.m11.hypot(transform.m12)
}

/// Compares two scalars with the shared tolerance.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON.max(EPSILON * a.abs().max(b.abs()))
}
