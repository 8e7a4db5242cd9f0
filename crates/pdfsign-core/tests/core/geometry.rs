use pdfsign_core::geometry::{
    distance, rotate_rect, rotation_scale, transform_rotation_degrees, Point, Rect,
};
use proptest::prelude::*;

fn integer_rect() -> impl Strategy<Value = Rect> {
    (-500i32..500, -500i32..500, 1i32..400, 1i32..400)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn any_rect() -> impl Strategy<Value = Rect> {
    (-1e4f64..1e4, -1e4f64..1e4, 0.5f64..1e3, 0.5f64..1e3)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn rotate_rect_by_zero_is_identity(rect in any_rect()) {
        prop_assert_eq!(rotate_rect(&rect, 0.0), rect);
    }

    #[test]
    fn quarter_turn_round_trip_is_exact(rect in integer_rect(), quarter in 0u8..4) {
        let theta = quarter as f64 * 90.0;
        let back = rotate_rect(&rotate_rect(&rect, theta), -theta);
        prop_assert_eq!(back, rect);
    }

    #[test]
    fn arbitrary_rotation_keeps_center(rect in any_rect(), theta in -720f64..720.0) {
        let rotated = rotate_rect(&rect, theta);
        prop_assert!((rotated.mid_x() - rect.mid_x()).abs() < 1e-6);
        prop_assert!((rotated.mid_y() - rect.mid_y()).abs() < 1e-6);
    }

    #[test]
    fn inverse_rotation_of_original_contains_original(rect in any_rect(), theta in -360f64..360.0) {
        // Bounding box of a bounding box is lossy, so only containment holds.
        let back = rotate_rect(&rotate_rect(&rect, theta), -theta);
        let tol = 1e-6;
        prop_assert!(back.min_x() <= rect.min_x() + tol);
        prop_assert!(back.min_y() <= rect.min_y() + tol);
        prop_assert!(back.max_x() >= rect.max_x() - tol);
        prop_assert!(back.max_y() >= rect.max_y() - tol);
    }

    #[test]
    fn distance_is_symmetric(
        ax in -1e3f64..1e3,
        ay in -1e3f64..1e3,
        bx in -1e3f64..1e3,
        by in -1e3f64..1e3,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        prop_assert_eq!(distance(&a, &a), 0.0);
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn rotation_extraction_is_scale_invariant(degrees in -179f64..179.0, scale in 0.05f64..20.0) {
        let t = rotation_scale(degrees.to_radians(), scale);
        prop_assert!((transform_rotation_degrees(&t) - degrees).abs() < 1e-6);
    }
}

#[test]
fn test_rotated_rect_grows_for_oblique_angles() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let rotated = rotate_rect(&rect, 30.0);
    assert!(rotated.width() > rect.width());
    assert!(rotated.height() > rect.height());
}
