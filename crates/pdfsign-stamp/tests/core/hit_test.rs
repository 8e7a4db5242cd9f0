use crate::common::signature;
use pdfsign_core::constants::HANDLE_SIZE;
use pdfsign_core::{rotate_rect, AnnotationIdentity, Point, Size};
use pdfsign_stamp::{
    DocumentViewer, GesturePhase, HandleKind, PagedViewer, SignView, SignViewOptions,
};
use proptest::prelude::*;

const INSET: f64 = 30.0;

/// Stamp of the given size centered on a 2000x2000 page, rotated by `angle`.
fn rotated_stamp(
    width: u32,
    height: u32,
    angle: f64,
) -> (SignView<PagedViewer>, AnnotationIdentity) {
    let mut view = SignView::new(
        PagedViewer::blank(1, Size::new(2000.0, 2000.0)),
        SignViewOptions::default(),
    );
    let id = view.place_signature(signature(width, height)).unwrap().unwrap();
    let stamp = view
        .viewer_mut()
        .page_mut(0)
        .unwrap()
        .stamp_mut(&id)
        .unwrap();
    stamp.set_center(Point::new(1000.0, 1000.0));
    stamp.set_angle(angle);
    (view, id)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stamp_center_always_hits(
        width in 1u32..300,
        height in 1u32..300,
        angle in -720f64..720.0,
    ) {
        let (view, id) = rotated_stamp(width, height, angle);
        let center = view
            .viewer()
            .convert_point_from_page(Point::new(1000.0, 1000.0), 0)
            .unwrap();
        prop_assert_eq!(view.find_annotation(0, center, INSET), Some(id));
    }

    #[test]
    fn beyond_inset_never_hits(
        width in 1u32..300,
        height in 1u32..300,
        angle in -720f64..720.0,
    ) {
        let (view, id) = rotated_stamp(width, height, angle);
        let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
        let area = rotate_rect(
            &view.viewer().convert_rect_from_page(stamp.bounds(), 0).unwrap(),
            stamp.angle(),
        );

        let outside = [
            Point::new(area.max_x() + INSET + 1.0, area.mid_y()),
            Point::new(area.min_x() - INSET - 1.0, area.mid_y()),
            Point::new(area.mid_x(), area.max_y() + INSET + 1.0),
            Point::new(area.mid_x(), area.min_y() - INSET - 1.0),
        ];
        for point in outside {
            prop_assert_eq!(view.find_annotation(0, point, INSET), None);
        }
    }

    #[test]
    fn handles_keep_screen_size_under_scale(scale in 0.25f64..8.0) {
        let mut view = SignView::new(
            PagedViewer::blank(1, Size::new(2000.0, 2000.0)),
            SignViewOptions::default(),
        );
        let id = view.place_signature(signature(120, 60)).unwrap().unwrap();
        let center = view.overlay(&id).unwrap().center();

        view.rotate_overlay(&id, GesturePhase::Began, center.translated(40.0, 0.0));
        view.rotate_overlay(&id, GesturePhase::Changed, center.translated(40.0 * scale, 0.0));

        let overlay = view.overlay(&id).unwrap();
        for kind in [HandleKind::Close, HandleKind::Rotate] {
            let frame = overlay.handle_frame(kind);
            prop_assert!((frame.width() - HANDLE_SIZE).abs() < 1e-6);
            prop_assert!((frame.height() - HANDLE_SIZE).abs() < 1e-6);
        }
        let body = overlay.frame();
        let grip = overlay.handle_frame(HandleKind::Rotate).center();
        prop_assert!(grip.distance_to(&Point::new(body.max_x(), body.max_y())) < 1e-6);
    }
}
