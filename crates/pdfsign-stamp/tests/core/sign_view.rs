use crate::common::{signature, single_page_view};
use pdfsign_core::{Point, Rect, Size};
use pdfsign_stamp::{
    DocumentViewer, GesturePhase, HandleKind, MarkupAnnotation, PagedViewer, SignView,
    SignViewOptions,
};

#[test]
fn scale_two_keeps_stamp_center() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    let center = view.overlay(&id).unwrap().center();

    view.rotate_overlay(&id, GesturePhase::Began, center.translated(100.0, 0.0));
    view.rotate_overlay(&id, GesturePhase::Changed, center.translated(200.0, 0.0));
    view.rotate_overlay(&id, GesturePhase::Ended, center.translated(200.0, 0.0));

    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!(stamp
        .bounds()
        .approx_eq(&Rect::new(-50.0, -25.0, 200.0, 100.0), 1e-9));
    assert!(stamp.center().distance_to(&Point::new(50.0, 25.0)) < 1e-9);
}

#[test]
fn rotate_drag_reports_relative_scale() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    let center = view.overlay(&id).unwrap().center();

    view.rotate_overlay(&id, GesturePhase::Began, center.translated(0.0, 100.0));
    view.rotate_overlay(&id, GesturePhase::Changed, center.translated(0.0, 150.0));

    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!((stamp.scale() - 1.5).abs() < 1e-9);
    assert!((view.overlay(&id).unwrap().cumulative_scale() - 1.5).abs() < 1e-9);
}

#[test]
fn second_gesture_continues_from_previous_scale() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    let center = view.overlay(&id).unwrap().center();

    for (from, to) in [(100.0, 200.0), (50.0, 75.0)] {
        view.rotate_overlay(&id, GesturePhase::Began, center.translated(from, 0.0));
        view.rotate_overlay(&id, GesturePhase::Changed, center.translated(to, 0.0));
        view.rotate_overlay(&id, GesturePhase::Ended, center.translated(to, 0.0));
    }

    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!((stamp.scale() - 3.0).abs() < 1e-9);
    assert_eq!(stamp.bounds().size, Size::new(300.0, 150.0));
}

#[test]
fn rotate_drag_through_center_keeps_stamp_usable() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    let center = view.overlay(&id).unwrap().center();

    view.rotate_overlay(&id, GesturePhase::Began, center.translated(50.0, 0.0));
    view.rotate_overlay(&id, GesturePhase::Changed, center.translated(0.0, 50.0));
    view.rotate_overlay(&id, GesturePhase::Changed, center);
    {
        let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
        assert!((stamp.angle() + 90.0).abs() < 1e-9);
        assert!((stamp.scale() - 1.0).abs() < 1e-9);
    }

    // Nearly on the center the stamp bottoms out at 2 * inset on its short side.
    view.rotate_overlay(&id, GesturePhase::Changed, center.translated(0.0, 1.0));
    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!((stamp.scale() - 0.32).abs() < 1e-9);
    assert!((stamp.bounds().width() - 32.0).abs() < 1e-9);
    assert!((stamp.bounds().height() - 16.0).abs() < 1e-9);

    view.rotate_overlay(&id, GesturePhase::Changed, center.translated(0.0, 30.0));
    view.rotate_overlay(&id, GesturePhase::Ended, center.translated(0.0, 30.0));
    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!((stamp.angle() + 90.0).abs() < 1e-9);
    assert!((stamp.scale() - 0.6).abs() < 1e-9);

    let overlay = view.overlay(&id).unwrap();
    assert!(overlay.contains(center));
    let close = overlay.handle_frame(HandleKind::Close).center();
    assert_eq!(view.handle_tap(close), None);
    assert!(view.viewer().page(0).unwrap().stamp(&id).is_none());
}

#[test]
fn tap_selects_only_the_stamp_under_the_finger() {
    let mut view = single_page_view();
    let a = view.place_signature(signature(100, 50)).unwrap().unwrap();

    // Move A to view center (250, 100), i.e. page center (250, 200).
    view.move_overlay(&a, GesturePhase::Began, Point::new(50.0, 275.0));
    view.move_overlay(&a, GesturePhase::Changed, Point::new(250.0, 100.0));
    view.move_overlay(&a, GesturePhase::Ended, Point::new(250.0, 100.0));

    let b = view.place_signature(signature(100, 50)).unwrap().unwrap();
    assert!(view.overlay(&a).unwrap().is_hidden());
    assert!(!view.overlay(&b).unwrap().is_hidden());

    assert_eq!(view.handle_tap(Point::new(250.0, 100.0)), Some(a.clone()));
    assert!(!view.overlay(&a).unwrap().is_hidden());
    assert!(view.overlay(&b).unwrap().is_hidden());
    assert_eq!(view.visible_overlays().count(), 1);

    assert_eq!(view.handle_tap(Point::new(50.0, 275.0)), Some(b.clone()));
    assert!(view.overlay(&a).unwrap().is_hidden());
    assert!(!view.overlay(&b).unwrap().is_hidden());
}

#[test]
fn tap_within_inset_selects_and_far_tap_does_not() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    view.hide_overlays();

    // Stamp spans view x 0..100, y 250..300; 20 points right of it still hits.
    assert_eq!(view.handle_tap(Point::new(120.0, 260.0)), Some(id));
    assert_eq!(view.handle_tap(Point::new(160.0, 260.0)), None);
}

#[test]
fn tap_restores_original_zoom() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    view.viewer_mut().set_scale_factor(3.0);
    assert_eq!(view.page_original_scale(), 1.0);

    // At zoom 3 the stamp covers view x 0..300, y 750..900.
    assert_eq!(view.handle_tap(Point::new(150.0, 800.0)), Some(id.clone()));
    assert_eq!(view.viewer().scale_factor(), 1.0);
    let overlay = view.overlay(&id).unwrap();
    assert_eq!(overlay.center(), Point::new(50.0, 275.0));
}

#[test]
fn close_removes_one_stamp_and_one_overlay() {
    let mut view = single_page_view();
    let a = view.place_signature(signature(100, 50)).unwrap().unwrap();
    view.move_overlay(&a, GesturePhase::Began, Point::new(50.0, 275.0));
    view.move_overlay(&a, GesturePhase::Changed, Point::new(250.0, 100.0));
    view.move_overlay(&a, GesturePhase::Ended, Point::new(250.0, 100.0));
    let b = view.place_signature(signature(100, 50)).unwrap().unwrap();
    view.viewer_mut()
        .page_mut(0)
        .unwrap()
        .add_annotation(MarkupAnnotation::new(Rect::new(0.0, 0.0, 10.0, 10.0)));

    view.handle_tap(Point::new(250.0, 100.0));
    let close = view.overlay(&a).unwrap().handle_frame(HandleKind::Close).center();
    assert_eq!(view.handle_tap(close), None);

    let page = view.viewer().page(0).unwrap();
    assert_eq!(page.annotations().len(), 2);
    assert!(page.stamp(&a).is_none());
    assert!(page.stamp(&b).is_some());
    assert_eq!(view.overlays().len(), 1);
    assert!(view.overlay(&a).is_none());
}

#[test]
fn pan_routes_to_rotate_handle_or_body() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();

    // Nothing under the finger.
    assert!(!view.handle_pan(GesturePhase::Began, Point::new(300.0, 20.0)));
    assert!(!view.handle_pan(GesturePhase::Changed, Point::new(310.0, 20.0)));

    // Body drag.
    assert!(view.handle_pan(GesturePhase::Began, Point::new(40.0, 270.0)));
    assert!(view.handle_pan(GesturePhase::Changed, Point::new(140.0, 170.0)));
    assert!(view.handle_pan(GesturePhase::Ended, Point::new(140.0, 170.0)));
    assert!(!view.handle_pan(GesturePhase::Changed, Point::new(0.0, 0.0)));
    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert_eq!(stamp.center(), Point::new(150.0, 125.0));

    // Rotate handle drag, straight away from the center.
    let overlay = view.overlay(&id).unwrap();
    let center = overlay.center();
    let grip = overlay.handle_frame(HandleKind::Rotate).center();
    let far = Point::new(
        center.x + (grip.x - center.x) * 2.0,
        center.y + (grip.y - center.y) * 2.0,
    );
    assert!(view.handle_pan(GesturePhase::Began, grip));
    assert!(view.handle_pan(GesturePhase::Changed, far));
    assert!(view.handle_pan(GesturePhase::Ended, far));

    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert!((stamp.scale() - 2.0).abs() < 1e-9);
    assert!(stamp.angle().abs() < 1e-9);
}

#[test]
fn page_change_recaptures_zoom() {
    let mut view = SignView::new(
        PagedViewer::blank(3, Size::new(200.0, 200.0)).with_scale_factor(2.0),
        SignViewOptions::default(),
    );
    assert_eq!(view.page_original_scale(), 2.0);
    view.viewer_mut().set_scale_factor(4.0);
    assert!(view.go_to_page(2));
    assert_eq!(view.page_original_scale(), 4.0);
    assert!(!view.go_to_page(9));
}

#[test]
fn events_apply_to_current_page_only() {
    let mut view = SignView::new(
        PagedViewer::blank(2, Size::new(200.0, 200.0)),
        SignViewOptions::default(),
    );
    let id = view.place_signature(signature(40, 20)).unwrap().unwrap();
    view.go_to_page(1);

    let center = view.overlay(&id).unwrap().center();
    view.move_overlay(&id, GesturePhase::Began, center);
    view.move_overlay(&id, GesturePhase::Changed, center.translated(30.0, 0.0));

    // Stamp lives on page 0 while page 1 is current: silently ignored.
    let stamp = view.viewer().page(0).unwrap().stamp(&id).unwrap();
    assert_eq!(stamp.center(), Point::new(20.0, 10.0));
}
