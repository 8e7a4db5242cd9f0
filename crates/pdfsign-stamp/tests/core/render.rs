use crate::common::{signature, single_page_view, INK};
use image::Rgba;
use pdfsign_core::{Point, Size};
use pdfsign_stamp::{
    render_page, DocumentPage, DocumentViewer, PagedViewer, SignView, SignViewOptions,
    SignatureImage,
};
use tempfile::TempDir;

const WHITE: [u8; 4] = [255, 255, 255, 255];

#[test]
fn rendered_page_shows_stamp_where_it_lies() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    assert!(view.viewer().page(0).unwrap().needs_display());

    let image = view.render_page(0, 1.0).unwrap();
    assert_eq!(image.dimensions(), (400, 300));
    // Page-space (0, 0, 100, 50) is the bottom-left corner of the bitmap.
    assert_eq!(image.get_pixel(50, 275).0, INK);
    assert_eq!(image.get_pixel(300, 20).0, WHITE);
    assert!(!view.viewer().page(0).unwrap().needs_display());
    assert!(view.viewer().page(0).unwrap().stamp(&id).is_some());
}

#[test]
fn rendering_honors_stamp_angle() {
    let mut view = single_page_view();
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    let stamp = view
        .viewer_mut()
        .page_mut(0)
        .unwrap()
        .stamp_mut(&id)
        .unwrap();
    stamp.set_center(Point::new(200.0, 150.0));
    stamp.set_angle(90.0);

    // Upright the stamp spans x 150..250; turned it spans x 175..225, y 100..200.
    let image = view.render_page(0, 1.0).unwrap();
    assert_eq!(image.get_pixel(200, 110).0, INK);
    assert_eq!(image.get_pixel(240, 150).0, WHITE);
}

#[test]
fn rendering_adds_page_rotation() {
    let page = DocumentPage::new(0, Size::new(400.0, 300.0)).with_rotation(90.0);
    let mut view = SignView::new(PagedViewer::new(vec![page]), SignViewOptions::default());
    let id = view.place_signature(signature(100, 50)).unwrap().unwrap();
    view.viewer_mut()
        .page_mut(0)
        .unwrap()
        .stamp_mut(&id)
        .unwrap()
        .set_center(Point::new(200.0, 150.0));

    let image = render_page(view.viewer().page(0).unwrap(), 1.0).unwrap();
    assert_eq!(image.get_pixel(200, 110).0, INK);
    assert_eq!(image.get_pixel(240, 150).0, WHITE);
}

#[test]
fn render_scale_sizes_the_bitmap() {
    let mut view = single_page_view();
    view.place_signature(signature(100, 50)).unwrap();
    let image = view.render_page(0, 2.0).unwrap();
    assert_eq!(image.dimensions(), (800, 600));
    assert_eq!(image.get_pixel(100, 550).0, INK);
}

#[test]
fn signature_survives_png_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signature.png");
    signature(30, 10).pixels().save(&path).unwrap();

    let loaded = SignatureImage::open(&path).unwrap();
    assert_eq!(loaded.size(), Size::new(30.0, 10.0));
    assert_eq!(*loaded.pixels().get_pixel(0, 0), Rgba(INK));
}

#[test]
fn open_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(SignatureImage::open(&dir.path().join("absent.png")).is_err());
}
