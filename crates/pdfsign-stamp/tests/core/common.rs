use image::{Rgba, RgbaImage};
use pdfsign_core::Size;
use pdfsign_stamp::{PagedViewer, SignView, SignViewOptions, SignatureImage};

pub const INK: [u8; 4] = [20, 40, 160, 255];

pub fn signature(width: u32, height: u32) -> SignatureImage {
    SignatureImage::from_rgba(RgbaImage::from_pixel(width, height, Rgba(INK))).unwrap()
}

/// One 400x300 page at zoom 1, no gap concerns.
pub fn single_page_view() -> SignView<PagedViewer> {
    SignView::new(
        PagedViewer::blank(1, Size::new(400.0, 300.0)),
        SignViewOptions::default(),
    )
}
