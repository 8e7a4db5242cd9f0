use std::path::PathBuf;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use pdfsign::{
    init_logging, paged_viewer, sign_view_options, Config, DocumentPage, DocumentViewer,
    GesturePhase, HandleKind, Point, SignView, SignatureImage, Size, BUILD_DATE, VERSION,
};

/// US Letter in points.
const PAGE_SIZE: Size = Size {
    width: 612.0,
    height: 792.0,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("PDFSign {} (built {})", VERSION, BUILD_DATE);

    let mut args = std::env::args_os().skip(1);
    let signature_path = args.next().map(PathBuf::from);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("signed-page.png"));

    let config = match Config::default_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        Err(e) => {
            tracing::warn!("{}; using default settings", e);
            Config::default()
        }
    };

    let viewer = paged_viewer(&config, vec![DocumentPage::new(0, PAGE_SIZE)]);
    let mut view = SignView::new(viewer, sign_view_options(&config));

    let signature = match signature_path {
        Some(path) => SignatureImage::open(&path)?,
        None => synthetic_signature()?,
    };
    let identity = view
        .place_signature(signature)?
        .context("Document has no pages")?;

    // Drag the stamp to the middle of the page.
    let start = view
        .overlay(&identity)
        .map(|o| o.center())
        .context("Overlay missing after placement")?;
    let target = view
        .viewer()
        .convert_point_from_page(Point::new(PAGE_SIZE.width / 2.0, PAGE_SIZE.height / 2.0), 0)
        .context("Page 0 cannot be converted to view space")?;
    let midway = Point::new((start.x + target.x) / 2.0, (start.y + target.y) / 2.0);
    view.handle_pan(GesturePhase::Began, start);
    view.handle_pan(GesturePhase::Changed, midway);
    view.handle_pan(GesturePhase::Changed, target);
    view.handle_pan(GesturePhase::Ended, target);

    // Turn it by 20 degrees and enlarge it by half with the rotate handle.
    let (center, grip) = view
        .overlay(&identity)
        .map(|o| (o.center(), o.handle_frame(HandleKind::Rotate).center()))
        .context("Overlay missing after move")?;
    let (sin, cos) = 20f64.to_radians().sin_cos();
    let (dx, dy) = (grip.x - center.x, grip.y - center.y);
    let release = Point::new(
        center.x + 1.5 * (dx * cos - dy * sin),
        center.y + 1.5 * (dx * sin + dy * cos),
    );
    view.handle_pan(GesturePhase::Began, grip);
    view.handle_pan(GesturePhase::Changed, release);
    view.handle_pan(GesturePhase::Ended, release);

    if let Some(stamp) = view.viewer().page(0).and_then(|p| p.stamp(&identity)) {
        tracing::info!(
            "Stamp {}: angle {:.1} scale {:.2} bounds {:?}",
            identity,
            stamp.angle(),
            stamp.scale(),
            stamp.bounds()
        );
    }

    let image = view.render_page(0, 1.0)?;
    image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote {}", output.display());

    Ok(())
}

/// Wavy ink stroke used when no signature file is given.
fn synthetic_signature() -> pdfsign::Result<SignatureImage> {
    const WIDTH: u32 = 240;
    const HEIGHT: u32 = 80;
    let ink = Rgba([20, 30, 120, 255]);

    let mut pixels = RgbaImage::new(WIDTH, HEIGHT);
    for x in 0..WIDTH {
        let wave = 40.0 + 22.0 * (x as f64 / 14.0).sin() * (x as f64 / 60.0).cos();
        for dy in -2i32..=2 {
            let y = wave.round() as i32 + dy;
            if (0..HEIGHT as i32).contains(&y) {
                pixels.put_pixel(x, y as u32, ink);
            }
        }
    }
    SignatureImage::from_rgba(pixels)
}
