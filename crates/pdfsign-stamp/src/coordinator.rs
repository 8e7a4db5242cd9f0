//! Sign view coordinator.
//!
//! `SignView` owns the document viewer (and through it the pages and their
//! stamps) plus one overlay control per placed signature. Stamps and overlays
//! never reference each other: the annotation identity is the only join key,
//! and every lookup happens on demand.
//!
//! Taps select a stamp by hit-testing its rotated view-space bounds; pans are
//! routed to the overlay under the finger; overlay events are converted from
//! view space into the current page's space and applied to the stamp.

use std::sync::Arc;

use image::RgbaImage;
use pdfsign_core::constants::{HANDLE_INSET, HIT_TEST_INSET};
use pdfsign_core::{rotate_rect, AnnotationIdentity, Point, Rect, RenderError, Result};

use crate::annotation::DocumentAnnotation;
use crate::overlay::{GesturePhase, HandleKind, OverlayControl, OverlayEvents, OverlayListener};
use crate::render::{self, SignatureImage};
use crate::viewer::DocumentViewer;

/// Interaction tuning for a sign view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignViewOptions {
    /// Margin around a stamp's rotated bounds that still selects it.
    pub hit_test_inset: f64,
    /// Overlay inset; handles are three insets wide.
    pub handle_inset: f64,
}

impl Default for SignViewOptions {
    fn default() -> Self {
        Self {
            hit_test_inset: HIT_TEST_INSET,
            handle_inset: HANDLE_INSET,
        }
    }
}

/// What an in-progress pan is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanTarget {
    Rotate,
    Move,
}

pub struct SignView<V: DocumentViewer> {
    viewer: V,
    overlays: Vec<OverlayControl>,
    page_original_scale: f64,
    options: SignViewOptions,
    active_pan: Option<(AnnotationIdentity, PanTarget)>,
}

impl<V: DocumentViewer> SignView<V> {
    pub fn new(viewer: V, options: SignViewOptions) -> Self {
        let page_original_scale = viewer.scale_factor();
        Self {
            viewer,
            overlays: Vec::new(),
            page_original_scale,
            options,
            active_pan: None,
        }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn options(&self) -> &SignViewOptions {
        &self.options
    }

    pub fn overlays(&self) -> &[OverlayControl] {
        &self.overlays
    }

    pub fn overlay(&self, identity: &AnnotationIdentity) -> Option<&OverlayControl> {
        self.overlays.iter().find(|o| o.identity() == identity)
    }

    fn overlay_mut(&mut self, identity: &AnnotationIdentity) -> Option<&mut OverlayControl> {
        self.overlays.iter_mut().find(|o| o.identity() == identity)
    }

    /// Overlays currently shown.
    pub fn visible_overlays(&self) -> impl Iterator<Item = &OverlayControl> {
        self.overlays.iter().filter(|o| !o.is_hidden())
    }

    /// Zoom the viewer returns to when a stamp is selected.
    pub fn page_original_scale(&self) -> f64 {
        self.page_original_scale
    }

    /// Places `image` at the origin of the current page at its natural size and
    /// shows an overlay for it, hiding the others.
    ///
    /// Returns `Ok(None)` when the document has no current page.
    pub fn place_signature(
        &mut self,
        image: impl Into<Arc<SignatureImage>>,
    ) -> Result<Option<AnnotationIdentity>> {
        let image = image.into();
        let Some(page_index) = self.viewer.current_page() else {
            tracing::debug!("No current page, signature not placed");
            return Ok(None);
        };

        let size = image.size();
        let bounds = Rect::new(0.0, 0.0, size.width, size.height);
        let identity = AnnotationIdentity::generate();
        let stamp = DocumentAnnotation::new(identity.clone(), bounds, image)?;

        let Some(frame) = self.viewer.convert_rect_from_page(bounds, page_index) else {
            tracing::debug!("Page {} cannot be converted to view space", page_index);
            return Ok(None);
        };
        let Some(page) = self.viewer.page_mut(page_index) else {
            return Ok(None);
        };
        page.add_annotation(stamp);

        self.hide_overlays();
        self.overlays.push(OverlayControl::new(
            frame,
            identity.clone(),
            self.options.handle_inset,
        ));
        tracing::info!("Placed signature {} on page {}", identity, page_index);
        Ok(Some(identity))
    }

    /// First stamp on `page_index` whose rotated view-space bounds, grown by
    /// `inset`, contain the view-space `point`.
    pub fn find_annotation(
        &self,
        page_index: usize,
        point: Point,
        inset: f64,
    ) -> Option<AnnotationIdentity> {
        let page = self.viewer.page(page_index)?;
        page.stamps()
            .find(|stamp| {
                self.viewer
                    .convert_rect_from_page(stamp.bounds(), page_index)
                    .map(|view| rotate_rect(&view, stamp.angle()).inset_by(-inset, -inset))
                    .is_some_and(|area| area.contains(&point))
            })
            .map(|stamp| stamp.identity().clone())
    }

    /// Rotated view-space bounds of a stamp.
    fn stamp_view_bounds(&self, page_index: usize, identity: &AnnotationIdentity) -> Option<Rect> {
        let stamp = self.viewer.page(page_index)?.stamp(identity)?;
        let view = self
            .viewer
            .convert_rect_from_page(stamp.bounds(), page_index)?;
        Some(rotate_rect(&view, stamp.angle()))
    }

    /// Handles a single tap in view space.
    ///
    /// A tap on a visible close handle closes that overlay. Otherwise the
    /// stamp under the tap is selected: the zoom returns to the page's
    /// original scale and the stamp's overlay is centered on it and shown
    /// alone. Returns the selected identity.
    pub fn handle_tap(&mut self, point: Point) -> Option<AnnotationIdentity> {
        let closing = self
            .visible_overlays()
            .find(|o| o.hit_handle(point) == Some(HandleKind::Close))
            .map(|o| o.identity().clone());
        if let Some(identity) = closing {
            self.close_overlay(&identity);
            return None;
        }

        let page_index = self.viewer.page_at(point, true)?;
        let identity = self.find_annotation(page_index, point, self.options.hit_test_inset)?;
        tracing::debug!("Tap selected {} on page {}", identity, page_index);

        if self.viewer.current_page() != Some(page_index) {
            self.go_to_page(page_index);
        }
        self.viewer.set_scale_factor(self.page_original_scale);
        self.show_annotation(page_index, &identity);
        Some(identity)
    }

    /// Centers the overlay for `identity` on its stamp and shows it alone.
    pub fn show_annotation(&mut self, page_index: usize, identity: &AnnotationIdentity) -> bool {
        let Some(area) = self.stamp_view_bounds(page_index, identity) else {
            tracing::debug!("No stamp {} on page {}", identity, page_index);
            return false;
        };
        let Some(overlay) = self.overlay_mut(identity) else {
            tracing::debug!("No overlay for {}", identity);
            return false;
        };
        overlay.set_center(area.center());
        overlay.set_hidden(false);

        for other in self.overlays.iter_mut().filter(|o| o.identity() != identity) {
            other.set_hidden(true);
        }
        true
    }

    /// Gesture arbitration: a touch on a stamp belongs to the overlay, so the
    /// viewer's own gestures must not wait for it. Any other touch dismisses
    /// every overlay.
    pub fn should_require_failure(&mut self, point: Point) -> bool {
        let on_stamp = self
            .viewer
            .page_at(point, true)
            .and_then(|page| self.find_annotation(page, point, self.options.hit_test_inset))
            .is_some();
        if on_stamp {
            return false;
        }
        self.hide_overlays();
        true
    }

    pub fn hide_overlays(&mut self) {
        for overlay in &mut self.overlays {
            overlay.set_hidden(true);
        }
    }

    /// Recaptures the zoom after the viewer moved to another page.
    pub fn page_changed(&mut self) {
        self.page_original_scale = self.viewer.scale_factor();
        tracing::trace!("Page original scale now {}", self.page_original_scale);
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        let changed = self.viewer.go_to_page(index);
        if changed {
            self.page_changed();
        }
        changed
    }

    /// Routes a pan to the visible overlay under the touch.
    ///
    /// `Began` picks the target: the rotate handle starts a rotate gesture,
    /// the body starts a move. Later phases go to the same target. Returns
    /// whether an overlay consumed the sample.
    pub fn handle_pan(&mut self, phase: GesturePhase, point: Point) -> bool {
        if phase == GesturePhase::Began {
            let hit = self.visible_overlays().find_map(|o| {
                let target = match o.hit_handle(point) {
                    Some(HandleKind::Rotate) => PanTarget::Rotate,
                    _ if o.contains(point) => PanTarget::Move,
                    _ => return None,
                };
                Some((o.identity().clone(), target))
            });
            self.active_pan = hit;
        }

        let Some((identity, target)) = self.active_pan.clone() else {
            return false;
        };
        if matches!(phase, GesturePhase::Ended | GesturePhase::Cancelled) {
            self.active_pan = None;
        }

        match target {
            PanTarget::Rotate => self.rotate_overlay(&identity, phase, point),
            PanTarget::Move => self.move_overlay(&identity, phase, point),
        }
    }

    /// Drives the rotate handle of the overlay for `identity`.
    pub fn rotate_overlay(
        &mut self,
        identity: &AnnotationIdentity,
        phase: GesturePhase,
        touch: Point,
    ) -> bool {
        let Some(overlay) = self.overlay_mut(identity) else {
            tracing::debug!("No overlay for {}", identity);
            return false;
        };
        let events = overlay.rotate_gesture(phase, touch);
        self.dispatch(identity, events);
        true
    }

    /// Drives the body drag of the overlay for `identity`.
    pub fn move_overlay(
        &mut self,
        identity: &AnnotationIdentity,
        phase: GesturePhase,
        touch: Point,
    ) -> bool {
        let Some(overlay) = self.overlay_mut(identity) else {
            tracing::debug!("No overlay for {}", identity);
            return false;
        };
        let events = overlay.move_gesture(phase, touch);
        self.dispatch(identity, events);
        true
    }

    /// Closes the overlay for `identity` and removes its stamp.
    pub fn close_overlay(&mut self, identity: &AnnotationIdentity) -> bool {
        let Some(position) = self.overlays.iter().position(|o| o.identity() == identity) else {
            tracing::debug!("No overlay for {}", identity);
            return false;
        };
        let overlay = self.overlays.remove(position);
        if self.active_pan.as_ref().is_some_and(|(id, _)| id == identity) {
            self.active_pan = None;
        }
        self.dispatch(identity, overlay.close());
        true
    }

    fn dispatch(&mut self, identity: &AnnotationIdentity, events: OverlayEvents) {
        let mut sync = AnnotationSync {
            viewer: &mut self.viewer,
        };
        for event in &events {
            event.dispatch(identity, &mut sync);
        }
    }

    /// Renders page `index` with its stamps and clears their redraw requests.
    pub fn render_page(&mut self, index: usize, scale: f64) -> Result<RgbaImage> {
        let page = self
            .viewer
            .page(index)
            .ok_or(RenderError::PageNotFound { index })?;
        let image = render::render_page(page, scale)?;
        if let Some(page) = self.viewer.page_mut(index) {
            let redrawn = page.mark_displayed();
            tracing::debug!("Rendered page {} ({} stamps updated)", index, redrawn);
        }
        Ok(image)
    }
}

/// Applies overlay events to the stamps of the viewer's current page.
struct AnnotationSync<'a, V: DocumentViewer> {
    viewer: &'a mut V,
}

impl<V: DocumentViewer> AnnotationSync<'_, V> {
    fn current_stamp(&mut self, identity: &AnnotationIdentity) -> Option<&mut DocumentAnnotation> {
        let Some(index) = self.viewer.current_page() else {
            tracing::debug!("No current page for {}", identity);
            return None;
        };
        let stamp = self
            .viewer
            .page_mut(index)
            .and_then(|page| page.stamp_mut(identity));
        if stamp.is_none() {
            tracing::debug!("No stamp {} on page {}", identity, index);
        }
        stamp
    }
}

impl<V: DocumentViewer> OverlayListener for AnnotationSync<'_, V> {
    fn on_move(&mut self, identity: &AnnotationIdentity, center: Point) {
        let Some(index) = self.viewer.current_page() else {
            return;
        };
        let Some(page_point) = self.viewer.convert_point_to_page(center, index) else {
            return;
        };
        if let Some(stamp) = self.current_stamp(identity) {
            stamp.set_center(page_point);
        }
    }

    fn on_scale(&mut self, identity: &AnnotationIdentity, scale: f64) {
        if let Some(stamp) = self.current_stamp(identity) {
            stamp.set_scale(scale);
        }
    }

    /// View space is y-down and page space y-up, so the angle flips sign.
    fn on_rotate(&mut self, identity: &AnnotationIdentity, degrees: f64) {
        if let Some(stamp) = self.current_stamp(identity) {
            stamp.set_angle(-degrees);
        }
    }

    fn on_close(&mut self, identity: &AnnotationIdentity) {
        let removed = self
            .viewer
            .current_page()
            .and_then(|index| self.viewer.page_mut(index))
            .and_then(|page| page.remove_annotation(identity));
        if removed.is_none() {
            tracing::debug!("Close: no annotation {} on current page", identity);
        }
    }
}
