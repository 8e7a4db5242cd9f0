//! Document pages and the annotations they host.

use pdfsign_core::{AnnotationIdentity, Rect, Result, Size};

use crate::annotation::DocumentAnnotation;
use crate::render::GraphicsContext;

/// Annotation that did not come from this crate (form fields, ink, links...).
/// Only its identity tag and bounds are known.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupAnnotation {
    pub identity: Option<AnnotationIdentity>,
    pub bounds: Rect,
}

impl MarkupAnnotation {
    pub fn new(bounds: Rect) -> Self {
        Self {
            identity: None,
            bounds,
        }
    }
}

/// Any annotation a page can carry.
#[derive(Debug, Clone)]
pub enum PageAnnotation {
    Stamp(DocumentAnnotation),
    Markup(MarkupAnnotation),
}

impl PageAnnotation {
    pub fn identity(&self) -> Option<&AnnotationIdentity> {
        match self {
            PageAnnotation::Stamp(stamp) => Some(stamp.identity()),
            PageAnnotation::Markup(markup) => markup.identity.as_ref(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            PageAnnotation::Stamp(stamp) => stamp.bounds(),
            PageAnnotation::Markup(markup) => markup.bounds,
        }
    }

    pub fn as_stamp(&self) -> Option<&DocumentAnnotation> {
        match self {
            PageAnnotation::Stamp(stamp) => Some(stamp),
            PageAnnotation::Markup(_) => None,
        }
    }

    pub fn as_stamp_mut(&mut self) -> Option<&mut DocumentAnnotation> {
        match self {
            PageAnnotation::Stamp(stamp) => Some(stamp),
            PageAnnotation::Markup(_) => None,
        }
    }
}

impl From<DocumentAnnotation> for PageAnnotation {
    fn from(stamp: DocumentAnnotation) -> Self {
        PageAnnotation::Stamp(stamp)
    }
}

impl From<MarkupAnnotation> for PageAnnotation {
    fn from(markup: MarkupAnnotation) -> Self {
        PageAnnotation::Markup(markup)
    }
}

/// One page of a document: media size in points, intrinsic rotation and the
/// annotations drawn on top, in insertion order.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    index: usize,
    size: Size,
    rotation: f64,
    annotations: Vec<PageAnnotation>,
}

impl DocumentPage {
    pub fn new(index: usize, size: Size) -> Self {
        Self {
            index,
            size,
            rotation: 0.0,
            annotations: Vec::new(),
        }
    }

    /// Sets the intrinsic rotation, snapped to the nearest quarter turn.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = ((degrees / 90.0).round() * 90.0).rem_euclid(360.0);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Page-space rectangle covered by the media box.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.width, self.size.height)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn annotations(&self) -> &[PageAnnotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: impl Into<PageAnnotation>) {
        let annotation = annotation.into();
        tracing::trace!(
            "Page {}: adding annotation {:?}",
            self.index,
            annotation.identity().map(AnnotationIdentity::as_str)
        );
        self.annotations.push(annotation);
    }

    /// Removes the first annotation tagged with `identity`.
    pub fn remove_annotation(&mut self, identity: &AnnotationIdentity) -> Option<PageAnnotation> {
        let position = self
            .annotations
            .iter()
            .position(|a| a.identity() == Some(identity))?;
        Some(self.annotations.remove(position))
    }

    /// Image stamps in page order, skipping foreign markup.
    pub fn stamps(&self) -> impl Iterator<Item = &DocumentAnnotation> {
        self.annotations.iter().filter_map(PageAnnotation::as_stamp)
    }

    pub fn stamp(&self, identity: &AnnotationIdentity) -> Option<&DocumentAnnotation> {
        self.stamps().find(|s| s.identity() == identity)
    }

    pub fn stamp_mut(&mut self, identity: &AnnotationIdentity) -> Option<&mut DocumentAnnotation> {
        self.annotations
            .iter_mut()
            .filter_map(PageAnnotation::as_stamp_mut)
            .find(|s| s.identity() == identity)
    }

    /// True when any stamp has a pending redraw request.
    pub fn needs_display(&self) -> bool {
        self.stamps().any(DocumentAnnotation::needs_display)
    }

    /// Clears every pending redraw request. Returns how many were pending.
    pub fn mark_displayed(&mut self) -> usize {
        self.annotations
            .iter_mut()
            .filter_map(PageAnnotation::as_stamp_mut)
            .map(DocumentAnnotation::take_needs_display)
            .filter(|pending| *pending)
            .count()
    }

    /// Draws every stamp in page order.
    pub fn draw<C>(&self, ctx: &mut C) -> Result<()>
    where
        C: GraphicsContext + ?Sized,
    {
        for stamp in self.stamps() {
            stamp.draw(ctx, self.rotation)?;
        }
        Ok(())
    }
}
