//! Document viewer collaborator.
//!
//! The viewer owns the pages and maps between view space (y-down, origin at
//! the top-left of the scrollable document) and each page's own page space
//! (y-up, origin at the bottom-left of the media box, in points).
//!
//! `PagedViewer` stacks pages vertically with a fixed gap:
//! ```text
//! view_x = page_x * zoom
//! view_y = page_top + (page_height - page_y) * zoom
//! ```

use pdfsign_core::constants::{MAX_SCALE_FACTOR, MIN_SCALE_FACTOR, PAGE_GAP};
use pdfsign_core::{Point, Rect, Size};

use crate::page::DocumentPage;

/// Page navigation, zoom and coordinate conversion.
pub trait DocumentViewer {
    fn page_count(&self) -> usize;

    /// Index of the page currently shown, if the document has any pages.
    fn current_page(&self) -> Option<usize>;

    /// Shows page `index`. Returns true when the current page changed.
    fn go_to_page(&mut self, index: usize) -> bool;

    fn page(&self, index: usize) -> Option<&DocumentPage>;

    fn page_mut(&mut self, index: usize) -> Option<&mut DocumentPage>;

    /// Page under `point`; with `nearest`, the closest page when none is hit.
    fn page_at(&self, point: Point, nearest: bool) -> Option<usize>;

    fn scale_factor(&self) -> f64;

    fn set_scale_factor(&mut self, scale: f64);

    fn convert_point_to_page(&self, point: Point, page: usize) -> Option<Point>;

    fn convert_point_from_page(&self, point: Point, page: usize) -> Option<Point>;

    /// View-space bounding box of a page-space rectangle.
    fn convert_rect_from_page(&self, rect: Rect, page: usize) -> Option<Rect> {
        let corners = rect
            .corners()
            .into_iter()
            .map(|c| self.convert_point_from_page(c, page))
            .collect::<Option<Vec<_>>>()?;
        Some(Rect::bounding(corners))
    }
}

/// In-memory viewer over a list of pages.
#[derive(Debug, Clone)]
pub struct PagedViewer {
    pages: Vec<DocumentPage>,
    current: usize,
    scale: f64,
    page_gap: f64,
}

impl PagedViewer {
    pub fn new(pages: Vec<DocumentPage>) -> Self {
        Self {
            pages,
            current: 0,
            scale: 1.0,
            page_gap: PAGE_GAP,
        }
    }

    /// Builds `count` blank pages of the same media size.
    pub fn blank(count: usize, size: Size) -> Self {
        Self::new((0..count).map(|i| DocumentPage::new(i, size)).collect())
    }

    pub fn with_page_gap(mut self, gap: f64) -> Self {
        if gap.is_finite() && gap >= 0.0 {
            self.page_gap = gap;
        }
        self
    }

    pub fn with_scale_factor(mut self, scale: f64) -> Self {
        self.set_scale_factor(scale);
        self
    }

    pub fn page_gap(&self) -> f64 {
        self.page_gap
    }

    /// View-space frame of a page at the current zoom.
    pub fn page_frame(&self, index: usize) -> Option<Rect> {
        let page = self.pages.get(index)?;
        let top: f64 = self.pages[..index]
            .iter()
            .map(|p| p.size().height * self.scale + self.page_gap)
            .sum();
        let size = page.size().scaled(self.scale);
        Some(Rect::new(0.0, top, size.width, size.height))
    }
}

impl DocumentViewer for PagedViewer {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> Option<usize> {
        (self.current < self.pages.len()).then_some(self.current)
    }

    fn go_to_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() || index == self.current {
            return false;
        }
        tracing::debug!("Viewer: page {} -> {}", self.current, index);
        self.current = index;
        true
    }

    fn page(&self, index: usize) -> Option<&DocumentPage> {
        self.pages.get(index)
    }

    fn page_mut(&mut self, index: usize) -> Option<&mut DocumentPage> {
        self.pages.get_mut(index)
    }

    fn page_at(&self, point: Point, nearest: bool) -> Option<usize> {
        let frames = (0..self.pages.len()).filter_map(|i| self.page_frame(i).map(|f| (i, f)));

        let mut closest: Option<(usize, f64)> = None;
        for (index, frame) in frames {
            if frame.contains(&point) {
                return Some(index);
            }
            let dx = (frame.min_x() - point.x).max(point.x - frame.max_x()).max(0.0);
            let dy = (frame.min_y() - point.y).max(point.y - frame.max_y()).max(0.0);
            let gap = dx.hypot(dy);
            if closest.map_or(true, |(_, best)| gap < best) {
                closest = Some((index, gap));
            }
        }

        if nearest {
            closest.map(|(index, _)| index)
        } else {
            None
        }
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Sets the zoom, clamped to the supported range. Non-finite values are ignored.
    fn set_scale_factor(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR);
        }
    }

    fn convert_point_to_page(&self, point: Point, page: usize) -> Option<Point> {
        let frame = self.page_frame(page)?;
        let height = self.pages[page].size().height;
        Some(Point::new(
            point.x / self.scale,
            height - (point.y - frame.min_y()) / self.scale,
        ))
    }

    fn convert_point_from_page(&self, point: Point, page: usize) -> Option<Point> {
        let frame = self.page_frame(page)?;
        let height = self.pages[page].size().height;
        Some(Point::new(
            point.x * self.scale,
            frame.min_y() + (height - point.y) * self.scale,
        ))
    }
}
